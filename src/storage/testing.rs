//! Failure-injecting store double for unit tests.

use crate::domain::error::{FutureJoyError, Result};
use crate::domain::Event;
use crate::storage::backend::EventStore;
use crate::storage::json::JsonEventStore;
use crate::storage::query::EventQuery;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Switches shared between a test and the [`FlakyStore`] it handed off.
#[derive(Debug, Default)]
pub struct Faults {
    pub fail_fetch: AtomicBool,
    pub fail_save: AtomicBool,
    pub saves: AtomicUsize,
    pub fetches: AtomicUsize,
    pub limit_gets: AtomicBool,
    pub gets_allowed: AtomicUsize,
    pub gets: AtomicUsize,
}

impl Faults {
    pub fn set_fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_save(&self, fail: bool) {
        self.fail_save.store(fail, Ordering::SeqCst);
    }

    /// Lets the next `allowed` calls to `get` succeed and fails every one after.
    pub fn fail_get_after(&self, allowed: usize) {
        self.gets_allowed.store(allowed, Ordering::SeqCst);
        self.gets.store(0, Ordering::SeqCst);
        self.limit_gets.store(true, Ordering::SeqCst);
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

/// In-memory store whose reads and commits can be made to fail on demand.
pub struct FlakyStore {
    inner: JsonEventStore,
    faults: Arc<Faults>,
}

impl FlakyStore {
    pub fn new() -> (Self, Arc<Faults>) {
        Self::with_events(Vec::new())
    }

    /// Creates a store pre-populated with committed events.
    pub fn with_events(events: Vec<Event>) -> (Self, Arc<Faults>) {
        let mut inner = JsonEventStore::in_memory();
        for event in events {
            inner.insert(event);
        }
        inner.save().expect("seeding in-memory store");

        let faults = Arc::new(Faults::default());
        (Self { inner, faults: Arc::clone(&faults) }, faults)
    }
}

impl EventStore for FlakyStore {
    fn insert(&mut self, event: Event) {
        self.inner.insert(event);
    }

    fn update(&mut self, event: Event) {
        self.inner.update(event);
    }

    fn delete(&mut self, id: Uuid) {
        self.inner.delete(id);
    }

    fn save(&mut self) -> Result<()> {
        self.faults.saves.fetch_add(1, Ordering::SeqCst);
        if self.faults.fail_save.load(Ordering::SeqCst) {
            return Err(FutureJoyError::Storage("injected save failure".to_string()));
        }
        self.inner.save()
    }

    fn rollback(&mut self) {
        self.inner.rollback();
    }

    fn has_changes(&self) -> bool {
        self.inner.has_changes()
    }

    fn fetch(&self, query: &EventQuery) -> Result<Vec<Event>> {
        self.faults.fetches.fetch_add(1, Ordering::SeqCst);
        if self.faults.fail_fetch.load(Ordering::SeqCst) {
            return Err(FutureJoyError::Storage("injected fetch failure".to_string()));
        }
        self.inner.fetch(query)
    }

    fn get(&self, id: Uuid) -> Result<Option<Event>> {
        if self.faults.fail_fetch.load(Ordering::SeqCst) {
            return Err(FutureJoyError::Storage("injected fetch failure".to_string()));
        }
        if self.faults.limit_gets.load(Ordering::SeqCst)
            && self.faults.gets.fetch_add(1, Ordering::SeqCst) >= self.faults.gets_allowed.load(Ordering::SeqCst)
        {
            return Err(FutureJoyError::Storage("injected get failure".to_string()));
        }
        self.inner.get(id)
    }
}
