//! Event store abstraction.
//!
//! This module defines the [`EventStore`] trait that abstracts over persistence
//! backends. The view-model only ever talks to this trait, so the backing
//! engine can be swapped without touching list logic.
//!
//! # Commit Semantics
//!
//! Writes are staged: [`insert`](EventStore::insert), [`update`](EventStore::update)
//! and [`delete`](EventStore::delete) never touch committed data. A single
//! [`save`](EventStore::save) applies every staged change atomically, and
//! [`rollback`](EventStore::rollback) discards them. Reads only ever observe
//! committed data.

use crate::domain::error::Result;
use crate::domain::Event;
use crate::storage::query::EventQuery;
use uuid::Uuid;

/// Abstraction over persistent event storage backends.
///
/// # Implementations
///
/// - [`JsonEventStore`](crate::storage::JsonEventStore): JSON file with atomic
///   writes, or purely in memory
///
/// # Examples
///
/// ```
/// use futurejoy::domain::{Event, NewEvent};
/// use futurejoy::storage::{EventQuery, EventStore, JsonEventStore};
///
/// let mut store = JsonEventStore::in_memory();
/// let now = chrono::Utc::now();
/// store.insert(Event::create(NewEvent::new("Concert", "🎸", now), now));
/// assert!(store.fetch(&EventQuery::all())?.is_empty());
///
/// store.save()?;
/// assert_eq!(store.fetch(&EventQuery::all())?.len(), 1);
/// # Ok::<(), futurejoy::FutureJoyError>(())
/// ```
pub trait EventStore: Send {
    /// Stages a new event for insertion.
    ///
    /// Inserting an id that already exists makes the next [`save`](Self::save) fail.
    fn insert(&mut self, event: Event);

    /// Stages a replacement of an existing event, matched by id.
    ///
    /// Updating an id that does not exist makes the next [`save`](Self::save) fail.
    fn update(&mut self, event: Event);

    /// Stages removal of the event with the given id.
    ///
    /// Deleting an unknown id is a no-op at commit time.
    fn delete(&mut self, id: Uuid);

    /// Atomically commits every staged change.
    ///
    /// # Errors
    ///
    /// Returns an error if any staged change conflicts with committed data or
    /// the backend cannot persist. On error nothing is committed and the staged
    /// changes remain until [`rollback`](Self::rollback) is called.
    fn save(&mut self) -> Result<()>;

    /// Discards every staged change.
    fn rollback(&mut self);

    /// Whether there are staged changes waiting for [`save`](Self::save).
    fn has_changes(&self) -> bool;

    /// Returns committed events matching the query, in the query's order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn fetch(&self, query: &EventQuery) -> Result<Vec<Event>>;

    /// Looks up a single committed event by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, id: Uuid) -> Result<Option<Event>>;
}
