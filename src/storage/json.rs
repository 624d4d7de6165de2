//! JSON file-based event store.
//!
//! This module provides a simple, human-readable store implementation using
//! JSON serialization. Committed events are held in memory; each successful
//! [`save`](EventStore::save) rewrites the whole file using an atomic
//! write-to-temp + rename so a crash never leaves a half-written store.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(n) filter + sort over the in-memory set
//! - **Commit**: O(n) - serializes and writes the entire dataset
//! - **Best for**: personal-scale data, a few thousand events at most

use crate::domain::error::{FutureJoyError, Result};
use crate::domain::Event;
use crate::storage::backend::EventStore;
use crate::storage::models::{EventRecord, StoreFile, STORE_FORMAT_VERSION};
use crate::storage::query::EventQuery;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A write waiting for the next commit.
#[derive(Debug, Clone)]
enum StagedChange {
    Insert(Event),
    Update(Event),
    Delete(Uuid),
}

/// JSON file event store.
///
/// Created either backed by a file ([`JsonEventStore::open`]) or purely in
/// memory ([`JsonEventStore::in_memory`]); both share the same staging and
/// commit logic.
///
/// # Thread Safety
///
/// This type is `Send` but not `Sync`. It is owned by the single view-model
/// task and never shared.
pub struct JsonEventStore {
    /// Path to the JSON file on disk, `None` for an in-memory store.
    file_path: Option<PathBuf>,

    /// Committed events indexed by id.
    events: HashMap<Uuid, Event>,

    /// Changes staged since the last commit, in call order.
    staged: Vec<StagedChange>,
}

impl JsonEventStore {
    /// Creates or opens a file-backed store.
    ///
    /// If the file exists, loads existing data. Otherwise starts empty; the
    /// file is first written on the first successful commit. Parent
    /// directories are created automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - The file exists but contains invalid JSON
    /// - The file was written by a newer, unsupported format version
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use futurejoy::storage::JsonEventStore;
    ///
    /// let store = JsonEventStore::open("/tmp/futurejoy/events.json")?;
    /// # Ok::<(), futurejoy::FutureJoyError>(())
    /// ```
    pub fn open(file_path: impl Into<PathBuf>) -> Result<Self> {
        let file_path = file_path.into();
        tracing::debug!(path = ?file_path, "opening JSON event store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let events = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty store");
            HashMap::new()
        };

        tracing::debug!(event_count = events.len(), "store opened");

        Ok(Self {
            file_path: Some(file_path),
            events,
            staged: Vec::new(),
        })
    }

    /// Creates an empty store that never touches the filesystem.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            file_path: None,
            events: HashMap::new(),
            staged: Vec::new(),
        }
    }

    /// Path of the backing file, if any.
    #[must_use]
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    fn load_from_file(path: &Path) -> Result<HashMap<Uuid, Event>> {
        let contents = std::fs::read_to_string(path)?;
        let file: StoreFile = serde_json::from_str(&contents)
            .map_err(|e| FutureJoyError::Storage(format!("failed to parse JSON: {e}")))?;

        if file.version > STORE_FORMAT_VERSION {
            return Err(FutureJoyError::Storage(format!(
                "unsupported store version {} (expected at most {STORE_FORMAT_VERSION})",
                file.version
            )));
        }

        tracing::debug!(version = file.version, events = file.events.len(), "loaded store file");

        Ok(file
            .events
            .into_iter()
            .map(|record| (record.id, Event::from(record)))
            .collect())
    }

    /// Writes the given event set to disk using an atomic rename.
    fn write_to_file(path: &Path, events: &HashMap<Uuid, Event>) -> Result<()> {
        let mut records: Vec<EventRecord> = events.values().map(EventRecord::from).collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        let file = StoreFile {
            version: STORE_FORMAT_VERSION,
            events: records,
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| FutureJoyError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = path.with_extension("tmp");
        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, path)?;
        Ok(())
    }

    /// Applies the staged changes to a copy of the committed set.
    fn apply_staged(&self) -> Result<HashMap<Uuid, Event>> {
        let mut next = self.events.clone();

        for change in &self.staged {
            match change {
                StagedChange::Insert(event) => {
                    if next.contains_key(&event.id) {
                        return Err(FutureJoyError::Storage(format!(
                            "event {} already exists",
                            event.id
                        )));
                    }
                    next.insert(event.id, event.clone());
                }
                StagedChange::Update(event) => {
                    let slot = next
                        .get_mut(&event.id)
                        .ok_or(FutureJoyError::NotFound(event.id))?;
                    *slot = event.clone();
                }
                StagedChange::Delete(id) => {
                    if next.remove(id).is_none() {
                        tracing::debug!(event_id = %id, "ignoring delete of unknown event");
                    }
                }
            }
        }

        Ok(next)
    }
}

impl EventStore for JsonEventStore {
    fn insert(&mut self, event: Event) {
        tracing::trace!(event_id = %event.id, "staging insert");
        self.staged.push(StagedChange::Insert(event));
    }

    fn update(&mut self, event: Event) {
        tracing::trace!(event_id = %event.id, "staging update");
        self.staged.push(StagedChange::Update(event));
    }

    fn delete(&mut self, id: Uuid) {
        tracing::trace!(event_id = %id, "staging delete");
        self.staged.push(StagedChange::Delete(id));
    }

    fn save(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("json_save", staged = self.staged.len()).entered();

        if self.staged.is_empty() {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let next = self.apply_staged()?;

        if let Some(path) = &self.file_path {
            Self::write_to_file(path, &next)?;
        }

        self.events = next;
        self.staged.clear();
        tracing::debug!(event_count = self.events.len(), "store committed");
        Ok(())
    }

    fn rollback(&mut self) {
        if !self.staged.is_empty() {
            tracing::debug!(discarded = self.staged.len(), "rolling back staged changes");
        }
        self.staged.clear();
    }

    fn has_changes(&self) -> bool {
        !self.staged.is_empty()
    }

    fn fetch(&self, query: &EventQuery) -> Result<Vec<Event>> {
        let _span = tracing::debug_span!("json_fetch", is_archived = ?query.is_archived).entered();

        let events = query.apply(self.events.values());

        tracing::debug!(count = events.len(), "fetched events");
        Ok(events)
    }

    fn get(&self, id: Uuid) -> Result<Option<Event>> {
        Ok(self.events.get(&id).cloned())
    }
}

impl Drop for JsonEventStore {
    /// Uncommitted changes are dropped, never silently persisted.
    fn drop(&mut self) {
        if !self.staged.is_empty() {
            tracing::warn!(discarded = self.staged.len(), "dropping store with uncommitted changes");
        }
    }
}
