//! Storage record models for the persistence layer.
//!
//! These types describe the on-disk layout and are kept separate from the
//! domain [`Event`] so the file format can evolve independently.

use crate::domain::Event;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current version of the store file layout.
pub const STORE_FORMAT_VERSION: u32 = 1;

/// Represents an event record in storage.
///
/// Optional text fields are omitted from the file when unset rather than
/// written as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: Uuid,
    pub title: String,
    pub emoji: String,
    pub date: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default)]
    pub is_archived: bool,

    pub created_at: DateTime<Utc>,
}

impl From<&Event> for EventRecord {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            title: event.title.clone(),
            emoji: event.emoji.clone(),
            date: event.date,
            location: event.location.clone(),
            category: event.category.clone(),
            notes: event.notes.clone(),
            is_archived: event.is_archived,
            created_at: event.created_at,
        }
    }
}

impl From<EventRecord> for Event {
    fn from(record: EventRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            emoji: record.emoji,
            date: record.date,
            location: record.location,
            category: record.category,
            notes: record.notes,
            is_archived: record.is_archived,
            created_at: record.created_at,
        }
    }
}

/// Top-level structure serialized to the store file.
///
/// ```json
/// {
///   "version": 1,
///   "events": [
///     {
///       "id": "6f1c0d9e-...",
///       "title": "Concert Night",
///       "emoji": "🎸",
///       "date": "2026-11-01T19:00:00Z",
///       "location": "Paris",
///       "is_archived": false,
///       "created_at": "2026-10-18T08:12:00Z"
///     }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreFile {
    /// Version of the storage format for future migrations.
    pub version: u32,

    #[serde(default)]
    pub events: Vec<EventRecord>,
}

impl Default for StoreFile {
    fn default() -> Self {
        Self {
            version: STORE_FORMAT_VERSION,
            events: Vec::new(),
        }
    }
}
