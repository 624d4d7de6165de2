//! One-time copy of a legacy store into the primary store.
//!
//! Earlier installs kept events in a standalone local file. On startup the
//! contents are copied once into the configured primary store, preserving ids,
//! archived flags and creation timestamps. A marker file next to the primary
//! store records completion so the copy never runs twice.

use crate::domain::error::{FutureJoyError, Result};
use crate::storage::backend::EventStore;
use crate::storage::json::JsonEventStore;
use crate::storage::query::{EventQuery, SortKey, SortOrder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Result of a migration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// The marker file exists; nothing was done.
    AlreadyCompleted,
    /// No legacy store exists; nothing was done and no marker written.
    NotNeeded,
    /// Events were copied and the marker written.
    Completed { count: usize },
}

#[derive(Debug, Serialize, Deserialize)]
struct MigrationMarker {
    completed_at: DateTime<Utc>,
    migrated: usize,
}

/// Whether a legacy store exists that has not been migrated yet.
#[must_use]
pub fn needs_migration(legacy_path: &Path, marker_path: &Path) -> bool {
    !marker_path.exists() && legacy_path.exists()
}

/// Copies every event from the legacy store at `legacy_path` into `target`.
///
/// Events already present in `target` (same id) are skipped, so a run that
/// failed after committing but before writing the marker can safely repeat.
///
/// # Errors
///
/// Returns an error if the legacy store cannot be read, the target commit
/// fails (staged copies are rolled back), or the marker cannot be written.
pub fn migrate_legacy_store(
    legacy_path: &Path,
    marker_path: &Path,
    target: &mut dyn EventStore,
) -> Result<MigrationOutcome> {
    let _span = tracing::info_span!("migrate_legacy_store", legacy = ?legacy_path).entered();

    if marker_path.exists() {
        tracing::debug!("migration already completed");
        return Ok(MigrationOutcome::AlreadyCompleted);
    }
    if !legacy_path.exists() {
        tracing::debug!("no legacy store found");
        return Ok(MigrationOutcome::NotNeeded);
    }

    let legacy = JsonEventStore::open(legacy_path)?;
    let events = legacy.fetch(&EventQuery::all().sorted_by(SortKey::CreatedAt, SortOrder::Ascending))?;

    // Every lookup runs before anything is staged, so an early return leaves
    // the target untouched.
    let mut missing = Vec::with_capacity(events.len());
    for event in events {
        if target.get(event.id)?.is_some() {
            tracing::debug!(event_id = %event.id, "event already present, skipping");
            continue;
        }
        missing.push(event);
    }

    let count = missing.len();
    for event in missing {
        target.insert(event);
    }

    if let Err(e) = target.save() {
        target.rollback();
        tracing::error!(error = %e, "migration commit failed");
        return Err(FutureJoyError::Commit(e.to_string()));
    }

    mark_completed(marker_path, count)?;
    tracing::info!(count, "legacy events migrated");
    Ok(MigrationOutcome::Completed { count })
}

fn mark_completed(marker_path: &Path, migrated: usize) -> Result<()> {
    if let Some(parent) = marker_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let marker = MigrationMarker {
        completed_at: Utc::now(),
        migrated,
    };
    let json = serde_json::to_string(&marker)
        .map_err(|e| FutureJoyError::Storage(format!("failed to serialize marker: {e}")))?;
    std::fs::write(marker_path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Event, NewEvent};
    use crate::storage::testing::FlakyStore;
    use chrono::Duration;

    fn write_legacy(path: &Path, events: &[Event]) {
        let mut legacy = JsonEventStore::open(path).unwrap();
        for event in events {
            legacy.insert(event.clone());
        }
        legacy.save().unwrap();
    }

    #[test]
    fn copies_events_preserving_identity_then_marks_done() {
        let dir = tempfile::tempdir().unwrap();
        let legacy_path = dir.path().join("legacy.json");
        let marker = dir.path().join(".migrated");

        let now = Utc::now();
        let mut archived = Event::create(NewEvent::new("Old", "🎂", now - Duration::days(9)), now - Duration::days(20));
        archived.is_archived = true;
        let upcoming = Event::create(NewEvent::new("Soon", "🎸", now + Duration::days(4)), now);
        write_legacy(&legacy_path, &[archived.clone(), upcoming.clone()]);

        let mut target = JsonEventStore::in_memory();
        assert!(needs_migration(&legacy_path, &marker));

        let outcome = migrate_legacy_store(&legacy_path, &marker, &mut target).unwrap();
        assert_eq!(outcome, MigrationOutcome::Completed { count: 2 });
        assert_eq!(target.get(archived.id).unwrap(), Some(archived));
        assert_eq!(target.get(upcoming.id).unwrap(), Some(upcoming));
        assert!(!needs_migration(&legacy_path, &marker));

        let again = migrate_legacy_store(&legacy_path, &marker, &mut target).unwrap();
        assert_eq!(again, MigrationOutcome::AlreadyCompleted);
    }

    #[test]
    fn missing_legacy_store_is_not_needed() {
        let dir = tempfile::tempdir().unwrap();
        let mut target = JsonEventStore::in_memory();

        let outcome = migrate_legacy_store(
            &dir.path().join("absent.json"),
            &dir.path().join(".migrated"),
            &mut target,
        )
        .unwrap();

        assert_eq!(outcome, MigrationOutcome::NotNeeded);
        assert!(!dir.path().join(".migrated").exists());
    }

    #[test]
    fn failed_commit_leaves_marker_unwritten() {
        let dir = tempfile::tempdir().unwrap();
        let legacy_path = dir.path().join("legacy.json");
        let marker = dir.path().join(".migrated");
        let now = Utc::now();
        write_legacy(&legacy_path, &[Event::create(NewEvent::new("A", "🎁", now), now)]);

        let (mut target, faults) = FlakyStore::new();
        faults.set_fail_save(true);

        let result = migrate_legacy_store(&legacy_path, &marker, &mut target);
        assert!(matches!(result, Err(FutureJoyError::Commit(_))));
        assert!(!marker.exists());
        assert!(!target.has_changes());

        faults.set_fail_save(false);
        let retry = migrate_legacy_store(&legacy_path, &marker, &mut target).unwrap();
        assert_eq!(retry, MigrationOutcome::Completed { count: 1 });

        std::fs::remove_file(&marker).unwrap();
        let repeat = migrate_legacy_store(&legacy_path, &marker, &mut target).unwrap();
        assert_eq!(repeat, MigrationOutcome::Completed { count: 0 });
    }

    #[test]
    fn failed_lookup_stages_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let legacy_path = dir.path().join("legacy.json");
        let marker = dir.path().join(".migrated");
        let now = Utc::now();
        write_legacy(
            &legacy_path,
            &[
                Event::create(NewEvent::new("First", "🎁", now + Duration::days(2)), now - Duration::days(2)),
                Event::create(NewEvent::new("Second", "🎈", now + Duration::days(5)), now - Duration::days(1)),
            ],
        );

        let (mut target, faults) = FlakyStore::new();
        faults.fail_get_after(1);

        let result = migrate_legacy_store(&legacy_path, &marker, &mut target);
        assert!(matches!(result, Err(FutureJoyError::Storage(_))));
        assert!(!marker.exists());
        assert!(!target.has_changes());

        // A later unrelated commit must not carry half a migration with it.
        target.save().unwrap();
        assert!(target.fetch(&EventQuery::all()).unwrap().is_empty());
    }
}
