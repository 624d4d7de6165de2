//! Storage layer for persistent event data.
//!
//! This module provides the store abstraction the view-model commits through,
//! a JSON-file implementation of it, and the one-time legacy migration.
//!
//! # Modules
//!
//! - `backend`: [`EventStore`] trait with staged writes and explicit commit
//! - `query`: Plain-data filter and sort criteria
//! - `json`: JSON file (or in-memory) store implementation
//! - `models`: Storage record types separate from domain models
//! - `migration`: One-time copy from a legacy store, guarded by a marker file

pub mod backend;
pub mod json;
pub mod migration;
pub mod models;
pub mod query;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::EventStore;
pub use json::JsonEventStore;
pub use migration::{migrate_legacy_store, needs_migration, MigrationOutcome};
pub use models::{EventRecord, StoreFile};
pub use query::{EventQuery, SortKey, SortOrder, SortSpec};
