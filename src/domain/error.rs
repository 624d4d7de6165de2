//! Error types for the FutureJoy event tracker.
//!
//! This module defines the centralized error type [`FutureJoyError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! # Recovery Policy
//!
//! No variant is fatal. The view-model recovers from each class locally:
//!
//! - [`FutureJoyError::Query`]: the visible list falls back to empty
//! - [`FutureJoyError::Commit`]: staged changes are rolled back, an error toast is shown
//! - [`FutureJoyError::Validation`]: an error toast is shown, nothing is mutated

use thiserror::Error;
use uuid::Uuid;

/// The main error type for FutureJoy operations.
///
/// Most variants carry a human-readable description. Errors from the standard
/// library are wrapped using `#[from]` for automatic conversion.
///
/// # Examples
///
/// ```
/// use futurejoy::FutureJoyError;
///
/// fn reject_empty_title(title: &str) -> Result<(), FutureJoyError> {
///     if title.trim().is_empty() {
///         return Err(FutureJoyError::Validation("Event name is required".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(reject_empty_title("  ").is_err());
/// ```
#[derive(Debug, Error)]
pub enum FutureJoyError {
    /// Reading events from the store failed.
    ///
    /// Recovered by showing an empty list; never surfaced as a hard failure.
    #[error("Query failed: {0}")]
    Query(String),

    /// Committing staged inserts, updates, or deletes failed.
    ///
    /// The staged changes are discarded and the caller must not assume the
    /// operation took effect.
    #[error("Commit failed: {0}")]
    Commit(String),

    /// User input was rejected before touching the store.
    #[error("{0}")]
    Validation(String),

    /// No event with the given identifier exists in the store.
    #[error("Event not found: {0}")]
    NotFound(Uuid),

    /// Storage backend failure (corrupt file, duplicate id, serialization).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or could not be read.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Fetching a sponsored item failed.
    #[error("Ad fetch error: {0}")]
    AdFetch(String),

    /// The view-model runtime task is no longer accepting intents.
    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// A specialized `Result` type for FutureJoy operations.
pub type Result<T> = std::result::Result<T, FutureJoyError>;
