//! Domain layer for the FutureJoy tracker.
//!
//! This module contains the core domain types, independent of storage, runtime,
//! or presentation concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`event`]: Event entity and countdown arithmetic
//!
//! # Examples
//!
//! ```
//! use futurejoy::domain::{Event, NewEvent, Result};
//!
//! fn create_event() -> Result<Event> {
//!     let now = chrono::Utc::now();
//!     Ok(Event::create(NewEvent::new("Birthday Party", "🎂", now), now))
//! }
//! ```

pub mod error;
pub mod event;

pub use error::{FutureJoyError, Result};
pub use event::{Countdown, Event, NewEvent};
