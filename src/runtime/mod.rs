//! Single-owner task driving the view-model.
//!
//! # Architecture
//!
//! - `messages`: The envelope carried over the intent channel
//! - `actor`: The owning task, its handle, and action execution (timers)

pub mod actor;
pub mod messages;

pub use actor::{spawn, RuntimeHandle};
pub use messages::Envelope;
