//! Application layer: the event list view-model and the intents that drive it.
//!
//! This module sits between the runtime/REPL (main.rs, [`crate::runtime`]) and
//! the domain/storage layers. It owns every piece of list-screen state.
//!
//! # Architecture
//!
//! ```text
//! User Input → Intents → handle_intent → View-model mutations → Actions → Timers
//!                 ↑                              │                          │
//!                 │                       watch snapshot                    │
//!                 └────────────── ToastExpired ─────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Deferred side effects emitted by the view-model
//! - [`draft`]: Create-form input validation and partial edits
//! - [`handler`]: Intent processing and error-to-toast translation
//! - [`modes`]: List filter and delete-flow state types
//! - [`state`]: The view-model itself and its published snapshot
//! - [`toast`]: Single-slot, identity-checked notifications

pub mod actions;
pub mod draft;
pub mod handler;
pub mod modes;
pub mod state;
pub mod toast;

pub use actions::Action;
pub use draft::{EventDraft, EventUpdate};
pub use handler::{handle_intent, Intent};
pub use modes::{DeletePhase, ListFilter, PendingDelete};
pub use state::{EventListViewModel, ViewSnapshot};
pub use toast::{Toast, ToastNotifier, ToastStyle, DEFAULT_TOAST_DURATION};
