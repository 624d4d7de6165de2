//! Actions representing side effects to be executed by the runtime.
//!
//! The view-model never sleeps or spawns. Anything that has to happen later is
//! expressed as an [`Action`] and handed back to whoever drives the view-model
//! (the [`runtime`](crate::runtime) in the application, the test body in unit
//! tests). Results of those side effects come back in as intents, so every
//! state change still happens on the owning task.
//!
//! # Example
//!
//! ```rust
//! use futurejoy::app::Action;
//! use std::time::Duration;
//!
//! let action = Action::ScheduleToastExpiry {
//!     toast_id: uuid::Uuid::new_v4(),
//!     after: Duration::from_millis(2500),
//! };
//! assert!(matches!(action, Action::ScheduleToastExpiry { .. }));
//! ```

use std::time::Duration;
use uuid::Uuid;

/// Commands representing deferred side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// After `after` elapses, deliver
    /// [`Intent::ToastExpired`](crate::app::Intent::ToastExpired) for `toast_id`.
    ScheduleToastExpiry {
        /// Identity of the toast to clear.
        toast_id: Uuid,
        /// Delay before expiry.
        after: Duration,
    },
}
