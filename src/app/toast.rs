//! Transient, self-expiring status notifications.
//!
//! Only one toast is visible at a time. Presenting a toast replaces the current
//! one and yields a [`Toast`] whose id the owner schedules for expiry. When the
//! timer fires, [`ToastNotifier::expire`] clears the toast only if that same id
//! is still showing, so a stale timer can never dismiss a newer toast.

use std::time::Duration;
use uuid::Uuid;

/// Default time a toast stays visible.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(2500);

/// Visual intent of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastStyle {
    Success,
    Error,
}

impl ToastStyle {
    /// Background color as RGB.
    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Success => (115, 102, 242),
            Self::Error => (209, 59, 64),
        }
    }

    /// Leading glyph.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Success => "✔",
            Self::Error => "✖",
        }
    }
}

/// A single notification instance.
///
/// Two toasts with identical text are still distinct; identity is the `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub style: ToastStyle,
    pub duration: Duration,
}

/// Owner of the current toast.
#[derive(Debug, Clone, Default)]
pub struct ToastNotifier {
    current: Option<Toast>,
}

impl ToastNotifier {
    #[must_use]
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// The toast currently showing, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    /// Replaces the current toast and returns the new instance.
    pub fn present(&mut self, message: impl Into<String>, style: ToastStyle, duration: Duration) -> Toast {
        let toast = Toast {
            id: Uuid::new_v4(),
            message: message.into(),
            style,
            duration,
        };
        tracing::debug!(toast_id = %toast.id, style = ?style, message = %toast.message, "presenting toast");
        self.current = Some(toast.clone());
        toast
    }

    /// Clears the current toast if its id is `id`.
    ///
    /// Returns `true` when a toast was cleared.
    pub fn expire(&mut self, id: Uuid) -> bool {
        match &self.current {
            Some(toast) if toast.id == id => {
                tracing::debug!(toast_id = %id, "toast expired");
                self.current = None;
                true
            }
            _ => {
                tracing::trace!(toast_id = %id, "stale toast timer ignored");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expire_clears_matching_toast() {
        let mut notifier = ToastNotifier::new();
        let toast = notifier.present("Event deleted", ToastStyle::Success, DEFAULT_TOAST_DURATION);

        assert!(notifier.expire(toast.id));
        assert!(notifier.current().is_none());
        assert!(!notifier.expire(toast.id));
    }

    #[test]
    fn stale_timer_keeps_newer_toast() {
        let mut notifier = ToastNotifier::new();
        let first = notifier.present("Saved", ToastStyle::Success, DEFAULT_TOAST_DURATION);
        let second = notifier.present("Saved", ToastStyle::Success, DEFAULT_TOAST_DURATION);

        assert_ne!(first.id, second.id);
        assert!(!notifier.expire(first.id));
        assert_eq!(notifier.current(), Some(&second));
    }
}
