//! Intent handling and error-to-toast translation.
//!
//! This module maps user-level intents onto [`EventListViewModel`] operations.
//! It is the layer that decides how a failed operation is shown: validation
//! and commit errors become error toasts here, so the view-model API can stay
//! `Result`-returning for library callers.
//!
//! # Intent Types
//!
//! - **List**: `Refresh`, `SetFilter`, `ArchivePast`
//! - **Create / Edit**: `OpenComposer`, `CloseComposer`, `Create`, `Update`
//! - **Delete flow**: `ConfirmDelete`, `EnterSelectionMode`, `ExitSelectionMode`,
//!   `ToggleSelection`, `ConfirmDeleteSelected`, `DeleteConfirmed`, `CancelDelete`
//! - **Toasts**: `PresentToast`, `ToastExpired`
//!
//! # Example
//!
//! ```rust
//! use futurejoy::app::{handle_intent, EventListViewModel, Intent, ListFilter};
//! use futurejoy::infrastructure::SystemClock;
//! use futurejoy::storage::JsonEventStore;
//! use std::sync::Arc;
//!
//! let mut vm = EventListViewModel::initialize(
//!     Box::new(JsonEventStore::in_memory()),
//!     Arc::new(SystemClock),
//!     std::time::Duration::from_millis(2500),
//! );
//! let actions = handle_intent(&mut vm, &Intent::SetFilter(ListFilter::Past));
//! assert!(actions.is_empty());
//! assert_eq!(vm.filter(), ListFilter::Past);
//! ```

use super::actions::Action;
use super::draft::{EventDraft, EventUpdate};
use super::modes::ListFilter;
use super::state::EventListViewModel;
use super::toast::ToastStyle;
use crate::domain::error::FutureJoyError;
use std::time::Duration;
use uuid::Uuid;

/// Something the user (or a timer) asked the list screen to do.
///
/// Events are referred to by id; an id that is not in the visible list is
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Re-reads the list with the active filter.
    Refresh,
    /// Switches between Future and Past.
    SetFilter(ListFilter),
    /// Runs the archival pass on demand.
    ArchivePast,

    OpenComposer,
    CloseComposer,
    /// Validates and creates an event from form input.
    Create(EventDraft),
    /// Applies an in-place edit.
    Update {
        id: Uuid,
        changes: EventUpdate,
    },

    /// Arms a single delete.
    ConfirmDelete(Uuid),
    EnterSelectionMode,
    ExitSelectionMode,
    ToggleSelection(Uuid),
    /// Arms a bulk delete of the current selection.
    ConfirmDeleteSelected,
    /// Executes the armed delete.
    DeleteConfirmed,
    CancelDelete,

    /// Shows an arbitrary toast. `None` uses the configured duration.
    PresentToast {
        message: String,
        style: ToastStyle,
        duration: Option<Duration>,
    },
    /// A toast timer fired.
    ToastExpired(Uuid),
}

/// Applies `intent` to the view-model and returns the side effects it produced.
///
/// Never fails: errors are logged and shown as toasts.
pub fn handle_intent(vm: &mut EventListViewModel, intent: &Intent) -> Vec<Action> {
    let _span = tracing::debug_span!("handle_intent", intent = intent_name(intent)).entered();

    match intent {
        Intent::Refresh => vm.fetch(None),
        Intent::SetFilter(filter) => vm.set_filter(*filter),
        Intent::ArchivePast => {
            if let Err(e) = vm.archive_past_events() {
                tracing::warn!(error = %e, "archival pass failed");
            }
        }

        Intent::OpenComposer => vm.open_composer(),
        Intent::CloseComposer => vm.close_composer(),
        Intent::Create(draft) => create_event(vm, draft),
        Intent::Update { id, changes } => update_event(vm, *id, changes),

        Intent::ConfirmDelete(id) => match vm.events().iter().find(|e| e.id == *id).cloned() {
            Some(event) => vm.confirm_delete(&event),
            None => tracing::debug!(event_id = %id, "delete requested for event not in list"),
        },
        Intent::EnterSelectionMode => vm.enter_selection_mode(),
        Intent::ExitSelectionMode => vm.exit_selection_mode(),
        Intent::ToggleSelection(id) => match vm.events().iter().find(|e| e.id == *id).cloned() {
            Some(event) => vm.toggle_selection(&event),
            None => tracing::debug!(event_id = %id, "selection toggled for event not in list"),
        },
        Intent::ConfirmDeleteSelected => vm.confirm_delete_selected(),
        Intent::DeleteConfirmed => vm.delete_confirmed(),
        Intent::CancelDelete => vm.cancel_delete(),

        Intent::PresentToast {
            message,
            style,
            duration,
        } => {
            match duration {
                Some(duration) => vm.present_toast_for(message.clone(), *style, *duration),
                None => vm.present_toast(message.clone(), *style),
            };
        }
        Intent::ToastExpired(id) => {
            vm.expire_toast(*id);
        }
    }

    vm.take_actions()
}

fn create_event(vm: &mut EventListViewModel, draft: &EventDraft) {
    let new = match draft.validate(vm.today()) {
        Ok(new) => new,
        Err(e) => {
            tracing::debug!(error = %e, "draft rejected");
            vm.present_toast(e.to_string(), ToastStyle::Error);
            return;
        }
    };

    match vm.add_event(new) {
        Ok(_) => {
            vm.close_composer();
            vm.present_toast("Event created successfully", ToastStyle::Success);
        }
        Err(_) => {
            vm.present_toast("Failed to create event. Please try again.", ToastStyle::Error);
        }
    }
}

fn update_event(vm: &mut EventListViewModel, id: Uuid, changes: &EventUpdate) {
    if changes.is_empty() {
        return;
    }

    match vm.update_event(id, changes) {
        Ok(_) => {
            vm.present_toast("Event updated", ToastStyle::Success);
        }
        Err(FutureJoyError::Commit(_) | FutureJoyError::Query(_)) => {
            vm.present_toast("Could not update event. Please try again.", ToastStyle::Error);
        }
        Err(e) => {
            vm.present_toast(e.to_string(), ToastStyle::Error);
        }
    }
}

const fn intent_name(intent: &Intent) -> &'static str {
    match intent {
        Intent::Refresh => "refresh",
        Intent::SetFilter(_) => "set_filter",
        Intent::ArchivePast => "archive_past",
        Intent::OpenComposer => "open_composer",
        Intent::CloseComposer => "close_composer",
        Intent::Create(_) => "create",
        Intent::Update { .. } => "update",
        Intent::ConfirmDelete(_) => "confirm_delete",
        Intent::EnterSelectionMode => "enter_selection_mode",
        Intent::ExitSelectionMode => "exit_selection_mode",
        Intent::ToggleSelection(_) => "toggle_selection",
        Intent::ConfirmDeleteSelected => "confirm_delete_selected",
        Intent::DeleteConfirmed => "delete_confirmed",
        Intent::CancelDelete => "cancel_delete",
        Intent::PresentToast { .. } => "present_toast",
        Intent::ToastExpired(_) => "toast_expired",
    }
}
