//! Event list view-model: the authoritative in-memory projection of the store.
//!
//! This module defines [`EventListViewModel`], which owns the filtered event
//! list, the archival rule, create/edit/delete operations, the selection and
//! two-phase delete state machine, and the current toast. It is the single
//! source of truth for everything the list screen shows.
//!
//! # Architecture
//!
//! Every mutation follows the same shape:
//!
//! ```text
//! stage change(s) → store.save() ─ok──→ re-fetch → publish snapshot
//!                                 └err─→ store.rollback() → re-fetch → error toast
//! ```
//!
//! so the published list never contains an event the store does not hold.
//! State is republished synchronously on a `tokio::sync::watch` channel after
//! every change; see [`EventListViewModel::subscribe`].
//!
//! # Example
//!
//! ```rust
//! use futurejoy::app::{EventListViewModel, ListFilter};
//! use futurejoy::domain::NewEvent;
//! use futurejoy::infrastructure::SystemClock;
//! use futurejoy::storage::JsonEventStore;
//! use std::sync::Arc;
//!
//! let mut vm = EventListViewModel::initialize(
//!     Box::new(JsonEventStore::in_memory()),
//!     Arc::new(SystemClock),
//!     std::time::Duration::from_millis(2500),
//! );
//! let tomorrow = chrono::Utc::now() + chrono::Duration::days(1);
//! vm.add_event(NewEvent::new("Concert Night", "🎸", tomorrow))?;
//! assert_eq!(vm.events().len(), 1);
//! assert_eq!(vm.filter(), ListFilter::Future);
//! # Ok::<(), futurejoy::FutureJoyError>(())
//! ```

use super::actions::Action;
use super::draft::EventUpdate;
use super::modes::{ListFilter, PendingDelete};
use super::toast::{Toast, ToastNotifier, ToastStyle};
use crate::domain::error::{FutureJoyError, Result};
use crate::domain::{Event, NewEvent};
use crate::infrastructure::Clock;
use crate::storage::{EventQuery, EventStore};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use uuid::Uuid;

/// Immutable copy of everything observers can see.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewSnapshot {
    /// Current filtered, sorted list.
    pub events: Vec<Event>,
    pub filter: ListFilter,
    pub selection_mode: bool,
    pub selected_ids: BTreeSet<Uuid>,
    pub pending_delete: PendingDelete,
    /// Whether the create form is showing.
    pub composer_open: bool,
    pub toast: Option<Toast>,
}

impl ViewSnapshot {
    /// Whether a delete confirmation prompt should be showing.
    #[must_use]
    pub const fn confirmation_pending(&self) -> bool {
        self.pending_delete.is_armed()
    }

    /// The event a single delete is armed for, if it is in the visible list.
    #[must_use]
    pub fn pending_event(&self) -> Option<&Event> {
        match &self.pending_delete {
            PendingDelete::Single(id) => self.events.iter().find(|e| e.id == *id),
            _ => None,
        }
    }
}

/// The event list view-model.
///
/// Owned by exactly one task. Store reads and commits are the only operations
/// that can fail; all others are instantaneous state changes.
pub struct EventListViewModel {
    store: Box<dyn EventStore>,
    clock: Arc<dyn Clock>,
    toast_duration: Duration,

    events: Vec<Event>,
    filter: ListFilter,
    selection_mode: bool,
    selected_ids: BTreeSet<Uuid>,
    pending_delete: PendingDelete,
    composer_open: bool,
    toasts: ToastNotifier,

    /// Deferred side effects waiting to be collected by the driver.
    outbox: Vec<Action>,
    publisher: watch::Sender<ViewSnapshot>,
}

impl EventListViewModel {
    /// Creates the view-model, archives events whose day has passed, then
    /// loads the Future list.
    ///
    /// Archival runs before the first fetch so an event that passed since the
    /// last launch already shows under Past. An archival failure is logged and
    /// does not prevent loading.
    #[must_use]
    pub fn initialize(store: Box<dyn EventStore>, clock: Arc<dyn Clock>, toast_duration: Duration) -> Self {
        let (publisher, _) = watch::channel(ViewSnapshot::default());

        let mut vm = Self {
            store,
            clock,
            toast_duration,
            events: Vec::new(),
            filter: ListFilter::default(),
            selection_mode: false,
            selected_ids: BTreeSet::new(),
            pending_delete: PendingDelete::None,
            composer_open: false,
            toasts: ToastNotifier::new(),
            outbox: Vec::new(),
            publisher,
        };

        // A successful pass has already refreshed the list.
        if let Err(e) = vm.archive_past_events() {
            tracing::warn!(error = %e, "archival pass failed during initialization");
            vm.fetch(None);
        }
        vm
    }

    // ---- observation -------------------------------------------------------

    /// Current filtered, sorted list.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    #[must_use]
    pub const fn filter(&self) -> ListFilter {
        self.filter
    }

    #[must_use]
    pub const fn is_selection_mode(&self) -> bool {
        self.selection_mode
    }

    #[must_use]
    pub const fn selected_ids(&self) -> &BTreeSet<Uuid> {
        &self.selected_ids
    }

    #[must_use]
    pub const fn pending_delete(&self) -> &PendingDelete {
        &self.pending_delete
    }

    #[must_use]
    pub const fn is_confirmation_pending(&self) -> bool {
        self.pending_delete.is_armed()
    }

    #[must_use]
    pub const fn is_composer_open(&self) -> bool {
        self.composer_open
    }

    #[must_use]
    pub const fn toast(&self) -> Option<&Toast> {
        self.toasts.current()
    }

    /// Today's date according to the view-model's clock.
    #[must_use]
    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }

    #[must_use]
    pub fn is_selected(&self, event: &Event) -> bool {
        self.selected_ids.contains(&event.id)
    }

    /// Copy of the current observable state.
    #[must_use]
    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            events: self.events.clone(),
            filter: self.filter,
            selection_mode: self.selection_mode,
            selected_ids: self.selected_ids.clone(),
            pending_delete: self.pending_delete.clone(),
            composer_open: self.composer_open,
            toast: self.toasts.current().cloned(),
        }
    }

    /// Subscribes to state changes.
    ///
    /// The receiver immediately holds the current snapshot and is updated
    /// synchronously at the end of every mutating operation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot> {
        self.publisher.subscribe()
    }

    /// Drains deferred side effects produced since the last call.
    pub fn take_actions(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.outbox)
    }

    fn publish(&self) {
        self.publisher.send_replace(self.snapshot());
    }

    // ---- list --------------------------------------------------------------

    /// Switches the list filter and reloads. No-op if already active.
    ///
    /// Does not re-run the archival pass.
    pub fn set_filter(&mut self, filter: ListFilter) {
        if filter == self.filter {
            return;
        }
        tracing::debug!(from = ?self.filter, to = ?filter, "switching filter");
        self.filter = filter;
        self.fetch(None);
    }

    /// Reloads the list from the store.
    ///
    /// Uses `filter_override` for this one query without changing the active
    /// filter. A failed query empties the list and is logged; it is never
    /// returned to the caller.
    pub fn fetch(&mut self, filter_override: Option<ListFilter>) {
        let filter = filter_override.unwrap_or(self.filter);
        let _span = tracing::debug_span!("fetch_events", filter = ?filter).entered();

        match self.store.fetch(&filter.query()) {
            Ok(events) => {
                tracing::debug!(count = events.len(), "events fetched");
                self.events = events;
            }
            Err(e) => {
                let error = FutureJoyError::Query(e.to_string());
                tracing::warn!(error = %error, "failed to fetch events, showing empty list");
                self.events.clear();
            }
        }

        self.publish();
    }

    /// Marks every unarchived event whose day has passed as archived.
    ///
    /// All flips are committed together in one save; nothing is saved when no
    /// event qualifies, so repeated calls on the same day change nothing.
    /// Refreshes the list afterwards. This is the only place `is_archived`
    /// is ever set.
    ///
    /// Returns the number of events archived.
    ///
    /// # Errors
    ///
    /// - [`FutureJoyError::Query`] if the candidates cannot be read
    /// - [`FutureJoyError::Commit`] if the batch cannot be saved (rolled back)
    pub fn archive_past_events(&mut self) -> Result<usize> {
        let today = self.clock.today();
        let _span = tracing::debug_span!("archive_past_events", %today).entered();

        let candidates = self
            .store
            .fetch(&EventQuery::archived(false))
            .map_err(|e| FutureJoyError::Query(e.to_string()))?;

        let mut archived = 0;
        for mut event in candidates {
            if event.is_past_on(today) {
                tracing::debug!(event_id = %event.id, title = %event.title, "archiving event");
                event.is_archived = true;
                self.store.update(event);
                archived += 1;
            }
        }

        if archived > 0 {
            if let Err(e) = self.store.save() {
                self.store.rollback();
                tracing::error!(error = %e, "failed to archive past events");
                self.fetch(None);
                return Err(FutureJoyError::Commit(e.to_string()));
            }
            tracing::info!(archived, "past events archived");
        }

        self.fetch(None);
        Ok(archived)
    }

    // ---- create / edit -----------------------------------------------------

    pub fn open_composer(&mut self) {
        self.composer_open = true;
        self.publish();
    }

    pub fn close_composer(&mut self) {
        self.composer_open = false;
        self.publish();
    }

    /// Creates, inserts and commits a new unarchived event.
    ///
    /// On success the list is refreshed and the stored event is returned.
    ///
    /// # Errors
    ///
    /// Returns [`FutureJoyError::Commit`] if the save fails. The insert is
    /// rolled back and the event must be treated as not created.
    pub fn add_event(&mut self, new: NewEvent) -> Result<Event> {
        let event = Event::create(new, self.clock.now_utc());
        let _span = tracing::debug_span!("add_event", event_id = %event.id).entered();

        self.store.insert(event.clone());
        if let Err(e) = self.store.save() {
            self.store.rollback();
            tracing::error!(error = %e, "failed to save event");
            return Err(FutureJoyError::Commit(e.to_string()));
        }

        tracing::debug!(title = %event.title, "event created");
        self.fetch(None);
        Ok(event)
    }

    /// Edits an existing event in place and commits.
    ///
    /// # Errors
    ///
    /// - [`FutureJoyError::NotFound`] if no committed event has `id`
    /// - [`FutureJoyError::Validation`] if the edit blanks a required field
    /// - [`FutureJoyError::Query`] / [`FutureJoyError::Commit`] on store failure
    pub fn update_event(&mut self, id: Uuid, update: &EventUpdate) -> Result<Event> {
        let _span = tracing::debug_span!("update_event", event_id = %id).entered();

        let mut event = self
            .store
            .get(id)
            .map_err(|e| FutureJoyError::Query(e.to_string()))?
            .ok_or(FutureJoyError::NotFound(id))?;

        update.apply_to(&mut event)?;

        self.store.update(event.clone());
        if let Err(e) = self.store.save() {
            self.store.rollback();
            tracing::error!(error = %e, "failed to save event edit");
            self.fetch(None);
            return Err(FutureJoyError::Commit(e.to_string()));
        }

        self.fetch(None);
        Ok(event)
    }

    // ---- selection & delete ------------------------------------------------

    /// Arms a single delete for `event`. Ignored in selection mode.
    pub fn confirm_delete(&mut self, event: &Event) {
        if self.selection_mode {
            tracing::debug!("single delete ignored in selection mode");
            return;
        }
        self.pending_delete = PendingDelete::Single(event.id);
        self.publish();
    }

    /// Enters selection mode with an empty selection and nothing armed.
    pub fn enter_selection_mode(&mut self) {
        self.selection_mode = true;
        self.selected_ids.clear();
        self.pending_delete = PendingDelete::None;
        self.publish();
    }

    /// Leaves selection mode, clearing the selection and anything armed.
    pub fn exit_selection_mode(&mut self) {
        self.selection_mode = false;
        self.selected_ids.clear();
        self.pending_delete = PendingDelete::None;
        self.publish();
    }

    /// Adds `event` to the selection, or removes it if already selected.
    ///
    /// Changing the selection disarms a pending bulk delete, so a confirmed
    /// bulk delete always covers exactly the current selection.
    pub fn toggle_selection(&mut self, event: &Event) {
        if !self.selected_ids.remove(&event.id) {
            self.selected_ids.insert(event.id);
        }
        if matches!(self.pending_delete, PendingDelete::Bulk(_)) {
            self.pending_delete = PendingDelete::None;
        }
        self.publish();
    }

    /// Arms a bulk delete of the current selection.
    ///
    /// Ignored outside selection mode. With nothing selected an error toast is
    /// shown and no state changes.
    pub fn confirm_delete_selected(&mut self) {
        if !self.selection_mode {
            return;
        }
        if self.selected_ids.is_empty() {
            self.present_toast("Select events to delete", ToastStyle::Error);
            return;
        }
        self.pending_delete = PendingDelete::Bulk(self.selected_ids.clone());
        self.publish();
    }

    /// Executes whatever delete is armed and returns to idle.
    pub fn delete_confirmed(&mut self) {
        match std::mem::take(&mut self.pending_delete) {
            PendingDelete::None => {
                tracing::debug!("delete confirmed with nothing armed");
            }
            PendingDelete::Single(id) => self.delete_single(id),
            PendingDelete::Bulk(ids) => self.delete_bulk(&ids),
        }
    }

    /// Disarms any pending delete without touching the store.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = PendingDelete::None;
        self.publish();
    }

    fn delete_single(&mut self, id: Uuid) {
        let _span = tracing::debug_span!("delete_event", event_id = %id).entered();

        self.store.delete(id);
        match self.store.save() {
            Ok(()) => {
                self.fetch(None);
                self.present_toast("Event deleted", ToastStyle::Success);
            }
            Err(e) => {
                self.store.rollback();
                tracing::error!(error = %e, "failed to delete event");
                self.fetch(None);
                self.present_toast("Could not delete event. Please try again.", ToastStyle::Error);
            }
        }
    }

    fn delete_bulk(&mut self, ids: &BTreeSet<Uuid>) {
        let _span = tracing::debug_span!("delete_selected_events", count = ids.len()).entered();

        for id in ids {
            self.store.delete(*id);
        }
        match self.store.save() {
            Ok(()) => {
                self.fetch(None);
                self.present_toast("Events deleted", ToastStyle::Success);
                self.exit_selection_mode();
            }
            Err(e) => {
                self.store.rollback();
                tracing::error!(error = %e, "failed to delete selected events");
                self.fetch(None);
                self.present_toast(
                    "Could not delete selected events. Please try again.",
                    ToastStyle::Error,
                );
            }
        }
    }

    // ---- toasts ------------------------------------------------------------

    /// Shows a toast for the default duration. Returns its id.
    pub fn present_toast(&mut self, message: impl Into<String>, style: ToastStyle) -> Uuid {
        self.present_toast_for(message, style, self.toast_duration)
    }

    /// Shows a toast and schedules its expiry after `duration`.
    pub fn present_toast_for(&mut self, message: impl Into<String>, style: ToastStyle, duration: Duration) -> Uuid {
        let toast = self.toasts.present(message, style, duration);
        self.outbox.push(Action::ScheduleToastExpiry {
            toast_id: toast.id,
            after: duration,
        });
        self.publish();
        toast.id
    }

    /// Clears the toast if `id` is still the one showing.
    pub fn expire_toast(&mut self, id: Uuid) -> bool {
        let cleared = self.toasts.expire(id);
        if cleared {
            self.publish();
        }
        cleared
    }
}

impl std::fmt::Debug for EventListViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventListViewModel")
            .field("filter", &self.filter)
            .field("events", &self.events.len())
            .field("selection_mode", &self.selection_mode)
            .field("selected", &self.selected_ids.len())
            .field("pending_delete", &self.pending_delete)
            .field("toast", &self.toasts.current())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::modes::DeletePhase;
    use crate::domain::event::tests::local_instant;
    use crate::infrastructure::FixedClock;
    use crate::storage::testing::{Faults, FlakyStore};
    use chrono::{Local, NaiveDate, TimeZone};

    const TOAST: Duration = Duration::from_millis(2500);

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn clock() -> Arc<FixedClock> {
        let morning = today().and_hms_opt(9, 30, 0).unwrap();
        Arc::new(FixedClock::new(Local.from_local_datetime(&morning).earliest().unwrap()))
    }

    fn event(title: &str, offset: i64) -> Event {
        Event::create(
            NewEvent::new(title, "🎉", local_instant(today(), offset, 19, 0)),
            local_instant(today(), -30, 8, 0),
        )
    }

    fn view_model(events: Vec<Event>) -> (EventListViewModel, Arc<Faults>, Arc<FixedClock>) {
        let (store, faults) = FlakyStore::with_events(events);
        let clock = clock();
        let vm = EventListViewModel::initialize(Box::new(store), clock.clone(), TOAST);
        (vm, faults, clock)
    }

    fn titles(vm: &EventListViewModel) -> Vec<&str> {
        vm.events().iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn future_list_is_sorted_soonest_first_and_past_is_empty() {
        let (mut vm, _, _) = view_model(vec![
            event("New Year", 80),
            event("Concert Night", 11),
            event("Birthday Party", 38),
        ]);

        assert_eq!(titles(&vm), ["Concert Night", "Birthday Party", "New Year"]);

        vm.set_filter(ListFilter::Past);
        assert!(vm.events().is_empty());
    }

    #[test]
    fn initialize_archives_before_first_fetch() {
        let (mut vm, _, _) = view_model(vec![event("Yesterday", -1), event("Tomorrow", 1)]);

        assert_eq!(titles(&vm), ["Tomorrow"]);

        vm.set_filter(ListFilter::Past);
        assert_eq!(titles(&vm), ["Yesterday"]);
        assert!(vm.events()[0].is_archived);
    }

    #[test]
    fn initialize_queries_the_store_once_per_step() {
        let (vm, faults, _) = view_model(vec![event("Yesterday", -1), event("Tomorrow", 1)]);

        // One read for archival candidates, one for the visible list.
        assert_eq!(faults.fetch_count(), 2);
        assert_eq!(titles(&vm), ["Tomorrow"]);
    }

    #[test]
    fn archival_is_idempotent() {
        let (mut vm, faults, _) = view_model(vec![event("Gone", -2), event("Soon", 3)]);
        let saves_after_init = faults.save_count();

        assert_eq!(vm.archive_past_events().unwrap(), 0);
        assert_eq!(vm.archive_past_events().unwrap(), 0);
        assert_eq!(faults.save_count(), saves_after_init);

        vm.fetch(Some(ListFilter::Past));
        assert_eq!(titles(&vm), ["Gone"]);
    }

    #[test]
    fn archival_picks_up_events_as_days_pass() {
        let (mut vm, faults, clock) = view_model(vec![event("Today", 0), event("Later", 5)]);
        assert_eq!(titles(&vm), ["Today", "Later"]);

        clock.advance(chrono::Duration::days(1));
        let saves = faults.save_count();
        assert_eq!(vm.archive_past_events().unwrap(), 1);
        assert_eq!(faults.save_count(), saves + 1);
        assert_eq!(titles(&vm), ["Later"]);
    }

    #[test]
    fn archival_commit_failure_is_rolled_back() {
        let (store, faults) = FlakyStore::with_events(vec![event("Soon", 1)]);
        let clock = clock();
        let mut vm = EventListViewModel::initialize(Box::new(store), clock.clone(), TOAST);

        clock.advance(chrono::Duration::days(3));
        faults.set_fail_save(true);
        assert!(matches!(vm.archive_past_events(), Err(FutureJoyError::Commit(_))));
        assert_eq!(titles(&vm), ["Soon"]);
        assert!(!vm.events()[0].is_archived);

        faults.set_fail_save(false);
        assert_eq!(vm.archive_past_events().unwrap(), 1);
    }

    #[test]
    fn fetch_failure_falls_back_to_empty_list() {
        let (mut vm, faults, _) = view_model(vec![event("Visible", 4)]);
        assert_eq!(vm.events().len(), 1);

        faults.set_fail_fetch(true);
        vm.fetch(None);
        assert!(vm.events().is_empty());

        faults.set_fail_fetch(false);
        vm.fetch(None);
        assert_eq!(vm.events().len(), 1);
    }

    #[test]
    fn set_filter_to_current_filter_does_not_refetch() {
        let (mut vm, faults, _) = view_model(vec![event("Visible", 4)]);

        faults.set_fail_fetch(true);
        vm.set_filter(ListFilter::Future);
        assert_eq!(vm.events().len(), 1);
    }

    #[test]
    fn fetch_override_leaves_active_filter_alone() {
        let (mut vm, _, _) = view_model(vec![event("Old", -4), event("New", 4)]);

        vm.fetch(Some(ListFilter::Past));
        assert_eq!(titles(&vm), ["Old"]);
        assert_eq!(vm.filter(), ListFilter::Future);
    }

    #[test]
    fn add_event_appears_once_unarchived_with_call_time() {
        let (mut vm, _, clock) = view_model(vec![event("Existing", 20)]);

        let created = vm
            .add_event(NewEvent::new("Trip", "✈️", local_instant(today(), 2, 7, 0)))
            .unwrap();

        assert!(!created.is_archived);
        assert_eq!(created.created_at, clock.now_utc());
        assert_eq!(vm.events().iter().filter(|e| e.id == created.id).count(), 1);
        assert_eq!(titles(&vm), ["Trip", "Existing"]);
    }

    #[test]
    fn add_event_commit_failure_leaves_no_phantom() {
        let (mut vm, faults, _) = view_model(vec![]);
        faults.set_fail_save(true);

        let result = vm.add_event(NewEvent::new("Phantom", "👻", local_instant(today(), 1, 7, 0)));
        assert!(matches!(result, Err(FutureJoyError::Commit(_))));
        assert!(vm.events().is_empty());

        faults.set_fail_save(false);
        vm.add_event(NewEvent::new("Real", "🎁", local_instant(today(), 1, 7, 0)))
            .unwrap();
        assert_eq!(titles(&vm), ["Real"]);
    }

    #[test]
    fn update_event_edits_and_refreshes() {
        let target = event("Draft", 6);
        let (mut vm, _, _) = view_model(vec![target.clone(), event("Other", 3)]);

        let update = EventUpdate {
            title: Some("Final".to_string()),
            date: Some(local_instant(today(), 1, 12, 0)),
            ..EventUpdate::default()
        };
        let edited = vm.update_event(target.id, &update).unwrap();

        assert_eq!(edited.id, target.id);
        assert_eq!(titles(&vm), ["Final", "Other"]);
        assert!(matches!(
            vm.update_event(Uuid::new_v4(), &update),
            Err(FutureJoyError::NotFound(_))
        ));
    }

    #[test]
    fn single_delete_is_two_phase() {
        let doomed = event("Doomed", 2);
        let (mut vm, _, _) = view_model(vec![doomed.clone(), event("Safe", 5)]);

        vm.confirm_delete(&doomed);
        assert_eq!(vm.pending_delete().phase(), DeletePhase::SingleArmed);
        assert!(vm.is_confirmation_pending());
        assert_eq!(vm.snapshot().pending_event(), Some(&doomed));
        assert_eq!(vm.events().len(), 2);

        vm.delete_confirmed();
        assert_eq!(titles(&vm), ["Safe"]);
        assert!(!vm.is_confirmation_pending());
        assert_eq!(vm.toast().map(|t| t.message.as_str()), Some("Event deleted"));
        assert_eq!(vm.toast().map(|t| t.style), Some(ToastStyle::Success));
    }

    #[test]
    fn cancel_delete_disarms_without_mutation() {
        let doomed = event("Spared", 2);
        let (mut vm, faults, _) = view_model(vec![doomed.clone()]);
        let saves = faults.save_count();

        vm.confirm_delete(&doomed);
        vm.cancel_delete();
        vm.delete_confirmed();

        assert_eq!(titles(&vm), ["Spared"]);
        assert_eq!(faults.save_count(), saves);
        assert!(vm.toast().is_none());
    }

    #[test]
    fn deleting_already_deleted_event_does_not_corrupt_list() {
        let ghost = event("Ghost", 2);
        let (mut vm, _, _) = view_model(vec![ghost.clone(), event("Solid", 3)]);

        vm.confirm_delete(&ghost);
        vm.delete_confirmed();
        vm.confirm_delete(&ghost);
        vm.delete_confirmed();

        assert_eq!(titles(&vm), ["Solid"]);
        assert_eq!(vm.pending_delete().phase(), DeletePhase::Idle);
    }

    #[test]
    fn single_delete_commit_failure_keeps_event_and_reports() {
        let doomed = event("Sticky", 2);
        let (mut vm, faults, _) = view_model(vec![doomed.clone()]);
        faults.set_fail_save(true);

        vm.confirm_delete(&doomed);
        vm.delete_confirmed();

        assert_eq!(titles(&vm), ["Sticky"]);
        assert!(!vm.is_confirmation_pending());
        assert_eq!(vm.toast().map(|t| t.style), Some(ToastStyle::Error));

        faults.set_fail_save(false);
        vm.fetch(None);
        assert_eq!(titles(&vm), ["Sticky"]);
    }

    #[test]
    fn confirm_delete_is_ignored_in_selection_mode() {
        let e = event("Row", 2);
        let (mut vm, _, _) = view_model(vec![e.clone()]);

        vm.enter_selection_mode();
        vm.confirm_delete(&e);
        assert_eq!(vm.pending_delete().phase(), DeletePhase::Idle);
    }

    #[test]
    fn bulk_delete_removes_exactly_the_selection_in_one_commit() {
        let a = event("A", 1);
        let b = event("B", 2);
        let c = event("C", 3);
        let (mut vm, faults, _) = view_model(vec![a.clone(), b.clone(), c.clone()]);

        vm.enter_selection_mode();
        vm.toggle_selection(&a);
        vm.toggle_selection(&c);
        vm.toggle_selection(&b);
        vm.toggle_selection(&b);
        assert!(vm.is_selected(&a));
        assert!(!vm.is_selected(&b));

        vm.confirm_delete_selected();
        assert_eq!(vm.pending_delete().phase(), DeletePhase::BulkArmed);

        let saves = faults.save_count();
        vm.delete_confirmed();

        assert_eq!(faults.save_count(), saves + 1);
        assert_eq!(titles(&vm), ["B"]);
        assert!(!vm.is_selection_mode());
        assert!(vm.selected_ids().is_empty());
        assert_eq!(vm.toast().map(|t| t.message.as_str()), Some("Events deleted"));
    }

    #[test]
    fn bulk_delete_with_empty_selection_only_toasts() {
        let (mut vm, _, _) = view_model(vec![event("A", 1)]);
        vm.enter_selection_mode();

        vm.confirm_delete_selected();

        assert_eq!(vm.pending_delete().phase(), DeletePhase::Idle);
        assert!(vm.is_selection_mode());
        let toast = vm.toast().unwrap();
        assert_eq!(toast.style, ToastStyle::Error);
        assert_eq!(toast.message, "Select events to delete");
    }

    #[test]
    fn bulk_delete_outside_selection_mode_is_ignored() {
        let (mut vm, _, _) = view_model(vec![event("A", 1)]);
        vm.confirm_delete_selected();
        assert!(vm.toast().is_none());
        assert_eq!(vm.pending_delete().phase(), DeletePhase::Idle);
    }

    #[test]
    fn bulk_delete_commit_failure_keeps_selection_mode() {
        let a = event("A", 1);
        let (mut vm, faults, _) = view_model(vec![a.clone()]);
        faults.set_fail_save(true);

        vm.enter_selection_mode();
        vm.toggle_selection(&a);
        vm.confirm_delete_selected();
        vm.delete_confirmed();

        assert_eq!(titles(&vm), ["A"]);
        assert!(vm.is_selection_mode());
        assert_eq!(vm.pending_delete().phase(), DeletePhase::Idle);
        assert_eq!(vm.toast().map(|t| t.style), Some(ToastStyle::Error));
    }

    #[test]
    fn changing_selection_disarms_bulk_delete() {
        let a = event("A", 1);
        let b = event("B", 2);
        let (mut vm, _, _) = view_model(vec![a.clone(), b.clone()]);

        vm.enter_selection_mode();
        vm.toggle_selection(&a);
        vm.confirm_delete_selected();
        vm.toggle_selection(&b);

        assert_eq!(vm.pending_delete().phase(), DeletePhase::Idle);
    }

    #[test]
    fn selection_mode_transitions_are_idempotent_and_reset_arming() {
        let a = event("A", 1);
        let (mut vm, _, _) = view_model(vec![a.clone()]);

        vm.confirm_delete(&a);
        vm.enter_selection_mode();
        vm.enter_selection_mode();
        assert!(vm.is_selection_mode());
        assert_eq!(vm.pending_delete().phase(), DeletePhase::Idle);

        vm.toggle_selection(&a);
        vm.confirm_delete_selected();
        vm.exit_selection_mode();
        vm.exit_selection_mode();
        assert!(!vm.is_selection_mode());
        assert!(vm.selected_ids().is_empty());
        assert_eq!(vm.pending_delete().phase(), DeletePhase::Idle);
    }

    #[test]
    fn stale_toast_timer_does_not_clear_newer_toast() {
        let (mut vm, _, _) = view_model(vec![]);

        let first = vm.present_toast("A", ToastStyle::Success);
        let second = vm.present_toast("B", ToastStyle::Error);

        assert!(!vm.expire_toast(first));
        assert_eq!(vm.toast().map(|t| t.id), Some(second));
        assert!(vm.expire_toast(second));
        assert!(vm.toast().is_none());

        let actions = vm.take_actions();
        assert_eq!(
            actions,
            vec![
                Action::ScheduleToastExpiry { toast_id: first, after: TOAST },
                Action::ScheduleToastExpiry { toast_id: second, after: TOAST },
            ]
        );
        assert!(vm.take_actions().is_empty());
    }

    #[test]
    fn subscribers_see_every_change() {
        let e = event("Watched", 3);
        let (mut vm, _, _) = view_model(vec![e.clone()]);
        let mut rx = vm.subscribe();
        assert_eq!(rx.borrow_and_update().events.len(), 1);

        vm.enter_selection_mode();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().selection_mode);

        vm.toggle_selection(&e);
        assert!(rx.borrow_and_update().selected_ids.contains(&e.id));

        vm.confirm_delete_selected();
        assert!(rx.borrow_and_update().confirmation_pending());
    }
}
