//! View model types representing renderable list state.
//!
//! This module turns a [`ViewSnapshot`] into display-ready data: formatted
//! dates, day counters, selection marks, sponsored slot placement, the delete
//! prompt and the toast banner. It contains no business logic; the renderer
//! only lays these values out.
//!
//! # Example
//!
//! ```rust
//! use futurejoy::app::ViewSnapshot;
//! use futurejoy::ui::ListViewModel;
//!
//! let vm = ListViewModel::compute(&ViewSnapshot::default(), chrono::Local::now().date_naive(), 10);
//! assert!(vm.rows.is_empty());
//! assert_eq!(vm.empty_state.unwrap().message, "No upcoming events");
//! ```

use crate::ads::slot_index;
use crate::app::{ListFilter, PendingDelete, ToastStyle, ViewSnapshot};
use chrono::NaiveDate;
use uuid::Uuid;

/// Complete list screen view model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListViewModel {
    pub header: HeaderInfo,

    /// Event rows with sponsored slots interleaved.
    pub rows: Vec<Row>,

    pub footer: FooterInfo,

    /// Shown instead of rows when the list is empty.
    pub empty_state: Option<EmptyState>,

    pub toast: Option<ToastBanner>,

    /// Delete prompt text while a delete is armed.
    pub confirmation: Option<String>,

    pub composer_open: bool,
}

/// Title block and filter tabs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    pub subtitle: String,
    /// Each filter and whether it is the active one.
    pub tabs: Vec<(ListFilter, bool)>,
    /// `"N selected"` while in selection mode.
    pub selection_status: Option<String>,
}

/// One line in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Event(DisplayItem),
    /// Placeholder for the `slot`-th sponsored item (0-based).
    Sponsored { slot: usize },
}

/// Display information for a single event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// 1-based position among event rows, used to address the row from input.
    pub number: usize,
    pub id: Uuid,
    pub emoji: String,
    pub title: String,
    /// e.g. `"March 14, 2026"`.
    pub date_label: String,
    pub location: Option<String>,
    pub category: Option<String>,
    pub days: i64,
    /// `"day"` when `days == 1`, otherwise `"days"`.
    pub days_unit: &'static str,
    /// `Some(checked)` in selection mode, `None` otherwise.
    pub checkbox: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastBanner {
    pub text: String,
    pub style: ToastStyle,
}

const DATE_FORMAT: &str = "%B %-d, %Y";

impl ListViewModel {
    /// Projects `snapshot` for display on `today`, with a sponsored slot after
    /// every `ad_interval`-th event (`0` disables sponsored rows).
    #[must_use]
    pub fn compute(snapshot: &ViewSnapshot, today: NaiveDate, ad_interval: usize) -> Self {
        let mut rows = Vec::with_capacity(snapshot.events.len() + snapshot.events.len() / ad_interval.max(1));

        for (index, event) in snapshot.events.iter().enumerate() {
            let days = event.days_until_from(today);
            rows.push(Row::Event(DisplayItem {
                number: index + 1,
                id: event.id,
                emoji: event.emoji.clone(),
                title: event.title.clone(),
                date_label: event.local_day().format(DATE_FORMAT).to_string(),
                location: event.location.clone(),
                category: event.category.clone(),
                days,
                days_unit: if days == 1 { "day" } else { "days" },
                checkbox: snapshot
                    .selection_mode
                    .then(|| snapshot.selected_ids.contains(&event.id)),
            }));

            if let Some(slot) = slot_index(index, ad_interval) {
                rows.push(Row::Sponsored { slot });
            }
        }

        let empty_state = snapshot.events.is_empty().then(|| match snapshot.filter {
            ListFilter::Future => EmptyState {
                message: "No upcoming events".to_string(),
                subtitle: "Add an event to start counting down".to_string(),
            },
            ListFilter::Past => EmptyState {
                message: "No past events".to_string(),
                subtitle: "Events move here once their day has passed".to_string(),
            },
        });

        Self {
            header: HeaderInfo {
                title: "FutureJoy".to_string(),
                subtitle: "Track your upcoming events".to_string(),
                tabs: ListFilter::ALL
                    .iter()
                    .map(|f| (*f, *f == snapshot.filter))
                    .collect(),
                selection_status: snapshot
                    .selection_mode
                    .then(|| format!("{} selected", snapshot.selected_ids.len())),
            },
            rows,
            footer: FooterInfo {
                keybindings: keybindings(snapshot).to_string(),
            },
            empty_state,
            toast: snapshot.toast.as_ref().map(|t| ToastBanner {
                text: format!("{} {}", t.style.icon(), t.message),
                style: t.style,
            }),
            confirmation: confirmation_text(snapshot),
            composer_open: snapshot.composer_open,
        }
    }

    /// Event rows only, in display order.
    pub fn items(&self) -> impl Iterator<Item = &DisplayItem> {
        self.rows.iter().filter_map(|row| match row {
            Row::Event(item) => Some(item),
            Row::Sponsored { .. } => None,
        })
    }

    /// The event shown as row `number`.
    #[must_use]
    pub fn item(&self, number: usize) -> Option<&DisplayItem> {
        self.items().find(|item| item.number == number)
    }
}

fn keybindings(snapshot: &ViewSnapshot) -> &'static str {
    if snapshot.pending_delete.is_armed() {
        "yes: confirm delete | no: cancel"
    } else if snapshot.composer_open {
        "add <title> | <emoji> | <YYYY-MM-DD> [| location | category | notes] | close"
    } else if snapshot.selection_mode {
        "toggle <n> | delete | done"
    } else {
        "new | delete <n> | select | future | past | show <n> | quit"
    }
}

fn confirmation_text(snapshot: &ViewSnapshot) -> Option<String> {
    match &snapshot.pending_delete {
        PendingDelete::None => None,
        PendingDelete::Single(_) => Some(match snapshot.pending_event() {
            Some(event) => format!(
                "Are you sure you want to delete \"{}\"? This action cannot be undone.",
                event.title
            ),
            None => "Are you sure you want to delete this event? This action cannot be undone.".to_string(),
        }),
        PendingDelete::Bulk(ids) => Some(format!(
            "Are you sure you want to delete {} {}? This action cannot be undone.",
            ids.len(),
            if ids.len() == 1 { "event" } else { "events" }
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Toast;
    use crate::domain::event::tests::local_instant;
    use crate::domain::{Event, NewEvent};
    use std::collections::BTreeSet;
    use std::time::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 20).unwrap()
    }

    fn events(count: usize) -> Vec<Event> {
        (0..count)
            .map(|i| {
                Event::create(
                    NewEvent::new(format!("Event {i}"), "🎉", local_instant(today(), i as i64, 12, 0)),
                    local_instant(today(), -1, 12, 0),
                )
            })
            .collect()
    }

    fn snapshot(events: Vec<Event>) -> ViewSnapshot {
        ViewSnapshot {
            events,
            ..ViewSnapshot::default()
        }
    }

    #[test]
    fn sponsored_slot_follows_every_tenth_event() {
        let vm = ListViewModel::compute(&snapshot(events(21)), today(), 10);

        assert_eq!(vm.rows.len(), 23);
        assert_eq!(vm.rows[10], Row::Sponsored { slot: 0 });
        assert_eq!(vm.rows[21], Row::Sponsored { slot: 1 });
        assert_eq!(vm.items().count(), 21);
        assert_eq!(vm.item(11).map(|i| i.title.as_str()), Some("Event 10"));
    }

    #[test]
    fn zero_interval_disables_sponsored_rows() {
        let vm = ListViewModel::compute(&snapshot(events(12)), today(), 0);
        assert_eq!(vm.rows.len(), 12);
    }

    #[test]
    fn day_counter_and_date_label() {
        let vm = ListViewModel::compute(&snapshot(events(3)), today(), 10);
        let items: Vec<_> = vm.items().collect();

        assert_eq!((items[0].days, items[0].days_unit), (0, "days"));
        assert_eq!((items[1].days, items[1].days_unit), (1, "day"));
        assert_eq!((items[2].days, items[2].days_unit), (2, "days"));
        assert_eq!(items[1].date_label, "January 21, 2026");
        assert!(items[0].checkbox.is_none());
    }

    #[test]
    fn selection_mode_shows_checkboxes_and_count() {
        let list = events(2);
        let mut snap = snapshot(list.clone());
        snap.selection_mode = true;
        snap.selected_ids = BTreeSet::from([list[1].id]);

        let vm = ListViewModel::compute(&snap, today(), 10);
        let checks: Vec<_> = vm.items().map(|i| i.checkbox).collect();

        assert_eq!(checks, [Some(false), Some(true)]);
        assert_eq!(vm.header.selection_status.as_deref(), Some("1 selected"));
    }

    #[test]
    fn confirmation_text_names_the_event() {
        let list = events(1);
        let mut snap = snapshot(list.clone());
        snap.pending_delete = PendingDelete::Single(list[0].id);

        let vm = ListViewModel::compute(&snap, today(), 10);
        assert_eq!(
            vm.confirmation.as_deref(),
            Some("Are you sure you want to delete \"Event 0\"? This action cannot be undone.")
        );

        snap.pending_delete = PendingDelete::Bulk(list.iter().map(|e| e.id).collect());
        let vm = ListViewModel::compute(&snap, today(), 10);
        assert!(vm.confirmation.unwrap().contains("1 event?"));
    }

    #[test]
    fn empty_state_depends_on_filter_and_toast_banner_has_icon() {
        let mut snap = snapshot(Vec::new());
        snap.filter = ListFilter::Past;
        snap.toast = Some(Toast {
            id: Uuid::new_v4(),
            message: "Events deleted".to_string(),
            style: ToastStyle::Success,
            duration: Duration::from_millis(2500),
        });

        let vm = ListViewModel::compute(&snap, today(), 10);
        assert_eq!(vm.empty_state.unwrap().message, "No past events");
        assert_eq!(vm.toast.unwrap().text, "✔ Events deleted");
        assert_eq!(vm.header.tabs, vec![(ListFilter::Future, false), (ListFilter::Past, true)]);
    }
}
