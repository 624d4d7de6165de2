//! List filter and delete-flow state types.
//!
//! This module defines the small state-machine enums the view-model is built
//! around.
//!
//! # Delete Flow
//!
//! ```text
//! Idle --confirm_delete(e)--------------------------> SingleArmed
//! Idle --confirm_delete_selected() [selection > 0]--> BulkArmed
//! SingleArmed --delete_confirmed() | cancel_delete()--> Idle
//! BulkArmed   --delete_confirmed() | cancel_delete()--> Idle
//! entering or exiting selection mode from any state --> Idle
//! ```

use crate::storage::{EventQuery, SortKey, SortOrder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Which half of the event collection the list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFilter {
    /// Events not yet archived, soonest first.
    #[default]
    Future,

    /// Archived events, most recent first.
    Past,
}

impl ListFilter {
    pub const ALL: [Self; 2] = [Self::Future, Self::Past];

    /// Tab title shown above the list.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Future => "Future",
            Self::Past => "Past",
        }
    }

    /// Value of `is_archived` this filter selects.
    #[must_use]
    pub const fn is_archived(self) -> bool {
        matches!(self, Self::Past)
    }

    /// Date ordering for this filter.
    #[must_use]
    pub const fn sort_order(self) -> SortOrder {
        match self {
            Self::Future => SortOrder::Ascending,
            Self::Past => SortOrder::Descending,
        }
    }

    /// Store query producing this filter's list.
    #[must_use]
    pub const fn query(self) -> EventQuery {
        EventQuery::archived(self.is_archived()).sorted_by(SortKey::Date, self.sort_order())
    }
}

impl fmt::Display for ListFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for ListFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "future" | "upcoming" => Ok(Self::Future),
            "past" | "archived" => Ok(Self::Past),
            other => Err(format!("unknown filter: {other}")),
        }
    }
}

/// A delete waiting for user confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PendingDelete {
    /// Nothing armed.
    #[default]
    None,

    /// One event, armed from the normal list.
    Single(Uuid),

    /// The selection captured when bulk delete was armed.
    Bulk(BTreeSet<Uuid>),
}

/// Coarse state of the delete flow, derived from [`PendingDelete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePhase {
    Idle,
    SingleArmed,
    BulkArmed,
}

impl PendingDelete {
    #[must_use]
    pub const fn phase(&self) -> DeletePhase {
        match self {
            Self::None => DeletePhase::Idle,
            Self::Single(_) => DeletePhase::SingleArmed,
            Self::Bulk(_) => DeletePhase::BulkArmed,
        }
    }

    /// Whether a confirmation prompt should be showing.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        !matches!(self, Self::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_maps_to_archived_flag_and_order() {
        assert!(!ListFilter::Future.is_archived());
        assert!(ListFilter::Past.is_archived());
        assert_eq!(ListFilter::Future.sort_order(), SortOrder::Ascending);
        assert_eq!(ListFilter::Past.sort_order(), SortOrder::Descending);
        assert_eq!(ListFilter::Past.query(), EventQuery::archived(true).sorted_by(SortKey::Date, SortOrder::Descending));
    }

    #[test]
    fn filter_parses_aliases() {
        assert_eq!("Upcoming".parse::<ListFilter>(), Ok(ListFilter::Future));
        assert_eq!("past".parse::<ListFilter>(), Ok(ListFilter::Past));
        assert!("someday".parse::<ListFilter>().is_err());
    }

    #[test]
    fn pending_delete_phases() {
        assert_eq!(PendingDelete::None.phase(), DeletePhase::Idle);
        assert!(!PendingDelete::None.is_armed());
        assert_eq!(PendingDelete::Single(Uuid::new_v4()).phase(), DeletePhase::SingleArmed);
        assert!(PendingDelete::Bulk(BTreeSet::new()).is_armed());
    }
}
