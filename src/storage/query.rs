//! Plain-data store queries.
//!
//! A query is an archived-flag criterion plus an optional sort specification.
//! Backends evaluate it with [`EventQuery::apply`] so every backend agrees on
//! filtering and ordering.

use crate::domain::Event;
use std::cmp::Ordering;

/// Field an event listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Event target date, ties broken by creation time.
    Date,
    /// Creation timestamp.
    CreatedAt,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Ordering applied to query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortSpec {
    #[must_use]
    pub const fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }

    fn compare(self, a: &Event, b: &Event) -> Ordering {
        let ordering = match self.key {
            SortKey::Date => a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)),
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        };
        match self.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// Selection criteria for [`EventStore::fetch`](super::EventStore::fetch).
///
/// # Examples
///
/// ```
/// use futurejoy::storage::{EventQuery, SortKey, SortOrder};
///
/// let query = EventQuery::archived(false).sorted_by(SortKey::Date, SortOrder::Ascending);
/// assert_eq!(query.is_archived, Some(false));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventQuery {
    /// Required value of `is_archived`, or `None` for all events.
    pub is_archived: Option<bool>,

    /// Result ordering, or `None` for backend order.
    pub sort: Option<SortSpec>,
}

impl EventQuery {
    /// Matches every event.
    #[must_use]
    pub const fn all() -> Self {
        Self { is_archived: None, sort: None }
    }

    /// Matches events whose archived flag equals `is_archived`.
    #[must_use]
    pub const fn archived(is_archived: bool) -> Self {
        Self { is_archived: Some(is_archived), sort: None }
    }

    #[must_use]
    pub const fn sorted_by(mut self, key: SortKey, order: SortOrder) -> Self {
        self.sort = Some(SortSpec::new(key, order));
        self
    }

    /// Whether a single event satisfies the criteria.
    #[must_use]
    pub fn matches(&self, event: &Event) -> bool {
        self.is_archived.map_or(true, |flag| event.is_archived == flag)
    }

    /// Filters and orders a set of events according to this query.
    pub fn apply<'a, I>(&self, events: I) -> Vec<Event>
    where
        I: IntoIterator<Item = &'a Event>,
    {
        let mut matched: Vec<Event> = events
            .into_iter()
            .filter(|event| self.matches(event))
            .cloned()
            .collect();

        if let Some(sort) = self.sort {
            matched.sort_by(|a, b| sort.compare(a, b));
        }

        matched
    }
}
