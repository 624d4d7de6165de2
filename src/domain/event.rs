//! Event domain model and countdown arithmetic.
//!
//! This module defines [`Event`], the only persistent entity of the tracker, and
//! the calendar arithmetic used everywhere a countdown is shown. The day count
//! is always the difference between local start-of-day values, so the time of
//! day of either side never affects it.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 86400;

/// A tracked event with a target date.
///
/// # Fields
///
/// - `id`: Globally unique identifier, assigned at creation and never changed
/// - `title`: Display name (non-empty is enforced by the create form)
/// - `emoji`: Short glyph representing the event
/// - `date`: Target instant; only its local calendar day matters for countdowns
/// - `location`, `category`, `notes`: Optional text, `None` means "not set"
/// - `is_archived`: Set once by the archival pass after the date has passed
/// - `created_at`: Creation instant, used as a stable tie-breaker when sorting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub emoji: String,
    pub date: DateTime<Utc>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
}

/// Field values for an event that has not been created yet.
///
/// Passed to [`EventListViewModel::add_event`](crate::app::EventListViewModel::add_event),
/// which assigns the id and creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub emoji: String,
    pub date: DateTime<Utc>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
}

impl NewEvent {
    /// Creates a new event description with only the required fields set.
    ///
    /// # Examples
    ///
    /// ```
    /// use futurejoy::domain::NewEvent;
    ///
    /// let new = NewEvent::new("Concert Night", "🎸", chrono::Utc::now())
    ///     .with_location("Paris");
    /// assert_eq!(new.location.as_deref(), Some("Paris"));
    /// assert!(new.notes.is_none());
    /// ```
    #[must_use]
    pub fn new(title: impl Into<String>, emoji: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            emoji: emoji.into(),
            date,
            location: None,
            category: None,
            notes: None,
        }
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Time left until an event, split into display units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Event {
    /// Materializes a [`NewEvent`] with a fresh id, unarchived, created at `now`.
    #[must_use]
    pub fn create(new: NewEvent, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: new.title,
            emoji: new.emoji,
            date: new.date,
            location: new.location,
            category: new.category,
            notes: new.notes,
            is_archived: false,
            created_at: now,
        }
    }

    /// Local calendar day of the event date.
    #[must_use]
    pub fn local_day(&self) -> NaiveDate {
        self.date.with_timezone(&Local).date_naive()
    }

    /// Number of calendar days from `today` to the event's day.
    ///
    /// Negative when the event day lies before `today`. Both sides are reduced
    /// to their local start of day first, so an event later today is `0` and an
    /// event at 00:01 tomorrow is `1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{Days, Local, TimeZone, Utc};
    /// use futurejoy::domain::{Event, NewEvent};
    ///
    /// let today = Local::now().date_naive();
    /// let noon = Local
    ///     .from_local_datetime(&(today + Days::new(3)).and_hms_opt(12, 0, 0).unwrap())
    ///     .earliest()
    ///     .unwrap();
    /// let event = Event::create(NewEvent::new("Trip", "✈️", noon.with_timezone(&Utc)), Utc::now());
    /// assert_eq!(event.days_until_from(today), 3);
    /// ```
    #[must_use]
    pub fn days_until_from(&self, today: NaiveDate) -> i64 {
        self.local_day().signed_duration_since(today).num_days()
    }

    /// Days until the event, measured from the current local date.
    #[must_use]
    pub fn days_until(&self) -> i64 {
        self.days_until_from(Local::now().date_naive())
    }

    /// Whether the event's day lies strictly before `today`.
    #[must_use]
    pub fn is_past_on(&self, today: NaiveDate) -> bool {
        self.days_until_from(today) < 0
    }

    /// Whether the event's day lies strictly before the current local date.
    #[must_use]
    pub fn is_past(&self) -> bool {
        self.days_until() < 0
    }

    /// Exact time remaining until the event instant, clamped at zero.
    ///
    /// Unlike [`days_until_from`](Self::days_until_from) this works on the
    /// instant rather than the calendar day and is meant for a ticking
    /// countdown display.
    #[must_use]
    pub fn time_remaining(&self, now: DateTime<Utc>) -> Countdown {
        let total = self.date.signed_duration_since(now).num_seconds().max(0);
        Countdown {
            days: total / SECONDS_PER_DAY,
            hours: (total % SECONDS_PER_DAY) / SECONDS_PER_HOUR,
            minutes: (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
            seconds: total % SECONDS_PER_MINUTE,
        }
    }
}
