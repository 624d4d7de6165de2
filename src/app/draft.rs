//! Create-form input and in-place edits.
//!
//! [`EventDraft`] holds raw form input and turns it into a [`NewEvent`] once it
//! passes the same checks the create form applies. [`EventUpdate`] describes a
//! partial edit of an existing event.

use crate::domain::error::{FutureJoyError, Result};
use crate::domain::{Event, NewEvent};
use chrono::{DateTime, Local, NaiveDate, Utc};

/// Raw create-form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub emoji: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub category: String,
    pub notes: String,
}

impl EventDraft {
    #[must_use]
    pub fn new(title: impl Into<String>, emoji: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            emoji: emoji.into(),
            date,
            location: String::new(),
            category: String::new(),
            notes: String::new(),
        }
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Validates the draft and normalizes it into a [`NewEvent`].
    ///
    /// Rules:
    /// - title, after trimming, must be non-empty
    /// - an emoji must be chosen
    /// - the date's local day must be `today` or later
    ///
    /// Optional fields are trimmed; blank values become `None`.
    ///
    /// # Errors
    ///
    /// Returns [`FutureJoyError::Validation`] naming the first failed rule.
    pub fn validate(&self, today: NaiveDate) -> Result<NewEvent> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FutureJoyError::Validation("Event name is required".to_string()));
        }

        let emoji = self.emoji.trim();
        if emoji.is_empty() {
            return Err(FutureJoyError::Validation("Choose an emoji".to_string()));
        }

        if self.date.with_timezone(&Local).date_naive() < today {
            return Err(FutureJoyError::Validation(
                "Event date must be today or later".to_string(),
            ));
        }

        Ok(NewEvent {
            title: title.to_string(),
            emoji: emoji.to_string(),
            date: self.date,
            location: non_blank(&self.location),
            category: non_blank(&self.category),
            notes: non_blank(&self.notes),
        })
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Partial edit of an existing event.
///
/// `None` leaves a field untouched. For the optional text fields,
/// `Some(None)` clears the value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventUpdate {
    pub title: Option<String>,
    pub emoji: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}

impl EventUpdate {
    /// Whether the update would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Applies the edit in place.
    ///
    /// The archived flag and identity fields are never touched.
    ///
    /// # Errors
    ///
    /// Returns [`FutureJoyError::Validation`] if the edit would blank the title
    /// or emoji.
    pub fn apply_to(&self, event: &mut Event) -> Result<()> {
        if let Some(title) = &self.title {
            let title = title.trim();
            if title.is_empty() {
                return Err(FutureJoyError::Validation("Event name is required".to_string()));
            }
            event.title = title.to_string();
        }
        if let Some(emoji) = &self.emoji {
            let emoji = emoji.trim();
            if emoji.is_empty() {
                return Err(FutureJoyError::Validation("Choose an emoji".to_string()));
            }
            event.emoji = emoji.to_string();
        }
        if let Some(date) = self.date {
            event.date = date;
        }
        if let Some(location) = &self.location {
            event.location = location.as_deref().and_then(non_blank);
        }
        if let Some(category) = &self.category {
            event.category = category.as_deref().and_then(non_blank);
        }
        if let Some(notes) = &self.notes {
            event.notes = notes.as_deref().and_then(non_blank);
        }
        Ok(())
    }
}
