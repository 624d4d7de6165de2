//! Where sponsored items come from.
//!
//! [`AdSource`] is the seam for an ad network: one call, one displayable item
//! or an error. The binary uses [`HouseAdSource`], which cycles through items
//! listed in the configuration.

use crate::domain::error::{FutureJoyError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};

/// A displayable sponsored item, opaque to event logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SponsoredItem {
    pub id: String,
    pub headline: String,
    #[serde(default)]
    pub body: String,
    pub advertiser: String,
    #[serde(default = "default_call_to_action")]
    pub call_to_action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

fn default_call_to_action() -> String {
    "Learn more".to_string()
}

impl SponsoredItem {
    #[must_use]
    pub fn new(id: impl Into<String>, headline: impl Into<String>, advertiser: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            headline: headline.into(),
            body: String::new(),
            advertiser: advertiser.into(),
            call_to_action: default_call_to_action(),
            image_url: None,
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}

/// Fetches one sponsored item.
#[async_trait]
pub trait AdSource: Send + Sync {
    /// # Errors
    ///
    /// Returns [`FutureJoyError::AdFetch`] when no item could be produced.
    async fn fetch(&self) -> Result<SponsoredItem>;
}

/// Serves a fixed list of items round-robin.
#[derive(Debug, Default)]
pub struct HouseAdSource {
    items: Vec<SponsoredItem>,
    next: AtomicUsize,
}

impl HouseAdSource {
    #[must_use]
    pub fn new(items: Vec<SponsoredItem>) -> Self {
        Self {
            items,
            next: AtomicUsize::new(0),
        }
    }

    /// Items shown when the configuration lists none.
    #[must_use]
    pub fn default_items() -> Vec<SponsoredItem> {
        vec![
            SponsoredItem::new("house-share", "Share the countdown", "FutureJoy")
                .with_body("Invite a friend to the events you are looking forward to."),
            SponsoredItem::new("house-archive", "Relive past events", "FutureJoy")
                .with_body("Switch to Past to see everything you have already enjoyed."),
        ]
    }
}

#[async_trait]
impl AdSource for HouseAdSource {
    async fn fetch(&self) -> Result<SponsoredItem> {
        if self.items.is_empty() {
            return Err(FutureJoyError::AdFetch("no house ads configured".to_string()));
        }
        let index = self.next.fetch_add(1, Ordering::Relaxed) % self.items.len();
        Ok(self.items[index].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn house_ads_rotate() {
        let source = HouseAdSource::new(vec![
            SponsoredItem::new("a", "A", "Acme"),
            SponsoredItem::new("b", "B", "Acme"),
        ]);

        let ids = [
            source.fetch().await.unwrap().id,
            source.fetch().await.unwrap().id,
            source.fetch().await.unwrap().id,
        ];
        assert_eq!(ids, ["a", "b", "a"]);
    }

    #[tokio::test]
    async fn empty_house_source_errors() {
        let source = HouseAdSource::new(Vec::new());
        assert!(matches!(source.fetch().await, Err(FutureJoyError::AdFetch(_))));
    }

    #[test]
    fn item_deserializes_with_defaults() {
        let item: SponsoredItem =
            serde_json::from_str(r#"{"id":"x","headline":"Hi","advertiser":"Acme"}"#).unwrap();
        assert_eq!(item.call_to_action, "Learn more");
        assert!(item.body.is_empty());
        assert!(item.image_url.is_none());
    }
}
