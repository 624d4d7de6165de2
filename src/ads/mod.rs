//! Sponsored rows interleaved with the event list.
//!
//! Independent of event data: nothing here reads or writes the store, and a
//! missing item simply leaves its slot empty.
//!
//! # Modules
//!
//! - [`source`]: The [`AdSource`] seam and the configured [`HouseAdSource`]
//! - [`cache`]: [`AdSupplyCache`], the bounded pre-fetch pool and placement rule

pub mod cache;
pub mod source;

pub use cache::{should_show_at, slot_index, AdCacheSettings, AdSupplyCache};
pub use source::{AdSource, HouseAdSource, SponsoredItem};
