//! Bounded pool of pre-fetched sponsored items.
//!
//! The list asks for an item whenever a sponsored row scrolls into view. To
//! keep that from waiting on the network, [`AdSupplyCache`] keeps up to
//! `capacity` items ready and refills in the background.
//!
//! # Policy
//!
//! - The first [`get_item`](AdSupplyCache::get_item) on a cache starts a
//!   background preload of `preload_count` fetches. Later calls never do.
//! - A hit pops the oldest item, spawns one replenishing fetch and returns
//!   immediately.
//! - A miss fetches inline and returns the result without caching it.
//! - Fetch errors and timeouts resolve to `None`.
//! - An item arriving while the pool is full is dropped.

use super::source::{AdSource, SponsoredItem};
use futures_util::future::join_all;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::Instrument;

/// Tuning for an [`AdSupplyCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdCacheSettings {
    pub capacity: usize,
    pub preload_count: usize,
    /// A sponsored row follows every `interval`-th event row.
    pub interval: usize,
    pub fetch_timeout: Duration,
}

impl Default for AdCacheSettings {
    fn default() -> Self {
        Self {
            capacity: 5,
            preload_count: 3,
            interval: 10,
            fetch_timeout: Duration::from_secs(10),
        }
    }
}

/// Whether the row at 0-based `index` is followed by a sponsored row.
///
/// # Examples
///
/// ```
/// use futurejoy::ads::should_show_at;
///
/// assert!(should_show_at(9, 10));
/// assert!(!should_show_at(8, 10));
/// assert!(!should_show_at(3, 0));
/// ```
#[must_use]
pub const fn should_show_at(index: usize, interval: usize) -> bool {
    interval > 0 && index % interval == interval - 1
}

/// 0-based ordinal of the sponsored slot after row `index`, if there is one.
#[must_use]
pub const fn slot_index(index: usize, interval: usize) -> Option<usize> {
    if should_show_at(index, interval) {
        Some(index / interval)
    } else {
        None
    }
}

struct Inner {
    source: Arc<dyn AdSource>,
    settings: AdCacheSettings,
    pool: Mutex<VecDeque<SponsoredItem>>,
    preload_started: AtomicBool,
}

/// Shared handle to the pool. Clones refer to the same cache.
#[derive(Clone)]
pub struct AdSupplyCache {
    inner: Arc<Inner>,
}

impl AdSupplyCache {
    #[must_use]
    pub fn new(source: Arc<dyn AdSource>, settings: AdCacheSettings) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                settings,
                pool: Mutex::new(VecDeque::with_capacity(settings.capacity)),
                preload_started: AtomicBool::new(false),
            }),
        }
    }

    #[must_use]
    pub fn settings(&self) -> AdCacheSettings {
        self.inner.settings
    }

    /// Number of items ready to hand out.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.pool.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.pool.lock().is_empty()
    }

    #[must_use]
    pub fn should_show_at(&self, index: usize) -> bool {
        should_show_at(index, self.inner.settings.interval)
    }

    #[must_use]
    pub fn slot_index(&self, index: usize) -> Option<usize> {
        slot_index(index, self.inner.settings.interval)
    }

    /// Runs `count` fetch-and-cache operations concurrently and waits for all.
    pub async fn preload(&self, count: usize) {
        let cached = join_all((0..count).map(|_| self.fetch_and_cache()))
            .instrument(tracing::debug_span!("ad_preload", count))
            .await
            .into_iter()
            .filter(|cached| *cached)
            .count();
        tracing::debug!(cached, pool = self.len(), "ad preload finished");
    }

    /// Hands out one item, or `None` if none could be produced.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn get_item(&self) -> Option<SponsoredItem> {
        if !self.inner.preload_started.swap(true, Ordering::SeqCst) {
            let cache = self.clone();
            let count = self.inner.settings.preload_count;
            tokio::spawn(async move { cache.preload(count).await });
        }

        let popped = self.inner.pool.lock().pop_front();
        match popped {
            Some(item) => {
                let cache = self.clone();
                tokio::spawn(async move {
                    cache.fetch_and_cache().await;
                });
                Some(item)
            }
            None => {
                tracing::debug!("ad pool empty, fetching inline");
                self.fetch().await
            }
        }
    }

    async fn fetch(&self) -> Option<SponsoredItem> {
        let limit = self.inner.settings.fetch_timeout;
        match timeout(limit, self.inner.source.fetch()).await {
            Ok(Ok(item)) => Some(item),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "ad fetch failed");
                None
            }
            Err(_) => {
                tracing::warn!(timeout_ms = limit.as_millis() as u64, "ad fetch timed out");
                None
            }
        }
    }

    async fn fetch_and_cache(&self) -> bool {
        let Some(item) = self.fetch().await else {
            return false;
        };

        let mut pool = self.inner.pool.lock();
        if pool.len() >= self.inner.settings.capacity {
            tracing::debug!(ad_id = %item.id, "ad pool full, discarding item");
            return false;
        }
        pool.push_back(item);
        true
    }
}

impl std::fmt::Debug for AdSupplyCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdSupplyCache")
            .field("settings", &self.inner.settings)
            .field("pooled", &self.len())
            .field("preload_started", &self.inner.preload_started.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
