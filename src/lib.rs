//! FutureJoy: a personal countdown tracker for upcoming events.
//!
//! FutureJoy provides:
//! - A persistent event list split into Future and Past
//! - Automatic archival of events whose day has passed
//! - Two-phase single and bulk deletion with a selection mode
//! - Self-expiring toast notifications
//! - A bounded, pre-fetched pool of sponsored rows interleaved with the list

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal front end (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │ Intents
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime (runtime/)                                 │  ← Owning task
//! │  - Intent queue, toast timers                       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event list view-model                            │  ← Business logic
//! │  - Selection & delete flow, toasts                  │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Ads           │
//! │ (ui/)         │   │ (storage/)    │   │ (ads/)        │
//! │ - Projection  │   │ - JSON I/O    │   │ - Source      │
//! │ - Rendering   │   │ - Migration   │   │ - Pool cache  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Paths, clock (infrastructure/)                   │
//! │  - Error types, Event model (domain/)               │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - JSON-lines tracing to a rotating file            │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: View-model, intents, selection/delete state machine, toasts
//! - [`ads`]: Sponsored item source and supply cache
//! - [`domain`]: Core domain types (Event, errors)
//! - [`infrastructure`]: Data-directory paths and the clock
//! - [`runtime`]: Single-owner task driving the view-model
//! - [`storage`]: JSON file persistence and legacy migration
//! - [`ui`]: Display projection and text rendering
//! - [`observability`]: Tracing setup
//!
//! # Configuration
//!
//! Read from `config.toml` in the data directory (or `--config <path>`), then
//! overridden by `key=value` arguments:
//!
//! ```toml
//! store_file = "events.json"
//! toast_duration_ms = 2500
//! ad_interval = 10
//! trace_level = "debug"
//!
//! [[house_ads]]
//! id = "spring"
//! headline = "Plan your spring getaway"
//! advertiser = "Acme Travel"
//! ```
//!
//! # Example
//!
//! ```rust
//! use futurejoy::{handle_intent, Config, EventDraft, Intent};
//!
//! let dir = std::env::temp_dir().join(format!("futurejoy-doc-{}", uuid::Uuid::new_v4()));
//! let config = Config {
//!     data_dir: Some(dir.display().to_string()),
//!     ..Default::default()
//! };
//! let mut vm = futurejoy::initialize(&config)?;
//!
//! let date = chrono::Utc::now() + chrono::Duration::days(11);
//! handle_intent(&mut vm, &Intent::Create(EventDraft::new("Concert Night", "🎸", date)));
//! assert_eq!(vm.events().len(), 1);
//! # std::fs::remove_dir_all(dir).ok();
//! # Ok::<(), futurejoy::FutureJoyError>(())
//! ```

pub mod ads;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod runtime;
pub mod storage;
pub mod ui;

pub mod observability;

pub use app::{
    handle_intent, Action, EventDraft, EventListViewModel, EventUpdate, Intent, ListFilter, ToastStyle, ViewSnapshot,
};
pub use domain::{Event, FutureJoyError, NewEvent, Result};

use ads::{AdCacheSettings, HouseAdSource, SponsoredItem};
use infrastructure::{expand_tilde, get_data_dir, migration_marker_path, SystemClock};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use storage::{migrate_legacy_store, JsonEventStore};

/// Application configuration.
///
/// Every field has a default, so an empty TOML file or map is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the store, migration marker and log file.
    ///
    /// `~` is expanded. Default: `$FUTUREJOY_DATA_DIR`, else the platform data
    /// directory joined with `futurejoy`.
    pub data_dir: Option<String>,

    /// Event store file, relative to `data_dir` unless absolute.
    /// Default: `"events.json"`
    pub store_file: String,

    /// Store to copy events from once, on first launch.
    pub legacy_store_file: Option<String>,

    /// How long toasts stay visible. Default: 2500
    pub toast_duration_ms: u64,

    /// Maximum pre-fetched sponsored items. Default: 5
    pub ad_cache_capacity: usize,

    /// Fetches fired by the first sponsored-row request. Default: 3
    pub ad_preload_count: usize,

    /// A sponsored row follows every N-th event; `0` disables them. Default: 10
    pub ad_interval: usize,

    /// Per-fetch timeout. Default: 10000
    pub ad_fetch_timeout_ms: u64,

    /// Tracing filter directive.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Items served by the house ad source. Empty uses built-in items.
    pub house_ads: Vec<SponsoredItem>,
}

impl Default for Config {
    fn default() -> Self {
        let ads = AdCacheSettings::default();
        Self {
            data_dir: None,
            store_file: "events.json".to_string(),
            legacy_store_file: None,
            toast_duration_ms: 2500,
            ad_cache_capacity: ads.capacity,
            ad_preload_count: ads.preload_count,
            ad_interval: ads.interval,
            ad_fetch_timeout_ms: 10_000,
            trace_level: None,
            house_ads: Vec::new(),
        }
    }
}

impl Config {
    /// Reads a TOML configuration file.
    ///
    /// # Errors
    ///
    /// - [`FutureJoyError::Io`] if the file cannot be read
    /// - [`FutureJoyError::Config`] if it is not valid configuration TOML
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`FutureJoyError::Config`] on malformed TOML or mistyped keys.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| FutureJoyError::Config(e.to_string()))
    }

    /// Builds a configuration from flat `key=value` pairs over the defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use futurejoy::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("ad_interval".to_string(), "5".to_string());
    /// map.insert("toast_duration_ms".to_string(), "not a number".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.ad_interval, 5);
    /// assert_eq!(config.toast_duration_ms, 2500);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self::default().with_overrides(map)
    }

    /// Applies flat `key=value` overrides.
    ///
    /// # Parsing Rules
    ///
    /// - numeric keys keep their current value if the text does not parse
    /// - empty strings clear optional keys
    /// - unknown keys are logged and ignored
    #[must_use]
    pub fn with_overrides(mut self, map: &BTreeMap<String, String>) -> Self {
        fn optional(value: &str) -> Option<String> {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        }

        for (key, value) in map {
            match key.as_str() {
                "data_dir" => self.data_dir = optional(value),
                "store_file" => {
                    if let Some(file) = optional(value) {
                        self.store_file = file;
                    }
                }
                "legacy_store_file" => self.legacy_store_file = optional(value),
                "toast_duration_ms" => parse_into(value, &mut self.toast_duration_ms),
                "ad_cache_capacity" => parse_into(value, &mut self.ad_cache_capacity),
                "ad_preload_count" => parse_into(value, &mut self.ad_preload_count),
                "ad_interval" => parse_into(value, &mut self.ad_interval),
                "ad_fetch_timeout_ms" => parse_into(value, &mut self.ad_fetch_timeout_ms),
                "trace_level" => self.trace_level = optional(value),
                other => tracing::debug!(key = other, "ignoring unknown configuration key"),
            }
        }
        self
    }

    /// The data directory after defaults and `~` expansion.
    #[must_use]
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir
            .as_deref()
            .map_or_else(get_data_dir, expand_tilde)
    }

    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.in_data_dir(&self.store_file)
    }

    #[must_use]
    pub fn legacy_store_path(&self) -> Option<PathBuf> {
        self.legacy_store_file.as_deref().map(|file| self.in_data_dir(file))
    }

    /// Default location of the configuration file.
    #[must_use]
    pub fn default_path() -> PathBuf {
        get_data_dir().join("config.toml")
    }

    #[must_use]
    pub const fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    #[must_use]
    pub const fn ad_settings(&self) -> AdCacheSettings {
        AdCacheSettings {
            capacity: self.ad_cache_capacity,
            preload_count: self.ad_preload_count,
            interval: self.ad_interval,
            fetch_timeout: Duration::from_millis(self.ad_fetch_timeout_ms),
        }
    }

    /// The ad source described by `house_ads`.
    #[must_use]
    pub fn house_ad_source(&self) -> HouseAdSource {
        if self.house_ads.is_empty() {
            HouseAdSource::new(HouseAdSource::default_items())
        } else {
            HouseAdSource::new(self.house_ads.clone())
        }
    }

    fn in_data_dir(&self, file: &str) -> PathBuf {
        let path = expand_tilde(file);
        if path.is_absolute() {
            path
        } else {
            self.resolved_data_dir().join(path)
        }
    }
}

fn parse_into<T: std::str::FromStr>(value: &str, slot: &mut T) {
    if let Ok(parsed) = value.trim().parse() {
        *slot = parsed;
    } else {
        tracing::debug!(value, "ignoring unparsable configuration value");
    }
}

/// Opens the store and returns an initialized view-model.
///
/// Steps:
/// 1. Create the data directory
/// 2. Open the JSON store at [`Config::store_path`]
/// 3. Run the one-time legacy migration if `legacy_store_file` is set; a failed
///    migration is logged and retried on the next launch
/// 4. Archive past events and load the Future list
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or the store file
/// exists but cannot be read.
pub fn initialize(config: &Config) -> Result<EventListViewModel> {
    let data_dir = config.resolved_data_dir();
    let _span = tracing::info_span!("initialize", data_dir = ?data_dir).entered();

    std::fs::create_dir_all(&data_dir)?;
    let mut store = JsonEventStore::open(config.store_path())?;

    if let Some(legacy) = config.legacy_store_path() {
        match migrate_legacy_store(&legacy, &migration_marker_path(&data_dir), &mut store) {
            Ok(outcome) => tracing::debug!(?outcome, "legacy migration checked"),
            Err(e) => tracing::warn!(error = %e, "legacy migration failed, will retry on next launch"),
        }
    }

    Ok(EventListViewModel::initialize(
        Box::new(store),
        Arc::new(SystemClock),
        config.toast_duration(),
    ))
}
