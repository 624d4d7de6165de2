//! Tracing initialization and subscriber setup.
//!
//! Wires `tracing` macros to a JSON-lines log file in the data directory.

use super::file_writer::RotatingFileWriter;
use crate::infrastructure::paths::TRACE_FILE;
use crate::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber.
///
/// Sets up a pipeline that:
/// 1. Filters by `RUST_LOG` if set, else `config.trace_level`, else `"info"`
/// 2. Formats each record as one JSON object with its current span
/// 3. Appends to `futurejoy.log.json` in the data directory, rotating at 10 MB
///    and keeping 3 backups
///
/// Observability is optional: if the data directory cannot be created this
/// returns without installing anything. Only the first call in a process takes
/// effect.
///
/// # Example
///
/// ```rust,no_run
/// use futurejoy::observability::init_tracing;
/// use futurejoy::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let data_dir = config.resolved_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(false)
        .with_target(true)
        .with_writer(RotatingFileWriter::new(data_dir.join(TRACE_FILE)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();
}
