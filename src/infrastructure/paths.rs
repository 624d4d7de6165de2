//! Path utilities for locating FutureJoy's data on disk.
//!
//! This module resolves the data directory, expands `~` in user-supplied paths,
//! and names the files the crate keeps next to the event store.

use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "FUTUREJOY_DATA_DIR";

/// File name of the one-time migration marker.
pub const MIGRATION_MARKER: &str = ".legacy-migration-complete";

/// File name of the rotating trace log.
pub const TRACE_FILE: &str = "futurejoy.log.json";

/// Returns the data directory for FutureJoy storage.
///
/// Resolution order:
/// 1. `$FUTUREJOY_DATA_DIR` if set
/// 2. The platform data directory (`~/.local/share` on Linux) joined with `futurejoy`
/// 3. `./.futurejoy` if no platform directory can be determined
#[must_use]
pub fn get_data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    dirs::data_dir().map_or_else(
        || PathBuf::from(".futurejoy"),
        |base| base.join("futurejoy"),
    )
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, and all paths when the home directory is
/// unknown, are returned unchanged.
///
/// # Examples
///
/// ```
/// use futurejoy::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), std::path::PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let Some(home) = dirs::home_dir() else {
        return PathBuf::from(path);
    };

    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}

/// Location of the migration marker for a given data directory.
#[must_use]
pub fn migration_marker_path(data_dir: &Path) -> PathBuf {
    data_dir.join(MIGRATION_MARKER)
}
