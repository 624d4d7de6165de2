//! Infrastructure layer for filesystem and environment interactions.
//!
//! This module provides data-directory resolution and the wall-clock
//! abstraction used by the view-model.

pub mod clock;
pub mod paths;

pub use clock::{Clock, FixedClock, SystemClock};
pub use paths::{expand_tilde, get_data_dir, migration_marker_path};
