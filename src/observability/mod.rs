//! Structured logging to a rotating JSON-lines file.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → EnvFilter → fmt::layer().json() → RotatingFileWriter → futurejoy.log.json
//! ```
//!
//! # Configuration
//!
//! Level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - [`file_writer`]: Size-rotated file sink implementing `MakeWriter`

pub mod file_writer;
mod init;

pub use file_writer::RotatingFileWriter;
pub use init::init_tracing;
