//! # regsnap Utilities
//!
//! Shared helpers for the regsnap workspace; currently the `tracing`
//! logging setup used by the CLI.

pub mod logging;

pub use logging::{init_logging, init_logging_with_level, log_format_from_env, LogFormat, LogLevel, LoggingError};
pub use tracing::{debug, error, info, trace, warn};
