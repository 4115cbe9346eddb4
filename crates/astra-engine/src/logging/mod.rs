//! Logging utilities.
//!
//! Centralizes logger initialization behind the `log` facade so binaries
//! only make one call early in `main`.

mod init;

pub use init::{init_logging, LoggingConfig};
