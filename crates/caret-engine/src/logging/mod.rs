//! Logging utilities.
//!
//! The engine only emits through the `log` facade; this module wires up the
//! `env_logger` backend for binaries and tests that want output.

mod init;

pub use init::{init_logging, LoggingConfig};
