//! Logging setup.
//!
//! Everything else in the engine logs through the `log` facade; only this
//! module knows about `env_logger`.

mod init;

pub use init::{init_logging, LoggingConfig};
