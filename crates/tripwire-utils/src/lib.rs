//! # Tripwire Utilities
//!
//! Shared logging and configuration helpers for Tripwire.
//!
//! `tripwire-core` only emits `tracing` events. This crate installs the
//! subscriber that turns them into output, configured from the environment or
//! from explicit settings.

pub mod logging;

// Re-export commonly used logging functions for convenience
pub use logging::{init_logging, init_logging_with_level, LogFormat, LogLevel, LoggingError, LoggingGuard};
pub use tracing::{debug, error, info, trace, warn};
