//! Application-wide constants and default values.
//!
//! This module defines the compiled-in defaults used throughout the
//! sync core. `Default` impls elsewhere reference these so there is
//! exactly one source of truth for every default.

use std::time::Duration;

// === Application Metadata ===

/// Application name (from Cargo.toml).
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
/// Current application version (from Cargo.toml).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// === Configuration ===

/// Name of the persisted configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "sprofile.json";
/// Suffix appended to the config file name while writing, before the
/// atomic rename into place.
pub const CONFIG_TMP_SUFFIX: &str = ".tmp";

// === Timing Defaults ===

/// Interval between background profile syncs.
pub const DEFAULT_SYNC_INTERVAL: Duration = Duration::from_secs(1);

// === Logger Defaults ===

/// Default maximum number of log entries kept in the event log.
pub const DEFAULT_MAX_LOG_ENTRIES: usize = 1000;
/// Default minimum log level shown in the event log.
pub const DEFAULT_LOG_LEVEL: &str = "info";
