//! Error taxonomy for the sync core.
//!
//! Four categories cover every failure the core can see: config reads,
//! config writes, transport calls, and profile lookups. Propagation
//! policy lives with the components — `ConfigStore` and
//! `ProfileDirectory` absorb their own errors, fetch/clear errors
//! travel up so guards can reset before surfacing them.

use thiserror::Error;

/// All errors produced by the sync core.
#[derive(Debug, Error)]
pub enum Error {
    /// Config file unreadable or unparsable.
    #[error("config read error: {0}")]
    Read(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Config file could not be persisted.
    #[error("config write error: {0}")]
    Write(#[source] std::io::Error),

    /// Profile or log transport call failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// Profile id not present in the current profile set.
    #[error("profile not found: {0}")]
    NotFound(String),
}

impl Error {
    /// Wraps an I/O failure from the config read path.
    pub fn read(source: std::io::Error) -> Self {
        Self::Read(Box::new(source))
    }

    /// Wraps a JSON parse failure from the config read path.
    pub fn parse(source: serde_json::Error) -> Self {
        Self::Read(Box::new(source))
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
