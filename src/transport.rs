//! External capability seams.
//!
//! The core never talks to the backend service directly; it goes
//! through these traits. The desktop shell provides real
//! implementations (HTTP/IPC to the service daemon, the confirmation
//! dialog widget); tests provide scripted fakes.

use async_trait::async_trait;

use crate::error::Result;
use crate::profile::{ProfileRecord, ProfileStatus};

/// Transport for the profile list and per-profile operations.
#[async_trait]
pub trait ProfileTransport: Send + Sync {
    /// Fetches the full, ordered profile list from the service.
    async fn fetch_profiles(&self) -> Result<Vec<ProfileRecord>>;

    /// Reads the log text for one profile (opaque newline-delimited text).
    async fn read_log(&self, id: &str) -> Result<String>;

    /// Clears the log for one profile.
    async fn clear_log(&self, id: &str) -> Result<()>;

    /// Starts a connection for the profile, returning the resulting status.
    async fn connect(&self, id: &str, password: &str) -> Result<ProfileStatus>;

    /// Tears down the connection for the profile, returning the resulting status.
    async fn disconnect(&self, id: &str) -> Result<ProfileStatus>;
}

/// Transport for the two non-profile log sources.
#[async_trait]
pub trait LogTransport: Send + Sync {
    async fn read_service_log(&self) -> Result<String>;
    async fn clear_service_log(&self) -> Result<()>;
    async fn read_client_log(&self) -> Result<String>;
    async fn clear_client_log(&self) -> Result<()>;
}

/// The confirmation dialog, reduced to its contract: ask the user,
/// answer `true` only on an explicit confirmation, at most once per
/// call. Dialog internals (animation, timeouts) stay in the shell.
#[async_trait]
pub trait Confirmer: Send + Sync {
    /// Asks the user to confirm the prompt.
    async fn confirm(&self, prompt: &str) -> bool;

    /// Stricter variant for especially destructive operations: the user
    /// must type `phrase` exactly. Shells without that widget fall back
    /// to the plain dialog.
    async fn confirm_phrase(&self, prompt: &str, _phrase: &str) -> bool {
        self.confirm(prompt).await
    }
}
