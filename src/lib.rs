//! # sprofile-client
//!
//! Client-side state synchronization and persistent configuration core
//! for the sprofile desktop UI. Keeps the displayed profile list, log
//! view, and user preferences consistent with an asynchronously polled
//! backend service.
//!
//! ## Modules
//! - [`actions`]: Guarded user-intent operations (clear log, connect, disconnect).
//! - [`config`]: Configuration load/merge/save pipeline.
//! - [`directory`]: Canonical profile set with sync and change notification.
//! - [`guard`]: Confirm-then-execute guard for destructive actions.
//! - [`logger`]: In-memory event log.
//! - [`poller`]: Fixed-cadence background sync driver.
//! - [`transport`]: External capability seams (profile/log transports, confirmation dialog).
//! - [`view`]: Log view selection state machine with stale-response suppression.

pub mod actions;
pub mod config;
pub mod constants;
pub mod directory;
pub mod error;
pub mod guard;
pub mod logger;
pub mod poller;
pub mod profile;
pub mod transport;
pub mod view;

#[cfg(test)]
mod testutil;

pub use config::{Config, ConfigStore, PartialConfig, Theme};
pub use directory::{ListenerId, ProfileDirectory};
pub use error::{Error, Result};
pub use guard::{DestructiveActionGuard, Outcome};
pub use poller::SyncPoller;
pub use profile::{Profile, ProfileRecord, ProfileSet, ProfileStatus};
pub use transport::{Confirmer, LogTransport, ProfileTransport};
pub use view::{LogView, ViewController, ViewState};
