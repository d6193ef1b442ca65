//! User-intent actions composed from the guard, the directory, and the
//! view controller.
//!
//! These are the operations the UI buttons call: clear the currently
//! displayed log, connect or disconnect a profile. Each destructive one
//! goes through [`DestructiveActionGuard`] and is followed by whatever
//! resync the cleared state requires.

use std::sync::Arc;

use crate::directory::ProfileDirectory;
use crate::error::Result;
use crate::guard::{DestructiveActionGuard, Outcome};
use crate::log_info;
use crate::profile::ProfileStatus;
use crate::transport::{LogTransport, ProfileTransport};
use crate::view::{LogView, ViewController};

/// Actions on the log view (the trash button on the log panel).
pub struct LogActions {
    view: Arc<ViewController>,
    directory: Arc<ProfileDirectory>,
    logs: Arc<dyn LogTransport>,
    guard: Arc<DestructiveActionGuard>,
}

impl LogActions {
    pub fn new(
        view: Arc<ViewController>,
        directory: Arc<ProfileDirectory>,
        logs: Arc<dyn LogTransport>,
        guard: Arc<DestructiveActionGuard>,
    ) -> Self {
        Self {
            view,
            directory,
            logs,
            guard,
        }
    }

    /// Whether the clear control should be disabled right now.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.guard.is_disabled()
    }

    /// Clears the log behind the currently selected view, after
    /// confirmation.
    ///
    /// A successful profile-log clear triggers a directory sync so
    /// profile status reflects the cleared state; service and client
    /// clears do not touch the directory. Either way the view is
    /// refreshed so the displayed text matches the cleared log.
    ///
    /// # Errors
    ///
    /// Propagates transport failures; the guard's disabled flag is
    /// already reset when they surface.
    pub async fn clear_current_log(&self) -> Result<Outcome<()>> {
        let view = self.view.current_view();
        let label = self.view_label(&view);
        let prompt = format!("Confirm clearing {label} logs");

        let outcome = match &view {
            LogView::Service => self.guard.run(&prompt, self.logs.clear_service_log()).await?,
            LogView::Client => self.guard.run(&prompt, self.logs.clear_client_log()).await?,
            LogView::Profile(id) => {
                let profile = self.directory.lookup(id)?;
                self.guard
                    .run(&prompt, async move { profile.clear_log().await })
                    .await?
            }
        };

        if matches!(outcome, Outcome::Completed(())) {
            log_info!("ACTION", "cleared {label} logs");
            if matches!(view, LogView::Profile(_)) {
                self.directory.sync(false).await;
            }
            self.view.refresh().await?;
        }
        Ok(outcome)
    }

    fn view_label(&self, view: &LogView) -> String {
        match view {
            LogView::Service => "Service".to_string(),
            LogView::Client => "Client".to_string(),
            LogView::Profile(id) => self
                .directory
                .lookup(id)
                .map_or_else(|_| id.clone(), |p| p.formatted_name().to_string()),
        }
    }
}

/// Connect/disconnect actions on a profile.
pub struct ProfileActions {
    directory: Arc<ProfileDirectory>,
    transport: Arc<dyn ProfileTransport>,
    guard: Arc<DestructiveActionGuard>,
}

impl ProfileActions {
    pub fn new(
        directory: Arc<ProfileDirectory>,
        transport: Arc<dyn ProfileTransport>,
        guard: Arc<DestructiveActionGuard>,
    ) -> Self {
        Self {
            directory,
            transport,
            guard,
        }
    }

    /// Whether the connect/disconnect control should be disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.guard.is_disabled()
    }

    /// Connects a profile after confirmation, then resyncs so statuses
    /// update.
    ///
    /// # Errors
    ///
    /// [`crate::Error::NotFound`] for an unknown id; transport failures
    /// propagate with the guard already reset.
    pub async fn connect(&self, id: &str, password: &str) -> Result<Outcome<ProfileStatus>> {
        let profile = self.directory.lookup(id)?;
        let prompt = format!("Confirm connecting {}", profile.formatted_name());

        let outcome = self
            .guard
            .run(&prompt, self.transport.connect(id, password))
            .await?;
        if let Outcome::Completed(status) = &outcome {
            log_info!("ACTION", "connect {}: {status}", profile.formatted_name());
            self.directory.sync(false).await;
        }
        Ok(outcome)
    }

    /// Disconnects a profile after confirmation, then resyncs so
    /// statuses update.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::connect`].
    pub async fn disconnect(&self, id: &str) -> Result<Outcome<ProfileStatus>> {
        let profile = self.directory.lookup(id)?;
        let prompt = format!("Confirm disconnecting {}", profile.formatted_name());

        let outcome = self.guard.run(&prompt, self.transport.disconnect(id)).await?;
        if let Outcome::Completed(status) = &outcome {
            log_info!("ACTION", "disconnect {}: {status}", profile.formatted_name());
            self.directory.sync(false).await;
        }
        Ok(outcome)
    }
}
