//! Confirm-then-execute guard for destructive actions.
//!
//! Wraps a single async action behind the confirmation dialog and a
//! disabled flag for the UI. The flag is raised only while the wrapped
//! action is in flight and is reset on every exit path, success or
//! failure; a guard can never end up stuck disabled.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::Result;
use crate::log_debug;
use crate::transport::Confirmer;

/// Result of a guarded invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<T> {
    /// Confirmed, executed, succeeded.
    Completed(T),
    /// The user did not confirm; the action never started.
    Declined,
    /// Another guarded action was already in flight; the action never
    /// started and the confirmer was not asked.
    Busy,
}

/// Clears the busy flag when dropped, so early returns and error paths
/// cannot leave the guard disabled.
struct ResetFlag<'a>(&'a AtomicBool);

impl Drop for ResetFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Guard around destructive actions (clearing a log, disconnecting).
pub struct DestructiveActionGuard {
    confirmer: Arc<dyn Confirmer>,
    busy: AtomicBool,
}

impl DestructiveActionGuard {
    pub fn new(confirmer: Arc<dyn Confirmer>) -> Self {
        Self {
            confirmer,
            busy: AtomicBool::new(false),
        }
    }

    /// Whether the wrapped control should currently be disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Confirms and runs `action`.
    ///
    /// # Errors
    ///
    /// Propagates the action's error after the disabled flag has been
    /// reset.
    pub async fn run<T, F>(&self, prompt: &str, action: F) -> Result<Outcome<T>>
    where
        F: Future<Output = Result<T>>,
    {
        if self.is_disabled() {
            log_debug!("GUARD", "action rejected, another is in flight");
            return Ok(Outcome::Busy);
        }
        if !self.confirmer.confirm(prompt).await {
            log_debug!("GUARD", "action declined: {prompt}");
            return Ok(Outcome::Declined);
        }
        self.execute(action).await
    }

    /// Like [`Self::run`], but requires the user to type `phrase`
    /// exactly (for especially destructive operations).
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::run`].
    pub async fn run_phrase<T, F>(&self, prompt: &str, phrase: &str, action: F) -> Result<Outcome<T>>
    where
        F: Future<Output = Result<T>>,
    {
        if self.is_disabled() {
            log_debug!("GUARD", "action rejected, another is in flight");
            return Ok(Outcome::Busy);
        }
        if !self.confirmer.confirm_phrase(prompt, phrase).await {
            log_debug!("GUARD", "action declined: {prompt}");
            return Ok(Outcome::Declined);
        }
        self.execute(action).await
    }

    async fn execute<T, F>(&self, action: F) -> Result<Outcome<T>>
    where
        F: Future<Output = Result<T>>,
    {
        // Another action may have started while the dialog was open.
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Ok(Outcome::Busy);
        }
        let _reset = ResetFlag(&self.busy);
        let value = action.await?;
        Ok(Outcome::Completed(value))
    }
}
