//! Log view selection state machine.
//!
//! `ViewController` owns which log is currently displayed and guards
//! against stale fetch results with a monotonic generation counter:
//! every fetch is tagged with the generation current when it was
//! issued, and a completion whose tag no longer matches is discarded.
//! Whatever order responses arrive in, the text on screen belongs to
//! the last selection.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::directory::{ListenerId, ProfileDirectory};
use crate::error::Result;
use crate::profile::ProfileSet;
use crate::transport::LogTransport;
use crate::{log_debug, log_error, log_info};

/// The currently selected log source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogView {
    /// The backend service daemon's log.
    Service,
    /// The desktop client's own log.
    Client,
    /// The log of one profile, by id.
    Profile(String),
}

/// Display state of the log view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// No fetch in flight and no text to show (startup, or the last
    /// fetch for this view failed).
    Idle { view: LogView },
    /// A fetch tagged with `generation` is in flight.
    Loading { view: LogView, generation: u64 },
    /// Text from the fetch tagged with `generation` is on display.
    Loaded {
        view: LogView,
        generation: u64,
        text: String,
    },
}

impl ViewState {
    /// The selected view, regardless of phase.
    #[must_use]
    pub fn view(&self) -> &LogView {
        match self {
            Self::Idle { view } | Self::Loading { view, .. } | Self::Loaded { view, .. } => view,
        }
    }

    /// The displayed text, if any is loaded.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Loaded { text, .. } => Some(text),
            _ => None,
        }
    }
}

struct ViewInner {
    state: ViewState,
    /// Latest issued generation; only a completion tagged with this
    /// value may be applied.
    generation: u64,
    listener: Option<ListenerId>,
}

/// Owns the current log view and drives its fetches.
pub struct ViewController {
    directory: Arc<ProfileDirectory>,
    logs: Arc<dyn LogTransport>,
    inner: Mutex<ViewInner>,
}

impl ViewController {
    /// Creates a controller starting on the service log, idle.
    pub fn new(directory: Arc<ProfileDirectory>, logs: Arc<dyn LogTransport>) -> Arc<Self> {
        Arc::new(Self {
            directory,
            logs,
            inner: Mutex::new(ViewInner {
                state: ViewState::Idle {
                    view: LogView::Service,
                },
                generation: 0,
                listener: None,
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, ViewInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Subscribes to profile-set changes so a view whose profile
    /// disappears falls back to the service log.
    ///
    /// Must be called from within a tokio runtime.
    pub fn attach(self: &Arc<Self>) {
        let weak = Arc::downgrade(self);
        let id = self.directory.subscribe(move |set| {
            if let Some(controller) = Weak::upgrade(&weak) {
                controller.on_profiles_changed(set);
            }
        });
        self.lock().listener = Some(id);
    }

    /// Unsubscribes from profile-set changes. Fetches already in
    /// flight still complete and are rejected by the generation check.
    pub fn detach(&self) {
        let id = self.lock().listener.take();
        if let Some(id) = id {
            self.directory.unsubscribe(id);
        }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> ViewState {
        self.lock().state.clone()
    }

    /// The currently selected view.
    #[must_use]
    pub fn current_view(&self) -> LogView {
        self.lock().state.view().clone()
    }

    /// Selects a view and fetches its log.
    ///
    /// Any fetch still in flight for a previous selection goes stale
    /// and its result will be discarded when it lands.
    ///
    /// # Errors
    ///
    /// Propagates the fetch error when this selection is still current
    /// at completion time; the state drops back to `Idle`.
    pub async fn select_view(&self, view: LogView) -> Result<()> {
        let generation = self.begin(view.clone());
        self.run_fetch(view, generation).await
    }

    /// Re-fetches the current view under a fresh generation, so any
    /// in-flight fetch for the same view is also treated as stale.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::select_view`].
    pub async fn refresh(&self) -> Result<()> {
        let view = self.current_view();
        let generation = self.begin(view.clone());
        self.run_fetch(view, generation).await
    }

    /// Issues a new generation and transitions to `Loading`.
    fn begin(&self, view: LogView) -> u64 {
        let mut inner = self.lock();
        inner.generation += 1;
        let generation = inner.generation;
        inner.state = ViewState::Loading { view, generation };
        generation
    }

    async fn run_fetch(&self, view: LogView, generation: u64) -> Result<()> {
        let result = self.fetch(&view).await;
        self.apply(view, generation, result)
    }

    async fn fetch(&self, view: &LogView) -> Result<String> {
        match view {
            LogView::Service => self.logs.read_service_log().await,
            LogView::Client => self.logs.read_client_log().await,
            LogView::Profile(id) => self.directory.lookup(id)?.read_log().await,
        }
    }

    /// Applies a fetch completion, unless its generation went stale.
    fn apply(&self, view: LogView, generation: u64, result: Result<String>) -> Result<()> {
        let mut inner = self.lock();
        if generation != inner.generation {
            log_debug!(
                "VIEW",
                "discarding stale log fetch (generation {generation}, current {})",
                inner.generation
            );
            return Ok(());
        }
        match result {
            Ok(text) => {
                inner.state = ViewState::Loaded {
                    view,
                    generation,
                    text,
                };
                Ok(())
            }
            Err(err) => {
                log_error!("VIEW", "log fetch failed: {err}");
                inner.state = ViewState::Idle { view };
                Err(err)
            }
        }
    }

    /// Profile-set change handler: a `Profile(id)` view whose id is no
    /// longer in the set falls back to the service log. The state
    /// transition happens here, synchronously; the service-log fetch is
    /// issued exactly once, as its own task.
    fn on_profiles_changed(self: &Arc<Self>, set: &ProfileSet) {
        let evicted = {
            let inner = self.lock();
            match inner.state.view() {
                LogView::Profile(id) => !set.contains(id),
                _ => false,
            }
        };
        if !evicted {
            return;
        }

        log_info!("VIEW", "selected profile removed, showing service log");
        let generation = self.begin(LogView::Service);
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            // Failure already logged in apply; nothing to return to.
            let _ = controller.run_fetch(LogView::Service, generation).await;
        });
    }
}
