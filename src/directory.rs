//! The canonical, periodically-refreshed profile set.
//!
//! `ProfileDirectory` owns the authoritative [`ProfileSet`]. A sync
//! fetches the full list, replaces the set wholesale, and then notifies
//! subscribers synchronously, so no listener ever observes a torn set.
//! A failed sync keeps the last-known-good set: stale data beats a
//! blank profile list.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{Error, Result};
use crate::profile::{Profile, ProfileSet};
use crate::transport::ProfileTransport;
use crate::{log_debug, log_error};

/// Handle returned by [`ProfileDirectory::subscribe`]; pass it to
/// [`ProfileDirectory::unsubscribe`] on teardown.
pub type ListenerId = u64;

type Listener = Arc<dyn Fn(&ProfileSet) + Send + Sync>;

struct DirectoryInner {
    profiles: ProfileSet,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: ListenerId,
    loading: bool,
}

/// Owner of the profile set; everything else holds snapshots.
pub struct ProfileDirectory {
    transport: Arc<dyn ProfileTransport>,
    inner: Mutex<DirectoryInner>,
}

impl ProfileDirectory {
    pub fn new(transport: Arc<dyn ProfileTransport>) -> Arc<Self> {
        Arc::new(Self {
            transport,
            inner: Mutex::new(DirectoryInner {
                profiles: ProfileSet::default(),
                listeners: Vec::new(),
                next_listener_id: 0,
                loading: false,
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, DirectoryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetches the full profile list and replaces the set on success.
    ///
    /// Listeners run synchronously after the replacement, before this
    /// call returns. On failure the existing set stays untouched, the
    /// error is logged, and listeners are not notified. `silent`
    /// suppresses the loading signal ([`Self::is_loading`]) and nothing
    /// else; background pollers use it so the UI does not flicker.
    ///
    /// Overlapping syncs are allowed; whichever response lands last
    /// wins.
    pub async fn sync(&self, silent: bool) {
        if !silent {
            self.lock().loading = true;
        }

        let result = self.transport.fetch_profiles().await;

        match result {
            Ok(records) => {
                let set = ProfileSet::from_records(records, &self.transport);
                let listeners: Vec<Listener> = {
                    let mut inner = self.lock();
                    inner.profiles = set.clone();
                    if !silent {
                        inner.loading = false;
                    }
                    inner.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
                };
                log_debug!("SYNC", "profile sync ok ({} profiles)", set.len());
                for listener in listeners {
                    listener(&set);
                }
            }
            Err(err) => {
                log_error!("SYNC", "profile sync failed: {err}");
                if !silent {
                    self.lock().loading = false;
                }
            }
        }
    }

    /// Registers a change listener, invoked after every successful sync
    /// with the new set.
    pub fn subscribe(&self, listener: impl Fn(&ProfileSet) + Send + Sync + 'static) -> ListenerId {
        let mut inner = self.lock();
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner.listeners.push((id, Arc::new(listener)));
        id
    }

    /// Removes a previously registered listener. Unknown ids are
    /// ignored.
    pub fn unsubscribe(&self, id: ListenerId) {
        self.lock().listeners.retain(|(lid, _)| *lid != id);
    }

    /// Resolves a profile by id from the current set.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when the id is absent.
    pub fn lookup(&self, id: &str) -> Result<Profile> {
        self.lock()
            .profiles
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Snapshot of the current set, in display order.
    #[must_use]
    pub fn profiles(&self) -> ProfileSet {
        self.lock().profiles.clone()
    }

    /// Whether a non-silent sync is currently in flight (UI loading
    /// signal).
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }
}
