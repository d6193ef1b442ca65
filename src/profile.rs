//! Profile types and the ordered profile set.
//!
//! [`ProfileRecord`] is the wire shape returned by the transport.
//! [`Profile`] is the resolved form handed to the rest of the core: the
//! record fields plus the log capabilities, backed by a shared
//! transport handle. The authoritative copies live in
//! `ProfileDirectory`; everything else works on clones.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::transport::ProfileTransport;

/// Connection status of a profile as reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileStatus {
    /// No active connection.
    #[default]
    Disconnected,
    /// Connection attempt in progress.
    Connecting,
    /// Connection dropped, automatic retry in progress.
    Reconnecting,
    /// Disconnection in progress.
    Disconnecting,
    /// Tunnel established.
    Connected,
}

impl fmt::Display for ProfileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Reconnecting => "reconnecting",
            Self::Disconnecting => "disconnecting",
            Self::Connected => "connected",
        };
        f.write_str(s)
    }
}

/// Profile data as returned by [`ProfileTransport::fetch_profiles`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Stable identifier assigned by the service.
    pub id: String,
    /// User-visible profile name.
    pub name: String,
    /// Current connection status.
    #[serde(default)]
    pub status: ProfileStatus,
}

impl ProfileRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, status: ProfileStatus) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status,
        }
    }
}

/// A profile with its log capabilities attached.
#[derive(Clone)]
pub struct Profile {
    /// Stable identifier assigned by the service.
    pub id: String,
    /// User-visible profile name.
    pub name: String,
    /// Current connection status.
    pub status: ProfileStatus,
    transport: Arc<dyn ProfileTransport>,
}

impl Profile {
    pub(crate) fn new(record: ProfileRecord, transport: Arc<dyn ProfileTransport>) -> Self {
        Self {
            id: record.id,
            name: record.name,
            status: record.status,
            transport,
        }
    }

    /// Display name: the profile name, or the id when the name is empty.
    #[must_use]
    pub fn formatted_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    /// Reads this profile's log text.
    pub async fn read_log(&self) -> Result<String> {
        self.transport.read_log(&self.id).await
    }

    /// Clears this profile's log.
    pub async fn clear_log(&self) -> Result<()> {
        self.transport.clear_log(&self.id).await
    }
}

impl fmt::Debug for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Profile")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("status", &self.status)
            .finish()
    }
}

/// Ordered set of profiles, keyed by id.
///
/// Insertion order is display order. Ids are unique; a duplicate id in
/// a fetch result keeps the first occurrence. The set is replaced
/// wholesale on every successful sync, never merged field by field.
#[derive(Debug, Clone, Default)]
pub struct ProfileSet {
    profiles: Vec<Profile>,
}

impl ProfileSet {
    pub(crate) fn from_records(
        records: Vec<ProfileRecord>,
        transport: &Arc<dyn ProfileTransport>,
    ) -> Self {
        let mut profiles: Vec<Profile> = Vec::with_capacity(records.len());
        for record in records {
            if profiles.iter().any(|p| p.id == record.id) {
                continue;
            }
            profiles.push(Profile::new(record, Arc::clone(transport)));
        }
        Self { profiles }
    }

    /// Looks up a profile by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// Whether a profile with this id is present.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Profiles in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
