//! Persistent user configuration.
//!
//! A single JSON file holds the window geometry and interface
//! preferences. Loading is forgiving: a missing file means defaults, a
//! corrupt file is logged, left on disk, and replaced only by the next
//! successful save. Saving is partial-update based: the store reloads
//! the file, merges the caller's changes on top, and writes the fully
//! resolved object back atomically. Config I/O never fails the caller;
//! errors are absorbed into the event log.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{Error, Result};
use crate::log_error;

/// Interface color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// User-configurable application settings.
///
/// Fields absent from the file keep their defaults; unknown fields in
/// the file are ignored on read and dropped on the next save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Saved window width in pixels (0 = let the shell decide).
    pub window_width: u32,
    /// Saved window height in pixels (0 = let the shell decide).
    pub window_height: u32,
    /// Hide the system tray icon.
    pub disable_tray_icon: bool,
    /// Use the classic interface layout.
    pub classic_interface: bool,
    /// Interface color theme.
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_width: 0,
            window_height: 0,
            disable_tray_icon: false,
            classic_interface: false,
            theme: Theme::Dark,
        }
    }
}

impl Config {
    /// Returns this config with every `Some` field of `partial` applied
    /// on top. All five fields merge identically.
    #[must_use]
    fn merged(mut self, partial: &PartialConfig) -> Self {
        if let Some(v) = partial.window_width {
            self.window_width = v;
        }
        if let Some(v) = partial.window_height {
            self.window_height = v;
        }
        if let Some(v) = partial.disable_tray_icon {
            self.disable_tray_icon = v;
        }
        if let Some(v) = partial.classic_interface {
            self.classic_interface = v;
        }
        if let Some(v) = partial.theme {
            self.theme = v;
        }
        self
    }
}

/// A partial configuration update: only the fields the caller intends
/// to change are set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_tray_icon: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classic_interface: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
}

/// Loads, merges, and persists the user configuration file.
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store backed by an explicit file path (tests, embedders).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store backed by the per-user config directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform config directory cannot be
    /// determined.
    pub fn at_default_path() -> io::Result<Self> {
        Ok(Self::new(default_config_path()?))
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted configuration.
    ///
    /// Never fails: a missing file yields defaults silently, any other
    /// read or parse problem is logged and also yields defaults. The
    /// file on disk is never touched by a load.
    pub async fn load(&self) -> Config {
        match self.read().await {
            Ok(config) => config,
            Err(err) => {
                log_error!("CONFIG", "{err}");
                Config::default()
            }
        }
    }

    async fn read(&self) -> Result<Config> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(Config::default());
            }
            Err(err) => return Err(Error::read(err)),
        };

        // Parsing into the partial form keeps "recognized fields
        // override defaults" independent of which fields the file has.
        let partial: PartialConfig = serde_json::from_str(&data).map_err(Error::parse)?;
        Ok(Config::default().merged(&partial))
    }

    /// Persists a partial update.
    ///
    /// Reloads the file first and merges `partial` on top of the
    /// freshly loaded values, so fields absent from `partial` keep
    /// whatever is on disk right now rather than a stale in-memory
    /// copy. The resolved config is written with a temp-file rename.
    /// I/O failures are logged, never returned.
    pub async fn save(&self, partial: PartialConfig) {
        if let Err(err) = self.write(partial).await {
            log_error!("CONFIG", "{err}");
        }
    }

    async fn write(&self, partial: PartialConfig) -> Result<()> {
        let resolved = self.load().await.merged(&partial);
        let data = serde_json::to_string(&resolved).map_err(|e| Error::Write(e.into()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(Error::Write)?;
            }
        }

        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, data).await.map_err(Error::Write)?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(Error::Write)?;
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(|| OsString::from(constants::CONFIG_FILE_NAME), OsString::from);
        name.push(constants::CONFIG_TMP_SUFFIX);
        self.path.with_file_name(name)
    }
}

/// Default location of the config file: the per-user config directory
/// plus the application subdirectory and fixed file name.
///
/// # Errors
///
/// Returns an error if the platform config directory cannot be
/// determined.
pub fn default_config_path() -> io::Result<PathBuf> {
    let dir = dirs::config_dir().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "config directory not found")
    })?;
    Ok(dir
        .join(constants::APP_NAME)
        .join(constants::CONFIG_FILE_NAME))
}
