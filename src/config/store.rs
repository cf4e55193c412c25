use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::{BatchError, Result};

use super::filesystem::{FileSystem, RealFileSystem};
use super::model::AppConfig;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Reads and writes `config.json`.
///
/// The file lives in the platform config directory unless an explicit path
/// is given. Reading never fails: a missing or unreadable file is an empty
/// config.
#[derive(Debug)]
pub struct ConfigStore<F: FileSystem = RealFileSystem> {
    fs: F,
    explicit_path: Option<PathBuf>,
}

impl ConfigStore<RealFileSystem> {
    #[must_use]
    pub const fn new(explicit_path: Option<PathBuf>) -> Self {
        Self {
            fs: RealFileSystem,
            explicit_path,
        }
    }
}

impl<F: FileSystem> ConfigStore<F> {
    #[must_use]
    pub const fn with_fs(fs: F, explicit_path: Option<PathBuf>) -> Self {
        Self { fs, explicit_path }
    }

    /// Location of the config file.
    ///
    /// # Errors
    /// Returns `Config` when no explicit path is set and the platform has no
    /// config directory.
    pub fn path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.explicit_path {
            return Ok(path.clone());
        }
        self.fs
            .config_dir()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .ok_or_else(|| {
                BatchError::Config(
                    "cannot determine the user config directory; pass --config".to_string(),
                )
            })
    }

    #[must_use]
    pub fn load(&self) -> AppConfig {
        let path = match self.path() {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(error = %e, "using empty config");
                return AppConfig::default();
            }
        };

        let content = match self.fs.read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file");
                return AppConfig::default();
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "config file unreadable, using empty config");
                return AppConfig::default();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "config file is not valid JSON, using empty config");
            AppConfig::default()
        })
    }

    /// Writes `config` as pretty-printed JSON and returns where it went.
    ///
    /// # Errors
    /// Returns an error if the location is unknown or cannot be written.
    pub fn save(&self, config: &AppConfig) -> Result<PathBuf> {
        let path = self.path()?;
        let json = serde_json::to_string_pretty(config)?;
        self.fs
            .write(&path, &json)
            .map_err(|e| BatchError::io(e, path.clone(), "write"))?;
        tracing::debug!(path = %path.display(), "config saved");
        Ok(path)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
