//! Filesystem abstraction for testability.
//!
//! Provides a trait for filesystem operations that can be mocked in tests.

use std::path::{Path, PathBuf};

/// Application name used for the platform config directory.
pub const APP_NAME: &str = "ps-batch-runner";

/// Trait for filesystem operations (for testability).
pub trait FileSystem {
    /// Read file contents as a string.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Write `contents` to `path`, creating missing parent directories.
    ///
    /// # Errors
    /// Returns an error if the directory or file cannot be written.
    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()>;

    /// Get the platform-specific configuration directory.
    ///
    /// - Windows: `%APPDATA%\ps-batch-runner\config`
    /// - macOS: `~/Library/Application Support/ps-batch-runner`
    /// - Linux: `~/.config/ps-batch-runner` (XDG)
    fn config_dir(&self) -> Option<PathBuf>;
}

/// Real filesystem implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)
    }

    fn config_dir(&self) -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }
}
