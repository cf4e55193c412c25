//! Directory classification against the allow-list.
//!
//! A scan walks the input root, derives a candidate identifier for every
//! folder (folder-name mode) or image file (filename-prefix mode), and splits
//! the items into matched and unmatched. Scanning never touches the file system
//! beyond reading it.

mod extract;
mod filter;
mod types;

pub use extract::{DEFAULT_PREFIX_WIDTH, ExtractionPolicy};
pub use filter::{ExtensionFilter, FileFilter, IMAGE_EXTENSIONS};
pub use types::{ClassificationResult, DiscoveredItem, ItemKind};

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::allowlist::AllowList;
use crate::error::{BatchError, Result};

/// Identifier extraction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Every subdirectory (recursively) is an item named by its folder name.
    #[default]
    FolderName,
    /// Every image file directly under the root is an item named by its prefix.
    FilenamePrefix,
}

/// Classifies a directory tree against an allow-list.
pub struct Classifier<'a, F: FileFilter = ExtensionFilter> {
    allow_list: &'a AllowList,
    mode: ScanMode,
    policy: ExtractionPolicy,
    filter: F,
    excluded: Vec<PathBuf>,
}

impl<'a> Classifier<'a> {
    #[must_use]
    pub fn new(allow_list: &'a AllowList) -> Self {
        Self {
            allow_list,
            mode: ScanMode::default(),
            policy: ExtractionPolicy::default(),
            filter: ExtensionFilter::images(),
            excluded: Vec::new(),
        }
    }
}

impl<'a, F: FileFilter> Classifier<'a, F> {
    #[must_use]
    pub const fn with_mode(mut self, mode: ScanMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub const fn with_policy(mut self, policy: ExtractionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the file filter used in filename-prefix mode.
    #[must_use]
    pub fn with_filter<G: FileFilter>(self, filter: G) -> Classifier<'a, G> {
        Classifier {
            allow_list: self.allow_list,
            mode: self.mode,
            policy: self.policy,
            filter,
            excluded: self.excluded,
        }
    }

    /// Directories that are never entered (e.g. an output root nested in the input).
    #[must_use]
    pub fn with_excluded(mut self, excluded: impl IntoIterator<Item = PathBuf>) -> Self {
        self.excluded = excluded
            .into_iter()
            .map(|p| dunce::canonicalize(&p).unwrap_or(p))
            .collect();
        self
    }

    /// Scans `root` and partitions what it finds.
    ///
    /// # Errors
    /// Returns `NotFound` if `root` is missing or not a directory, and
    /// `PermissionDenied` if it cannot be listed. Unreadable subtrees are
    /// logged and skipped.
    pub fn classify(&self, root: &Path) -> Result<ClassificationResult> {
        let root = open_root(root)?;

        let items = match self.mode {
            ScanMode::FolderName => self.scan_folders(&root),
            ScanMode::FilenamePrefix => self.scan_files(&root),
        };

        let mut result = ClassificationResult::default();
        for item in items {
            let known = item
                .extracted_id
                .as_deref()
                .is_some_and(|id| self.allow_list.contains(id));
            if known {
                tracing::debug!(id = item.id(), path = %item.path.display(), "matched");
                result.matched.push(item);
            } else {
                tracing::debug!(name = %item.name, path = %item.path.display(), "unmatched");
                result.unmatched.push(item);
            }
        }

        tracing::info!(
            root = %root.display(),
            matched = result.matched.len(),
            unmatched = result.unmatched.len(),
            "classification complete"
        );
        Ok(result)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.excluded.iter().any(|ex| path == ex)
    }

    fn scan_folders(&self, root: &Path) -> Vec<DiscoveredItem> {
        let walker = WalkDir::new(root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !(e.file_type().is_dir() && self.is_excluded(e.path())));

        let mut items = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log_walk_error(&e);
                    continue;
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            items.push(DiscoveredItem {
                path: entry.into_path(),
                extracted_id: Some(name.clone()),
                name,
                kind: ItemKind::Folder,
            });
        }
        items
    }

    fn scan_files(&self, root: &Path) -> Vec<DiscoveredItem> {
        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        let mut items = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log_walk_error(&e);
                    continue;
                }
            };
            if !entry.file_type().is_file() || !self.filter.should_include(entry.path()) {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            items.push(DiscoveredItem {
                path: entry.into_path(),
                extracted_id: self.policy.extract(&name),
                name,
                kind: ItemKind::File,
            });
        }
        items
    }
}

/// Classifies `root` with the default extraction policy.
///
/// # Errors
/// See [`Classifier::classify`].
pub fn classify(
    root: &Path,
    allow_list: &AllowList,
    mode: ScanMode,
) -> Result<ClassificationResult> {
    Classifier::new(allow_list).with_mode(mode).classify(root)
}

/// Validates the scan root and returns its canonical form.
fn open_root(root: &Path) -> Result<PathBuf> {
    if !root.is_dir() {
        return Err(BatchError::not_found("Input directory", root));
    }
    let root = dunce::canonicalize(root).map_err(|e| BatchError::io(e, root, "resolve"))?;
    match fs::read_dir(&root) {
        Ok(_) => Ok(root),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => Err(BatchError::PermissionDenied {
            path: root,
            source: e,
        }),
        Err(e) => Err(BatchError::io(e, root, "list")),
    }
}

fn log_walk_error(err: &walkdir::Error) {
    let path = err
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    tracing::warn!(path = %path, error = %err, "skipping unreadable entry");
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
