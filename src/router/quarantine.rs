use std::fs;
use std::path::{Path, PathBuf};

use crate::classifier::DiscoveredItem;
use crate::error::{BatchError, Result};

/// Result of copying one unmatched item.
#[derive(Debug, Default)]
pub struct QuarantineOutcome {
    pub copied: usize,
    pub errors: Vec<BatchError>,
}

/// Copies an unmatched item's files under `quarantine_root`.
///
/// Files keep their location relative to `input_root`. A folder contributes
/// only its direct files; its subfolders are items of their own. Sources are
/// never modified.
pub fn quarantine_item(
    item: &DiscoveredItem,
    input_root: &Path,
    quarantine_root: &Path,
) -> QuarantineOutcome {
    let mut outcome = QuarantineOutcome::default();

    let sources = if item.is_folder() {
        match direct_files(&item.path) {
            Ok(files) => files,
            Err(e) => {
                outcome.errors.push(e);
                return outcome;
            }
        }
    } else {
        vec![item.path.clone()]
    };

    for source in sources {
        let dest = quarantine_root.join(relative_to(&source, input_root));
        match copy_file(&source, &dest) {
            Ok(()) => {
                tracing::debug!(from = %source.display(), to = %dest.display(), "quarantined");
                outcome.copied += 1;
            }
            Err(e) => {
                tracing::warn!(path = %source.display(), error = %e, "quarantine copy failed");
                outcome.errors.push(e);
            }
        }
    }
    outcome
}

fn relative_to(path: &Path, root: &Path) -> PathBuf {
    path.strip_prefix(root).map_or_else(
        |_| {
            path.file_name()
                .map_or_else(PathBuf::new, PathBuf::from)
        },
        Path::to_path_buf,
    )
}

fn direct_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| BatchError::io(e, dir, "list"))?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
        .map(|e| e.path())
        .collect();
    files.sort();
    Ok(files)
}

fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| BatchError::io(e, parent, "create"))?;
    }
    fs::copy(source, dest).map_err(|e| BatchError::io(e, source, "copy"))?;
    Ok(())
}

#[cfg(test)]
#[path = "quarantine_tests.rs"]
mod tests;
