//! The set of SKU identifiers eligible for dispatch.
//!
//! An [`AllowList`] is built once per run and never mutated afterwards. It can
//! come from the built-in defaults, a list file, or (for old setups) the source
//! text of a script that declares the list inline.

mod defaults;
mod legacy;

pub use defaults::{DEFAULT_IDS, ORIENTATION_SENSITIVE_IDS, PORTRAIT_SUFFIX};
pub use legacy::{LEGACY_LIST_NAME, extract_from_script_source};

use std::path::Path;
use std::sync::LazyLock;

use indexmap::IndexSet;
use regex::Regex;

use crate::error::{BatchError, Result};

/// Shape of a SKU code: 1-2 letters, 3 digits, 1-3 letters. Anchored at the start only.
static ID_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{1,2}[0-9]{3}[A-Za-z]{1,3}").expect("Invalid regex"));

/// The longest leading part of `text` shaped like a SKU code.
#[must_use]
pub fn id_shape_prefix(text: &str) -> Option<&str> {
    ID_SHAPE.find(text).map(|m| m.as_str())
}

/// Returns true if `id` has the shape of a SKU code.
#[must_use]
pub fn has_id_shape(id: &str) -> bool {
    id_shape_prefix(id).is_some_and(|prefix| prefix.len() == id.len())
}

/// Ordered, de-duplicated set of identifiers. Matching is exact and case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    ids: IndexSet<String>,
}

impl AllowList {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// The codes shipped with the tool.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(DEFAULT_IDS.iter().copied())
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Entries that do not look like SKU codes. They still match exactly,
    /// but are usually typos worth reporting.
    #[must_use]
    pub fn irregular_entries(&self) -> Vec<&str> {
        self.iter().filter(|id| !has_id_shape(id)).collect()
    }

    /// Parses list content.
    ///
    /// Accepts either a JSON array of strings, or plain text with one
    /// identifier per line (blank lines and `#` comments ignored).
    ///
    /// # Errors
    /// Returns an error if content looks like JSON but is not an array of strings.
    pub fn parse(content: &str) -> Result<Self> {
        let trimmed = content.trim_start();
        if trimmed.starts_with('[') {
            let ids: Vec<String> = serde_json::from_str(trimmed)
                .map_err(|e| BatchError::AllowList(format!("invalid JSON list: {e}")))?;
            return Ok(Self::new(ids.into_iter().map(|id| id.trim().to_string())));
        }

        Ok(Self::new(
            content
                .lines()
                .map(|line| line.split('#').next().unwrap_or_default().trim())
                .filter(|line| !line.is_empty()),
        ))
    }

    /// Loads a list file (see [`AllowList::parse`]).
    ///
    /// # Errors
    /// Returns an error if the file is missing, unreadable, or malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(BatchError::not_found("Allow-list file", path));
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| BatchError::io(e, path, "read allow-list"))?;
        let list = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), entries = list.len(), "loaded allow-list");
        Ok(list)
    }

    /// Imports the list declared inline in a legacy script.
    ///
    /// # Errors
    /// Returns an error if the script cannot be read or declares no list.
    pub fn import_script(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| BatchError::io(e, path, "read script"))?;
        extract_from_script_source(&source).map(Self::new)
    }

    /// Renders the list in the plain-text file format accepted by [`AllowList::parse`].
    #[must_use]
    pub fn to_list_file(&self) -> String {
        let mut out = String::new();
        for id in &self.ids {
            out.push_str(id);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
