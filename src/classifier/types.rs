use std::path::PathBuf;

use serde::Serialize;

/// Whether a discovered item is a directory or a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Folder,
    File,
}

/// One folder or file found during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredItem {
    /// Absolute path.
    pub path: PathBuf,
    /// Base name.
    pub name: String,
    pub kind: ItemKind,
    /// Candidate identifier derived from `name`, if one could be extracted.
    pub extracted_id: Option<String>,
}

impl DiscoveredItem {
    #[must_use]
    pub const fn is_folder(&self) -> bool {
        matches!(self.kind, ItemKind::Folder)
    }

    /// The extracted identifier. Only meaningful for matched items.
    #[must_use]
    pub fn id(&self) -> &str {
        self.extracted_id.as_deref().unwrap_or_default()
    }
}

/// Partition of every discovered item into matched and unmatched.
///
/// Both halves are sorted by path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub matched: Vec<DiscoveredItem>,
    pub unmatched: Vec<DiscoveredItem>,
}

impl ClassificationResult {
    /// Number of discovered items.
    #[must_use]
    pub fn total(&self) -> usize {
        self.matched.len() + self.unmatched.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// All items, matched first.
    pub fn iter(&self) -> impl Iterator<Item = &DiscoveredItem> {
        self.matched.iter().chain(self.unmatched.iter())
    }

    /// Identifiers of matched items, in path order.
    #[must_use]
    pub fn matched_ids(&self) -> Vec<&str> {
        self.matched.iter().map(DiscoveredItem::id).collect()
    }
}
