//! Identifier extraction from file names.

use std::path::Path;

use crate::allowlist::id_shape_prefix;

/// Width of the fixed-width prefix used by default.
pub const DEFAULT_PREFIX_WIDTH: usize = 6;

/// How a candidate identifier is pulled out of a file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionPolicy {
    /// The first N characters of the file stem. Shorter stems yield nothing.
    FixedWidth(usize),
    /// The longest stem prefix shaped like a SKU code (letters, 3 digits, letters).
    ShapePrefix,
}

impl Default for ExtractionPolicy {
    fn default() -> Self {
        Self::FixedWidth(DEFAULT_PREFIX_WIDTH)
    }
}

impl ExtractionPolicy {
    /// Extracts the candidate identifier from `file_name`.
    ///
    /// Returns `None` when the name does not yield one; this is a
    /// classification miss, not an error.
    #[must_use]
    pub fn extract(&self, file_name: &str) -> Option<String> {
        let stem = Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name);

        match *self {
            Self::FixedWidth(width) => {
                if width == 0 || stem.chars().count() < width {
                    return None;
                }
                Some(stem.chars().take(width).collect())
            }
            Self::ShapePrefix => id_shape_prefix(stem).map(str::to_string),
        }
    }
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
