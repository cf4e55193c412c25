//! Import adapter for scripts that declare the folder list inline.
//!
//! Older batch scripts carry the list as a literal such as
//! `var targetFolderNames = ['M001MT', 'M002MT', ...];`. This pulls the
//! quoted entries back out so the list can live in its own file.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{BatchError, Result};

/// Variable name the legacy scripts assign the list to.
pub const LEGACY_LIST_NAME: &str = "targetFolderNames";

static LIST_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?s)\b{LEGACY_LIST_NAME}\s*=\s*\[(?P<body>[^\]]*)\]"
    ))
    .expect("Invalid regex")
});

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"['"](?P<id>[^'"\r\n]+)['"]"#).expect("Invalid regex"));

/// Extracts the identifiers assigned to `targetFolderNames` in `source`.
///
/// Entries keep their order; duplicates are left for the caller's set to fold.
///
/// # Errors
/// Returns an error if no assignment is found or the array is empty.
pub fn extract_from_script_source(source: &str) -> Result<Vec<String>> {
    let caps = LIST_LITERAL.captures(source).ok_or_else(|| {
        BatchError::AllowList(format!("no `{LEGACY_LIST_NAME} = [...]` found in script"))
    })?;

    let body = &caps["body"];
    let ids: Vec<String> = QUOTED
        .captures_iter(body)
        .map(|c| c["id"].trim().to_string())
        .filter(|id| !id.is_empty())
        .collect();

    if ids.is_empty() {
        return Err(BatchError::AllowList(format!(
            "`{LEGACY_LIST_NAME}` is declared but empty"
        )));
    }
    Ok(ids)
}

#[cfg(test)]
#[path = "legacy_tests.rs"]
mod tests;
