use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::config::RunConfig;
use super::job::{ENV_PROBE_TARGET, export, script_invocation};
use crate::allowlist::PORTRAIT_SUFFIX;
use crate::error::{BatchError, Result};
use crate::process::ProcessRunner;

static DIMENSIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*[xX×]\s*(\d+)").expect("Invalid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    /// Taller than wide, or square.
    Portrait,
}

/// Pixel size reported by the probe script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    #[must_use]
    pub const fn orientation(self) -> Orientation {
        if self.width > self.height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

/// Finds the last `<width>x<height>` pair in probe output.
#[must_use]
pub fn parse_dimensions(output: &str) -> Option<Dimensions> {
    output.lines().rev().find_map(|line| {
        DIMENSIONS.captures_iter(line).last().and_then(|caps| {
            Some(Dimensions {
                width: caps[1].parse().ok()?,
                height: caps[2].parse().ok()?,
            })
        })
    })
}

/// Identifier to dispatch for `id` given the image orientation.
#[must_use]
pub fn variant_for(id: &str, orientation: Orientation) -> String {
    match orientation {
        Orientation::Landscape => id.to_string(),
        Orientation::Portrait => portrait_variant(id),
    }
}

#[must_use]
pub fn portrait_variant(id: &str) -> String {
    format!("{id}{PORTRAIT_SUFFIX}")
}

/// Runs the probe script against `file` and reads back its orientation.
///
/// # Errors
/// Any spawn failure, timeout or non-zero exit of the probe, or output that
/// carries no dimensions.
pub fn probe<R: ProcessRunner>(
    runner: &R,
    config: &RunConfig,
    probe_script: &Path,
    file: &Path,
) -> Result<Orientation> {
    let invocation = export(
        script_invocation(config, probe_script),
        ENV_PROBE_TARGET,
        file.to_string_lossy(),
    );
    let output = runner
        .run(&invocation)?
        .into_result(&invocation.program_name())?;

    let dims = parse_dimensions(&output.stdout).ok_or_else(|| {
        BatchError::Probe(format!(
            "no dimensions in probe output for '{}'",
            file.display()
        ))
    })?;
    tracing::debug!(
        file = %file.display(),
        width = dims.width,
        height = dims.height,
        "probed"
    );
    Ok(dims.orientation())
}

#[cfg(test)]
#[path = "orientation_tests.rs"]
mod tests;
