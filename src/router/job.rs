use std::fs;
use std::path::{Path, PathBuf};

use super::config::{JobGranularity, RunConfig, ScriptArgStyle};
use crate::classifier::{DiscoveredItem, ExtensionFilter, FileFilter};
use crate::error::{BatchError, Result};
use crate::process::Invocation;

pub const ENV_INPUT_DIR: &str = "INPUT_DIR";
pub const ENV_OUTPUT_DIR: &str = "OUTPUT_DIR";
pub const ENV_RULES_JSON_PATH: &str = "RULES_JSON_PATH";
pub const ENV_ACTION_SET: &str = "ACTION_SET";
pub const ENV_ACTION_NAME: &str = "ACTION_NAME";
pub const ENV_ACTION_NAME_ALT: &str = "ACTION_NAME_ALT";
pub const ENV_TARGET_PATH: &str = "TARGET_PATH";
pub const ENV_TOTAL_IMAGES: &str = "TOTAL_IMAGES";
pub const ENV_LOG_FILE: &str = "LOG_FILE";
pub const ENV_PROBE_TARGET: &str = "PROBE_TARGET";

/// Every variable is also exported under this prefix (`PS_INPUT_DIR`, ...),
/// the names older batch templates read through `getenv`.
pub const ENV_ALIAS_PREFIX: &str = "PS_";

/// Directories exported to the external script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobEnvironment {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub rules_path: Option<PathBuf>,
}

/// One external invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchJob {
    pub target_path: PathBuf,
    pub files: Vec<PathBuf>,
    pub script_identifier: String,
    /// Identifier chosen by the orientation probe.
    pub orientation_variant: Option<String>,
    /// Portrait identifier handed to the script when it decides itself.
    pub alternate_identifier: Option<String>,
    pub environment: JobEnvironment,
}

impl DispatchJob {
    /// Identifier exported as `ACTION_NAME`.
    #[must_use]
    pub fn resolved_identifier(&self) -> &str {
        self.orientation_variant
            .as_deref()
            .unwrap_or(&self.script_identifier)
    }

    #[must_use]
    pub fn invocation(&self, config: &RunConfig) -> Invocation {
        let env = &self.environment;
        let rules = env
            .rules_path
            .as_deref()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut invocation = script_invocation(config, &config.script);
        invocation = export(invocation, ENV_INPUT_DIR, env.input_dir.to_string_lossy());
        invocation = export(invocation, ENV_OUTPUT_DIR, env.output_dir.to_string_lossy());
        invocation = export(invocation, ENV_RULES_JSON_PATH, rules);
        invocation = export(invocation, ENV_ACTION_NAME, self.resolved_identifier());
        invocation = export(invocation, ENV_TARGET_PATH, self.target_path.to_string_lossy());
        invocation = export(invocation, ENV_TOTAL_IMAGES, self.files.len().to_string());
        if let Some(alt) = &self.alternate_identifier {
            invocation = export(invocation, ENV_ACTION_NAME_ALT, alt.as_str());
        }
        invocation
    }
}

/// Launch skeleton shared by dispatch and probe invocations.
pub(crate) fn script_invocation(config: &RunConfig, script: &Path) -> Invocation {
    let invocation = Invocation::new(config.executable.clone());
    let invocation = match config.arg_style {
        ScriptArgStyle::Positional => invocation.arg(script),
        ScriptArgStyle::RunFlag => invocation.arg("-r").arg(script),
    };
    let invocation = export(
        invocation.timeout(config.timeout),
        ENV_ACTION_SET,
        config.action_set.as_str(),
    );
    match &config.log_file {
        Some(log) => {
            export(invocation, ENV_LOG_FILE, log.to_string_lossy()).log_file(Some(log.clone()))
        }
        None => invocation,
    }
}

/// Sets `name` and its [`ENV_ALIAS_PREFIX`] alias to `value`.
pub(crate) fn export(invocation: Invocation, name: &str, value: impl Into<String>) -> Invocation {
    let value = value.into();
    invocation
        .env(format!("{ENV_ALIAS_PREFIX}{name}"), value.clone())
        .env(name, value)
}

/// Builds the jobs for one matched item.
///
/// Returns no jobs when the item holds no image files.
///
/// # Errors
/// Returns `Io` if a matched folder cannot be listed.
pub fn plan_jobs(
    item: &DiscoveredItem,
    config: &RunConfig,
    rules_path: Option<&Path>,
) -> Result<Vec<DispatchJob>> {
    let (input_dir, files) = if item.is_folder() {
        (item.path.clone(), image_files(&item.path)?)
    } else {
        let parent = item
            .path
            .parent()
            .map_or_else(PathBuf::new, Path::to_path_buf);
        (parent, vec![item.path.clone()])
    };
    if files.is_empty() {
        return Ok(Vec::new());
    }

    let environment = JobEnvironment {
        input_dir,
        output_dir: config.output_root.clone(),
        rules_path: rules_path.map(Path::to_path_buf),
    };
    let job = |target_path: PathBuf, files: Vec<PathBuf>| DispatchJob {
        target_path,
        files,
        script_identifier: item.id().to_string(),
        orientation_variant: None,
        alternate_identifier: None,
        environment: environment.clone(),
    };

    let jobs = match config.granularity {
        JobGranularity::PerItem => vec![job(item.path.clone(), files)],
        JobGranularity::PerFile => files
            .into_iter()
            .map(|file| job(file.clone(), vec![file]))
            .collect(),
    };
    Ok(jobs)
}

/// Image files directly inside `dir`, sorted by name.
fn image_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| BatchError::io(e, dir, "list"))?;
    let images = ExtensionFilter::images();
    let mut files: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
        .map(|e| e.path())
        .filter(|p| images.should_include(p))
        .collect();
    files.sort();
    Ok(files)
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
