use std::path::{Path, PathBuf};
use std::time::Duration;

use indexmap::IndexSet;

use crate::allowlist::ORIENTATION_SENSITIVE_IDS;
use crate::error::{BatchError, Result};

pub const DEFAULT_ACTION_SET: &str = "TIN";
pub const DEFAULT_QUARANTINE_DIR: &str = "无法处理";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// How orientation-sensitive identifiers get their portrait variant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OrientationPolicy {
    /// Measure the job's first image with a probe script before dispatch.
    Probe { script: PathBuf },
    /// Export both variants and let the external script pick per image.
    #[default]
    Delegate,
}

/// How many files one external invocation covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobGranularity {
    /// One invocation per matched folder or file.
    #[default]
    PerItem,
    /// One invocation per image file.
    PerFile,
}

/// Command-line shape used to hand the script to the executable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScriptArgStyle {
    /// `executable <script>`
    #[default]
    Positional,
    /// `executable -r <script>`
    RunFlag,
}

/// Everything a dispatch run needs besides the classification itself.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub executable: PathBuf,
    pub script: PathBuf,
    pub output_root: PathBuf,
    pub rules_file: Option<PathBuf>,
    pub orientation_sensitive: IndexSet<String>,
    pub orientation: OrientationPolicy,
    pub granularity: JobGranularity,
    pub arg_style: ScriptArgStyle,
    pub action_set: String,
    pub quarantine_dir: String,
    pub timeout: Option<Duration>,
    pub max_retries: u32,
    pub log_file: Option<PathBuf>,
}

impl RunConfig {
    #[must_use]
    pub fn new(
        executable: impl Into<PathBuf>,
        script: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            executable: executable.into(),
            script: script.into(),
            output_root: output_root.into(),
            rules_file: None,
            orientation_sensitive: ORIENTATION_SENSITIVE_IDS
                .iter()
                .map(|id| (*id).to_string())
                .collect(),
            orientation: OrientationPolicy::default(),
            granularity: JobGranularity::default(),
            arg_style: ScriptArgStyle::default(),
            action_set: DEFAULT_ACTION_SET.to_string(),
            quarantine_dir: DEFAULT_QUARANTINE_DIR.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
            max_retries: 0,
            log_file: None,
        }
    }

    #[must_use]
    pub fn with_rules_file(mut self, rules_file: Option<PathBuf>) -> Self {
        self.rules_file = rules_file;
        self
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: OrientationPolicy) -> Self {
        self.orientation = orientation;
        self
    }

    #[must_use]
    pub const fn with_granularity(mut self, granularity: JobGranularity) -> Self {
        self.granularity = granularity;
        self
    }

    #[must_use]
    pub const fn with_arg_style(mut self, arg_style: ScriptArgStyle) -> Self {
        self.arg_style = arg_style;
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub fn with_log_file(mut self, log_file: Option<PathBuf>) -> Self {
        self.log_file = log_file;
        self
    }

    #[must_use]
    pub fn with_action_set(mut self, action_set: impl Into<String>) -> Self {
        self.action_set = action_set.into();
        self
    }

    #[must_use]
    pub fn with_quarantine_dir(mut self, name: impl Into<String>) -> Self {
        self.quarantine_dir = name.into();
        self
    }

    #[must_use]
    pub fn with_orientation_sensitive<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.orientation_sensitive = ids.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn is_orientation_sensitive(&self, id: &str) -> bool {
        self.orientation_sensitive.contains(id)
    }

    /// Folder receiving copies of unmatched items.
    #[must_use]
    pub fn quarantine_root(&self) -> PathBuf {
        self.output_root.join(&self.quarantine_dir)
    }

    /// Folders the input scan must not enter, so a run never classifies its
    /// own output. The quarantine folder is listed separately because the
    /// output root may be the input folder itself.
    #[must_use]
    pub fn scan_exclusions(&self) -> [PathBuf; 2] {
        [self.output_root.clone(), self.quarantine_root()]
    }

    /// Checks every path the run cannot do without.
    ///
    /// # Errors
    /// Returns `NotFound` for a missing executable, script or probe script, and
    /// `Config` for an empty action-set or quarantine folder name.
    pub fn validate(&self) -> Result<()> {
        require_file("Executable", &self.executable)?;
        require_file("Script", &self.script)?;
        if let OrientationPolicy::Probe { script } = &self.orientation {
            require_file("Probe script", script)?;
        }
        if self.action_set.trim().is_empty() {
            return Err(BatchError::Config("action set name is empty".to_string()));
        }
        if self.quarantine_dir.trim().is_empty() {
            return Err(BatchError::Config(
                "quarantine folder name is empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn require_file(what: &'static str, path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(BatchError::not_found(what, path))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
