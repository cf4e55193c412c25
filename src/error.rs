use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{what} not found: {}", .path.display())]
    NotFound { what: &'static str, path: PathBuf },

    #[error("Permission denied: {}", .path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error{}: {source}", format_io_context(.path, .operation))]
    Io {
        #[source]
        source: std::io::Error,
        path: Option<PathBuf>,
        operation: Option<&'static str>,
    },

    #[error("Failed to launch {program}")]
    ProcessSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {}", format_exit_code(.code))]
    ProcessExit {
        program: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("{program} timed out after {}s", .timeout.as_secs())]
    ProcessTimeout { program: String, timeout: Duration },

    #[error("Orientation probe failed: {0}")]
    Probe(String),

    #[error("Allow-list error: {0}")]
    AllowList(String),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

fn format_io_context(path: &Option<PathBuf>, operation: &Option<&'static str>) -> String {
    match (operation, path) {
        (Some(op), Some(p)) => format!(" ({op} '{}')", p.display()),
        (Some(op), None) => format!(" ({op})"),
        (None, Some(p)) => format!(" ('{}')", p.display()),
        (None, None) => String::new(),
    }
}

fn format_exit_code(code: &Option<i32>) -> String {
    code.map_or_else(
        || "no exit code (terminated by signal)".to_string(),
        |c| format!("exit code {c}"),
    )
}

impl From<std::io::Error> for BatchError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            path: None,
            operation: None,
        }
    }
}

impl BatchError {
    /// Wraps an I/O error with the path and operation that produced it.
    #[must_use]
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>, operation: &'static str) -> Self {
        Self::Io {
            source,
            path: Some(path.into()),
            operation: Some(operation),
        }
    }

    #[must_use]
    pub fn not_found(what: &'static str, path: impl Into<PathBuf>) -> Self {
        Self::NotFound {
            what,
            path: path.into(),
        }
    }

    /// Short category label used as the heading of rendered errors.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) => "Config",
            Self::NotFound { .. } => "NotFound",
            Self::PermissionDenied { .. } => "Permission",
            Self::Io { .. } => "IO",
            Self::ProcessSpawn { .. } => "ProcessSpawn",
            Self::ProcessExit { .. } => "ProcessExit",
            Self::ProcessTimeout { .. } => "ProcessTimeout",
            Self::Probe(_) => "Probe",
            Self::AllowList(_) => "AllowList",
            Self::JsonParse(_) => "JSON",
        }
    }

    /// Main message without the category prefix.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Config(msg) | Self::Probe(msg) | Self::AllowList(msg) => msg.clone(),
            Self::NotFound { what, path } => format!("{what} not found: {}", path.display()),
            Self::PermissionDenied { path, .. } => path.display().to_string(),
            Self::Io {
                path, operation, ..
            } => match (operation, path) {
                (Some(op), Some(p)) => format!("failed to {op} '{}'", p.display()),
                (Some(op), None) => format!("failed to {op}"),
                (None, Some(p)) => p.display().to_string(),
                (None, None) => "I/O operation failed".to_string(),
            },
            Self::JsonParse(e) => e.to_string(),
            Self::ProcessSpawn { .. } | Self::ProcessExit { .. } | Self::ProcessTimeout { .. } => {
                self.to_string()
            }
        }
    }

    /// Underlying cause, when there is one worth showing.
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::PermissionDenied { source, .. }
            | Self::Io { source, .. }
            | Self::ProcessSpawn { source, .. } => Some(source.to_string()),
            Self::ProcessExit { stderr, stdout, .. } => {
                let text = if stderr.trim().is_empty() {
                    stdout.trim()
                } else {
                    stderr.trim()
                };
                (!text.is_empty()).then(|| text.to_string())
            }
            _ => None,
        }
    }

    /// Actionable hint for the user, if one applies.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::NotFound { .. } => {
                Some("Check the path, or save it with `ps-batch-runner config set`")
            }
            Self::PermissionDenied { .. } => Some("Check read permissions on the directory"),
            Self::ProcessTimeout { .. } => Some("Raise the limit with --timeout"),
            Self::Probe(_) => {
                Some("The probe script must print the image size as <width>x<height>")
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BatchError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
