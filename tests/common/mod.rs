#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the ps-batch-runner binary.
#[macro_export]
macro_rules! ps_batch_runner {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("ps-batch-runner"))
    };
}

/// Stand-in for the editing script: records one line per call in
/// `$OUTPUT_DIR/calls.log` and fails for the identifier in `$FAIL_ID`.
pub const RECORDING_SCRIPT: &str = r#"
echo "$ACTION_NAME|$ACTION_NAME_ALT|$TOTAL_IMAGES|$ACTION_SET" >> "$OUTPUT_DIR/calls.log"
if [ -n "$LOG_FILE" ]; then
    echo "script saw $ACTION_NAME" >> "$LOG_FILE"
fi
if [ "$ACTION_NAME" = "$FAIL_ID" ]; then
    echo "action $ACTION_NAME failed" >&2
    exit 3
fi
exit 0
"#;

/// Stand-in for the probe script: files with `portrait` in their name are tall.
pub const PROBE_SCRIPT: &str = r#"
case "$PROBE_TARGET" in
    *portrait*) echo "size: 600x800" ;;
    *) echo "size: 800x600" ;;
esac
"#;

/// Temporary workspace with an `in/` folder, an `out/` target, and a
/// private `config.json`.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        let fixture = Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        };
        fixture.create_dir("in");
        fixture
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &[u8]) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Creates a directory in the temp directory.
    pub fn create_dir(&self, relative_path: &str) {
        fs::create_dir_all(self.dir.path().join(relative_path))
            .expect("Failed to create directory");
    }

    /// Creates an image file under `in/`.
    pub fn create_image(&self, relative_path: &str, content: &[u8]) {
        self.create_file(&format!("in/{relative_path}"), content);
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, relative_path: &str) -> PathBuf {
        self.dir.path().join(relative_path)
    }

    pub fn input(&self) -> PathBuf {
        self.join("in")
    }

    pub fn output(&self) -> PathBuf {
        self.join("out")
    }

    pub fn config_path(&self) -> PathBuf {
        self.join("config.json")
    }

    pub fn quarantine(&self) -> PathBuf {
        self.output().join("无法处理")
    }

    /// Lines written by [`RECORDING_SCRIPT`].
    pub fn recorded_calls(&self) -> Vec<String> {
        fs::read_to_string(self.output().join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Writes the stand-in scripts and returns the common `run` arguments.
    ///
    /// `/bin/sh` plays the editing application, so the script path is
    /// handed to it exactly as it would be to the real one.
    pub fn run_args(&self) -> Vec<String> {
        self.create_file("batch.sh", RECORDING_SCRIPT.as_bytes());
        vec![
            "--config".to_string(),
            self.config_path().display().to_string(),
            "--color".to_string(),
            "never".to_string(),
            "run".to_string(),
            "-i".to_string(),
            self.input().display().to_string(),
            "-o".to_string(),
            self.output().display().to_string(),
            "--photoshop".to_string(),
            "/bin/sh".to_string(),
            "--script".to_string(),
            self.join("batch.sh").display().to_string(),
            "--timeout".to_string(),
            "20".to_string(),
        ]
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
