use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::classifier::{DEFAULT_PREFIX_WIDTH, ExtractionPolicy, ScanMode};
use crate::output::{ColorMode, OutputFormat};
use crate::router::{DEFAULT_ACTION_SET, DEFAULT_QUARANTINE_DIR, JobGranularity, ScriptArgStyle};

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorChoice> for ColorMode {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => Self::Auto,
            ColorChoice::Always => Self::Always,
            ColorChoice::Never => Self::Never,
        }
    }
}

/// What counts as an item
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ModeArg {
    /// Every subfolder is an item named by its folder name
    #[default]
    Folder,
    /// Every image file directly in the input folder is an item named by its prefix
    Filename,
}

impl From<ModeArg> for ScanMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Folder => Self::FolderName,
            ModeArg::Filename => Self::FilenamePrefix,
        }
    }
}

/// How identifiers are cut from file names
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ExtractArg {
    /// First N characters of the name (see --prefix-width)
    #[default]
    Fixed,
    /// Longest prefix shaped like a SKU code
    Shape,
}

/// How orientation-sensitive identifiers are resolved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OrientationArg {
    /// Export both variants and let the script choose
    #[default]
    Delegate,
    /// Measure the first image with a probe script before dispatch
    Probe,
}

/// How many invocations a matched item produces
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum GranularityArg {
    /// One invocation per matched folder or file
    #[default]
    PerItem,
    /// One invocation per image file
    PerFile,
}

impl From<GranularityArg> for JobGranularity {
    fn from(granularity: GranularityArg) -> Self {
        match granularity {
            GranularityArg::PerItem => Self::PerItem,
            GranularityArg::PerFile => Self::PerFile,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "ps-batch-runner")]
#[command(author, version, about = "Classify product image folders by SKU code and dispatch them to Photoshop")]
#[command(long_about = "Scans an input folder, matches folder or file names against an allow-list \
    of SKU codes, runs the editing script once per match and copies everything else into a \
    quarantine folder.\n\n\
    Exit codes:\n  \
    0 - Run completed without job errors\n  \
    1 - Some jobs or quarantine copies failed\n  \
    2 - Configuration or runtime error")]
pub struct Cli {
    /// Increase output verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    /// Use this config.json instead of the one in the user config directory
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Also write a debug transcript of the run to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify the input folder and dispatch every match
    Run(RunArgs),

    /// Classify the input folder and list the result without dispatching
    Classify(ClassifyArgs),

    /// Show or edit the saved settings
    Config(ConfigArgs),

    /// Inspect or import the SKU allow-list
    Allowlist(AllowListArgs),
}

/// Options shared by `run` and `classify`.
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Folder to scan (default: inputDir from config)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// What counts as an item
    #[arg(long, value_enum, default_value = "folder")]
    pub mode: ModeArg,

    /// Identifier extraction in filename mode
    #[arg(long, value_enum, default_value = "fixed")]
    pub extract: ExtractArg,

    /// Prefix length for --extract fixed
    #[arg(long, default_value_t = DEFAULT_PREFIX_WIDTH)]
    pub prefix_width: usize,

    /// Allow-list file: a JSON array or one code per line
    #[arg(long, conflicts_with = "legacy_script")]
    pub allow_list: Option<PathBuf>,

    /// Read the allow-list from a script that declares it inline
    #[arg(long)]
    pub legacy_script: Option<PathBuf>,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

impl ScanArgs {
    #[must_use]
    pub const fn extraction_policy(&self) -> ExtractionPolicy {
        match self.extract {
            ExtractArg::Fixed => ExtractionPolicy::FixedWidth(self.prefix_width),
            ExtractArg::Shape => ExtractionPolicy::ShapePrefix,
        }
    }
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Export root; quarantined files go to a folder inside it (default: outputDir from config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Photoshop executable (default: photoshopPath from config)
    #[arg(long, visible_alias = "exe")]
    pub photoshop: Option<PathBuf>,

    /// Script run for every job (default: jsxPath from config)
    #[arg(long, visible_alias = "jsx")]
    pub script: Option<PathBuf>,

    /// Rules JSON passed to the script (default: rulesJsonPath from config)
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// How orientation-sensitive codes pick their variant
    #[arg(long, value_enum, default_value = "delegate")]
    pub orientation: OrientationArg,

    /// Script that prints the image size, for --orientation probe (default: probeJsxPath from config)
    #[arg(long)]
    pub probe_script: Option<PathBuf>,

    /// One invocation per item or per image file
    #[arg(long, value_enum, default_value = "per-item")]
    pub granularity: GranularityArg,

    /// Invoke as `photoshop -r script` instead of `photoshop script`
    #[arg(long)]
    pub run_flag: bool,

    /// Action set name passed to the script
    #[arg(long, default_value = DEFAULT_ACTION_SET)]
    pub action_set: String,

    /// Name of the quarantine folder inside the export root
    #[arg(long, default_value = DEFAULT_QUARANTINE_DIR)]
    pub quarantine_dir: String,

    /// Seconds to wait for each invocation (0 waits forever)
    #[arg(long, default_value_t = 60)]
    pub timeout: u64,

    /// Extra attempts after a failed invocation
    #[arg(long, default_value_t = 0)]
    pub retries: u32,

    /// Log file the script appends to; new lines are relayed while it runs
    #[arg(long)]
    pub script_log: Option<PathBuf>,

    /// Store the resolved paths in config.json for later runs
    #[arg(long)]
    pub save: bool,
}

impl RunArgs {
    #[must_use]
    pub const fn arg_style(&self) -> ScriptArgStyle {
        if self.run_flag {
            ScriptArgStyle::RunFlag
        } else {
            ScriptArgStyle::Positional
        }
    }
}

#[derive(Parser, Debug)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Output folder to leave out of the scan (default: outputDir from config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print every setting
    Show {
        /// Output format [possible values: text, json]
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Set a value; omit the value to clear the key
    Set {
        /// Key, e.g. photoshopPath or photoshop-path
        key: String,

        /// New value
        value: Option<String>,
    },

    /// Print where config.json lives
    Path,
}

#[derive(Parser, Debug)]
pub struct AllowListArgs {
    #[command(subcommand)]
    pub action: AllowListAction,
}

#[derive(Subcommand, Debug)]
pub enum AllowListAction {
    /// Print the allow-list that a run would use
    Show {
        /// Allow-list file instead of the configured one
        #[arg(long)]
        allow_list: Option<PathBuf>,

        /// Only report entries that do not look like SKU codes
        #[arg(long)]
        irregular: bool,
    },

    /// Extract the list declared inline in a legacy script
    Import {
        /// Script source to read
        script: PathBuf,

        /// Write the list here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Record the written file as allowListPath in config.json
        #[arg(long, requires = "output")]
        save: bool,
    },
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
