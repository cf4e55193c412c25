use std::path::PathBuf;

use super::*;

fn run_args(extra: &[&str]) -> RunArgs {
    let mut argv = vec!["ps-batch-runner", "run"];
    argv.extend_from_slice(extra);
    match Cli::parse_from(argv).command {
        Commands::Run(args) => args,
        _ => panic!("Expected Run command"),
    }
}

#[test]
fn run_defaults() {
    let args = run_args(&[]);

    assert!(args.scan.input.is_none());
    assert!(matches!(args.scan.mode, ModeArg::Folder));
    assert_eq!(args.scan.extraction_policy(), ExtractionPolicy::FixedWidth(6));
    assert_eq!(args.scan.format, OutputFormat::Text);
    assert_eq!(args.orientation, OrientationArg::Delegate);
    assert_eq!(args.arg_style(), ScriptArgStyle::Positional);
    assert_eq!(args.action_set, "TIN");
    assert_eq!(args.quarantine_dir, "无法处理");
    assert_eq!(args.timeout, 60);
    assert_eq!(args.retries, 0);
    assert!(!args.save);
}

#[test]
fn run_with_paths() {
    let args = run_args(&[
        "-i", "in", "-o", "out", "--exe", "ps.exe", "--jsx", "batch.jsx", "--rules", "r.json",
    ]);

    assert_eq!(args.scan.input, Some(PathBuf::from("in")));
    assert_eq!(args.output, Some(PathBuf::from("out")));
    assert_eq!(args.photoshop, Some(PathBuf::from("ps.exe")));
    assert_eq!(args.script, Some(PathBuf::from("batch.jsx")));
    assert_eq!(args.rules, Some(PathBuf::from("r.json")));
}

#[test]
fn run_with_dispatch_options() {
    let args = run_args(&[
        "--orientation",
        "probe",
        "--probe-script",
        "probe.jsx",
        "--granularity",
        "per-file",
        "--run-flag",
        "--timeout",
        "0",
        "--retries",
        "2",
        "--script-log",
        "ps.log",
    ]);

    assert_eq!(args.orientation, OrientationArg::Probe);
    assert_eq!(args.probe_script, Some(PathBuf::from("probe.jsx")));
    assert_eq!(JobGranularity::from(args.granularity), JobGranularity::PerFile);
    assert_eq!(args.arg_style(), ScriptArgStyle::RunFlag);
    assert_eq!(args.timeout, 0);
    assert_eq!(args.retries, 2);
    assert_eq!(args.script_log, Some(PathBuf::from("ps.log")));
}

#[test]
fn filename_mode_with_shape_extraction() {
    let args = run_args(&["--mode", "filename", "--extract", "shape", "-f", "json"]);

    assert_eq!(ScanMode::from(args.scan.mode), ScanMode::FilenamePrefix);
    assert_eq!(args.scan.extraction_policy(), ExtractionPolicy::ShapePrefix);
    assert_eq!(args.scan.format, OutputFormat::Json);
}

#[test]
fn prefix_width_feeds_fixed_policy() {
    let args = run_args(&["--prefix-width", "8"]);
    assert_eq!(args.scan.extraction_policy(), ExtractionPolicy::FixedWidth(8));
}

#[test]
fn allow_list_sources_conflict() {
    let result = Cli::try_parse_from([
        "ps-batch-runner",
        "classify",
        "--allow-list",
        "ids.txt",
        "--legacy-script",
        "old.jsx",
    ]);
    assert!(result.is_err());
}

#[test]
fn unknown_format_rejected() {
    let result = Cli::try_parse_from(["ps-batch-runner", "classify", "-f", "sarif"]);
    assert!(result.is_err());
}

#[test]
fn global_flags_after_subcommand() {
    let cli = Cli::parse_from([
        "ps-batch-runner",
        "classify",
        "-vv",
        "--color",
        "never",
        "--config",
        "cfg.json",
        "--log-file",
        "run.log",
    ]);

    assert_eq!(cli.verbose, 2);
    assert_eq!(ColorMode::from(cli.color), ColorMode::Never);
    assert_eq!(cli.config, Some(PathBuf::from("cfg.json")));
    assert_eq!(cli.log_file, Some(PathBuf::from("run.log")));
}

#[test]
fn config_set_without_value_clears() {
    let cli = Cli::parse_from(["ps-batch-runner", "config", "set", "jsxPath"]);
    match cli.command {
        Commands::Config(ConfigArgs {
            action: ConfigAction::Set { key, value },
        }) => {
            assert_eq!(key, "jsxPath");
            assert!(value.is_none());
        }
        _ => panic!("Expected config set"),
    }
}

#[test]
fn allowlist_import_save_requires_output() {
    let result = Cli::try_parse_from(["ps-batch-runner", "allowlist", "import", "old.jsx", "--save"]);
    assert!(result.is_err());

    let cli = Cli::parse_from([
        "ps-batch-runner",
        "allowlist",
        "import",
        "old.jsx",
        "-o",
        "ids.txt",
        "--save",
    ]);
    match cli.command {
        Commands::Allowlist(AllowListArgs {
            action: AllowListAction::Import { script, output, save },
        }) => {
            assert_eq!(script, PathBuf::from("old.jsx"));
            assert_eq!(output, Some(PathBuf::from("ids.txt")));
            assert!(save);
        }
        _ => panic!("Expected allowlist import"),
    }
}

#[test]
fn debug_assert_cli() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
