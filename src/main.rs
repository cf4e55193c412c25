use clap::Parser;

use ps_batch_runner::EXIT_CONFIG_ERROR;
use ps_batch_runner::cli::{Cli, Commands};
use ps_batch_runner::commands::{run_allowlist, run_classify, run_config, run_run};
use ps_batch_runner::logging::init_logging;
use ps_batch_runner::output::print_batch_error;

fn main() {
    let cli = Cli::parse();

    let guard = match init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            print_batch_error(&e);
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    };

    let exit_code = match &cli.command {
        Commands::Run(args) => run_run(args, &cli),
        Commands::Classify(args) => run_classify(args, &cli),
        Commands::Config(args) => run_config(args, &cli),
        Commands::Allowlist(args) => run_allowlist(args, &cli),
    };

    // process::exit skips destructors; flush the transcript first.
    drop(guard);
    std::process::exit(exit_code);
}
