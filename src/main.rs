//! Evaluar CLI
//!
//! Classification metrics for label files.
//!
//! # Usage
//!
//! ```bash
//! # Per-class report with display names
//! evaluar report y_true.txt y_pred.txt --target-names cat,dog,bird
//!
//! # Report settings from a config file, JSON output
//! evaluar report y_true.txt y_pred.txt --config eval.yaml --format json
//!
//! # Row-normalized confusion matrix
//! evaluar matrix y_true.txt y_pred.txt --normalize true
//!
//! # Single metric
//! evaluar score y_true.txt y_pred.txt --metric f1 --average macro
//! ```

use clap::Parser;
use evaluar::cli::{init_tracing, run_command, Cli, LogLevel};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(LogLevel::from_flags(cli.quiet, cli.verbose));

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error [{}]: {e}", e.code());
            ExitCode::FAILURE
        }
    }
}
