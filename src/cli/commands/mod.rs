//! CLI command implementations

mod matrix;
mod report;
mod score;


use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::config::{apply_overrides, load_spec, validate_spec, Cli, Command, EvalSpec};
use crate::error::{EvalError, Result};

/// Label types the CLI can read from files and flags
pub(crate) trait CliLabel: Ord + Clone + fmt::Display + FromStr + Serialize {}

impl<T: Ord + Clone + fmt::Display + FromStr + Serialize> CliLabel for T {}

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<()> {
    let spec = resolve_spec(&cli.command)?;

    match cli.command {
        Command::Report(args) => report::run_report(&args, &spec),
        Command::Matrix(args) => matrix::run_matrix(&args, &spec),
        Command::Score(args) => score::run_score(&args, &spec),
    }
}

/// Config file defaults with command-line overrides applied
pub(crate) fn resolve_spec(command: &Command) -> Result<EvalSpec> {
    let config = match command {
        Command::Report(args) => args.config.as_deref(),
        Command::Score(args) => args.config.as_deref(),
        Command::Matrix(_) => None,
    };

    let mut spec = match config {
        Some(path) => load_spec(path)?,
        None => EvalSpec::default(),
    };
    apply_overrides(&mut spec, command);
    validate_spec(&spec)?;
    Ok(spec)
}

/// Convert a label given on the command line to the label type of the data
pub(crate) fn parse_cli_label<L: FromStr>(raw: &str, field: &str) -> Result<L> {
    raw.trim().parse().map_err(|_| EvalError::ConfigValue {
        field: field.to_string(),
        message: format!("'{raw}' is not an integer, but the label files hold integer labels"),
        suggestion: "Pass labels exactly as they appear in the label files".to_string(),
    })
}

pub(crate) fn parse_cli_labels<L: FromStr>(raw: Option<&[String]>, field: &str) -> Result<Option<Vec<L>>> {
    raw.map(|labels| labels.iter().map(|s| parse_cli_label(s, field)).collect())
        .transpose()
}

pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| EvalError::Serialization {
        message: e.to_string(),
    })
}
