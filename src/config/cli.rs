//! Core CLI types - Cli, Command, and per-command argument structs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::spec::EvalSpec;
use super::types::{Metric, OutputFormat};
use crate::eval::{Average, Normalize, ZeroDivision};

/// Evaluar: classification evaluation metrics
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "evaluar")]
#[command(version)]
#[command(about = "Confusion matrices, accuracy, precision, recall, F1 and classification reports")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print a per-class precision / recall / F1 report
    Report(ReportArgs),

    /// Print the confusion matrix
    Matrix(MatrixArgs),

    /// Compute a single metric
    Score(ScoreArgs),
}

/// Arguments for the report command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ReportArgs {
    /// File with the ground-truth labels
    #[arg(value_name = "Y_TRUE")]
    pub y_true: PathBuf,

    /// File with the predicted labels
    #[arg(value_name = "Y_PRED")]
    pub y_pred: PathBuf,

    /// Evaluation config (YAML or JSON) supplying defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Labels to report, comma-separated, in row order
    #[arg(long, value_delimiter = ',')]
    pub labels: Option<Vec<String>>,

    /// Display names for the labels, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub target_names: Option<Vec<String>>,

    /// Decimal places in the text report
    #[arg(short, long)]
    pub digits: Option<usize>,

    /// Value for ill-defined ratios: warn, 0, 1 or nan
    #[arg(long)]
    pub zero_division: Option<ZeroDivision>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the matrix command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct MatrixArgs {
    /// File with the ground-truth labels
    #[arg(value_name = "Y_TRUE")]
    pub y_true: PathBuf,

    /// File with the predicted labels
    #[arg(value_name = "Y_PRED")]
    pub y_pred: PathBuf,

    /// Labels to include, comma-separated, in row/column order
    #[arg(long, value_delimiter = ',')]
    pub labels: Option<Vec<String>>,

    /// Normalize over true labels (rows), predictions (columns) or all samples
    #[arg(short, long)]
    pub normalize: Option<Normalize>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the score command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ScoreArgs {
    /// File with the ground-truth labels
    #[arg(value_name = "Y_TRUE")]
    pub y_true: PathBuf,

    /// File with the predicted labels
    #[arg(value_name = "Y_PRED")]
    pub y_pred: PathBuf,

    /// Metric: accuracy, precision, recall, f1
    #[arg(short, long)]
    pub metric: Metric,

    /// Evaluation config (YAML or JSON) supplying defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Averaging: none, binary, micro, macro, weighted
    #[arg(short, long)]
    pub average: Option<Average>,

    /// Positive class for binary averaging
    #[arg(long)]
    pub pos_label: Option<String>,

    /// Labels to include, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub labels: Option<Vec<String>>,

    /// Value for ill-defined ratios: warn, 0, 1 or nan
    #[arg(long)]
    pub zero_division: Option<ZeroDivision>,

    /// Decimal places in text output [default: 4]
    #[arg(short, long)]
    pub digits: Option<usize>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Apply command-line overrides to an EvalSpec
pub fn apply_overrides(spec: &mut EvalSpec, command: &Command) {
    let (labels, zero_division) = match command {
        Command::Report(args) => {
            if let Some(target_names) = &args.target_names {
                spec.target_names = Some(target_names.clone());
            }
            if let Some(digits) = args.digits {
                spec.digits = Some(digits);
            }
            (&args.labels, args.zero_division)
        }
        Command::Score(args) => {
            if let Some(average) = args.average {
                spec.average = Some(average);
            }
            if let Some(digits) = args.digits {
                spec.digits = Some(digits);
            }
            (&args.labels, args.zero_division)
        }
        Command::Matrix(args) => (&args.labels, None),
    };
    if let Some(labels) = labels {
        spec.labels = Some(labels.clone());
    }
    if let Some(zero_division) = zero_division {
        spec.zero_division = Some(zero_division);
    }
}
