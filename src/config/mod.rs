//! CLI argument parsing and evaluation configuration
//!
//! # Usage
//!
//! ```bash
//! evaluar report y_true.txt y_pred.txt --target-names setosa,versicolor,virginica
//! evaluar report y_true.txt y_pred.txt --config eval.yaml --format json
//! evaluar matrix y_true.txt y_pred.txt --normalize true
//! evaluar score y_true.txt y_pred.txt --metric f1 --average macro
//! ```

mod cli;
mod spec;
mod types;


pub use cli::{apply_overrides, parse_args, Cli, Command, MatrixArgs, ReportArgs, ScoreArgs};
pub use spec::{load_spec, validate_spec, EvalSpec, MAX_DIGITS};
pub use types::{Metric, OutputFormat};
