//! Report command implementation

use crate::config::{EvalSpec, OutputFormat, ReportArgs};
use crate::error::Result;
use crate::eval::{classification_report, ReportOptions};
use crate::io::LabelData;

use super::{parse_cli_labels, to_json, CliLabel};

const DEFAULT_DIGITS: usize = 2;

pub fn run_report(args: &ReportArgs, spec: &EvalSpec) -> Result<()> {
    let output = render_report(args, spec)?;
    println!("{output}");
    Ok(())
}

/// Build the report for the label files and render it in the requested format
pub(crate) fn render_report(args: &ReportArgs, spec: &EvalSpec) -> Result<String> {
    let data = LabelData::load(&args.y_true, &args.y_pred)?;
    match data {
        LabelData::Integer { y_true, y_pred } => report_for(&y_true, &y_pred, spec, args.format),
        LabelData::Text { y_true, y_pred } => report_for(&y_true, &y_pred, spec, args.format),
    }
}

fn report_for<L: CliLabel>(y_true: &[L], y_pred: &[L], spec: &EvalSpec, format: OutputFormat) -> Result<String> {
    let options = ReportOptions {
        labels: parse_cli_labels(spec.labels.as_deref(), "labels")?,
        target_names: spec.target_names.clone(),
        digits: spec.digits.unwrap_or(DEFAULT_DIGITS),
        zero_division: spec.zero_division.unwrap_or_default(),
    };
    let report = classification_report(y_true, y_pred, &options)?;

    match format {
        OutputFormat::Text => Ok(report.to_string()),
        OutputFormat::Json => to_json(&report),
    }
}
