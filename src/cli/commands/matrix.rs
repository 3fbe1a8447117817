//! Matrix command implementation

use serde::Serialize;

use crate::config::{EvalSpec, MatrixArgs, OutputFormat};
use crate::error::Result;
use crate::eval::{confusion_matrix, confusion_matrix_with_labels, ConfusionMatrix, Normalize};
use crate::eval::classification::format_value;
use crate::io::LabelData;

use super::{parse_cli_labels, to_json, CliLabel};

/// Decimal places for normalized cells in text output
const NORMALIZED_DIGITS: usize = 2;

#[derive(Serialize)]
struct NormalizedMatrix<'a, L> {
    labels: &'a [L],
    normalize: Normalize,
    matrix: Vec<Vec<f64>>,
}

pub fn run_matrix(args: &MatrixArgs, spec: &EvalSpec) -> Result<()> {
    let output = render_matrix(args, spec)?;
    println!("{output}");
    Ok(())
}

pub(crate) fn render_matrix(args: &MatrixArgs, spec: &EvalSpec) -> Result<String> {
    let data = LabelData::load(&args.y_true, &args.y_pred)?;
    match data {
        LabelData::Integer { y_true, y_pred } => matrix_for(&y_true, &y_pred, spec, args),
        LabelData::Text { y_true, y_pred } => matrix_for(&y_true, &y_pred, spec, args),
    }
}

fn matrix_for<L: CliLabel>(y_true: &[L], y_pred: &[L], spec: &EvalSpec, args: &MatrixArgs) -> Result<String> {
    let cm = match parse_cli_labels::<L>(spec.labels.as_deref(), "labels")? {
        Some(labels) => confusion_matrix_with_labels(y_true, y_pred, &labels)?,
        None => confusion_matrix(y_true, y_pred)?,
    };

    match (args.normalize, args.format) {
        (None, OutputFormat::Text) => Ok(cm.to_string()),
        (None, OutputFormat::Json) => to_json(&cm),
        (Some(normalize), OutputFormat::Text) => Ok(format_normalized(&cm, normalize)),
        (Some(normalize), OutputFormat::Json) => to_json(&NormalizedMatrix {
            labels: cm.labels(),
            normalize,
            matrix: cm.normalized(normalize),
        }),
    }
}

/// Text layout of a normalized matrix, aligned like the count matrix
fn format_normalized<L: CliLabel>(cm: &ConfusionMatrix<L>, normalize: Normalize) -> String {
    let names: Vec<String> = cm.labels().iter().map(ToString::to_string).collect();
    let rows: Vec<Vec<String>> = cm
        .normalized(normalize)
        .iter()
        .map(|row| row.iter().map(|&v| format_value(v, NORMALIZED_DIGITS)).collect())
        .collect();

    let name_width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0);
    let cell_width = rows
        .iter()
        .flatten()
        .map(String::len)
        .chain(names.iter().map(|n| n.chars().count()))
        .max()
        .unwrap_or(1);

    let over = match normalize {
        Normalize::True => "true labels",
        Normalize::Pred => "predicted labels",
        Normalize::All => "all samples",
    };
    let mut out = format!("Confusion Matrix (normalized over {over}):\n");
    out.push_str(&format!("{:>name_width$}", ""));
    for name in &names {
        out.push_str(&format!(" {name:>cell_width$}"));
    }
    out.push('\n');
    for (name, row) in names.iter().zip(&rows) {
        out.push_str(&format!("{name:>name_width$}"));
        for cell in row {
            out.push_str(&format!(" {cell:>cell_width$}"));
        }
        out.push('\n');
    }
    out
}
