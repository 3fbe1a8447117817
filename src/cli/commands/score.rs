//! Score command implementation

use serde::Serialize;

use crate::config::{EvalSpec, Metric, OutputFormat, ScoreArgs};
use crate::error::Result;
use crate::eval::{accuracy_score, precision_recall_fscore_support, Average, Score, ScoreOptions};
use crate::eval::classification::format_value;
use crate::io::LabelData;

use super::{parse_cli_label, parse_cli_labels, to_json, CliLabel};

const DEFAULT_DIGITS: usize = 4;

#[derive(Serialize)]
struct ScoreOutput<L> {
    metric: Metric,
    #[serde(skip_serializing_if = "Option::is_none")]
    average: Option<Average>,
    #[serde(skip_serializing_if = "Option::is_none")]
    labels: Option<Vec<L>>,
    score: Score,
}

pub fn run_score(args: &ScoreArgs, spec: &EvalSpec) -> Result<()> {
    let output = render_score(args, spec)?;
    println!("{output}");
    Ok(())
}

pub(crate) fn render_score(args: &ScoreArgs, spec: &EvalSpec) -> Result<String> {
    let data = LabelData::load(&args.y_true, &args.y_pred)?;
    match data {
        LabelData::Integer { y_true, y_pred } => score_for(&y_true, &y_pred, spec, args),
        LabelData::Text { y_true, y_pred } => score_for(&y_true, &y_pred, spec, args),
    }
}

fn score_for<L: CliLabel>(y_true: &[L], y_pred: &[L], spec: &EvalSpec, args: &ScoreArgs) -> Result<String> {
    let output = match args.metric {
        Metric::Accuracy => {
            if spec.labels.is_some() || spec.average.is_some() || args.pos_label.is_some() {
                tracing::debug!("accuracy ignores labels, average and pos_label");
            }
            ScoreOutput {
                metric: Metric::Accuracy,
                average: None,
                labels: None,
                score: Score::Average(accuracy_score(y_true, y_pred)?),
            }
        }
        metric => {
            let options = ScoreOptions {
                average: spec.average.unwrap_or_default(),
                labels: parse_cli_labels(spec.labels.as_deref(), "labels")?,
                pos_label: args
                    .pos_label
                    .as_deref()
                    .map(|raw| parse_cli_label(raw, "pos_label"))
                    .transpose()?,
                zero_division: spec.zero_division.unwrap_or_default(),
                beta: 1.0,
            };
            let prf = precision_recall_fscore_support(y_true, y_pred, &options)?;
            let score = match metric {
                Metric::Precision => prf.precision,
                Metric::Recall => prf.recall,
                _ => prf.fscore,
            };
            ScoreOutput {
                metric,
                average: Some(options.average),
                labels: Some(prf.labels),
                score,
            }
        }
    };

    match args.format {
        OutputFormat::Text => Ok(format_score(&output, spec.digits.unwrap_or(DEFAULT_DIGITS))),
        OutputFormat::Json => to_json(&output),
    }
}

fn format_score<L: CliLabel>(output: &ScoreOutput<L>, digits: usize) -> String {
    let heading = match (output.average, output.labels.as_deref()) {
        (Some(Average::Binary), Some([positive])) => format!("{} (binary, pos_label={positive})", output.metric),
        (Some(average), _) => format!("{} ({average})", output.metric),
        (None, _) => output.metric.to_string(),
    };

    match (&output.score, output.labels.as_deref()) {
        (Score::PerClass(values), Some(labels)) => {
            let names: Vec<String> = labels.iter().map(ToString::to_string).collect();
            let width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0);
            let mut out = format!("{heading}:");
            for (name, &v) in names.iter().zip(values) {
                out.push_str(&format!("\n  {name:>width$}  {}", format_value(v, digits)));
            }
            out
        }
        (score, _) => format!("{heading}: {}", format_value(score.value().unwrap_or(f64::NAN), digits)),
    }
}
