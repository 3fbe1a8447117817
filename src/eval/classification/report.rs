//! Classification report

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::average::Average;
use super::confusion::one_vs_rest_counts;
use super::labels::{check_targets, covers_present, resolve_labels};
use super::metrics::MultiClassMetrics;
use super::zero_division::ZeroDivision;
use crate::error::{EvalError, Result};

/// Widest average-row heading; the name column is never narrower
const LONGEST_AVG_HEADING: &str = "weighted avg";

/// Options for [`classification_report`]
#[derive(Clone, Debug, PartialEq)]
pub struct ReportOptions<L> {
    /// Labels to report, in row order; defaults to every label present
    pub labels: Option<Vec<L>>,
    /// Display names for the labels, one per label
    pub target_names: Option<Vec<String>>,
    /// Decimal places in the text rendering
    pub digits: usize,
    pub zero_division: ZeroDivision,
}

impl<L> Default for ReportOptions<L> {
    fn default() -> Self {
        Self {
            labels: None,
            target_names: None,
            digits: 2,
            zero_division: ZeroDivision::Warn,
        }
    }
}

impl<L> ReportOptions<L> {
    pub fn labels(mut self, labels: Vec<L>) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn target_names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.target_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn digits(mut self, digits: usize) -> Self {
        self.digits = digits;
        self
    }

    pub fn zero_division(mut self, zero_division: ZeroDivision) -> Self {
        self.zero_division = zero_division;
        self
    }
}

/// One line of the report
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportRow {
    /// Row heading; the key of the row in the serialized report
    #[serde(skip)]
    pub name: String,
    pub precision: f64,
    pub recall: f64,
    #[serde(rename = "f1-score")]
    pub f1_score: f64,
    pub support: usize,
}

/// Per-class and averaged precision, recall and F1
///
/// `Display` renders the familiar fixed-width text table. Serializing gives
/// the dictionary form: one entry per class keyed by its name, then
/// `accuracy` (or `micro avg`), `macro avg` and `weighted avg`.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassificationReport {
    pub classes: Vec<ReportRow>,
    /// Present when the report covers every label in the data
    pub accuracy: Option<f64>,
    /// Present instead of `accuracy` when only a subset of labels is reported
    pub micro_avg: Option<ReportRow>,
    pub macro_avg: ReportRow,
    pub weighted_avg: ReportRow,
    pub digits: usize,
}

impl Serialize for ClassificationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let len = self.classes.len() + 3;
        let mut map = serializer.serialize_map(Some(len))?;
        for row in &self.classes {
            map.serialize_entry(&row.name, row)?;
        }
        if let Some(accuracy) = self.accuracy {
            map.serialize_entry("accuracy", &accuracy)?;
        }
        if let Some(micro) = &self.micro_avg {
            map.serialize_entry("micro avg", micro)?;
        }
        map.serialize_entry("macro avg", &self.macro_avg)?;
        map.serialize_entry("weighted avg", &self.weighted_avg)?;
        map.end()
    }
}

impl ClassificationReport {
    /// Total support of the reported classes
    pub fn total_support(&self) -> usize {
        self.classes.iter().map(|r| r.support).sum()
    }
}

fn avg_row(name: &str, metrics: &MultiClassMetrics, average: Average, support: usize) -> ReportRow {
    ReportRow {
        name: name.to_string(),
        precision: metrics.precision_avg(average),
        recall: metrics.recall_avg(average),
        f1_score: metrics.fscore_avg(average),
        support,
    }
}

/// Build a classification report
///
/// # Arguments
/// * `y_true` - Ground truth class labels
/// * `y_pred` - Predicted class labels
/// * `options` - Label selection, display names, precision and zero-division policy
///
/// # Example
/// ```
/// use evaluar::eval::{classification_report, ReportOptions};
///
/// let y_true = [0, 1, 2, 2, 2];
/// let y_pred = [0, 0, 2, 2, 1];
/// let options = ReportOptions::default().target_names(["class 0", "class 1", "class 2"]);
/// let report = classification_report(&y_true, &y_pred, &options).unwrap();
///
/// println!("{report}");
/// assert_eq!(report.classes[2].name, "class 2");
/// assert_eq!(report.accuracy, Some(0.6));
/// ```
pub fn classification_report<L: Ord + Clone + fmt::Display>(
    y_true: &[L],
    y_pred: &[L],
    options: &ReportOptions<L>,
) -> Result<ClassificationReport> {
    check_targets(y_true, y_pred, "a classification report")?;
    let labels = resolve_labels(y_true, y_pred, options.labels.as_deref())?;

    let names: Vec<String> = match &options.target_names {
        Some(names) if names.len() != labels.len() => {
            return Err(EvalError::TargetNamesMismatch {
                n_labels: labels.len(),
                n_names: names.len(),
            });
        }
        Some(names) => names.clone(),
        None => labels.iter().map(ToString::to_string).collect(),
    };

    let counts = one_vs_rest_counts(y_true, y_pred, &labels);
    let metrics = MultiClassMetrics::from_counts(counts, 1.0, options.zero_division);

    let classes: Vec<ReportRow> = names
        .into_iter()
        .enumerate()
        .map(|(k, name)| ReportRow {
            name,
            precision: metrics.precision[k],
            recall: metrics.recall[k],
            f1_score: metrics.fscore[k],
            support: metrics.support[k],
        })
        .collect();
    let total_support: usize = metrics.support.iter().sum();

    // Micro-averaged F1 equals accuracy once every present label is reported
    let micro_is_accuracy = options.labels.is_none() || covers_present(&labels, y_true, y_pred);
    let (accuracy, micro_avg) = if micro_is_accuracy {
        (Some(metrics.fscore_avg(Average::Micro)), None)
    } else {
        (None, Some(avg_row("micro avg", &metrics, Average::Micro, total_support)))
    };

    tracing::debug!(
        n_classes = classes.len(),
        total_support,
        micro_is_accuracy,
        "built classification report"
    );

    Ok(ClassificationReport {
        classes,
        accuracy,
        micro_avg,
        macro_avg: avg_row("macro avg", &metrics, Average::Macro, total_support),
        weighted_avg: avg_row("weighted avg", &metrics, Average::Weighted, total_support),
        digits: options.digits,
    })
}

/// Fixed-precision rendering that prints NaN as `nan`
pub(crate) fn format_value(v: f64, digits: usize) -> String {
    if v.is_nan() {
        "nan".to_string()
    } else {
        format!("{v:.digits$}")
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, row: &ReportRow, width: usize, digits: usize) -> fmt::Result {
    writeln!(
        f,
        "{:>width$}  {:>9} {:>9} {:>9} {:>9}",
        row.name,
        format_value(row.precision, digits),
        format_value(row.recall, digits),
        format_value(row.f1_score, digits),
        row.support
    )
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.digits;
        let width = self
            .classes
            .iter()
            .map(|r| r.name.chars().count())
            .chain([LONGEST_AVG_HEADING.len(), digits])
            .max()
            .unwrap_or(0);

        writeln!(
            f,
            "{:>width$}  {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;

        for row in &self.classes {
            write_row(f, row, width, digits)?;
        }
        writeln!(f)?;

        if let Some(accuracy) = self.accuracy {
            writeln!(
                f,
                "{:>width$}  {:>9} {:>9} {:>9} {:>9}",
                "accuracy",
                "",
                "",
                format_value(accuracy, digits),
                self.total_support()
            )?;
        }
        if let Some(micro) = &self.micro_avg {
            write_row(f, micro, width, digits)?;
        }
        write_row(f, &self.macro_avg, width, digits)?;
        write_row(f, &self.weighted_avg, width, digits)
    }
}
