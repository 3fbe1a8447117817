//! Classification metrics for model evaluation
//!
//! Provides single-label classification metrics including:
//! - Confusion matrix computation (plain, normalized, one-vs-rest)
//! - Accuracy
//! - Per-class precision, recall, F1 and F-beta
//! - Binary, macro, micro, and weighted averaging
//! - sklearn-style classification reports
//!
//! Labels may be any ordered type; classes are taken in sorted order unless
//! an explicit `labels` list is given.

mod average;
mod confusion;
mod labels;
mod metrics;
mod report;
mod scores;
mod zero_division;


// Re-export all public types and functions
pub use average::Average;
pub use confusion::{
    confusion_matrix, confusion_matrix_with_labels, multilabel_confusion_matrix, BinaryCounts,
    ConfusionMatrix, Normalize,
};
pub use labels::unique_labels;
pub use metrics::MultiClassMetrics;
pub(crate) use report::format_value;
pub use report::{classification_report, ClassificationReport, ReportOptions, ReportRow};
pub use scores::{
    accuracy_score, correct_count, f1_score, fbeta_score, precision_recall_fscore_support,
    precision_score, recall_score, PrecisionRecallFScore, Score, ScoreOptions,
};
pub use zero_division::ZeroDivision;
