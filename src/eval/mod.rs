//! Model evaluation metrics
//!
//! ## Architecture
//!
//! - `classification`: confusion matrix, accuracy, precision/recall/F-scores
//!   and classification reports over parallel `y_true` / `y_pred` sequences
//!
//! ## Example
//!
//! ```
//! use evaluar::eval::{classification_report, f1_score, Average, ReportOptions, ScoreOptions};
//!
//! let y_true = ["cat", "dog", "dog", "bird", "cat"];
//! let y_pred = ["cat", "dog", "cat", "bird", "cat"];
//!
//! let f1 = f1_score(&y_true, &y_pred, &ScoreOptions::new(Average::None)).unwrap();
//! println!("per-class F1: {:?}", f1.per_class());
//!
//! let report = classification_report(&y_true, &y_pred, &ReportOptions::default()).unwrap();
//! println!("{report}");
//! ```

pub mod classification;

pub use classification::{
    accuracy_score, classification_report, confusion_matrix, confusion_matrix_with_labels,
    correct_count, f1_score, fbeta_score, multilabel_confusion_matrix,
    precision_recall_fscore_support, precision_score, recall_score, unique_labels, Average,
    BinaryCounts, ClassificationReport, ConfusionMatrix, MultiClassMetrics, Normalize,
    PrecisionRecallFScore, ReportOptions, ReportRow, Score, ScoreOptions, ZeroDivision,
};
