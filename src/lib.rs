//! # evaluar
//!
//! Evaluation metrics for single-label classifiers: confusion matrix,
//! accuracy, precision, recall, F1 / F-beta and classification reports,
//! computed from two parallel label sequences (`y_true`, `y_pred`).
//!
//! ```
//! use evaluar::eval::{accuracy_score, confusion_matrix, recall_score, Average, ScoreOptions};
//!
//! let y_true = [0, 1, 1, 0];
//! let y_pred = [0, 1, 0, 0];
//!
//! let cm = confusion_matrix(&y_true, &y_pred)?;
//! assert_eq!(cm.get(1, 0), 1);
//! assert_eq!(accuracy_score(&y_true, &y_pred)?, 0.75);
//!
//! let recall = recall_score(&y_true, &y_pred, &ScoreOptions::new(Average::None))?;
//! assert_eq!(recall.per_class(), Some(&[1.0, 0.5][..]));
//! # Ok::<(), evaluar::EvalError>(())
//! ```
//!
//! The `evaluar` binary wraps the same functions for label files on disk.

pub mod cli;
pub mod config;
pub mod error;
pub mod eval;
pub mod io;

pub use error::{EvalError, Result};
