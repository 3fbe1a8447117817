//! Confusion matrix for multi-class classification

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::labels::{check_targets, resolve_labels, unique_labels, validate_labels};
use crate::error::{EvalError, Result};

/// Normalization applied by [`ConfusionMatrix::normalized`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Normalize {
    /// Divide each row by its true-label count
    True,
    /// Divide each column by its predicted-label count
    Pred,
    /// Divide every cell by the number of samples
    All,
}

impl FromStr for Normalize {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "true" => Ok(Normalize::True),
            "pred" => Ok(Normalize::Pred),
            "all" => Ok(Normalize::All),
            _ => Err(format!("Unknown normalization: {s}. Valid values: true, pred, all")),
        }
    }
}

/// Confusion matrix for multi-class classification
///
/// Element [i][j] represents count of samples with true label `labels[i]`
/// predicted as `labels[j]`
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConfusionMatrix<L = usize> {
    /// The class labels, in row/column order
    labels: Vec<L>,
    /// The matrix data: matrix[true_label][predicted_label] = count
    matrix: Vec<Vec<usize>>,
}

impl<L: Ord + Clone> ConfusionMatrix<L> {
    /// Create an all-zero matrix over the given labels
    pub fn new(labels: Vec<L>) -> Self {
        let n = labels.len();
        Self {
            labels,
            matrix: vec![vec![0; n]; n],
        }
    }

    /// Create from ground truth and predictions over every label present in either
    pub fn from_predictions(y_true: &[L], y_pred: &[L]) -> Result<Self> {
        check_targets(y_true, y_pred, "a confusion matrix")?;
        let mut cm = Self::new(unique_labels(y_true, y_pred));
        cm.accumulate(y_true, y_pred);
        Ok(cm)
    }

    /// Create over an explicit label list
    ///
    /// Samples whose true or predicted label is not in `labels` are not counted.
    pub fn from_predictions_with_labels(y_true: &[L], y_pred: &[L], labels: &[L]) -> Result<Self> {
        check_targets(y_true, y_pred, "a confusion matrix")?;
        validate_labels(labels)?;
        if !labels.iter().any(|l| y_true.contains(l)) {
            return Err(EvalError::invalid_labels(
                "At least one label specified must be in y_true",
            ));
        }
        let mut cm = Self::new(labels.to_vec());
        cm.accumulate(y_true, y_pred);
        Ok(cm)
    }

    fn accumulate(&mut self, y_true: &[L], y_pred: &[L]) {
        let index: BTreeMap<&L, usize> = self.labels.iter().enumerate().map(|(i, l)| (l, i)).collect();
        for (t, p) in y_true.iter().zip(y_pred.iter()) {
            if let (Some(&i), Some(&j)) = (index.get(t), index.get(p)) {
                self.matrix[i][j] += 1;
            }
        }
        tracing::debug!(
            n_classes = self.n_classes(),
            counted = self.total(),
            samples = y_true.len(),
            "computed confusion matrix"
        );
    }

    /// Row/column index of a label
    pub fn index_of(&self, label: &L) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Count of samples with the given true and predicted labels
    pub fn get_by_label(&self, true_label: &L, predicted_label: &L) -> Option<usize> {
        Some(self.matrix[self.index_of(true_label)?][self.index_of(predicted_label)?])
    }
}

impl<L> ConfusionMatrix<L> {
    /// Get the raw matrix
    pub fn matrix(&self) -> &[Vec<usize>] {
        &self.matrix
    }

    /// Get the class labels
    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    /// Get number of classes
    pub fn n_classes(&self) -> usize {
        self.labels.len()
    }

    /// Get element at [true_label][predicted_label] by index
    pub fn get(&self, true_label: usize, predicted_label: usize) -> usize {
        self.matrix[true_label][predicted_label]
    }

    /// Calculate true positives for a class
    pub fn true_positives(&self, class: usize) -> usize {
        self.matrix[class][class]
    }

    /// Calculate false positives for a class (predicted as class but wasn't)
    pub fn false_positives(&self, class: usize) -> usize {
        self.predicted(class) - self.true_positives(class)
    }

    /// Calculate false negatives for a class (was class but predicted differently)
    pub fn false_negatives(&self, class: usize) -> usize {
        self.support(class) - self.true_positives(class)
    }

    /// Calculate true negatives for a class
    pub fn true_negatives(&self, class: usize) -> usize {
        self.total() - self.true_positives(class) - self.false_positives(class) - self.false_negatives(class)
    }

    /// Calculate support (total true instances) for a class
    pub fn support(&self, class: usize) -> usize {
        self.matrix[class].iter().sum()
    }

    /// Total predicted instances for a class (column sum)
    pub fn predicted(&self, class: usize) -> usize {
        self.matrix.iter().map(|row| row[class]).sum()
    }

    /// Total number of counted samples
    pub fn total(&self) -> usize {
        self.matrix.iter().flatten().sum()
    }

    /// Sum of the diagonal (correct predictions)
    pub fn trace(&self) -> usize {
        (0..self.n_classes()).map(|i| self.matrix[i][i]).sum()
    }

    /// Calculate accuracy
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.trace() as f64 / total as f64
    }

    /// One-vs-rest counts for every class, in label order
    pub fn one_vs_rest(&self) -> Vec<BinaryCounts> {
        let total = self.total();
        (0..self.n_classes())
            .map(|k| {
                let tp = self.true_positives(k);
                let fp = self.false_positives(k);
                let fn_ = self.false_negatives(k);
                BinaryCounts {
                    tn: total - tp - fp - fn_,
                    fp,
                    fn_,
                    tp,
                }
            })
            .collect()
    }

    /// Matrix divided by row sums, column sums or the grand total
    ///
    /// Rows or columns that sum to zero stay at 0.0.
    pub fn normalized(&self, normalize: Normalize) -> Vec<Vec<f64>> {
        let n = self.n_classes();
        let total = self.total();
        let col_sums: Vec<usize> = (0..n).map(|j| self.predicted(j)).collect();
        let ratio = |count: usize, denom: usize| {
            if denom == 0 {
                0.0
            } else {
                count as f64 / denom as f64
            }
        };
        self.matrix
            .iter()
            .enumerate()
            .map(|(i, row)| {
                row.iter()
                    .enumerate()
                    .map(|(j, &count)| match normalize {
                        Normalize::True => ratio(count, self.support(i)),
                        Normalize::Pred => ratio(count, col_sums[j]),
                        Normalize::All => ratio(count, total),
                    })
                    .collect()
            })
            .collect()
    }
}

impl<L: fmt::Display> fmt::Display for ConfusionMatrix<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Confusion Matrix (rows: true, columns: predicted):")?;

        let names: Vec<String> = self.labels.iter().map(ToString::to_string).collect();
        let name_width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0);
        let cell_width = self
            .matrix
            .iter()
            .flatten()
            .map(|c| c.to_string().len())
            .chain(names.iter().map(|n| n.chars().count()))
            .max()
            .unwrap_or(1);

        // Header
        write!(f, "{:>name_width$}", "")?;
        for name in &names {
            write!(f, " {name:>cell_width$}")?;
        }
        writeln!(f)?;

        // Rows
        for (name, row) in names.iter().zip(&self.matrix) {
            write!(f, "{name:>name_width$}")?;
            for count in row {
                write!(f, " {count:>cell_width$}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// One-vs-rest 2x2 confusion table for a single label
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BinaryCounts {
    pub tn: usize,
    pub fp: usize,
    #[serde(rename = "fn")]
    pub fn_: usize,
    pub tp: usize,
}

impl BinaryCounts {
    /// Samples whose true label is this class
    pub fn support(&self) -> usize {
        self.tp + self.fn_
    }

    /// Samples predicted as this class
    pub fn predicted(&self) -> usize {
        self.tp + self.fp
    }
}

impl std::ops::Add for BinaryCounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            tn: self.tn + rhs.tn,
            fp: self.fp + rhs.fp,
            fn_: self.fn_ + rhs.fn_,
            tp: self.tp + rhs.tp,
        }
    }
}

impl std::iter::Sum for BinaryCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, c| acc + c)
    }
}

/// One-vs-rest counts for each label, taken over all samples
pub(crate) fn one_vs_rest_counts<L: Ord>(y_true: &[L], y_pred: &[L], labels: &[L]) -> Vec<BinaryCounts> {
    let index: BTreeMap<&L, usize> = labels.iter().enumerate().map(|(i, l)| (l, i)).collect();
    let mut tp = vec![0usize; labels.len()];
    let mut true_sum = vec![0usize; labels.len()];
    let mut pred_sum = vec![0usize; labels.len()];

    for (t, p) in y_true.iter().zip(y_pred.iter()) {
        let ti = index.get(t).copied();
        let pi = index.get(p).copied();
        if let Some(i) = ti {
            true_sum[i] += 1;
        }
        if let Some(j) = pi {
            pred_sum[j] += 1;
        }
        if t == p {
            if let Some(i) = ti {
                tp[i] += 1;
            }
        }
    }

    let n = y_true.len();
    (0..labels.len())
        .map(|k| {
            let fp = pred_sum[k] - tp[k];
            let fn_ = true_sum[k] - tp[k];
            BinaryCounts {
                tn: n - tp[k] - fp - fn_,
                fp,
                fn_,
                tp: tp[k],
            }
        })
        .collect()
}

/// Compute confusion matrix from ground truth and predictions
///
/// # Arguments
/// * `y_true` - Ground truth class labels
/// * `y_pred` - Predicted class labels
///
/// # Returns
/// A ConfusionMatrix over the sorted labels of both sequences, where element
/// [i][j] is the count of true label i predicted as j
///
/// # Example
/// ```
/// use evaluar::eval::confusion_matrix;
///
/// let y_true = vec![0, 1, 1, 0];
/// let y_pred = vec![0, 1, 0, 0];
/// let cm = confusion_matrix(&y_true, &y_pred).unwrap();
///
/// assert_eq!(cm.matrix(), &[vec![2usize, 0], vec![1, 1]]);
/// assert_eq!(cm.accuracy(), 0.75);
/// ```
pub fn confusion_matrix<L: Ord + Clone>(y_true: &[L], y_pred: &[L]) -> Result<ConfusionMatrix<L>> {
    ConfusionMatrix::from_predictions(y_true, y_pred)
}

/// Compute confusion matrix restricted to and ordered by `labels`
pub fn confusion_matrix_with_labels<L: Ord + Clone>(
    y_true: &[L],
    y_pred: &[L],
    labels: &[L],
) -> Result<ConfusionMatrix<L>> {
    ConfusionMatrix::from_predictions_with_labels(y_true, y_pred, labels)
}

/// One-vs-rest confusion table per label
///
/// Unlike [`confusion_matrix_with_labels`], samples whose labels fall outside
/// `labels` still count as negatives for every selected label.
pub fn multilabel_confusion_matrix<L: Ord + Clone>(
    y_true: &[L],
    y_pred: &[L],
    labels: Option<&[L]>,
) -> Result<Vec<BinaryCounts>> {
    check_targets(y_true, y_pred, "a multilabel confusion matrix")?;
    let labels = resolve_labels(y_true, y_pred, labels)?;
    Ok(one_vs_rest_counts(y_true, y_pred, &labels))
}
