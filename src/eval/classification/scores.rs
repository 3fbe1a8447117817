//! Scalar scoring functions: accuracy, precision, recall and F-scores

use serde::Serialize;

use super::average::Average;
use super::confusion::one_vs_rest_counts;
use super::labels::{check_targets, resolve_labels, unique_labels};
use super::metrics::MultiClassMetrics;
use super::zero_division::ZeroDivision;
use crate::error::{EvalError, Result};

/// Result of a precision/recall/F metric
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Score {
    /// One value per label (`Average::None`)
    PerClass(Vec<f64>),
    /// A single averaged value
    Average(f64),
}

impl Score {
    /// The averaged value, if this score was averaged
    pub fn value(&self) -> Option<f64> {
        match self {
            Score::Average(v) => Some(*v),
            Score::PerClass(_) => None,
        }
    }

    /// The per-label values, if no averaging was requested
    pub fn per_class(&self) -> Option<&[f64]> {
        match self {
            Score::PerClass(v) => Some(v),
            Score::Average(_) => None,
        }
    }
}

/// Parameters shared by the precision/recall/F family
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreOptions<L> {
    pub average: Average,
    /// Labels to include, and their order for `Average::None`
    pub labels: Option<Vec<L>>,
    /// Positive class for `Average::Binary`; defaults to the greatest label present
    ///
    /// With a single label present that label becomes the positive class, so
    /// `f1_score(&[0, 0], &[0, 0], ..)` is 1.0. Set `pos_label` explicitly
    /// (e.g. to `1`) to score an absent positive class, which is then
    /// ill-defined and follows `zero_division`.
    pub pos_label: Option<L>,
    pub zero_division: ZeroDivision,
    /// Weight of recall in the F-score
    pub beta: f64,
}

impl<L> Default for ScoreOptions<L> {
    fn default() -> Self {
        Self {
            average: Average::Binary,
            labels: None,
            pos_label: None,
            zero_division: ZeroDivision::Warn,
            beta: 1.0,
        }
    }
}

impl<L> ScoreOptions<L> {
    pub fn new(average: Average) -> Self {
        Self {
            average,
            ..Self::default()
        }
    }

    pub fn labels(mut self, labels: Vec<L>) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn pos_label(mut self, pos_label: L) -> Self {
        self.pos_label = Some(pos_label);
        self
    }

    pub fn zero_division(mut self, zero_division: ZeroDivision) -> Self {
        self.zero_division = zero_division;
        self
    }

    pub fn beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }
}

/// Precision, recall, F-score and support computed in one pass
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PrecisionRecallFScore<L> {
    /// Labels the scores refer to (the positive class alone for `Average::Binary`)
    pub labels: Vec<L>,
    pub precision: Score,
    pub recall: Score,
    pub fscore: Score,
    /// Per-label true counts; only reported when no averaging was requested
    pub support: Option<Vec<usize>>,
}

/// Fraction of samples whose prediction equals the ground truth
///
/// # Example
/// ```
/// use evaluar::eval::accuracy_score;
///
/// let acc = accuracy_score(&[0, 1, 1, 0], &[0, 1, 0, 0]).unwrap();
/// assert_eq!(acc, 0.75);
/// ```
pub fn accuracy_score<L: PartialEq>(y_true: &[L], y_pred: &[L]) -> Result<f64> {
    let correct = correct_count(y_true, y_pred)?;
    Ok(correct as f64 / y_true.len() as f64)
}

/// Number of samples whose prediction equals the ground truth
pub fn correct_count<L: PartialEq>(y_true: &[L], y_pred: &[L]) -> Result<usize> {
    check_targets(y_true, y_pred, "accuracy")?;
    Ok(y_true.iter().zip(y_pred.iter()).filter(|(t, p)| t == p).count())
}

/// Labels scored under the requested averaging
fn selected_labels<L: Ord + Clone>(y_true: &[L], y_pred: &[L], options: &ScoreOptions<L>) -> Result<Vec<L>> {
    if options.average != Average::Binary {
        return resolve_labels(y_true, y_pred, options.labels.as_deref());
    }

    let present = unique_labels(y_true, y_pred);
    if present.len() > 2 {
        return Err(EvalError::invalid_parameter(
            "average",
            format!(
                "Target is multiclass ({} labels) but average='binary'\n  → Choose another average setting, one of [none, micro, macro, weighted]",
                present.len()
            ),
        ));
    }
    if options.labels.is_some() {
        tracing::debug!("labels are ignored when average='binary'; scoring the positive class only");
    }
    let positive = match &options.pos_label {
        Some(pos) if present.len() == 2 && !present.contains(pos) => {
            return Err(EvalError::invalid_parameter(
                "pos_label",
                "pos_label is not a valid label\n  → It should be one of the labels present in y_true or y_pred",
            ));
        }
        Some(pos) => pos.clone(),
        None => present
            .last()
            .cloned()
            .ok_or(EvalError::EmptyInput { metric: "binary scores" })?,
    };
    Ok(vec![positive])
}

fn compute<L: Ord + Clone>(
    y_true: &[L],
    y_pred: &[L],
    options: &ScoreOptions<L>,
    beta: f64,
) -> Result<PrecisionRecallFScore<L>> {
    check_targets(y_true, y_pred, "precision, recall and F-score")?;
    if !beta.is_finite() || beta <= 0.0 {
        return Err(EvalError::invalid_parameter(
            "beta",
            format!("beta should be a finite number > 0, got {beta}"),
        ));
    }

    let labels = selected_labels(y_true, y_pred, options)?;
    let counts = one_vs_rest_counts(y_true, y_pred, &labels);
    let metrics = MultiClassMetrics::from_counts(counts, beta, options.zero_division);

    let (precision, recall, fscore, support) = match options.average {
        Average::None => (
            Score::PerClass(metrics.precision.clone()),
            Score::PerClass(metrics.recall.clone()),
            Score::PerClass(metrics.fscore.clone()),
            Some(metrics.support.clone()),
        ),
        average => (
            Score::Average(metrics.precision_avg(average)),
            Score::Average(metrics.recall_avg(average)),
            Score::Average(metrics.fscore_avg(average)),
            None,
        ),
    };

    Ok(PrecisionRecallFScore {
        labels,
        precision,
        recall,
        fscore,
        support,
    })
}

/// Precision, recall, F-beta (with `options.beta`) and support
pub fn precision_recall_fscore_support<L: Ord + Clone>(
    y_true: &[L],
    y_pred: &[L],
    options: &ScoreOptions<L>,
) -> Result<PrecisionRecallFScore<L>> {
    compute(y_true, y_pred, options, options.beta)
}

/// Precision: TP / (TP + FP)
///
/// # Example
/// ```
/// use evaluar::eval::{precision_score, Average, ScoreOptions};
///
/// let y_true = [0, 1, 2, 0, 1, 2];
/// let y_pred = [0, 2, 1, 0, 0, 1];
/// let p = precision_score(&y_true, &y_pred, &ScoreOptions::new(Average::Macro)).unwrap();
/// assert!((p.value().unwrap() - 0.2222222222222222).abs() < 1e-12);
/// ```
pub fn precision_score<L: Ord + Clone>(y_true: &[L], y_pred: &[L], options: &ScoreOptions<L>) -> Result<Score> {
    Ok(compute(y_true, y_pred, options, options.beta)?.precision)
}

/// Recall: TP / (TP + FN)
pub fn recall_score<L: Ord + Clone>(y_true: &[L], y_pred: &[L], options: &ScoreOptions<L>) -> Result<Score> {
    Ok(compute(y_true, y_pred, options, options.beta)?.recall)
}

/// F1 score, the harmonic mean of precision and recall; `options.beta` is ignored
pub fn f1_score<L: Ord + Clone>(y_true: &[L], y_pred: &[L], options: &ScoreOptions<L>) -> Result<Score> {
    Ok(compute(y_true, y_pred, options, 1.0)?.fscore)
}

/// F-beta score: recall counts `beta` times as much as precision
pub fn fbeta_score<L: Ord + Clone>(
    y_true: &[L],
    y_pred: &[L],
    beta: f64,
    options: &ScoreOptions<L>,
) -> Result<Score> {
    Ok(compute(y_true, y_pred, options, beta)?.fscore)
}
