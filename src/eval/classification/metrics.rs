//! Multi-class classification metrics

use serde::Serialize;

use super::average::Average;
use super::confusion::{BinaryCounts, ConfusionMatrix};
use super::zero_division::ZeroDivision;

/// Per-class precision, recall, F-score and support
///
/// Built from one-vs-rest counts so that classes outside a label selection
/// still contribute false positives and false negatives.
#[derive(Clone, Debug, Serialize)]
pub struct MultiClassMetrics {
    /// Per-class precision
    pub precision: Vec<f64>,
    /// Per-class recall
    pub recall: Vec<f64>,
    /// Per-class F-beta score (F1 unless built with another beta)
    pub fscore: Vec<f64>,
    /// Per-class support (count)
    pub support: Vec<usize>,
    /// Number of classes
    pub n_classes: usize,
    #[serde(skip)]
    counts: Vec<BinaryCounts>,
    #[serde(skip)]
    beta: f64,
    #[serde(skip)]
    zero_division: ZeroDivision,
}

/// Precision, recall and F-beta of one table; `None` marks an ill-defined ratio
fn ratios(c: &BinaryCounts, beta2: f64) -> (Option<f64>, Option<f64>, Option<f64>) {
    let tp = c.tp as f64;
    let divide = |num: f64, denom: f64| (denom > 0.0).then(|| num / denom);
    let precision = divide(tp, c.predicted() as f64);
    let recall = divide(tp, c.support() as f64);
    let fscore = divide(
        (1.0 + beta2) * tp,
        (1.0 + beta2) * tp + beta2 * c.fn_ as f64 + c.fp as f64,
    );
    (precision, recall, fscore)
}

impl MultiClassMetrics {
    /// Compute metrics from one-vs-rest counts
    pub fn from_counts(counts: Vec<BinaryCounts>, beta: f64, zero_division: ZeroDivision) -> Self {
        let n_classes = counts.len();
        let beta2 = beta * beta;
        let fill = zero_division.value();

        let mut precision = Vec::with_capacity(n_classes);
        let mut recall = Vec::with_capacity(n_classes);
        let mut fscore = Vec::with_capacity(n_classes);
        let (mut bad_p, mut bad_r, mut bad_f) = (0usize, 0usize, 0usize);

        for c in &counts {
            let (p, r, f) = ratios(c, beta2);
            bad_p += usize::from(p.is_none());
            bad_r += usize::from(r.is_none());
            bad_f += usize::from(f.is_none());
            precision.push(p.unwrap_or(fill));
            recall.push(r.unwrap_or(fill));
            fscore.push(f.unwrap_or(fill));
        }

        if zero_division.warns() {
            warn_ill_defined("Precision", bad_p, "no predicted samples");
            warn_ill_defined("Recall", bad_r, "no true samples");
            warn_ill_defined("F-score", bad_f, "no true nor predicted samples");
        }

        Self {
            precision,
            recall,
            fscore,
            support: counts.iter().map(BinaryCounts::support).collect(),
            n_classes,
            counts,
            beta,
            zero_division,
        }
    }

    /// Compute F1 metrics from a confusion matrix
    pub fn from_confusion_matrix<L>(cm: &ConfusionMatrix<L>, zero_division: ZeroDivision) -> Self {
        Self::from_counts(cm.one_vs_rest(), 1.0, zero_division)
    }

    /// The beta the F-scores were computed with
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Get averaged precision
    pub fn precision_avg(&self, average: Average) -> f64 {
        self.average_metric(&self.precision, average, |(p, _, _)| p)
    }

    /// Get averaged recall
    pub fn recall_avg(&self, average: Average) -> f64 {
        self.average_metric(&self.recall, average, |(_, r, _)| r)
    }

    /// Get averaged F-score
    pub fn fscore_avg(&self, average: Average) -> f64 {
        self.average_metric(&self.fscore, average, |(_, _, f)| f)
    }

    fn average_metric(
        &self,
        values: &[f64],
        average: Average,
        pick: fn((Option<f64>, Option<f64>, Option<f64>)) -> Option<f64>,
    ) -> f64 {
        match average {
            // A single selected class (binary) or no reduction requested:
            // both collapse to the plain mean over the selected classes.
            Average::Macro | Average::Binary | Average::None => nan_mean(values),
            Average::Micro => {
                let pooled: BinaryCounts = self.counts.iter().copied().sum();
                pick(ratios(&pooled, self.beta * self.beta)).unwrap_or(self.zero_division.value())
            }
            Average::Weighted => nan_weighted_mean(values, &self.support),
        }
    }
}

/// Support-weighted mean ignoring NaN entries and their weights
///
/// Falls back to the unweighted mean when the remaining weights sum to zero.
fn nan_weighted_mean(values: &[f64], support: &[usize]) -> f64 {
    let kept: Vec<(f64, usize)> = values
        .iter()
        .copied()
        .zip(support.iter().copied())
        .filter(|(v, _)| !v.is_nan())
        .collect();
    if kept.is_empty() {
        return f64::NAN;
    }

    let total: usize = kept.iter().map(|&(_, s)| s).sum();
    if total == 0 {
        return kept.iter().map(|&(v, _)| v).sum::<f64>() / kept.len() as f64;
    }
    kept.iter().map(|&(v, s)| v * s as f64).sum::<f64>() / total as f64
}

/// Mean ignoring NaN entries; NaN when nothing remains
fn nan_mean(values: &[f64]) -> f64 {
    let finite: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if finite.is_empty() {
        return f64::NAN;
    }
    finite.iter().sum::<f64>() / finite.len() as f64
}

fn warn_ill_defined(metric: &str, n_labels: usize, condition: &str) {
    if n_labels > 0 {
        tracing::warn!(
            "{metric} is ill-defined and being set to 0.0 in {n_labels} label(s) with {condition}. \
             Use `zero_division` to control this behavior."
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn counts(tp: usize, fp: usize, fn_: usize, tn: usize) -> BinaryCounts {
        BinaryCounts { tn, fp, fn_, tp }
    }

    #[test]
    fn test_from_counts_basic() {
        let m = MultiClassMetrics::from_counts(vec![counts(3, 1, 2, 2), counts(1, 2, 1, 4)], 1.0, ZeroDivision::Zero);
        assert_abs_diff_eq!(m.precision[0], 0.75, epsilon = 1e-12);
        assert_abs_diff_eq!(m.recall[0], 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(m.fscore[0], 2.0 / 3.0, epsilon = 1e-12);
        assert_eq!(m.support, vec![5, 2]);
        assert_eq!(m.n_classes, 2);
    }

    #[test]
    fn test_fbeta_weights_recall() {
        // P = 0.5, R = 1.0
        let c = vec![counts(1, 1, 0, 2)];
        let f2 = MultiClassMetrics::from_counts(c.clone(), 2.0, ZeroDivision::Zero);
        let f05 = MultiClassMetrics::from_counts(c, 0.5, ZeroDivision::Zero);
        // (1 + 4) * 0.5 * 1.0 / (4 * 0.5 + 1.0)
        assert_abs_diff_eq!(f2.fscore[0], 2.5 / 3.0, epsilon = 1e-12);
        // (1 + 0.25) * 0.5 / (0.25 * 0.5 + 1.0)
        assert_abs_diff_eq!(f05.fscore[0], 0.625 / 1.125, epsilon = 1e-12);
        assert_eq!(f2.beta(), 2.0);
    }

    #[test]
    fn test_zero_division_fill() {
        // Never predicted, never true
        let c = vec![counts(0, 0, 0, 4)];
        let zero = MultiClassMetrics::from_counts(c.clone(), 1.0, ZeroDivision::Zero);
        let one = MultiClassMetrics::from_counts(c.clone(), 1.0, ZeroDivision::One);
        let nan = MultiClassMetrics::from_counts(c, 1.0, ZeroDivision::Nan);
        assert_eq!((zero.precision[0], zero.recall[0], zero.fscore[0]), (0.0, 0.0, 0.0));
        assert_eq!((one.precision[0], one.recall[0], one.fscore[0]), (1.0, 1.0, 1.0));
        assert!(nan.precision[0].is_nan() && nan.recall[0].is_nan() && nan.fscore[0].is_nan());
    }

    #[test]
    fn test_fscore_zero_when_defined_but_wrong() {
        // Predicted twice, true once, never right: P = R = 0, F defined as 0
        let m = MultiClassMetrics::from_counts(vec![counts(0, 2, 1, 1)], 1.0, ZeroDivision::One);
        assert_eq!(m.precision[0], 0.0);
        assert_eq!(m.recall[0], 0.0);
        assert_eq!(m.fscore[0], 0.0);
    }

    #[test]
    fn test_micro_pools_counts() {
        let m = MultiClassMetrics::from_counts(vec![counts(3, 1, 2, 2), counts(1, 2, 1, 4)], 1.0, ZeroDivision::Zero);
        // TP = 4, FP = 3, FN = 3
        assert_abs_diff_eq!(m.precision_avg(Average::Micro), 4.0 / 7.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m.recall_avg(Average::Micro), 4.0 / 7.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m.fscore_avg(Average::Micro), 4.0 / 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_macro_skips_nan() {
        let m = MultiClassMetrics::from_counts(vec![counts(1, 0, 0, 1), counts(0, 0, 0, 2)], 1.0, ZeroDivision::Nan);
        assert_eq!(m.precision_avg(Average::Macro), 1.0);
    }

    #[test]
    fn test_weighted_zero_support_uses_policy() {
        // Predicted three times, never true: precision and F are 0, recall is ill-defined
        let m = MultiClassMetrics::from_counts(vec![counts(0, 3, 0, 0)], 1.0, ZeroDivision::One);
        assert_eq!(m.recall_avg(Average::Weighted), 1.0);
        assert_eq!(m.precision_avg(Average::Weighted), 0.0);
        assert_eq!(m.fscore_avg(Average::Weighted), 0.0);
    }

    #[test]
    fn test_weighted_zero_support_nothing_predicted() {
        let m = MultiClassMetrics::from_counts(vec![counts(0, 0, 0, 4)], 1.0, ZeroDivision::One);
        assert_eq!(m.precision_avg(Average::Weighted), 1.0);
        assert_eq!(m.recall_avg(Average::Weighted), 1.0);
        assert_eq!(m.fscore_avg(Average::Weighted), 1.0);
    }

    #[test]
    fn test_weighted_skips_nan_entries() {
        // Class 0: P = 2/4, support 2; classes 1 and 2 never predicted
        let m = MultiClassMetrics::from_counts(
            vec![counts(2, 2, 0, 0), counts(0, 0, 1, 3), counts(0, 0, 1, 3)],
            1.0,
            ZeroDivision::Nan,
        );
        assert_abs_diff_eq!(m.precision_avg(Average::Weighted), 0.5, epsilon = 1e-12);

        let all_nan = MultiClassMetrics::from_counts(vec![counts(0, 0, 0, 4)], 1.0, ZeroDivision::Nan);
        assert!(all_nan.precision_avg(Average::Weighted).is_nan());
    }

    #[test]
    fn test_from_confusion_matrix() {
        let cm = ConfusionMatrix::from_predictions(&[0, 1, 0, 2, 1], &[0, 1, 1, 2, 0]).unwrap();
        let m = MultiClassMetrics::from_confusion_matrix(&cm, ZeroDivision::Warn);
        assert_abs_diff_eq!(m.precision[0], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(m.recall[1], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(m.fscore[2], 1.0, epsilon = 1e-12);
        // Macro average: (0.5 + 0.5 + 1.0) / 3
        assert_abs_diff_eq!(m.fscore_avg(Average::Macro), 2.0 / 3.0, epsilon = 1e-12);
        // Weighted F1: (0.5*2 + 0.5*2 + 1.0*1) / 5
        assert_abs_diff_eq!(m.fscore_avg(Average::Weighted), 0.6, epsilon = 1e-12);
    }
}
