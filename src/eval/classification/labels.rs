//! Label discovery and input validation shared by every metric

use std::collections::BTreeSet;

use crate::error::{EvalError, Result};

/// Sorted, deduplicated union of the labels found in `y_true` and `y_pred`
pub fn unique_labels<L: Ord + Clone>(y_true: &[L], y_pred: &[L]) -> Vec<L> {
    y_true
        .iter()
        .chain(y_pred.iter())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Reject sequences of unequal length or without samples
pub(crate) fn check_targets<L>(y_true: &[L], y_pred: &[L], metric: &'static str) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(EvalError::LengthMismatch {
            y_true: y_true.len(),
            y_pred: y_pred.len(),
        });
    }
    if y_true.is_empty() {
        return Err(EvalError::EmptyInput { metric });
    }
    Ok(())
}

/// An explicit label list must be non-empty and free of duplicates
pub(crate) fn validate_labels<L: Ord>(labels: &[L]) -> Result<()> {
    if labels.is_empty() {
        return Err(EvalError::invalid_labels("'labels' should contain at least one label"));
    }
    let distinct: BTreeSet<&L> = labels.iter().collect();
    if distinct.len() != labels.len() {
        return Err(EvalError::invalid_labels(format!(
            "'labels' contains {} duplicate entr{}",
            labels.len() - distinct.len(),
            if labels.len() - distinct.len() == 1 { "y" } else { "ies" }
        )));
    }
    Ok(())
}

/// The explicit label list when given (validated), otherwise every label present in the data
pub(crate) fn resolve_labels<L: Ord + Clone>(
    y_true: &[L],
    y_pred: &[L],
    labels: Option<&[L]>,
) -> Result<Vec<L>> {
    match labels {
        Some(labels) => {
            validate_labels(labels)?;
            Ok(labels.to_vec())
        }
        None => Ok(unique_labels(y_true, y_pred)),
    }
}

/// Whether `labels` names every label that occurs in the data
pub(crate) fn covers_present<L: Ord>(labels: &[L], y_true: &[L], y_pred: &[L]) -> bool {
    let selected: BTreeSet<&L> = labels.iter().collect();
    y_true.iter().chain(y_pred.iter()).all(|l| selected.contains(l))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_labels_sorted_union() {
        let labels = unique_labels(&[3, 1, 1], &[2, 3, 0]);
        assert_eq!(labels, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_unique_labels_strings() {
        let y_true = ["cat", "dog", "cat"];
        let y_pred = ["ant", "cat", "dog"];
        assert_eq!(unique_labels(&y_true, &y_pred), vec!["ant", "cat", "dog"]);
    }

    #[test]
    fn test_check_targets() {
        assert!(check_targets(&[0, 1], &[1, 0], "accuracy").is_ok());
        assert!(matches!(
            check_targets(&[0, 1], &[1], "accuracy"),
            Err(EvalError::LengthMismatch { y_true: 2, y_pred: 1 })
        ));
        let empty: [u8; 0] = [];
        assert!(matches!(
            check_targets(&empty, &empty, "accuracy"),
            Err(EvalError::EmptyInput { metric: "accuracy" })
        ));
    }

    #[test]
    fn test_validate_labels() {
        assert!(validate_labels(&[2, 0, 1]).is_ok());
        let empty: [u8; 0] = [];
        assert!(matches!(validate_labels(&empty), Err(EvalError::InvalidLabels { .. })));
        assert!(matches!(validate_labels(&[1, 1]), Err(EvalError::InvalidLabels { .. })));
    }

    #[test]
    fn test_covers_present() {
        assert!(covers_present(&[0, 1, 2], &[0, 1], &[1, 2]));
        assert!(!covers_present(&[0, 1], &[0, 1], &[1, 2]));
    }
}
