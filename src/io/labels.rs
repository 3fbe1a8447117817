//! Label file loading
//!
//! Two layouts are accepted, chosen by extension:
//! - `.json`: an array of strings, numbers or booleans
//! - anything else: labels separated by newlines and/or commas, with `#`
//!   comment lines and blank entries skipped

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{EvalError, Result};

/// Read one label sequence from a file
///
/// # Example
///
/// ```no_run
/// use evaluar::io::read_labels;
///
/// let y_true = read_labels("y_true.txt").expect("failed to read labels");
/// println!("{} samples", y_true.len());
/// ```
pub fn read_labels(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| EvalError::io(format!("Failed to read label file {}", path.display()), e))?;

    let is_json = path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let labels = if is_json {
        parse_json_labels(&content, path)?
    } else {
        parse_labels(&content)
    };

    tracing::debug!(path = %path.display(), samples = labels.len(), "read labels");
    Ok(labels)
}

/// Split plain-text label content into labels
pub fn parse_labels(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .flat_map(|line| line.split(','))
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_json_labels(content: &str, path: &Path) -> Result<Vec<String>> {
    let label_error = |message: String| EvalError::LabelFile {
        path: path.to_path_buf(),
        message,
    };

    let value: Value =
        serde_json::from_str(content).map_err(|e| label_error(format!("JSON parsing failed: {e}")))?;
    let Value::Array(items) = value else {
        return Err(label_error("expected a JSON array of labels".to_string()));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(label_error(format!(
                "element {i} is not a string, number or boolean: {other}"
            ))),
        })
        .collect()
}

/// A pair of label sequences, typed as integers when every label parses as one
///
/// Integer labels order numerically (`2 < 10`), text labels lexically.
#[derive(Clone, Debug, PartialEq)]
pub enum LabelData {
    Integer { y_true: Vec<i64>, y_pred: Vec<i64> },
    Text { y_true: Vec<String>, y_pred: Vec<String> },
}

impl LabelData {
    /// Pick the label type for two raw sequences
    pub fn infer(y_true: Vec<String>, y_pred: Vec<String>) -> Self {
        let as_ints = |raw: &[String]| raw.iter().map(|s| s.parse::<i64>().ok()).collect::<Option<Vec<_>>>();
        match (as_ints(&y_true), as_ints(&y_pred)) {
            (Some(t), Some(p)) => LabelData::Integer { y_true: t, y_pred: p },
            _ => LabelData::Text { y_true, y_pred },
        }
    }

    /// Read and type both sequences
    pub fn load(y_true: impl AsRef<Path>, y_pred: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::infer(read_labels(y_true)?, read_labels(y_pred)?))
    }

    /// Number of samples in `y_true`
    pub fn len(&self) -> usize {
        match self {
            LabelData::Integer { y_true, .. } => y_true.len(),
            LabelData::Text { y_true, .. } => y_true.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
