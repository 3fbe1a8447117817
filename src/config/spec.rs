//! Evaluation config files
//!
//! An optional YAML or JSON document supplying defaults for the report and
//! score commands. Command-line flags override every field.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{EvalError, Result};
use crate::eval::{Average, ZeroDivision};

/// Upper bound for report precision; beyond this f64 formatting is noise
pub const MAX_DIGITS: usize = 15;

/// Evaluation settings loaded from a config file
///
/// ```yaml
/// labels: [0, 1, 2]
/// target_names: [setosa, versicolor, virginica]
/// digits: 3
/// zero_division: 0
/// average: macro
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvalSpec {
    /// Labels to evaluate, in output order
    #[serde(default, deserialize_with = "labels_as_strings")]
    pub labels: Option<Vec<String>>,
    #[serde(default)]
    pub target_names: Option<Vec<String>>,
    #[serde(default)]
    pub digits: Option<usize>,
    #[serde(default)]
    pub zero_division: Option<ZeroDivision>,
    #[serde(default)]
    pub average: Option<Average>,
}

// Config labels may be written as numbers (`[0, 1]`) or strings; both are
// resolved against the label files later, so keep them as text here.
fn labels_as_strings<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Int(i64),
        Text(String),
    }

    let raw: Option<Vec<Scalar>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|items| {
        items
            .into_iter()
            .map(|item| match item {
                Scalar::Int(n) => n.to_string(),
                Scalar::Text(s) => s,
            })
            .collect()
    }))
}

/// Load and validate an evaluation config
///
/// `.json` files are parsed as JSON, everything else as YAML.
pub fn load_spec(path: impl AsRef<Path>) -> Result<EvalSpec> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(EvalError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)
        .map_err(|e| EvalError::io(format!("Failed to read config file {}", path.display()), e))?;

    let is_json = path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let spec: EvalSpec = if is_json {
        serde_json::from_str(&content).map_err(|e| EvalError::ConfigParsing {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
    } else {
        serde_yaml::from_str(&content).map_err(|e| EvalError::ConfigParsing {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
    };

    validate_spec(&spec)?;
    tracing::debug!(path = %path.display(), "loaded evaluation config");
    Ok(spec)
}

/// Check value ranges that serde cannot express
pub fn validate_spec(spec: &EvalSpec) -> Result<()> {
    if let Some(digits) = spec.digits {
        if digits > MAX_DIGITS {
            return Err(EvalError::ConfigValue {
                field: "digits".to_string(),
                message: format!("{digits} exceeds the maximum of {MAX_DIGITS}"),
                suggestion: format!("Use a value between 0 and {MAX_DIGITS}"),
            });
        }
    }

    if let Some(names) = &spec.target_names {
        if names.is_empty() {
            return Err(EvalError::ConfigValue {
                field: "target_names".to_string(),
                message: "list is empty".to_string(),
                suggestion: "Remove the field or give one name per label".to_string(),
            });
        }
    }

    if let Some(labels) = &spec.labels {
        if labels.is_empty() {
            return Err(EvalError::ConfigValue {
                field: "labels".to_string(),
                message: "list is empty".to_string(),
                suggestion: "Remove the field to use every label present in the data".to_string(),
            });
        }
    }

    Ok(())
}
