//! CLI type enums for output formats and metric names

use serde::Serialize;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {s}. Valid formats: text, json")),
        }
    }
}

/// Metric selected by the score command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Accuracy,
    Precision,
    Recall,
    F1,
}

impl std::str::FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "accuracy" => Ok(Metric::Accuracy),
            "precision" => Ok(Metric::Precision),
            "recall" => Ok(Metric::Recall),
            "f1" | "f1-score" => Ok(Metric::F1),
            _ => Err(format!(
                "Unknown metric: {s}. Valid metrics: accuracy, precision, recall, f1"
            )),
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Metric::Accuracy => write!(f, "accuracy"),
            Metric::Precision => write!(f, "precision"),
            Metric::Recall => write!(f, "recall"),
            Metric::F1 => write!(f, "f1"),
        }
    }
}
