//! Averaging strategies for multi-class metrics

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Averaging strategy for multi-class metrics
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Average {
    /// Return the metric for every label, no averaging
    None,
    /// Report only the positive class; the data may hold at most two labels
    #[default]
    Binary,
    /// Calculate metrics globally by counting total TP, FP, FN
    Micro,
    /// Calculate metrics for each label, return unweighted mean
    Macro,
    /// Weighted mean by support (number of true instances per label)
    Weighted,
}

impl FromStr for Average {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Average::None),
            "binary" => Ok(Average::Binary),
            "micro" => Ok(Average::Micro),
            "macro" => Ok(Average::Macro),
            "weighted" => Ok(Average::Weighted),
            _ => Err(format!(
                "Unknown average: {s}. Valid averages: none, binary, micro, macro, weighted"
            )),
        }
    }
}

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Average::None => "none",
            Average::Binary => "binary",
            Average::Micro => "micro",
            Average::Macro => "macro",
            Average::Weighted => "weighted",
        };
        f.write_str(name)
    }
}
