//! Policy for ill-defined ratios (a class that is never predicted or never true)

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Value substituted when a precision, recall or F-score denominator is zero
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ZeroDivision {
    /// Use 0.0 and emit a warning through `tracing`
    #[default]
    Warn,
    /// Use 0.0 silently
    Zero,
    /// Use 1.0
    One,
    /// Use NaN; NaN entries are skipped by macro averaging
    Nan,
}

impl ZeroDivision {
    /// The numeric value substituted for an undefined ratio
    pub fn value(self) -> f64 {
        match self {
            ZeroDivision::Warn | ZeroDivision::Zero => 0.0,
            ZeroDivision::One => 1.0,
            ZeroDivision::Nan => f64::NAN,
        }
    }

    pub fn warns(self) -> bool {
        self == ZeroDivision::Warn
    }
}

impl FromStr for ZeroDivision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "warn" => Ok(ZeroDivision::Warn),
            "0" | "0.0" => Ok(ZeroDivision::Zero),
            "1" | "1.0" => Ok(ZeroDivision::One),
            "nan" => Ok(ZeroDivision::Nan),
            _ => Err(format!(
                "Unknown zero_division: {s}. Valid values: warn, 0, 1, nan"
            )),
        }
    }
}

impl fmt::Display for ZeroDivision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ZeroDivision::Warn => "warn",
            ZeroDivision::Zero => "0",
            ZeroDivision::One => "1",
            ZeroDivision::Nan => "nan",
        };
        f.write_str(name)
    }
}

impl Serialize for ZeroDivision {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

// Config files write `zero_division: 0` as often as `zero_division: "0"`.
struct ZeroDivisionVisitor;

impl Visitor<'_> for ZeroDivisionVisitor {
    type Value = ZeroDivision;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("one of \"warn\", \"nan\", 0 or 1")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        match v {
            0 => Ok(ZeroDivision::Zero),
            1 => Ok(ZeroDivision::One),
            _ => Err(E::invalid_value(de::Unexpected::Unsigned(v), &self)),
        }
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        match v {
            0 => Ok(ZeroDivision::Zero),
            1 => Ok(ZeroDivision::One),
            _ => Err(E::invalid_value(de::Unexpected::Signed(v), &self)),
        }
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        if v == 0.0 {
            Ok(ZeroDivision::Zero)
        } else if v == 1.0 {
            Ok(ZeroDivision::One)
        } else if v.is_nan() {
            Ok(ZeroDivision::Nan)
        } else {
            Err(E::invalid_value(de::Unexpected::Float(v), &self))
        }
    }
}

impl<'de> Deserialize<'de> for ZeroDivision {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ZeroDivisionVisitor)
    }
}
