use std::fmt;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};

/// Largest integer magnitude an `f64` represents exactly.
const MAX_EXACT_INTEGER: i64 = 1 << 53;

/// Ordinal/temporal position of one observation.
///
/// Numeric cells (years, week indices, epoch seconds) stay numeric so the
/// renderer can place them on a continuous axis; anything else is kept as the
/// trimmed text label and treated as a category.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeValue {
    Numeric(OrderedFloat<f64>),
    Label(String),
}

impl TimeValue {
    #[must_use]
    pub fn numeric(value: f64) -> Self {
        Self::Numeric(OrderedFloat(value))
    }

    #[must_use]
    pub fn label(value: impl Into<String>) -> Self {
        Self::Label(value.into())
    }

    /// Parses a raw table cell. An empty cell yields an empty label.
    #[must_use]
    pub fn from_cell(cell: &str) -> Self {
        let trimmed = cell.trim();
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Self::numeric(value),
            _ => Self::label(trimmed),
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Numeric(value) => Some(value.into_inner()),
            Self::Label(_) => None,
        }
    }

    /// `false` only for non-finite numbers; every label is a valid position.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Numeric(value) => value.is_finite(),
            Self::Label(_) => true,
        }
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(value) => write!(f, "{}", value.into_inner()),
            Self::Label(label) => f.write_str(label),
        }
    }
}

impl From<f64> for TimeValue {
    fn from(value: f64) -> Self {
        Self::numeric(value)
    }
}

impl From<i32> for TimeValue {
    fn from(value: i32) -> Self {
        Self::numeric(f64::from(value))
    }
}

/// Rejects integers beyond 2^53, which would lose precision as `f64`
/// (epoch nanoseconds, for instance).
impl TryFrom<i64> for TimeValue {
    type Error = DashboardError;

    fn try_from(value: i64) -> DashboardResult<Self> {
        if !(-MAX_EXACT_INTEGER..=MAX_EXACT_INTEGER).contains(&value) {
            return Err(DashboardError::InvalidData(format!(
                "time value {value} is not exactly representable"
            )));
        }
        Ok(Self::numeric(value as f64))
    }
}

impl From<&str> for TimeValue {
    fn from(value: &str) -> Self {
        Self::label(value)
    }
}

/// One row of the input table before region-code normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub region_name: String,
    pub region_code2: String,
    pub time: TimeValue,
    /// `None` when the source cell was empty or not a number.
    pub num_value: Option<f64>,
}

impl RawRecord {
    #[must_use]
    pub fn new(
        region_name: impl Into<String>,
        region_code2: impl Into<String>,
        time: impl Into<TimeValue>,
        num_value: f64,
    ) -> Self {
        Self {
            region_name: region_name.into(),
            region_code2: region_code2.into(),
            time: time.into(),
            num_value: Some(num_value),
        }
    }
}

/// One observation that survived normalization.
///
/// `region_code3` is always present: records whose alpha-2 code does not map
/// never become a `Record`. A missing or non-finite source value is kept as
/// `None` and skipped by aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub region_name: String,
    pub region_code2: String,
    pub region_code3: String,
    pub time: TimeValue,
    pub num_value: Option<f64>,
}

/// Aggregate for one alpha-3 region code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionTotal {
    pub region_code3: String,
    pub total: f64,
}

impl RegionTotal {
    #[must_use]
    pub fn new(region_code3: impl Into<String>, total: f64) -> Self {
        Self {
            region_code3: region_code3.into(),
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_integers_are_rejected_instead_of_rounded() {
        assert_eq!(
            TimeValue::try_from(1_600_000_000_i64).expect("epoch seconds fit"),
            TimeValue::numeric(1.6e9)
        );
        assert!(TimeValue::try_from(MAX_EXACT_INTEGER).is_ok());
        assert!(TimeValue::try_from(1_700_000_000_000_000_001_i64).is_err());
        assert!(TimeValue::try_from(i64::MIN).is_err());
    }

    #[test]
    fn empty_cells_stay_as_labels() {
        let time = TimeValue::from_cell("  ");
        assert_eq!(time, TimeValue::label(""));
        assert!(time.is_finite());
    }
}
