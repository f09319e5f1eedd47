use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The relative time range a user can pick for the adoption chart.
///
/// Each variant maps to a fixed number of calendar months. The labels match
/// the ones shown in the range dropdown ("1 month", "3 months", "6 months").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RangeSelector {
    #[default]
    ShortRange,
    MediumRange,
    LongRange,
}

impl RangeSelector {
    /// Every selectable range, shortest first.
    pub const ALL: [RangeSelector; 3] = [
        RangeSelector::ShortRange,
        RangeSelector::MediumRange,
        RangeSelector::LongRange,
    ];

    /// The window length in calendar months.
    pub fn months(&self) -> u32 {
        match self {
            RangeSelector::ShortRange => 1,
            RangeSelector::MediumRange => 3,
            RangeSelector::LongRange => 6,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RangeSelector::ShortRange => "1 month",
            RangeSelector::MediumRange => "3 months",
            RangeSelector::LongRange => "6 months",
        }
    }
}

impl fmt::Display for RangeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RangeSelector {
    type Err = CoreError;

    /// Accepts the dropdown labels as well as the short forms `1m`, `3m`, `6m`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "1 month" | "1m" | "short" => Ok(RangeSelector::ShortRange),
            "3 months" | "3m" | "medium" => Ok(RangeSelector::MediumRange),
            "6 months" | "6m" | "long" => Ok(RangeSelector::LongRange),
            _ => Err(CoreError::InvalidInput(
                "range".to_string(),
                format!("'{}' is not one of 1 month, 3 months, 6 months", s),
            )),
        }
    }
}

impl TryFrom<String> for RangeSelector {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RangeSelector> for String {
    fn from(value: RangeSelector) -> Self {
        value.label().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_months_per_selector() {
        assert_eq!(RangeSelector::ShortRange.months(), 1);
        assert_eq!(RangeSelector::MediumRange.months(), 3);
        assert_eq!(RangeSelector::LongRange.months(), 6);
    }

    #[test]
    fn test_parse_labels_and_short_forms() {
        for selector in RangeSelector::ALL {
            assert_eq!(selector.label().parse::<RangeSelector>(), Ok(selector));
        }
        assert_eq!("3M".parse::<RangeSelector>(), Ok(RangeSelector::MediumRange));
        assert_eq!(" 6 Months ".parse::<RangeSelector>(), Ok(RangeSelector::LongRange));
    }

    #[test]
    fn test_parse_rejects_unknown_range() {
        let err = "2 weeks".parse::<RangeSelector>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(field, _) if field == "range"));
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&RangeSelector::MediumRange).unwrap();
        assert_eq!(json, "\"3 months\"");
        let back: RangeSelector = serde_json::from_str("\"1 month\"").unwrap();
        assert_eq!(back, RangeSelector::ShortRange);
        assert!(serde_json::from_str::<RangeSelector>("\"1 year\"").is_err());
    }

    #[test]
    fn test_default_is_short_range() {
        assert_eq!(RangeSelector::default(), RangeSelector::ShortRange);
    }
}
