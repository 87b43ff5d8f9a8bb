use super::condition::{AirQualityCondition, WeatherCondition};
use serde::{Deserialize, Serialize};

/// Shown when no stored advice matches the current conditions.
pub const NO_ADVICE_MESSAGE: &str = "No specific advice for the current conditions.";

/// One row of stored guidance. Only the text is read; the store does the matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceRecord {
    pub advice: String,
}

/// Advice for one location, exactly the rows the store returned and in its order.
/// An empty list is a valid "no advice for these conditions" outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdviceResult {
    pub location: String,
    pub weather: WeatherCondition,
    pub air_quality: AirQualityCondition,
    pub advice: Vec<String>,
}

impl AdviceResult {
    pub fn new(
        location: impl Into<String>,
        weather: WeatherCondition,
        air_quality: AirQualityCondition,
        records: Vec<AdviceRecord>,
    ) -> Self {
        Self {
            location: location.into(),
            weather,
            air_quality,
            advice: records.into_iter().map(|r| r.advice).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.advice.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(advice: &str) -> AdviceRecord {
        AdviceRecord {
            advice: advice.into(),
        }
    }

    #[test]
    fn result_preserves_store_order() {
        let result = AdviceResult::new(
            "London",
            WeatherCondition::Hot,
            AirQualityCondition::Fair,
            vec![record("second in table"), record("first in table")],
        );
        assert_eq!(result.advice, vec!["second in table", "first in table"]);
        assert!(!result.is_empty());
    }

    #[test]
    fn result_keeps_every_store_row() {
        let result = AdviceResult::new(
            "Oslo",
            WeatherCondition::Cold,
            AirQualityCondition::Good,
            vec![record("Stay hydrated."), record("Wrap up warm.")],
        );
        assert_eq!(result.advice, vec!["Stay hydrated.", "Wrap up warm."]);
    }

    #[test]
    fn deserializes_store_row_ignoring_extra_columns() {
        let row: AdviceRecord = serde_json::from_str(
            r#"{"condition_type":"pollen","condition_value":"High","advice":"Stay indoors."}"#,
        )
        .unwrap();
        assert_eq!(row.advice, "Stay indoors.");
    }
}
