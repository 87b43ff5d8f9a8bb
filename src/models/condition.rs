use serde::{Deserialize, Serialize};

/// Categorical weather label used as an advice lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    Hot,
    Cold,
    Rainy,
    #[default]
    Moderate,
}

impl WeatherCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Hot => "hot",
            WeatherCondition::Cold => "cold",
            WeatherCondition::Rainy => "rainy",
            WeatherCondition::Moderate => "moderate",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            WeatherCondition::Hot => "☀",
            WeatherCondition::Cold => "❄",
            WeatherCondition::Rainy => "🌧",
            WeatherCondition::Moderate => "⛅",
        }
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Air quality label for the provider's 1 (best) to 5 (worst) index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AirQualityCondition {
    Good,
    Fair,
    Moderate,
    Poor,
    #[serde(rename = "Very Poor")]
    VeryPoor,
    #[default]
    Unknown,
}

impl AirQualityCondition {
    pub fn from_aqi(aqi: i64) -> Self {
        match aqi {
            1 => AirQualityCondition::Good,
            2 => AirQualityCondition::Fair,
            3 => AirQualityCondition::Moderate,
            4 => AirQualityCondition::Poor,
            5 => AirQualityCondition::VeryPoor,
            _ => AirQualityCondition::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AirQualityCondition::Good => "Good",
            AirQualityCondition::Fair => "Fair",
            AirQualityCondition::Moderate => "Moderate",
            AirQualityCondition::Poor => "Poor",
            AirQualityCondition::VeryPoor => "Very Poor",
            AirQualityCondition::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for AirQualityCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which kind of condition an advice row is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionType {
    Weather,
    AirQuality,
}

impl ConditionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionType::Weather => "weather",
            ConditionType::AirQuality => "air_quality",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_store_values() {
        assert_eq!(WeatherCondition::Hot.as_str(), "hot");
        assert_eq!(AirQualityCondition::VeryPoor.as_str(), "Very Poor");
        assert_eq!(ConditionType::AirQuality.as_str(), "air_quality");
    }

    #[test]
    fn serde_uses_store_spelling() {
        assert_eq!(
            serde_json::to_string(&AirQualityCondition::VeryPoor).unwrap(),
            "\"Very Poor\""
        );
        assert_eq!(
            serde_json::from_str::<ConditionType>("\"air_quality\"").unwrap(),
            ConditionType::AirQuality
        );
        assert_eq!(
            serde_json::from_str::<WeatherCondition>("\"rainy\"").unwrap(),
            WeatherCondition::Rainy
        );
    }
}
