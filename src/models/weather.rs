use super::condition::WeatherCondition;
use super::location::Coordinate;
use serde::{Deserialize, Serialize};

/// The two inputs the weather classifier looks at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temperature_celsius: f64,
    pub has_precipitation: bool,
}

/// Current conditions from the weather endpoint (metric units).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub place_name: String,
    pub temperature_celsius: f64,
    pub description: String,
    pub humidity_percent: f64,
    pub wind_speed_ms: f64,
    pub has_precipitation: bool,
}

impl CurrentWeather {
    pub fn reading(&self) -> WeatherReading {
        WeatherReading {
            temperature_celsius: self.temperature_celsius,
            has_precipitation: self.has_precipitation,
        }
    }

    /// Description with its first letter upper-cased ("light rain" -> "Light rain").
    pub fn display_description(&self) -> String {
        let mut chars = self.description.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// Result of a weather lookup for a user-entered location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherLookup {
    pub query: String,
    pub coordinate: Coordinate,
    pub weather: CurrentWeather,
    pub condition: WeatherCondition,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CurrentWeather {
        CurrentWeather {
            place_name: "London".into(),
            temperature_celsius: 12.3,
            description: "light rain".into(),
            humidity_percent: 81.0,
            wind_speed_ms: 4.1,
            has_precipitation: true,
        }
    }

    #[test]
    fn reading_carries_classifier_inputs() {
        let reading = sample().reading();
        assert_eq!(reading.temperature_celsius, 12.3);
        assert!(reading.has_precipitation);
    }

    #[test]
    fn description_is_capitalised() {
        assert_eq!(sample().display_description(), "Light rain");

        let mut empty = sample();
        empty.description.clear();
        assert_eq!(empty.display_description(), "");
    }
}
