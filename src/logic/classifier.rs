use crate::models::{AirQualityCondition, WeatherCondition, WeatherReading};

/// Above this it is hot
pub const HOT_ABOVE_CELSIUS: f64 = 25.0;
/// Below this it is cold
pub const COLD_BELOW_CELSIUS: f64 = 10.0;

/// Label the current weather. Each check overwrites the previous label, so rain masks any
/// temperature extreme.
pub fn classify_weather(reading: &WeatherReading) -> WeatherCondition {
    let mut condition = WeatherCondition::Moderate;

    if reading.temperature_celsius > HOT_ABOVE_CELSIUS {
        condition = WeatherCondition::Hot;
    }
    if reading.temperature_celsius < COLD_BELOW_CELSIUS {
        condition = WeatherCondition::Cold;
    }
    if reading.has_precipitation {
        condition = WeatherCondition::Rainy;
    }

    condition
}

pub fn classify_air_quality(aqi: i64) -> AirQualityCondition {
    AirQualityCondition::from_aqi(aqi)
}
