use super::condition::AirQualityCondition;
use super::location::Coordinate;
use serde::{Deserialize, Serialize};

/// Pollutant concentrations in µg/m³.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PollutantComponents {
    #[serde(default)]
    pub co: f64,
    #[serde(default)]
    pub no: f64,
    #[serde(default)]
    pub no2: f64,
    #[serde(default)]
    pub o3: f64,
    #[serde(default)]
    pub so2: f64,
    #[serde(default)]
    pub pm2_5: f64,
    #[serde(default)]
    pub pm10: f64,
    #[serde(default)]
    pub nh3: f64,
}

impl PollutantComponents {
    pub fn labelled(&self) -> [(&'static str, f64); 8] {
        [
            ("CO", self.co),
            ("NO", self.no),
            ("NO2", self.no2),
            ("O3", self.o3),
            ("SO2", self.so2),
            ("PM2.5", self.pm2_5),
            ("PM10", self.pm10),
            ("NH3", self.nh3),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirQualityReport {
    pub aqi: i64,
    pub components: PollutantComponents,
}

/// Result of an air quality lookup for a user-entered location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirQualityLookup {
    pub query: String,
    pub coordinate: Coordinate,
    pub report: AirQualityReport,
    pub condition: AirQualityCondition,
}
