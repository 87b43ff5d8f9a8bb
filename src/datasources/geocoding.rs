use crate::config::OpenWeatherMapConfig;
use crate::error::{HealthAdviceError, Result};
use crate::models::Coordinate;
use serde::Deserialize;

/// Resolves free text or a literal "lat,lon" pair to coordinates.
#[derive(Clone)]
pub struct GeocodingClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

// OpenWeatherMap direct geocoding response item
#[derive(Debug, Deserialize)]
struct OwmGeocodeResult {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

impl GeocodingClient {
    pub fn new(client: reqwest::Client, config: OpenWeatherMapConfig) -> Self {
        Self { client, config }
    }

    /// Literal pairs are parsed locally; anything else costs exactly one lookup (limit 1).
    /// Blank input is `NotFound` without touching the network.
    pub async fn resolve(&self, location_text: &str) -> Result<Coordinate> {
        let text = location_text.trim();
        if text.is_empty() {
            return Err(HealthAdviceError::NotFound("No location given".into()));
        }

        if let Some(coordinate) = Coordinate::parse_pair(text) {
            tracing::debug!("Parsed literal coordinates {}", coordinate);
            return Ok(coordinate);
        }

        let api_key = self.config.require_key()?;
        let url = reqwest::Url::parse_with_params(
            &format!("{}/geo/1.0/direct", self.config.base_url.trim_end_matches('/')),
            &[("q", text), ("limit", "1"), ("appid", api_key)],
        )
        .map_err(|e| HealthAdviceError::Config(format!("Invalid OpenWeatherMap URL: {}", e)))?;

        let response = self.client.get(url).send().await.map_err(|e| {
            HealthAdviceError::DataSourceUnavailable(format!("Geocoding: {}", e))
        })?;

        if !response.status().is_success() {
            return Err(HealthAdviceError::DataSourceUnavailable(format!(
                "Geocoding returned {}",
                response.status()
            )));
        }

        let results: Vec<OwmGeocodeResult> = response.json().await.map_err(|e| {
            HealthAdviceError::DataSourceUnavailable(format!(
                "Failed to parse geocoding response: {}",
                e
            ))
        })?;

        let first = results
            .into_iter()
            .next()
            .and_then(|r| Some((r.name, Coordinate::new(r.lat?, r.lon?))));

        match first {
            Some((name, coordinate)) => {
                tracing::debug!(
                    "Geocoded '{}' to {} ({})",
                    text,
                    coordinate,
                    name.as_deref().unwrap_or("unnamed")
                );
                Ok(coordinate)
            }
            None => Err(HealthAdviceError::NotFound(format!(
                "No coordinates for '{}'",
                text
            ))),
        }
    }
}
