use super::classifier::{classify_air_quality, classify_weather};
use super::failure::{FailureReason, PipelineError, PipelineStage};
use crate::datasources::{GeocodingClient, OpenWeatherMapClient};
use crate::models::{AirQualityLookup, WeatherLookup};

/// Single-source lookups behind the Weather and Air Quality screens.
#[derive(Clone)]
pub struct LookupService {
    geocoder: GeocodingClient,
    weather: OpenWeatherMapClient,
}

impl LookupService {
    pub fn new(geocoder: GeocodingClient, weather: OpenWeatherMapClient) -> Self {
        Self { geocoder, weather }
    }

    async fn locate(
        &self,
        location_text: &str,
    ) -> Result<crate::models::Coordinate, PipelineError> {
        self.weather
            .ensure_configured()
            .map_err(PipelineError::configuration)?;

        self.geocoder.resolve(location_text).await.map_err(|e| {
            PipelineError::new(
                PipelineStage::ResolveCoords,
                FailureReason::CoordinatesNotFound,
                e,
            )
        })
    }

    pub async fn current_weather(
        &self,
        location_text: &str,
    ) -> Result<WeatherLookup, PipelineError> {
        let coordinate = self.locate(location_text).await?;

        let weather = self.weather.fetch_weather(&coordinate).await.map_err(|e| {
            PipelineError::new(
                PipelineStage::FetchWeather,
                FailureReason::WeatherUnavailable,
                e,
            )
        })?;

        let condition = classify_weather(&weather.reading());
        tracing::debug!("Weather for {} is {}", coordinate, condition);

        Ok(WeatherLookup {
            query: location_text.trim().to_string(),
            coordinate,
            weather,
            condition,
        })
    }

    pub async fn current_air_quality(
        &self,
        location_text: &str,
    ) -> Result<AirQualityLookup, PipelineError> {
        let coordinate = self.locate(location_text).await?;

        let report = self
            .weather
            .fetch_air_quality(&coordinate)
            .await
            .map_err(|e| {
                PipelineError::new(
                    PipelineStage::FetchAirQuality,
                    FailureReason::AirQualityUnavailable,
                    e,
                )
            })?;

        let condition = classify_air_quality(report.aqi);
        tracing::debug!("Air quality for {} is {} ({})", coordinate, report.aqi, condition);

        Ok(AirQualityLookup {
            query: location_text.trim().to_string(),
            coordinate,
            report,
            condition,
        })
    }
}
