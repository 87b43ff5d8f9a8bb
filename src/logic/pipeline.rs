use super::classifier::{classify_air_quality, classify_weather};
use super::failure::{FailureReason, PipelineError, PipelineStage};
use crate::datasources::{GeocodingClient, OpenWeatherMapClient};
use crate::models::AdviceResult;
use crate::store::SupabaseClient;

/// Location text in, advice list out. Strictly linear: any failed stage ends the request
/// and nothing fetched so far is returned.
#[derive(Clone)]
pub struct AdvicePipeline {
    geocoder: GeocodingClient,
    weather: OpenWeatherMapClient,
    store: SupabaseClient,
}

fn enter(stage: PipelineStage) -> PipelineStage {
    tracing::debug!("advice pipeline -> {}", stage);
    stage
}

impl AdvicePipeline {
    pub fn new(
        geocoder: GeocodingClient,
        weather: OpenWeatherMapClient,
        store: SupabaseClient,
    ) -> Self {
        Self {
            geocoder,
            weather,
            store,
        }
    }

    pub async fn get_advice(&self, location_text: &str) -> Result<AdviceResult, PipelineError> {
        enter(PipelineStage::Start);
        self.weather
            .ensure_configured()
            .map_err(PipelineError::configuration)?;

        let stage = enter(PipelineStage::ResolveCoords);
        let coordinate = self
            .geocoder
            .resolve(location_text)
            .await
            .map_err(|e| PipelineError::new(stage, FailureReason::CoordinatesNotFound, e))?;

        let stage = enter(PipelineStage::FetchWeather);
        let weather = self
            .weather
            .fetch_weather(&coordinate)
            .await
            .map_err(|e| PipelineError::new(stage, FailureReason::ConditionsUnavailable, e))?;

        let stage = enter(PipelineStage::FetchAirQuality);
        let air = self
            .weather
            .fetch_air_quality(&coordinate)
            .await
            .map_err(|e| PipelineError::new(stage, FailureReason::ConditionsUnavailable, e))?;

        enter(PipelineStage::Classify);
        let weather_condition = classify_weather(&weather.reading());
        let air_condition = classify_air_quality(air.aqi);
        tracing::debug!(
            "{:.1}°C rain={} aqi={} -> {} / {}",
            weather.temperature_celsius,
            weather.has_precipitation,
            air.aqi,
            weather_condition,
            air_condition
        );

        let stage = enter(PipelineStage::QueryAdvice);
        let records = self
            .store
            .find_advice(weather_condition, air_condition)
            .await
            .map_err(|e| PipelineError::new(stage, FailureReason::StoreQueryFailed, e))?;

        enter(PipelineStage::Done);
        Ok(AdviceResult::new(
            location_text.trim(),
            weather_condition,
            air_condition,
            records,
        ))
    }
}
