use crate::error::HealthAdviceError;
use std::fmt;

/// Where a lookup flow was when it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Start,
    ResolveCoords,
    FetchWeather,
    FetchAirQuality,
    Classify,
    QueryAdvice,
    Done,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Start => "start",
            PipelineStage::ResolveCoords => "resolve_coords",
            PipelineStage::FetchWeather => "fetch_weather",
            PipelineStage::FetchAirQuality => "fetch_air_quality",
            PipelineStage::Classify => "classify",
            PipelineStage::QueryAdvice => "query_advice",
            PipelineStage::Done => "done",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The only text a user ever sees when a lookup fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    ApiKeyNotConfigured,
    CoordinatesNotFound,
    ConditionsUnavailable,
    WeatherUnavailable,
    AirQualityUnavailable,
    StoreQueryFailed,
}

impl FailureReason {
    pub fn message(&self) -> &'static str {
        match self {
            FailureReason::ApiKeyNotConfigured => "api key not configured",
            FailureReason::CoordinatesNotFound => "could not find coordinates",
            FailureReason::ConditionsUnavailable => {
                "could not retrieve weather or air quality data"
            }
            FailureReason::WeatherUnavailable => "could not retrieve weather data",
            FailureReason::AirQualityUnavailable => "could not retrieve air quality data",
            FailureReason::StoreQueryFailed => "store query failed",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Terminal failure of a lookup flow. `Display` is the fixed reason; `cause` is for logs.
#[derive(Debug)]
pub struct PipelineError {
    pub stage: PipelineStage,
    pub reason: FailureReason,
    pub cause: HealthAdviceError,
}

impl PipelineError {
    pub fn new(stage: PipelineStage, reason: FailureReason, cause: HealthAdviceError) -> Self {
        if cause.is_not_found() {
            tracing::info!("{} at {}: {}", reason, stage, cause);
        } else {
            tracing::warn!("{} failed at {}: {}", reason, stage, cause);
        }
        Self {
            stage,
            reason,
            cause,
        }
    }

    /// Missing key before the request got anywhere.
    pub fn configuration(cause: HealthAdviceError) -> Self {
        Self::new(PipelineStage::Start, FailureReason::ApiKeyNotConfigured, cause)
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason.message())
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

/// User-facing text for account and tracker failures. Messages written for the user pass
/// through; store and transport detail is logged and replaced by `fallback`.
pub fn user_message(err: &HealthAdviceError, fallback: &str) -> String {
    match err {
        HealthAdviceError::Auth(message)
        | HealthAdviceError::InvalidData(message)
        | HealthAdviceError::Config(message) => message.clone(),
        other => {
            let kind = if other.is_store_query() {
                "store rejected the request"
            } else if other.is_transport() {
                "service unreachable"
            } else {
                "unexpected error"
            };
            tracing::warn!("{}: {}: {}", fallback, kind, other);
            fallback.to_string()
        }
    }
}
