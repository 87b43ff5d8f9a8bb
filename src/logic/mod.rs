pub mod account;
pub mod classifier;
pub mod failure;
pub mod lookup;
pub mod pipeline;
pub mod status;
pub mod tracker;

pub use account::AccountService;
pub use failure::{user_message, FailureReason, PipelineError, PipelineStage};
pub use lookup::LookupService;
pub use pipeline::AdvicePipeline;
pub use status::{check_connections, ConnectionStatus, SourceStatus};
pub use tracker::HealthTracker;

use crate::config::Config;
use crate::datasources::{build_http_client, GeocodingClient, OpenWeatherMapClient};
use crate::error::Result;
use crate::store::SupabaseClient;

/// Every flow the CLI and TUI drive, wired from one configuration and one HTTP client.
#[derive(Clone)]
pub struct Services {
    pub advice: AdvicePipeline,
    pub lookup: LookupService,
    pub accounts: AccountService,
    pub tracker: HealthTracker,
    weather: OpenWeatherMapClient,
    store: SupabaseClient,
}

impl Services {
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = build_http_client(&config.http)?;

        let geocoder = GeocodingClient::new(http.clone(), config.openweathermap.clone());
        let weather = OpenWeatherMapClient::new(http.clone(), config.openweathermap.clone());
        let store = SupabaseClient::new(http, config.supabase.clone());

        if weather.is_configured() {
            tracing::info!("OpenWeatherMap client configured");
        } else {
            tracing::info!("OpenWeatherMap API key not configured - lookups will be refused");
        }
        if store.is_configured() {
            tracing::info!("Supabase client configured");
        } else {
            tracing::info!("Supabase not configured - advice and tracker will be unavailable");
        }

        Ok(Self {
            advice: AdvicePipeline::new(geocoder.clone(), weather.clone(), store.clone()),
            lookup: LookupService::new(geocoder, weather.clone()),
            accounts: AccountService::new(store.clone()),
            tracker: HealthTracker::new(store.clone()),
            weather,
            store,
        })
    }

    pub async fn check_connections(&self) -> ConnectionStatus {
        check_connections(&self.weather, &self.store).await
    }
}
