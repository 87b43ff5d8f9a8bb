use crate::datasources::OpenWeatherMapClient;
use crate::error::Result;
use crate::store::SupabaseClient;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceStatus {
    #[default]
    NotConfigured,
    Connected,
    Unreachable,
}

impl SourceStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, SourceStatus::Connected)
    }
}

impl fmt::Display for SourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SourceStatus::NotConfigured => "not configured",
            SourceStatus::Connected => "connected",
            SourceStatus::Unreachable => "unreachable",
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConnectionStatus {
    pub openweathermap: SourceStatus,
    pub store: SourceStatus,
}

impl ConnectionStatus {
    pub fn all_connected(&self) -> bool {
        self.openweathermap.is_connected() && self.store.is_connected()
    }

    pub fn any_connected(&self) -> bool {
        self.openweathermap.is_connected() || self.store.is_connected()
    }
}

pub async fn check_connections(
    weather: &OpenWeatherMapClient,
    store: &SupabaseClient,
) -> ConnectionStatus {
    let mut status = ConnectionStatus::default();

    if weather.is_configured() {
        status.openweathermap = source_status("OpenWeatherMap", weather.test_connection().await);
    }

    if store.is_configured() {
        status.store = source_status("Supabase", store.test_connection().await);
    }

    status
}

fn source_status(source: &str, result: Result<bool>) -> SourceStatus {
    match result {
        Ok(true) => SourceStatus::Connected,
        Ok(false) => SourceStatus::Unreachable,
        Err(e) if e.is_configuration() => {
            tracing::info!("{} check skipped: {}", source, e);
            SourceStatus::NotConfigured
        }
        Err(e) => {
            tracing::warn!("{} check failed: {}", source, e);
            SourceStatus::Unreachable
        }
    }
}
