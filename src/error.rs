use thiserror::Error;

#[derive(Error, Debug)]
pub enum HealthAdviceError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),

    #[error("Store query failed: {0}")]
    StoreQuery(String),

    #[error("{0}")]
    Auth(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl HealthAdviceError {
    /// Required credential missing or still a placeholder.
    pub fn is_configuration(&self) -> bool {
        matches!(self, HealthAdviceError::Config(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, HealthAdviceError::NotFound(_))
    }

    /// Network failure, timeout, non-success provider status or an unreadable body.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            HealthAdviceError::Http(_)
                | HealthAdviceError::DataSourceUnavailable(_)
                | HealthAdviceError::Json(_)
        )
    }

    /// The store answered with an error payload rather than a row list.
    pub fn is_store_query(&self) -> bool {
        matches!(self, HealthAdviceError::StoreQuery(_))
    }
}

pub type Result<T> = std::result::Result<T, HealthAdviceError>;
