use crate::config::HttpConfig;
use crate::error::Result;

const USER_AGENT: &str = concat!("healthadvice/", env!("CARGO_PKG_VERSION"));

/// Shared client for every outbound call. There is no retry logic anywhere, so both
/// timeouts must be bounded.
pub fn build_http_client(config: &HttpConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .connect_timeout(config.connect_timeout())
        .timeout(config.timeout())
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}
