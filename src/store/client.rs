use crate::config::SupabaseConfig;
use crate::error::{HealthAdviceError, Result};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// REST and auth client for the hosted Postgres backend.
#[derive(Clone)]
pub struct SupabaseClient {
    client: reqwest::Client,
    config: SupabaseConfig,
}

/// PostgREST answers with either a row array or an error object. Keeping both as variants
/// means an empty array can never be mistaken for a failed query.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum StoreResponse<T> {
    Rows(Vec<T>),
    Error(StoreErrorBody),
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StoreErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl StoreErrorBody {
    pub fn description(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.msg.as_deref())
            .or(self.error_description.as_deref())
            .or(self.error.as_deref())
    }
}

impl<T> StoreResponse<T> {
    fn into_rows(self, status: StatusCode) -> Result<Vec<T>> {
        match self {
            StoreResponse::Rows(rows) if status.is_success() => Ok(rows),
            StoreResponse::Rows(_) => Err(HealthAdviceError::StoreQuery(format!(
                "store returned {}",
                status
            ))),
            StoreResponse::Error(body) => {
                let mut message = body
                    .description()
                    .unwrap_or("unknown store error")
                    .to_string();
                if let Some(hint) = body.hint.as_deref() {
                    message = format!("{} ({})", message, hint);
                }
                Err(HealthAdviceError::StoreQuery(format!(
                    "{}: {}",
                    status, message
                )))
            }
        }
    }
}

// parse_with_params leaves a dangling '?' when there is nothing to encode
fn endpoint_url(base: &str, params: &[(&str, &str)]) -> Result<reqwest::Url> {
    let parsed = if params.is_empty() {
        reqwest::Url::parse(base)
    } else {
        reqwest::Url::parse_with_params(base, params)
    };
    parsed.map_err(|e| HealthAdviceError::Config(format!("Invalid Supabase URL: {}", e)))
}

impl SupabaseClient {
    pub fn new(client: reqwest::Client, config: SupabaseConfig) -> Self {
        Self { client, config }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Attach the headers every store call carries. REST calls run as the signed-in user
    /// when a token is supplied and as the anonymous role otherwise.
    fn authorize(&self, builder: RequestBuilder, bearer: Option<&str>) -> Result<RequestBuilder> {
        let (_, key) = self.config.credentials()?;
        Ok(builder
            .header("apikey", key)
            .header("Authorization", format!("Bearer {}", bearer.unwrap_or(key)))
            .header("Content-Type", "application/json")
            .header("Prefer", "return=representation"))
    }

    fn rest_url(&self, table: &str, params: &[(&str, &str)]) -> Result<reqwest::Url> {
        let (url, _) = self.config.credentials()?;
        endpoint_url(&format!("{}/rest/v1/{}", url, table), params)
    }

    pub(crate) fn auth_url(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<reqwest::Url> {
        let (url, _) = self.config.credentials()?;
        endpoint_url(&format!("{}/auth/v1/{}", url, endpoint), params)
    }

    /// GET rows from a table.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, &str)],
        bearer: Option<&str>,
    ) -> Result<Vec<T>> {
        let url = self.rest_url(table, params)?;
        let request = self.authorize(self.client.get(url), bearer)?;
        self.send_for_rows(table, request).await
    }

    /// POST one row and return the stored representation.
    pub async fn insert<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        table: &str,
        row: &B,
        bearer: Option<&str>,
    ) -> Result<Vec<T>> {
        let url = self.rest_url(table, &[])?;
        let request = self.authorize(self.client.post(url), bearer)?.json(row);
        self.send_for_rows(table, request).await
    }

    async fn send_for_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        request: RequestBuilder,
    ) -> Result<Vec<T>> {
        let response = request
            .send()
            .await
            .map_err(|e| HealthAdviceError::DataSourceUnavailable(format!("Supabase: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| HealthAdviceError::DataSourceUnavailable(format!("Supabase: {}", e)))?;

        match serde_json::from_str::<StoreResponse<T>>(&body) {
            Ok(parsed) => parsed.into_rows(status),
            Err(e) if status.is_success() => Err(HealthAdviceError::DataSourceUnavailable(
                format!("Failed to parse '{}' rows: {}", table, e),
            )),
            Err(_) => Err(HealthAdviceError::StoreQuery(format!(
                "store returned {} for '{}'",
                status, table
            ))),
        }
    }

    /// POST a JSON body to an auth endpoint. Returns the status and whatever JSON came back,
    /// leaving the success decision to the caller.
    pub(crate) async fn post_auth(
        &self,
        url: reqwest::Url,
        body: &serde_json::Value,
    ) -> Result<(StatusCode, serde_json::Value)> {
        let (_, key) = self.config.credentials()?;
        let response = self
            .client
            .post(url)
            .header("apikey", key)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                HealthAdviceError::DataSourceUnavailable(format!("Supabase auth: {}", e))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| {
                HealthAdviceError::DataSourceUnavailable(format!("Supabase auth: {}", e))
            })?;

        Ok((status, serde_json::from_str(&body).unwrap_or_default()))
    }

    /// Test connection to the REST root using the anon key
    pub async fn test_connection(&self) -> Result<bool> {
        let url = self.rest_url("", &[])?;
        let request = self.authorize(self.client.get(url), None)?;

        let response = request
            .send()
            .await
            .map_err(|e| HealthAdviceError::DataSourceUnavailable(format!("Supabase: {}", e)))?;

        Ok(response.status().is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Row {
        advice: String,
    }

    #[test]
    fn empty_array_is_rows_not_error() {
        let parsed: StoreResponse<Row> = serde_json::from_str("[]").unwrap();
        let rows = parsed.into_rows(StatusCode::OK).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn error_object_is_store_query_error() {
        let parsed: StoreResponse<Row> = serde_json::from_str(
            r#"{"code":"42P01","message":"relation \"public.health_advice\" does not exist","hint":null}"#,
        )
        .unwrap();
        let err = parsed.into_rows(StatusCode::NOT_FOUND).unwrap_err();
        assert!(err.is_store_query());
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn rows_are_decoded_in_order() {
        let parsed: StoreResponse<Row> =
            serde_json::from_str(r#"[{"advice":"first"},{"advice":"second"}]"#).unwrap();
        let rows = parsed.into_rows(StatusCode::OK).unwrap();
        let texts: Vec<_> = rows.iter().map(|r| r.advice.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn error_description_falls_back_through_fields() {
        let body = StoreErrorBody {
            error_description: Some("Invalid login credentials".into()),
            ..Default::default()
        };
        assert_eq!(body.description(), Some("Invalid login credentials"));
        assert_eq!(StoreErrorBody::default().description(), None);
    }
}
