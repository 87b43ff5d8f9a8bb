use super::SupabaseClient;
use crate::error::{HealthAdviceError, Result};
use crate::models::{
    AdviceRecord, AirQualityCondition, ConditionType, HealthLog, NewHealthLog, WeatherCondition,
};

const ADVICE_TABLE: &str = "health_advice";
const HEALTH_LOG_TABLE: &str = "health_logs";

/// PostgREST `or` filter matching either condition.
pub fn advice_filter(weather: WeatherCondition, air: AirQualityCondition) -> String {
    format!(
        "(and(condition_type.eq.{},condition_value.eq.{}),and(condition_type.eq.{},condition_value.eq.{}))",
        ConditionType::Weather.as_str(),
        weather.as_str(),
        ConditionType::AirQuality.as_str(),
        air.as_str()
    )
}

// Advice Queries

impl SupabaseClient {
    /// Rows for either condition, in store order. Zero rows is `Ok(vec![])`.
    pub async fn find_advice(
        &self,
        weather: WeatherCondition,
        air: AirQualityCondition,
    ) -> Result<Vec<AdviceRecord>> {
        let filter = advice_filter(weather, air);
        let records: Vec<AdviceRecord> = self
            .select(
                ADVICE_TABLE,
                &[
                    ("select", "advice"),
                    ("or", filter.as_str()),
                ],
                None,
            )
            .await?;

        tracing::debug!(
            "Store returned {} advice rows for weather={} air_quality={}",
            records.len(),
            weather.as_str(),
            air.as_str()
        );
        Ok(records)
    }
}

// Health Log Queries

impl SupabaseClient {
    /// Newest first. Row-level security limits rows to the token's owner.
    pub async fn list_health_logs(&self, access_token: &str) -> Result<Vec<HealthLog>> {
        self.select(
            HEALTH_LOG_TABLE,
            &[("select", "*"), ("order", "log_date.desc")],
            Some(access_token),
        )
        .await
    }

    pub async fn add_health_log(
        &self,
        access_token: &str,
        entry: &NewHealthLog,
    ) -> Result<HealthLog> {
        let rows: Vec<HealthLog> = self
            .insert(HEALTH_LOG_TABLE, entry, Some(access_token))
            .await?;

        rows.into_iter().next().ok_or_else(|| {
            HealthAdviceError::StoreQuery("Insert returned no stored row".into())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HttpConfig, SupabaseConfig};
    use crate::datasources::build_http_client;
    use chrono::NaiveDate;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store_for(url: &str) -> SupabaseClient {
        SupabaseClient::new(
            build_http_client(&HttpConfig::default()).unwrap(),
            SupabaseConfig {
                url: Some(url.to_string()),
                key: Some("anon-key".into()),
            },
        )
    }

    #[test]
    fn filter_matches_either_condition() {
        assert_eq!(
            advice_filter(WeatherCondition::Hot, AirQualityCondition::Fair),
            "(and(condition_type.eq.weather,condition_value.eq.hot),and(condition_type.eq.air_quality,condition_value.eq.Fair))"
        );
        assert!(advice_filter(WeatherCondition::Rainy, AirQualityCondition::VeryPoor)
            .ends_with("condition_value.eq.Very Poor))"));
    }

    #[tokio::test]
    async fn find_advice_sends_filter_and_anon_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/health_advice"))
            .and(query_param("select", "advice"))
            .and(query_param(
                "or",
                advice_filter(WeatherCondition::Hot, AirQualityCondition::Fair),
            ))
            .and(header("apikey", "anon-key"))
            .and(header("Authorization", "Bearer anon-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"advice": "Drink water."},
                {"advice": "Limit exertion."}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let records = store_for(&server.uri())
            .find_advice(WeatherCondition::Hot, AirQualityCondition::Fair)
            .await
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].advice, "Drink water.");
        assert_eq!(records[1].advice, "Limit exertion.");
    }

    #[tokio::test]
    async fn empty_rows_and_error_payload_are_distinct() {
        let server = MockServer::start().await;
        Mock::given(path("/rest/v1/health_advice"))
            .and(query_param(
                "or",
                advice_filter(WeatherCondition::Cold, AirQualityCondition::Good),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(path("/rest/v1/health_advice"))
            .and(query_param("or", advice_filter(WeatherCondition::Hot, AirQualityCondition::Poor)))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "code": "PGRST100",
                "message": "failed to parse logic tree"
            })))
            .mount(&server)
            .await;

        let store = store_for(&server.uri());
        let empty = store
            .find_advice(WeatherCondition::Cold, AirQualityCondition::Good)
            .await
            .unwrap();
        assert!(empty.is_empty());

        let err = store
            .find_advice(WeatherCondition::Hot, AirQualityCondition::Poor)
            .await
            .unwrap_err();
        assert!(err.is_store_query());
    }

    #[tokio::test]
    async fn health_logs_use_user_token_and_date_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/health_logs"))
            .and(query_param("select", "*"))
            .and(query_param("order", "log_date.desc"))
            .and(header("Authorization", "Bearer user-jwt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 2, "user_id": "u1", "log_date": "2025-06-02", "symptom": "Cough", "severity": 2, "notes": ""},
                {"id": 1, "user_id": "u1", "log_date": "2025-06-01", "symptom": "Asthma", "severity": 4, "notes": null}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let logs = store_for(&server.uri())
            .list_health_logs("user-jwt")
            .await
            .unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].id, "2");
        assert_eq!(logs[1].symptom, "Asthma");
    }

    #[tokio::test]
    async fn add_health_log_returns_stored_row() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/health_logs"))
            .and(header("Prefer", "return=representation"))
            .and(body_partial_json(
                json!({"symptom": "Asthma", "severity": 3, "log_date": "2025-06-01"}),
            ))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!([
                {"id": 7, "user_id": "u1", "log_date": "2025-06-01", "symptom": "Asthma", "severity": 3, "notes": ""}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let entry = NewHealthLog::new(
            "u1",
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            "Asthma",
            3,
            None,
        )
        .unwrap();
        let stored = store_for(&server.uri())
            .add_health_log("user-jwt", &entry)
            .await
            .unwrap();
        assert_eq!(stored.id, "7");
    }

    #[tokio::test]
    async fn unconfigured_store_is_configuration_error() {
        let store = SupabaseClient::new(
            build_http_client(&HttpConfig::default()).unwrap(),
            SupabaseConfig::default(),
        );
        let err = store
            .find_advice(WeatherCondition::Moderate, AirQualityCondition::Unknown)
            .await
            .unwrap_err();
        assert!(err.is_configuration());
    }
}
