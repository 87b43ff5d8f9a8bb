use crate::error::{HealthAdviceError, Result};
use crate::models::{AuthenticatedUser, HealthLog, NewHealthLog, Session};
use crate::store::SupabaseClient;
use chrono::NaiveDate;

pub const LOGIN_REQUIRED: &str = "You must be logged in to use the health tracker.";

/// Personal symptom log. Every call runs as the signed-in user.
#[derive(Clone)]
pub struct HealthTracker {
    store: SupabaseClient,
}

fn require_user(session: &Session) -> Result<&AuthenticatedUser> {
    session
        .user()
        .ok_or_else(|| HealthAdviceError::Auth(LOGIN_REQUIRED.into()))
}

impl HealthTracker {
    pub fn new(store: SupabaseClient) -> Self {
        Self { store }
    }

    pub async fn list(&self, session: &Session) -> Result<Vec<HealthLog>> {
        let user = require_user(session)?;
        let logs = self.store.list_health_logs(&user.access_token).await?;
        tracing::debug!("Loaded {} health log entries", logs.len());
        Ok(logs)
    }

    pub async fn add(
        &self,
        session: &Session,
        log_date: NaiveDate,
        symptom: &str,
        severity: u8,
        notes: Option<&str>,
    ) -> Result<HealthLog> {
        let user = require_user(session)?;
        if user.id.is_empty() {
            return Err(HealthAdviceError::Auth(
                "Your session has no user id. Please log in again.".into(),
            ));
        }

        let entry = NewHealthLog::new(user.id.clone(), log_date, symptom, severity, notes)?;
        let stored = self
            .store
            .add_health_log(&user.access_token, &entry)
            .await?;
        tracing::info!(
            "Logged '{}' (severity {}) for {}",
            stored.symptom,
            stored.severity,
            stored.log_date
        );
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HttpConfig, SupabaseConfig};
    use crate::datasources::build_http_client;
    use serde_json::json;
    use wiremock::matchers::{any, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tracker_for(server: &MockServer) -> HealthTracker {
        HealthTracker::new(SupabaseClient::new(
            build_http_client(&HttpConfig::default()).unwrap(),
            SupabaseConfig {
                url: Some(server.uri()),
                key: Some("anon-key".into()),
            },
        ))
    }

    fn signed_in() -> Session {
        let mut session = Session::default();
        session.sign_in(AuthenticatedUser {
            id: "uuid-1".into(),
            email: "jo@example.com".into(),
            access_token: "user-jwt".into(),
        });
        session
    }

    fn june_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    async fn mount_nothing_allowed(server: &MockServer) {
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn anonymous_session_is_rejected_without_calls() {
        let server = MockServer::start().await;
        mount_nothing_allowed(&server).await;

        let tracker = tracker_for(&server);
        let session = Session::default();

        let err = tracker.list(&session).await.unwrap_err();
        assert_eq!(err.to_string(), LOGIN_REQUIRED);

        let err = tracker
            .add(&session, june_first(), "Asthma", 3, None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), LOGIN_REQUIRED);
    }

    #[tokio::test]
    async fn invalid_entry_is_rejected_before_insert() {
        let server = MockServer::start().await;
        mount_nothing_allowed(&server).await;

        let tracker = tracker_for(&server);
        let session = signed_in();
        assert!(tracker
            .add(&session, june_first(), "Asthma", 9, None)
            .await
            .is_err());
        assert!(tracker
            .add(&session, june_first(), "", 2, None)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn add_and_list_run_as_the_user() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/health_logs"))
            .and(header("Authorization", "Bearer user-jwt"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!([
                {"id": 11, "user_id": "uuid-1", "log_date": "2025-06-01", "symptom": "Hay fever", "severity": 2, "notes": "pollen"}
            ])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/health_logs"))
            .and(header("Authorization", "Bearer user-jwt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 11, "user_id": "uuid-1", "log_date": "2025-06-01", "symptom": "Hay fever", "severity": 2, "notes": "pollen"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let tracker = tracker_for(&server);
        let session = signed_in();
        let stored = tracker
            .add(&session, june_first(), "Hay fever", 2, Some("pollen"))
            .await
            .unwrap();
        assert_eq!(stored.id, "11");

        let logs = tracker.list(&session).await.unwrap();
        assert_eq!(logs, vec![stored]);
    }

    #[tokio::test]
    async fn store_error_surfaces_as_store_query() {
        let server = MockServer::start().await;
        Mock::given(path("/rest/v1/health_logs"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "code": "PGRST301",
                "message": "JWT expired"
            })))
            .mount(&server)
            .await;

        let err = tracker_for(&server).list(&signed_in()).await.unwrap_err();
        assert!(err.is_store_query());
    }
}
