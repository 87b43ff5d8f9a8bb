use crate::error::{HealthAdviceError, Result};
use crate::models::Session;
use crate::store::SupabaseClient;

#[derive(Clone)]
pub struct AccountService {
    store: SupabaseClient,
}

impl AccountService {
    pub fn new(store: SupabaseClient) -> Self {
        Self { store }
    }

    /// Create an account; the user signs in separately afterwards.
    pub async fn register(&self, email: &str, password: &str, username: &str) -> Result<String> {
        let (email, username) = (email.trim(), username.trim());
        if email.is_empty() || username.is_empty() || password.is_empty() {
            return Err(HealthAdviceError::InvalidData(
                "Username, email and password are all required.".into(),
            ));
        }

        self.store.sign_up(email, password, username).await
    }

    pub async fn login(&self, session: &mut Session, email: &str, password: &str) -> Result<()> {
        let user = self.store.sign_in(email.trim(), password).await?;
        tracing::info!("Signed in as {}", user.email);
        session.sign_in(user);
        Ok(())
    }

    pub fn logout(&self, session: &mut Session) {
        if let Some(user) = session.user() {
            tracing::info!("Signed out {}", user.email);
        }
        session.sign_out();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HttpConfig, SupabaseConfig};
    use crate::datasources::build_http_client;
    use crate::models::AccessibilitySettings;
    use serde_json::json;
    use wiremock::matchers::{any, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn accounts_for(server: &MockServer) -> AccountService {
        AccountService::new(SupabaseClient::new(
            build_http_client(&HttpConfig::default()).unwrap(),
            SupabaseConfig {
                url: Some(server.uri()),
                key: Some("anon-key".into()),
            },
        ))
    }

    #[tokio::test]
    async fn login_then_logout_updates_session() {
        let server = MockServer::start().await;
        Mock::given(path("/auth/v1/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "user-jwt",
                "user": {"id": "uuid-1", "email": "jo@example.com"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let accounts = accounts_for(&server);
        let mut session = Session::new(AccessibilitySettings::default());
        accounts
            .login(&mut session, " jo@example.com ", "hunter22")
            .await
            .unwrap();
        assert!(session.is_logged_in());

        accounts.logout(&mut session);
        assert!(!session.is_logged_in());
    }

    #[tokio::test]
    async fn failed_login_leaves_session_anonymous() {
        let server = MockServer::start().await;
        Mock::given(path("/auth/v1/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error_description": "Invalid login credentials"
            })))
            .mount(&server)
            .await;

        let mut session = Session::default();
        let err = accounts_for(&server)
            .login(&mut session, "jo@example.com", "nope")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Login Error: Invalid login credentials");
        assert!(!session.is_logged_in());
    }

    #[tokio::test]
    async fn register_requires_every_field() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = accounts_for(&server)
            .register("jo@example.com", "hunter22", "  ")
            .await
            .unwrap_err();
        assert!(matches!(err, HealthAdviceError::InvalidData(_)));
    }
}
