use super::SupabaseClient;
use crate::error::{HealthAdviceError, Result};
use crate::models::AuthenticatedUser;
use serde_json::{json, Value};

const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";
const INVALID_CREDENTIALS: &str = "Invalid email or password.";

fn string_at<'a>(body: &'a Value, pointer: &str) -> Option<&'a str> {
    body.pointer(pointer)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

impl SupabaseClient {
    /// Create an account. Returns the new user id.
    pub async fn sign_up(&self, email: &str, password: &str, username: &str) -> Result<String> {
        let url = self.auth_url("signup", &[])?;
        let payload = json!({
            "email": email,
            "password": password,
            "data": { "username": username },
        });

        let (status, body) = self.post_auth(url, &payload).await?;

        // Depending on email confirmation settings the user is either nested or top-level
        if let Some(id) = string_at(&body, "/user/id").or_else(|| string_at(&body, "/id")) {
            tracing::info!("Registered user {}", id);
            return Ok(id.to_string());
        }

        tracing::warn!("Sign-up rejected with status {}", status);
        let detail = string_at(&body, "/msg").or_else(|| string_at(&body, "/error_description"));
        let message = match detail {
            Some(detail) => format!("Supabase Error: {}", detail),
            None => REGISTRATION_FAILED.to_string(),
        };
        Err(HealthAdviceError::Auth(message))
    }

    /// Password grant. The returned user carries the bearer token for later store calls.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthenticatedUser> {
        let url = self.auth_url("token", &[("grant_type", "password")])?;
        let payload = json!({ "email": email, "password": password });

        let (status, body) = self.post_auth(url, &payload).await?;

        match string_at(&body, "/access_token") {
            Some(token) => Ok(AuthenticatedUser {
                id: string_at(&body, "/user/id").unwrap_or_default().to_string(),
                email: string_at(&body, "/user/email").unwrap_or(email).to_string(),
                access_token: token.to_string(),
            }),
            None => {
                tracing::warn!("Sign-in rejected with status {}", status);
                let message = match string_at(&body, "/error_description") {
                    Some(description) => format!("Login Error: {}", description),
                    None => INVALID_CREDENTIALS.to_string(),
                };
                Err(HealthAdviceError::Auth(message))
            }
        }
    }
}
