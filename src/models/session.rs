use crate::config::AccessibilityConfig;
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: String,
    pub email: String,
    pub access_token: String,
}

impl std::fmt::Debug for AuthenticatedUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedUser")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilitySettings {
    pub high_contrast: bool,
    pub large_font: bool,
}

impl From<AccessibilityConfig> for AccessibilitySettings {
    fn from(config: AccessibilityConfig) -> Self {
        Self {
            high_contrast: config.high_contrast,
            large_font: config.large_font,
        }
    }
}

/// Per-run request context: who is signed in and how they want things displayed.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<AuthenticatedUser>,
    pub accessibility: AccessibilitySettings,
}

impl Session {
    pub fn new(accessibility: AccessibilitySettings) -> Self {
        Self {
            user: None,
            accessibility,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&AuthenticatedUser> {
        self.user.as_ref()
    }

    pub fn sign_in(&mut self, user: AuthenticatedUser) {
        self.user = Some(user);
    }

    /// Clears the user; accessibility preferences survive sign-out.
    pub fn sign_out(&mut self) {
        self.user = None;
    }
}
