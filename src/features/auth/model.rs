use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::error::AppError;
use crate::shared::constants::DEFAULT_USER_LABEL;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Identity provider subject, used as the user identifier everywhere
    pub sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name from the token's profile claims
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AuthenticatedUser {
    /// Name stored on the user's profile, if the provider sent a non-empty one
    pub fn full_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    pub fn display_name(&self) -> &str {
        self.full_name().unwrap_or(DEFAULT_USER_LABEL)
    }

    /// First letter of the name, else of the email, else "U"
    pub fn avatar_initial(&self) -> String {
        self.full_name()
            .and_then(|name| name.chars().next())
            .or_else(|| self.email.as_deref().and_then(|email| email.chars().next()))
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "U".to_string())
    }
}

/// The caller's session as seen by this service. Credentials never reach us.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(AuthenticatedUser),
}

impl Session {
    pub fn user(&self) -> Option<&AuthenticatedUser> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated(user) => Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    /// The signed-in user, or `Unauthorized` carrying the login prompt shown to the user
    pub fn require_user(&self, prompt: &str) -> Result<&AuthenticatedUser, AppError> {
        self.user()
            .ok_or_else(|| AppError::Unauthorized(prompt.to_string()))
    }
}
