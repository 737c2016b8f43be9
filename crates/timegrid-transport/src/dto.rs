//! Wire DTOs for the auth endpoint surface.

use serde::{Deserialize, Serialize};

use timegrid_entity::UserProfile;

/// Default locale applied when registration omits one.
pub const DEFAULT_LOCALE: &str = "ru";

/// Default timezone applied when registration omits one.
pub const DEFAULT_TZ: &str = "Europe/Moscow";

/// Request body for `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Plaintext password; only ever sent over the wire, never stored.
    pub password: String,
}

/// Request body for `POST /auth/register`.
///
/// Registration creates the organization and its first admin user in one
/// call.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    /// Name of the organization to create.
    pub organization_name: String,
    /// Admin login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Organization locale.
    pub locale: String,
    /// Organization timezone.
    pub tz: String,
}

impl RegisterRequest {
    /// Build a registration request, applying locale/timezone defaults.
    pub fn new(
        organization_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        locale: Option<String>,
        tz: Option<String>,
    ) -> Self {
        Self {
            organization_name: organization_name.into(),
            email: email.into(),
            password: password.into(),
            locale: locale.unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
            tz: tz.unwrap_or_else(|| DEFAULT_TZ.to_string()),
        }
    }
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest {
    /// The token being exchanged.
    pub refresh_token: String,
}

/// Response body of login, register, and demo-login.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    /// Bearer token for subsequent calls.
    pub access_token: String,
    /// Profile of the authenticated user.
    pub user: UserProfile,
}

/// Response body of `POST /auth/refresh`.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    /// Replacement bearer token.
    pub access_token: String,
}
