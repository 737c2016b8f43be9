//! Persisted-entry keys for the session mirror.
//!
//! Centralising key names prevents typos and makes it easy to find every
//! entry the client persists.

/// Key holding the raw access token string.
pub const AUTH_TOKEN: &str = "auth_token";

/// Key holding the JSON-serialized user profile.
pub const USER: &str = "user";
