//! The backend API client.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use timegrid_core::config::api::ApiConfig;
use timegrid_core::error::{AppError, ErrorKind};
use timegrid_core::events::{SessionEvent, SessionEvents};
use timegrid_core::result::AppResult;
use timegrid_core::traits::PersistentStore;
use timegrid_entity::UserProfile;
use timegrid_storage::keys;

use crate::dto::{AuthResponse, LoginRequest, RefreshRequest, RefreshResponse, RegisterRequest};
use crate::intercept::{self, NETWORK_ERROR_MESSAGE};

/// HTTP client for the TimeGrid backend.
///
/// Every call attaches `Authorization: Bearer <token>` when a token is
/// known. The default bearer slot is written only by the session store;
/// when it is empty the client falls back to the persisted token, so calls
/// issued before hydration still carry credentials. On HTTP 401 the client
/// clears both credential copies and broadcasts
/// [`SessionEvent::Invalidated`] before propagating the error. No call is
/// ever retried automatically.
#[derive(Debug)]
pub struct ApiClient {
    /// Underlying HTTP client.
    http: reqwest::Client,
    /// Base URL including the version prefix, no trailing slash.
    base_url: String,
    /// Default bearer credential, set and cleared by the session store.
    bearer: RwLock<Option<String>>,
    /// Durable mirror, read as a credential fallback and cleared on 401.
    store: Arc<dyn PersistentStore>,
    /// Session lifecycle broadcast hub.
    events: SessionEvents,
}

impl ApiClient {
    /// Create a client from configuration.
    pub fn new(
        config: &ApiConfig,
        store: Arc<dyn PersistentStore>,
        events: SessionEvents,
    ) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer: RwLock::new(None),
            store,
            events,
        })
    }

    // ── Credential slot ────────────────────────────────────────

    /// Set the default bearer credential for subsequent calls.
    pub fn set_bearer(&self, token: &str) {
        *self.bearer.write().expect("bearer lock poisoned") = Some(token.to_string());
    }

    /// Clear the default bearer credential.
    pub fn clear_bearer(&self) {
        *self.bearer.write().expect("bearer lock poisoned") = None;
    }

    /// Resolve the credential to attach: the slot, else the persisted token.
    async fn current_bearer(&self) -> Option<String> {
        if let Some(token) = self.bearer.read().expect("bearer lock poisoned").clone() {
            return Some(token);
        }
        match self.store.get(keys::AUTH_TOKEN).await {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Failed to read persisted token; sending unauthenticated");
                None
            }
        }
    }

    // ── Auth endpoint surface ──────────────────────────────────

    /// `POST /auth/login`
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.request(Method::POST, "/auth/login", Some(&body)).await
    }

    /// `POST /auth/register`
    pub async fn register(&self, request: &RegisterRequest) -> AppResult<AuthResponse> {
        self.request(Method::POST, "/auth/register", Some(request))
            .await
    }

    /// `POST /auth/demo-login`
    pub async fn demo_login(&self) -> AppResult<AuthResponse> {
        self.request::<(), _>(Method::POST, "/auth/demo-login", None)
            .await
    }

    /// `POST /auth/refresh`
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<RefreshResponse> {
        let body = RefreshRequest {
            refresh_token: refresh_token.to_string(),
        };
        self.request(Method::POST, "/auth/refresh", Some(&body))
            .await
    }

    /// `GET /auth/me`
    pub async fn me(&self) -> AppResult<UserProfile> {
        self.request::<(), _>(Method::GET, "/auth/me", None).await
    }

    // ── Request plumbing ───────────────────────────────────────

    /// Issue one request and decode or classify the response.
    async fn request<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> AppResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "Sending request");

        let mut builder = self.http.request(method, url.as_str());
        if let Some(token) = self.current_bearer().await {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        // No response at all (refused connection, timeout, DNS) gets the
        // fixed network-failure message.
        let response = builder
            .send()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Network, NETWORK_ERROR_MESSAGE, e))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Network, NETWORK_ERROR_MESSAGE, e))?;

        if status.is_success() {
            return serde_json::from_slice(&bytes).map_err(|e| {
                AppError::with_source(
                    ErrorKind::Serialization,
                    format!("Failed to decode response body: {e}"),
                    e,
                )
            });
        }

        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized().await;
        }

        Err(intercept::classify_failure(status, &bytes))
    }

    /// Local recovery for an invalidated session: drop both credential
    /// copies and tell the navigation layer. The error itself still
    /// propagates to the originating caller.
    async fn handle_unauthorized(&self) {
        warn!("Session rejected by backend; clearing credentials");
        self.clear_bearer();

        if let Err(e) = self.store.remove(keys::AUTH_TOKEN).await {
            warn!(error = %e, "Failed to clear persisted token");
        }
        if let Err(e) = self.store.remove(keys::USER).await {
            warn!(error = %e, "Failed to clear persisted profile");
        }

        self.events.emit(SessionEvent::Invalidated);
    }
}
