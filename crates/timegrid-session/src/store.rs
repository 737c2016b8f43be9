//! Session lifecycle orchestration — login, refresh, logout, bootstrap.

use std::sync::{Arc, RwLock};

use tracing::{debug, info, warn};

use timegrid_core::events::{SessionEvent, SessionEvents};
use timegrid_core::result::AppResult;
use timegrid_core::traits::PersistentStore;
use timegrid_entity::UserProfile;
use timegrid_storage::keys;
use timegrid_transport::ApiClient;
use timegrid_transport::dto::{AuthResponse, RegisterRequest};

use crate::state::{Session, SessionState};

/// Owner and single writer of the client session.
///
/// Every mutating operation completes its in-memory update inside one lock
/// acquisition, never across an `.await`, so concurrent readers always
/// observe a consistent snapshot. The durable mirror is written after the
/// in-memory update, best-effort: a failed disk write is logged and never
/// rolls the session back.
#[derive(Debug)]
pub struct SessionStore {
    /// Backend transport.
    client: Arc<ApiClient>,
    /// Durable mirror of token and profile.
    store: Arc<dyn PersistentStore>,
    /// Session lifecycle broadcast hub.
    events: SessionEvents,
    /// The session itself.
    session: RwLock<Session>,
}

impl SessionStore {
    /// Create a store starting from the anonymous session.
    pub fn new(
        client: Arc<ApiClient>,
        store: Arc<dyn PersistentStore>,
        events: SessionEvents,
    ) -> Self {
        Self {
            client,
            store,
            events,
            session: RwLock::new(Session::anonymous()),
        }
    }

    /// A consistent copy of the current session.
    pub fn snapshot(&self) -> Session {
        self.session.read().expect("session lock poisoned").clone()
    }

    // ── Login-shaped operations ────────────────────────────────

    /// Authenticate with email and password.
    ///
    /// On success the session holds the new token and profile, both are
    /// persisted, and the default bearer credential is set. On failure the
    /// session rolls back to anonymous and the error propagates unchanged.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<UserProfile> {
        self.begin_authenticating();

        match self.client.login(email, password).await {
            Ok(auth) => {
                let user = self.complete_login(auth).await;
                info!(user_id = user.user_id, email = %user.email, "Login successful");
                Ok(user)
            }
            Err(e) => {
                warn!(email, error = %e, "Login failed");
                self.roll_back_to_anonymous();
                Err(e)
            }
        }
    }

    /// Register a new organization with its first admin user.
    ///
    /// `locale` and `tz` fall back to the platform defaults when omitted.
    pub async fn register(
        &self,
        organization_name: &str,
        email: &str,
        password: &str,
        locale: Option<String>,
        tz: Option<String>,
    ) -> AppResult<UserProfile> {
        self.begin_authenticating();

        let request = RegisterRequest::new(organization_name, email, password, locale, tz);
        match self.client.register(&request).await {
            Ok(auth) => {
                let user = self.complete_login(auth).await;
                info!(
                    user_id = user.user_id,
                    org_id = user.org_id,
                    "Registration successful"
                );
                Ok(user)
            }
            Err(e) => {
                warn!(email, error = %e, "Registration failed");
                self.roll_back_to_anonymous();
                Err(e)
            }
        }
    }

    /// Authenticate as the shared demo user, no credentials required.
    pub async fn demo_login(&self) -> AppResult<UserProfile> {
        self.begin_authenticating();

        match self.client.demo_login().await {
            Ok(auth) => {
                let user = self.complete_login(auth).await;
                info!(user_id = user.user_id, "Demo login successful");
                Ok(user)
            }
            Err(e) => {
                warn!(error = %e, "Demo login failed");
                self.roll_back_to_anonymous();
                Err(e)
            }
        }
    }

    // ── Token refresh ──────────────────────────────────────────

    /// Exchange the current token for a fresh one.
    ///
    /// Returns `false` without a network call when no token is held. On a
    /// failed exchange the session is logged out. Never returns an error.
    ///
    /// A refresh that completes after a concurrent `logout()` must not
    /// resurrect cleared credentials: the fresh token is applied only if
    /// the session is still in the `Refreshing` state.
    pub async fn refresh(&self) -> bool {
        let token = {
            let session = self.session.read().expect("session lock poisoned");
            session.token.clone()
        };
        let Some(token) = token else {
            return false;
        };

        {
            let mut session = self.session.write().expect("session lock poisoned");
            session.state = SessionState::Refreshing;
        }

        match self.client.refresh(&token).await {
            Ok(response) => {
                let applied = {
                    let mut session = self.session.write().expect("session lock poisoned");
                    if session.state == SessionState::Refreshing {
                        session.token = Some(response.access_token.clone());
                        session.state = SessionState::Authenticated;
                        true
                    } else {
                        // Logged out while the exchange was in flight.
                        false
                    }
                };
                if !applied {
                    debug!("Discarding refreshed token for a cleared session");
                    return false;
                }

                self.client.set_bearer(&response.access_token);
                if let Err(e) = self.store.set(keys::AUTH_TOKEN, &response.access_token).await {
                    warn!(error = %e, "Failed to persist refreshed token");
                }
                self.events.emit(SessionEvent::Refreshed);
                debug!("Token refreshed");
                true
            }
            Err(e) => {
                warn!(error = %e, "Token refresh failed; logging out");
                self.logout().await;
                false
            }
        }
    }

    // ── Profile fetch ──────────────────────────────────────────

    /// Fetch the current user's profile and overwrite it in place.
    ///
    /// Returns `Ok(None)` without a network call when unauthenticated. A
    /// failed fetch logs the session out before the error propagates.
    pub async fn current_user(&self) -> AppResult<Option<UserProfile>> {
        let has_token = {
            let session = self.session.read().expect("session lock poisoned");
            session.token.is_some()
        };
        if !has_token {
            return Ok(None);
        }

        match self.client.me().await {
            Ok(user) => {
                {
                    let mut session = self.session.write().expect("session lock poisoned");
                    session.user = Some(user.clone());
                }
                self.persist_user(&user).await;
                Ok(Some(user))
            }
            Err(e) => {
                warn!(error = %e, "Profile fetch failed; logging out");
                self.logout().await;
                Err(e)
            }
        }
    }

    // ── Logout ─────────────────────────────────────────────────

    /// Clear the session everywhere: memory, durable mirror, credential
    /// slot. Idempotent, and never issues a network call, so the transport
    /// interceptor can trigger it without risking a failure loop.
    pub async fn logout(&self) {
        {
            let mut session = self.session.write().expect("session lock poisoned");
            *session = Session::anonymous();
        }

        if let Err(e) = self.store.clear().await {
            warn!(error = %e, "Failed to clear persisted session");
        }
        self.client.clear_bearer();
        self.events.emit(SessionEvent::LoggedOut);
        info!("Logged out");
    }

    // ── Bootstrap ──────────────────────────────────────────────

    /// Rehydrate the session from the durable mirror, once, at process
    /// start.
    ///
    /// When both persisted entries are present the session is hydrated
    /// optimistically — authenticated immediately, so the first navigation
    /// never flashes the login page — and then reconciled against
    /// `/auth/me`. A rejected token logs the session back out.
    pub async fn init(&self) {
        let token = match self.store.get(keys::AUTH_TOKEN).await {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Failed to read persisted token");
                None
            }
        };
        let user = match self.store.get(keys::USER).await {
            Ok(Some(raw)) => match serde_json::from_str::<UserProfile>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, "Discarding unreadable persisted profile");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Failed to read persisted profile");
                None
            }
        };

        let (Some(token), Some(user)) = (token, user) else {
            debug!("No persisted session to hydrate");
            return;
        };

        {
            let mut session = self.session.write().expect("session lock poisoned");
            session.token = Some(token.clone());
            session.user = Some(user);
            session.state = SessionState::Authenticated;
        }
        self.client.set_bearer(&token);
        info!("Session hydrated from disk; validating");

        // Reconcile the optimistic state. current_user() already logs out
        // on failure; the error stops here because bootstrap has no caller
        // to display it.
        if let Err(e) = self.current_user().await {
            warn!(error = %e, "Stored session rejected by backend");
        }
    }

    // ── Internals ──────────────────────────────────────────────

    /// Enter the `Authenticating` state for a login-shaped operation.
    fn begin_authenticating(&self) {
        let mut session = self.session.write().expect("session lock poisoned");
        session.state = SessionState::Authenticating;
    }

    /// Roll a failed login-shaped operation back to the empty session.
    fn roll_back_to_anonymous(&self) {
        let mut session = self.session.write().expect("session lock poisoned");
        *session = Session::anonymous();
    }

    /// Apply a successful auth response: memory first, then credential
    /// slot, then the durable mirror.
    async fn complete_login(&self, auth: AuthResponse) -> UserProfile {
        let AuthResponse { access_token, user } = auth;

        {
            let mut session = self.session.write().expect("session lock poisoned");
            session.token = Some(access_token.clone());
            session.user = Some(user.clone());
            session.state = SessionState::Authenticated;
        }

        self.client.set_bearer(&access_token);
        self.persist_token(&access_token).await;
        self.persist_user(&user).await;
        self.events.emit(SessionEvent::LoggedIn {
            user_id: user.user_id,
        });

        user
    }

    /// Mirror the token to durable storage, best-effort.
    async fn persist_token(&self, token: &str) {
        if let Err(e) = self.store.set(keys::AUTH_TOKEN, token).await {
            warn!(error = %e, "Failed to persist token");
        }
    }

    /// Mirror the profile to durable storage, best-effort.
    async fn persist_user(&self, user: &UserProfile) {
        match serde_json::to_string(user) {
            Ok(json) => {
                if let Err(e) = self.store.set(keys::USER, &json).await {
                    warn!(error = %e, "Failed to persist profile");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize profile"),
        }
    }
}
