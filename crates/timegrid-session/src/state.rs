//! In-memory session state and its derived views.

use timegrid_entity::{UserProfile, UserRole};

/// Phase of the session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No credentials held.
    #[default]
    Anonymous,
    /// A login, registration, or demo login is in flight.
    Authenticating,
    /// Token and profile are both present.
    Authenticated,
    /// A token refresh is in flight; existing credentials still held.
    Refreshing,
}

/// The client session: token, profile, and lifecycle phase.
///
/// Invariant: the session is authenticated iff both `token` and `user` are
/// present. A transient mismatch is permitted only while an operation is in
/// flight and resolves on completion, or rolls back to absent/absent on
/// failure.
///
/// All views are recomputed from the snapshot on every read; there is no
/// cached derived state to go stale.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Opaque bearer token, if held.
    pub token: Option<String>,
    /// Profile of the authenticated user, if known.
    pub user: Option<UserProfile>,
    /// Current lifecycle phase.
    pub state: SessionState,
}

impl Session {
    /// The empty session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Whether both token and profile are present.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    /// Whether a login-shaped operation is in flight.
    pub fn is_loading(&self) -> bool {
        self.state == SessionState::Authenticating
    }

    /// The current user's role, if known.
    pub fn role(&self) -> Option<UserRole> {
        self.user.as_ref().map(|u| u.role)
    }

    /// Whether the current user is an organization admin (or above).
    pub fn is_admin(&self) -> bool {
        self.role().is_some_and(|r| r.is_admin())
    }

    /// Whether the current user can curate catalogs.
    pub fn is_methodist(&self) -> bool {
        self.role().is_some_and(|r| r.is_methodist())
    }

    /// Whether the current user can create and edit schedule entries.
    pub fn can_manage_schedule(&self) -> bool {
        self.role().is_some_and(|r| r.can_manage_schedule())
    }
}
