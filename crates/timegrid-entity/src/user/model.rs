//! User profile model.

use serde::{Deserialize, Serialize};

use super::role::UserRole;

/// The authenticated user's profile as returned by the backend.
///
/// Field names follow the backend wire format (`user_id`, `org_id`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Backend-issued user ID.
    pub user_id: i64,
    /// Login email.
    pub email: String,
    /// Role driving route-level authorization.
    pub role: UserRole,
    /// The organization this user belongs to.
    pub org_id: i64,
    /// Whether the account is active.
    pub is_active: bool,
}
