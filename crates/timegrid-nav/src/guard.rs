//! The navigation guard.

use tracing::debug;

use timegrid_session::Session;

use crate::route::{Route, RouteTable, paths};

/// What the shell should do with a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardAction {
    /// Render the destination.
    Proceed,
    /// Navigate to this path instead.
    Redirect(String),
}

/// Outcome of one guard evaluation.
///
/// The title is display metadata, not authorization; it is present even
/// when the action is a redirect, and applying it is the shell's side
/// effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardDecision {
    /// Display title of the evaluated destination, when declared.
    pub title: Option<String>,
    /// The authorization outcome.
    pub action: GuardAction,
}

impl GuardDecision {
    fn proceed(title: Option<String>) -> Self {
        Self {
            title,
            action: GuardAction::Proceed,
        }
    }

    fn redirect(title: Option<String>, target: impl Into<String>) -> Self {
        Self {
            title,
            action: GuardAction::Redirect(target.into()),
        }
    }
}

/// Authorizes route transitions against the current session snapshot.
///
/// Pure over its inputs: the same destination and snapshot always produce
/// the same decision, and evaluation never performs I/O.
#[derive(Debug, Clone, Default)]
pub struct NavigationGuard {
    table: RouteTable,
}

impl NavigationGuard {
    /// Create a guard over the given route table.
    pub fn new(table: RouteTable) -> Self {
        Self { table }
    }

    /// The route table this guard evaluates against.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Resolve a raw path and evaluate the transition.
    ///
    /// Alias routes and unmatched paths resolve to their redirect target
    /// before any authorization check runs, mirroring how the route table
    /// declares them.
    pub fn resolve(&self, path: &str, session: &Session) -> GuardDecision {
        match self.table.find(path) {
            Some(route) => match &route.redirect {
                Some(target) => GuardDecision::redirect(None, target.clone()),
                None => self.evaluate(route, session),
            },
            None => {
                debug!(path, "Unmatched path; redirecting to fallback");
                GuardDecision::redirect(None, self.table.fallback().to_string())
            }
        }
    }

    /// Evaluate one destination against the session snapshot.
    ///
    /// Checks run in a fixed order: authentication requirement, role
    /// allow-list, then the login-while-authenticated bounce. A role
    /// mismatch is a silent redirect to the landing page, never an error.
    pub fn evaluate(&self, destination: &Route, session: &Session) -> GuardDecision {
        let title = destination.meta.title.clone();

        if destination.meta.requires_auth && !session.is_authenticated() {
            debug!(path = %destination.path, "Unauthenticated; redirecting to login");
            return GuardDecision::redirect(title, paths::LOGIN);
        }

        if let (Some(allowed), Some(role)) = (&destination.meta.roles, session.role()) {
            // Superadmin passes every role gate.
            if !role.is_superadmin() && !allowed.contains(&role) {
                debug!(path = %destination.path, role = %role, "Role denied; redirecting to landing");
                return GuardDecision::redirect(title, paths::DASHBOARD);
            }
        }

        if destination.path == paths::LOGIN && session.is_authenticated() {
            return GuardDecision::redirect(title, paths::DASHBOARD);
        }

        GuardDecision::proceed(title)
    }
}
