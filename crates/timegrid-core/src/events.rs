//! Session lifecycle events.
//!
//! The transport layer and the session store broadcast these events so that
//! independent consumers (the navigation shell in particular) can react
//! without the transport layer performing any navigation itself.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Events related to the client session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// A user logged in and a session was established.
    LoggedIn {
        /// The authenticated user ID.
        user_id: i64,
    },
    /// The session was cleared by an explicit logout.
    LoggedOut,
    /// The access token was replaced by a refresh.
    Refreshed,
    /// The backend rejected the current credentials (HTTP 401).
    ///
    /// Subscribers should treat the session as gone; the next guard
    /// evaluation for a protected route will redirect to login.
    Invalidated,
}

/// Broadcast hub for [`SessionEvent`]s.
///
/// Cheap to clone; all clones share the same channel. Emitting with no
/// live subscribers is not an error.
#[derive(Debug, Clone)]
pub struct SessionEvents {
    sender: broadcast::Sender<SessionEvent>,
}

impl SessionEvents {
    /// Create a new event hub with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to session events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    /// Emit an event to all current subscribers.
    pub fn emit(&self, event: SessionEvent) {
        // A send error only means nobody is listening right now.
        let _ = self.sender.send(event);
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new(16)
    }
}
