//! Construction of the client's component graph.

use std::sync::Arc;

use timegrid_core::config::AppConfig;
use timegrid_core::events::SessionEvents;
use timegrid_core::result::AppResult;
use timegrid_core::traits::PersistentStore;
use timegrid_nav::NavigationGuard;
use timegrid_session::SessionStore;
use timegrid_storage::FileStore;
use timegrid_transport::ApiClient;

/// The wired client: every component receives its collaborators
/// explicitly, and the session store is the only writer of session state.
pub struct AppContext {
    /// Session owner.
    pub session: Arc<SessionStore>,
    /// Route authorization.
    pub guard: NavigationGuard,
    /// Session lifecycle broadcast hub.
    pub events: SessionEvents,
}

impl AppContext {
    /// Build the component graph from configuration.
    pub async fn build(config: &AppConfig) -> AppResult<Self> {
        let events = SessionEvents::default();

        let store: Arc<dyn PersistentStore> = Arc::new(FileStore::open(&config.storage).await?);
        let client = Arc::new(ApiClient::new(
            &config.api,
            Arc::clone(&store),
            events.clone(),
        )?);
        let session = Arc::new(SessionStore::new(client, store, events.clone()));

        Ok(Self {
            session,
            guard: NavigationGuard::default(),
            events,
        })
    }
}
