//! End-to-end tests for transport-level failure classification.

use std::sync::Arc;
use std::time::Duration;

use crate::helpers::{self, TestBackend};

use timegrid_core::error::ErrorKind;
use timegrid_core::events::SessionEvent;
use timegrid_core::traits::PersistentStore;
use timegrid_storage::keys;
use timegrid_transport::NETWORK_ERROR_MESSAGE;

#[tokio::test]
async fn test_validation_errors_flatten_to_one_message() {
    let backend = TestBackend::spawn().await;
    let app = helpers::wire(&backend.base_url);

    let err = app
        .session
        .register("Uni", "not-an-email", "short", None, None)
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.message, "bad email, weak password");
}

#[tokio::test]
async fn test_generic_error_payload_replaces_message() {
    let backend = TestBackend::spawn().await;
    backend.state.add_inactive_user("gone@x.com", "pw", "TEACHER");
    let app = helpers::wire(&backend.base_url);

    let err = app.session.login("gone@x.com", "pw").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Api);
    assert_eq!(err.message, "Inactive user");
}

#[tokio::test]
async fn test_network_failure_uses_fixed_message() {
    // A port nothing listens on: the request never gets a response.
    let app = helpers::wire("http://127.0.0.1:1/api/v1");

    let err = app.session.login("a@x.com", "pw").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Network);
    assert_eq!(err.message, NETWORK_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_unauthorized_clears_credentials_and_broadcasts() {
    let backend = TestBackend::spawn().await;
    let app = helpers::wire(&backend.base_url);

    app.store.set(keys::AUTH_TOKEN, "stale").await.unwrap();
    app.store.set(keys::USER, "{}").await.unwrap();
    let mut events = app.events.subscribe();

    let err = app.client.me().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);

    // Both persisted entries are gone.
    assert_eq!(app.store.get(keys::AUTH_TOKEN).await.unwrap(), None);
    assert_eq!(app.store.get(keys::USER).await.unwrap(), None);

    // And the navigation layer was told.
    let event = tokio::time::timeout(Duration::from_secs(1), events.recv())
        .await
        .expect("No event within a second")
        .unwrap();
    assert!(matches!(event, SessionEvent::Invalidated));
}

#[tokio::test]
async fn test_persisted_token_is_attached_before_hydration() {
    let backend = TestBackend::spawn().await;
    backend.state.add_user("a@x.com", "pw", "TEACHER");

    let first = helpers::wire(&backend.base_url);
    first.session.login("a@x.com", "pw").await.unwrap();

    // A fresh client over the same store, before any hydration: requests
    // must still carry the persisted credential.
    let second = helpers::wire_with_store(&backend.base_url, Arc::clone(&first.store));
    let user = second.client.me().await.unwrap();
    assert_eq!(user.email, "a@x.com");
}

#[tokio::test]
async fn test_calls_without_any_token_proceed_unauthenticated() {
    let backend = TestBackend::spawn().await;
    let app = helpers::wire(&backend.base_url);

    // No token anywhere: the backend sees an unauthenticated call and
    // rejects it; the client classifies, it does not crash.
    let err = app.client.me().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
}
