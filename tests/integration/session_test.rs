//! End-to-end tests for the session lifecycle.

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use crate::helpers::{self, TestBackend};

use timegrid_core::traits::PersistentStore;
use timegrid_entity::UserRole;
use timegrid_nav::{GuardAction, NavigationGuard, paths};
use timegrid_session::SessionState;
use timegrid_storage::keys;

#[tokio::test]
async fn test_login_populates_session_and_mirror() {
    let backend = TestBackend::spawn().await;
    backend.state.add_user("a@x.com", "pw", "ADMIN");
    let app = helpers::wire(&backend.base_url);

    let user = app.session.login("a@x.com", "pw").await.unwrap();
    assert_eq!(user.role, UserRole::Admin);

    let session = app.session.snapshot();
    assert!(session.is_authenticated());
    assert!(session.is_admin());
    assert_eq!(session.state, SessionState::Authenticated);
    assert_eq!(session.token.as_deref(), Some("t1"));

    // Both entries of the durable mirror were written.
    assert_eq!(
        app.store.get(keys::AUTH_TOKEN).await.unwrap().as_deref(),
        Some("t1")
    );
    let persisted = app.store.get(keys::USER).await.unwrap().unwrap();
    let profile: timegrid_entity::UserProfile = serde_json::from_str(&persisted).unwrap();
    assert_eq!(profile.email, "a@x.com");
    assert_eq!(profile.role, UserRole::Admin);
}

#[tokio::test]
async fn test_failed_login_surfaces_message_and_rolls_back() {
    let backend = TestBackend::spawn().await;
    backend.state.add_user("a@x.com", "pw", "TEACHER");
    let app = helpers::wire(&backend.base_url);

    let err = app.session.login("a@x.com", "wrong").await.unwrap_err();
    assert_eq!(err.message, "Incorrect email or password");

    let session = app.session.snapshot();
    assert!(!session.is_authenticated());
    assert_eq!(session.state, SessionState::Anonymous);
    assert_eq!(app.store.get(keys::AUTH_TOKEN).await.unwrap(), None);
}

#[tokio::test]
async fn test_register_returns_admin_profile() {
    let backend = TestBackend::spawn().await;
    let app = helpers::wire(&backend.base_url);

    let user = app
        .session
        .register("Uni", "dean@uni.edu", "long enough", None, None)
        .await
        .unwrap();
    assert_eq!(user.role, UserRole::Admin);
    assert!(app.session.snapshot().is_authenticated());
}

#[tokio::test]
async fn test_demo_login() {
    let backend = TestBackend::spawn().await;
    backend.state.add_user("demo@x.com", "pw", "METHODIST");
    let app = helpers::wire(&backend.base_url);

    let user = app.session.demo_login().await.unwrap();
    assert_eq!(user.email, "demo@x.com");
    assert!(app.session.snapshot().is_methodist());
}

#[tokio::test]
async fn test_bootstrap_roundtrip_restores_session() {
    let backend = TestBackend::spawn().await;
    backend.state.add_user("a@x.com", "pw", "TEACHER");

    let first = helpers::wire(&backend.base_url);
    let user = first.session.login("a@x.com", "pw").await.unwrap();
    let token = first.session.snapshot().token.unwrap();

    // A fresh process over the same durable store.
    let second = helpers::wire_with_store(&backend.base_url, Arc::clone(&first.store));
    second.session.init().await;

    let session = second.session.snapshot();
    assert!(session.is_authenticated());
    assert_eq!(session.token.as_deref(), Some(token.as_str()));
    assert_eq!(session.user.unwrap(), user);
}

#[tokio::test]
async fn test_bootstrap_with_empty_store_stays_anonymous() {
    let backend = TestBackend::spawn().await;
    let app = helpers::wire(&backend.base_url);

    app.session.init().await;
    assert!(!app.session.snapshot().is_authenticated());
}

#[tokio::test]
async fn test_bootstrap_with_rejected_token_logs_out() {
    let backend = TestBackend::spawn().await;
    let app = helpers::wire(&backend.base_url);

    app.store.set(keys::AUTH_TOKEN, "stale").await.unwrap();
    app.store
        .set(
            keys::USER,
            r#"{"user_id": 1, "email": "a@x.com", "role": "TEACHER", "org_id": 1, "is_active": true}"#,
        )
        .await
        .unwrap();

    app.session.init().await;

    let session = app.session.snapshot();
    assert!(!session.is_authenticated());
    assert_eq!(app.store.get(keys::AUTH_TOKEN).await.unwrap(), None);
    assert_eq!(app.store.get(keys::USER).await.unwrap(), None);
}

#[tokio::test]
async fn test_expired_session_redirects_next_navigation() {
    let backend = TestBackend::spawn().await;
    backend.state.add_user("a@x.com", "pw", "TEACHER");
    let app = helpers::wire(&backend.base_url);
    let guard = NavigationGuard::default();

    app.session.login("a@x.com", "pw").await.unwrap();
    assert_eq!(
        guard.resolve("/schedule", &app.session.snapshot()).action,
        GuardAction::Proceed
    );

    // The backend invalidates the session behind our back.
    backend.state.revoke_all_tokens();
    let err = app.session.current_user().await.unwrap_err();
    assert_eq!(err.kind, timegrid_core::error::ErrorKind::Authentication);

    // The next guard evaluation lands on the login page.
    let decision = guard.resolve("/schedule", &app.session.snapshot());
    assert_eq!(decision.action, GuardAction::Redirect(paths::LOGIN.to_string()));
}

#[tokio::test]
async fn test_refresh_replaces_only_the_token() {
    let backend = TestBackend::spawn().await;
    backend.state.add_user("a@x.com", "pw", "TEACHER");
    let app = helpers::wire(&backend.base_url);

    let user = app.session.login("a@x.com", "pw").await.unwrap();
    let before = app.session.snapshot().token.unwrap();

    assert!(app.session.refresh().await);

    let session = app.session.snapshot();
    assert_ne!(session.token.as_deref(), Some(before.as_str()));
    assert_eq!(session.user.unwrap(), user);
    assert_eq!(
        app.store.get(keys::AUTH_TOKEN).await.unwrap(),
        session.token
    );
}

#[tokio::test]
async fn test_refresh_failure_logs_out() {
    let backend = TestBackend::spawn().await;
    backend.state.add_user("a@x.com", "pw", "TEACHER");
    let app = helpers::wire(&backend.base_url);

    app.session.login("a@x.com", "pw").await.unwrap();
    backend.state.revoke_all_tokens();

    assert!(!app.session.refresh().await);
    assert!(!app.session.snapshot().is_authenticated());
    assert_eq!(app.store.get(keys::AUTH_TOKEN).await.unwrap(), None);
}

#[tokio::test]
async fn test_refresh_completing_after_logout_does_not_resurrect() {
    let backend = TestBackend::spawn().await;
    backend.state.add_user("a@x.com", "pw", "TEACHER");
    let app = helpers::wire(&backend.base_url);

    app.session.login("a@x.com", "pw").await.unwrap();
    backend.state.refresh_delay_ms.store(150, Ordering::SeqCst);

    let session = Arc::clone(&app.session);
    let refresh = tokio::spawn(async move { session.refresh().await });

    // Log out while the exchange is still in flight.
    tokio::time::sleep(Duration::from_millis(50)).await;
    app.session.logout().await;

    assert!(!refresh.await.unwrap());

    let session = app.session.snapshot();
    assert!(session.token.is_none());
    assert!(session.user.is_none());
    assert_eq!(session.state, SessionState::Anonymous);
    assert_eq!(app.store.get(keys::AUTH_TOKEN).await.unwrap(), None);
}

#[tokio::test]
async fn test_logout_clears_everything_and_is_idempotent() {
    let backend = TestBackend::spawn().await;
    backend.state.add_user("a@x.com", "pw", "ADMIN");
    let app = helpers::wire(&backend.base_url);

    app.session.login("a@x.com", "pw").await.unwrap();
    app.session.logout().await;
    app.session.logout().await;

    let session = app.session.snapshot();
    assert!(session.token.is_none());
    assert!(session.user.is_none());
    assert_eq!(app.store.get(keys::AUTH_TOKEN).await.unwrap(), None);
    assert_eq!(app.store.get(keys::USER).await.unwrap(), None);
}
