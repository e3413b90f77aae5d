//! Integration tests for login, logout, and the authentication gate.

use secrecy::SecretString;
use shopdesk_admin::backend::routes;
use shopdesk_admin::{AdminConfig, AuthGate, BackendError, Console, ConsoleError, Notice, NoticeLog};
use shopdesk_integration_tests::{ADMIN_EMAIL, ADMIN_PASSWORD, ADMIN_TOKEN, FakeBackend};
use std::sync::Arc;

fn password(p: &str) -> SecretString {
    SecretString::from(p)
}

#[tokio::test]
async fn test_login_stores_token_and_opens_gate() {
    let backend = FakeBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let notices = NoticeLog::new();
    let mut console = backend.console(dir.path(), &notices).await;
    assert_eq!(console.gate(), AuthGate::Unauthenticated);

    console.login(ADMIN_EMAIL, &password(ADMIN_PASSWORD)).await.unwrap();

    assert_eq!(console.gate(), AuthGate::Authenticated);
    let persisted = std::fs::read_to_string(dir.path().join("session.json")).unwrap();
    let persisted: serde_json::Value = serde_json::from_str(&persisted).unwrap();
    assert_eq!(persisted["aToken"], ADMIN_TOKEN);
    assert_eq!(notices.drain(), vec![Notice::success("Login successful")]);

    // A new console picks the session up from storage
    let reopened = backend.console(dir.path(), &notices).await;
    assert_eq!(reopened.gate(), AuthGate::Authenticated);
}

#[tokio::test]
async fn test_login_sends_credentials_without_token() {
    let backend = FakeBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let notices = NoticeLog::new();
    let mut console = backend.console(dir.path(), &notices).await;

    console.login(ADMIN_EMAIL, &password(ADMIN_PASSWORD)).await.unwrap();

    let requests = backend.requests_to(routes::LOGIN);
    assert_eq!(requests.len(), 1);
    assert!(requests[0].token.is_none());
    assert_eq!(requests[0].body["email"], ADMIN_EMAIL);
    assert_eq!(requests[0].body["password"], ADMIN_PASSWORD);
}

#[tokio::test]
async fn test_failed_login_leaves_gate_closed() {
    let backend = FakeBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let notices = NoticeLog::new();
    let mut console = backend.console(dir.path(), &notices).await;

    let err = console
        .login(ADMIN_EMAIL, &password("wrong"))
        .await
        .unwrap_err();

    assert!(matches!(err, ConsoleError::Backend(BackendError::Rejected(ref m)) if m == "Invalid credentials"));
    assert_eq!(console.gate(), AuthGate::Unauthenticated);
    assert!(console.session().token().is_none());
    assert!(!dir.path().join("session.json").exists());
    assert_eq!(notices.drain(), vec![Notice::error("Invalid credentials")]);
}

#[tokio::test]
async fn test_logout_clears_memory_and_storage() {
    let backend = FakeBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let notices = NoticeLog::new();
    let mut console = backend.console(dir.path(), &notices).await;
    console.login(ADMIN_EMAIL, &password(ADMIN_PASSWORD)).await.unwrap();
    console.load_products().await.unwrap();

    console.logout().await.unwrap();

    assert_eq!(console.gate(), AuthGate::Unauthenticated);
    assert!(console.session().token().is_none());
    assert!(!dir.path().join("session.json").exists());
    assert!(console.state().products().is_empty());

    // Nothing more reaches the backend
    let before = backend.requests().len();
    assert!(matches!(
        console.load_products().await.unwrap_err(),
        ConsoleError::NotAuthenticated
    ));
    assert_eq!(backend.requests().len(), before);
}

#[tokio::test]
async fn test_token_is_sent_as_header() {
    let backend = FakeBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let notices = NoticeLog::new();
    let mut console = backend.console(dir.path(), &notices).await;
    console.login(ADMIN_EMAIL, &password(ADMIN_PASSWORD)).await.unwrap();

    console.load_carts().await.unwrap();

    let requests = backend.requests_to(routes::ALL_CARTS);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].token.as_deref(), Some(ADMIN_TOKEN));
}

#[tokio::test]
async fn test_rejected_token_ends_session() {
    let backend = FakeBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let notices = NoticeLog::new();
    let mut console = backend.console(dir.path(), &notices).await;
    console.login(ADMIN_EMAIL, &password(ADMIN_PASSWORD)).await.unwrap();
    notices.drain();

    backend.reject_all_tokens();
    let err = console.load_products().await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(console.gate(), AuthGate::Unauthenticated);
    assert!(!dir.path().join("session.json").exists());
    let notices = notices.drain();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].is_error());
    assert!(notices[0].message.contains("Not Authorized Login Again"));
}

#[tokio::test]
async fn test_rejected_token_kept_when_configured() {
    let backend = FakeBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let notices = NoticeLog::new();
    let mut config = AdminConfig::for_backend(backend.base_url().clone(), dir.path().join("session.json"));
    config.logout_on_unauthorized = false;
    let mut console = Console::open(config, Arc::new(notices.clone())).await.unwrap();
    console.login(ADMIN_EMAIL, &password(ADMIN_PASSWORD)).await.unwrap();

    backend.reject_all_tokens();
    assert!(console.load_products().await.unwrap_err().is_unauthorized());

    assert_eq!(console.gate(), AuthGate::Authenticated);
}

#[tokio::test]
async fn test_business_failure_keeps_session() {
    let backend = FakeBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let notices = NoticeLog::new();
    let mut console = backend.console(dir.path(), &notices).await;
    console.login(ADMIN_EMAIL, &password(ADMIN_PASSWORD)).await.unwrap();
    notices.drain();

    backend.fail_route(routes::ALL_CARTS);
    let err = console.load_carts().await.unwrap_err();

    assert!(!err.is_unauthorized());
    assert_eq!(console.gate(), AuthGate::Authenticated);
    assert_eq!(notices.drain(), vec![Notice::error("Request failed on server")]);
}
