//! Integration tests for notification review and the dashboard.

use secrecy::SecretString;
use shopdesk_admin::backend::routes;
use shopdesk_admin::{Console, NoticeLog};
use shopdesk_core::NotificationId;
use shopdesk_integration_tests::{ADMIN_EMAIL, ADMIN_PASSWORD, FakeBackend};
use tempfile::TempDir;

async fn logged_in() -> (FakeBackend, TempDir, NoticeLog, Console) {
    let backend = FakeBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let notices = NoticeLog::new();
    let mut console = backend.console(dir.path(), &notices).await;
    console
        .login(ADMIN_EMAIL, &SecretString::from(ADMIN_PASSWORD))
        .await
        .unwrap();
    notices.drain();
    (backend, dir, notices, console)
}

#[tokio::test]
async fn test_load_and_delete_notification() {
    let (backend, _dir, _notices, mut console) = logged_in().await;

    console.load_notifications().await.unwrap();
    let id = NotificationId::new("n1");
    let loaded = console.state().notification(&id).unwrap();
    assert_eq!(loaded.text, "Welcome!");
    assert!(loaded.created_at.is_some());
    assert!(!loaded.is_read);

    console.selection_mut().notification = Some(id.clone());
    console.delete_notification(&id).await.unwrap();

    assert!(console.state().notifications().is_empty());
    assert!(console.state().selection.notification.is_none());
    assert_eq!(
        backend.requests_to(routes::DELETE_NOTIFICATION)[0].body["notificationId"],
        "n1"
    );
}

#[tokio::test]
async fn test_dashboard_snapshot() {
    let (_backend, _dir, _notices, mut console) = logged_in().await;

    console.load_dashboard().await.unwrap();

    let snapshot = console.state().dashboard().unwrap();
    assert_eq!(snapshot.counts(), [("Products", 2), ("Carts", 2), ("Comments", 1)]);
    assert_eq!(snapshot.latest_users[0].email, "lan@shop.test");
}
