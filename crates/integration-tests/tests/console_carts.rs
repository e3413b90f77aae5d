//! Integration tests for cart status changes and deletions.

use secrecy::SecretString;
use shopdesk_admin::backend::routes;
use shopdesk_admin::{Console, Notice, NoticeLog, NotificationDelivery};
use shopdesk_core::{CartId, CartStatus};
use shopdesk_integration_tests::{ADMIN_EMAIL, ADMIN_PASSWORD, FakeBackend};
use tempfile::TempDir;

async fn with_carts_loaded() -> (FakeBackend, TempDir, NoticeLog, Console) {
    let backend = FakeBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let notices = NoticeLog::new();
    let mut console = backend.console(dir.path(), &notices).await;
    console
        .login(ADMIN_EMAIL, &SecretString::from(ADMIN_PASSWORD))
        .await
        .unwrap();
    console.load_carts().await.unwrap();
    notices.drain();
    (backend, dir, notices, console)
}

#[tokio::test]
async fn test_status_change_updates_state_and_notifies_owner() {
    let (backend, _dir, notices, mut console) = with_carts_loaded().await;
    let id = CartId::new("c1");

    let outcome = console.set_cart_status(&id, CartStatus::Shipped).await.unwrap();

    assert_eq!(outcome.message, "Status updated");
    assert_eq!(outcome.notification, NotificationDelivery::Sent);
    assert_eq!(console.state().cart(&id).unwrap().status, CartStatus::Shipped);
    assert_eq!(
        console.state().cart(&CartId::new("c2")).unwrap().status,
        CartStatus::Processing
    );

    let status_call = &backend.requests_to(routes::CHANGE_CART_STATUS)[0].body;
    assert_eq!(status_call["cartId"], "c1");
    assert_eq!(status_call["status"], "shipped");

    let sent = backend.created_notifications();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0]["userId"], "u1");
    assert_eq!(sent[0]["isRead"], false);
    assert!(sent[0]["createAt"].is_i64());
    let text = sent[0]["text"].as_str().unwrap();
    assert_eq!(
        text,
        "The cart (id: #c1) that has 2 item(s) of Phone X was updated to shipped by admin."
    );

    assert_eq!(notices.drain(), vec![Notice::success("Status updated")]);
}

#[tokio::test]
async fn test_failed_status_change_sends_nothing() {
    let (backend, _dir, notices, mut console) = with_carts_loaded().await;
    backend.fail_route(routes::CHANGE_CART_STATUS);
    let id = CartId::new("c1");

    assert!(console.set_cart_status(&id, CartStatus::Cancelled).await.is_err());

    assert_eq!(console.state().cart(&id).unwrap().status, CartStatus::Processing);
    assert!(backend.created_notifications().is_empty());
    assert_eq!(notices.drain(), vec![Notice::error("Request failed on server")]);
}

#[tokio::test]
async fn test_failed_notification_does_not_undo_status_change() {
    let (backend, _dir, notices, mut console) = with_carts_loaded().await;
    backend.fail_route(routes::CREATE_NOTIFICATION);
    let id = CartId::new("c1");

    let outcome = console.set_cart_status(&id, CartStatus::Shipped).await.unwrap();

    assert!(matches!(outcome.notification, NotificationDelivery::Failed(_)));
    assert_eq!(console.state().cart(&id).unwrap().status, CartStatus::Shipped);
    assert_eq!(
        notices.drain(),
        vec![
            Notice::success("Status updated"),
            Notice::error("Request failed on server"),
        ]
    );
}

#[tokio::test]
async fn test_delete_cart_removes_it_and_notifies_owner() {
    let (backend, _dir, _notices, mut console) = with_carts_loaded().await;

    let outcome = console.delete_cart(&CartId::new("c1")).await.unwrap();
    assert!(outcome.notification.is_sent());

    assert_eq!(backend.requests_to(routes::DELETE_CART)[0].path, "api/admin/delete-cart/c1");
    let ids: Vec<&str> = console.state().carts().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["c2"]);

    let sent = backend.created_notifications();
    assert_eq!(sent.len(), 1);
    let text = sent[0]["text"].as_str().unwrap();
    assert!(text.contains("Phone X"));
    assert!(text.contains("2 item(s)"));
    assert!(text.ends_with("you ordered has been deleted by admin."));
}

#[tokio::test]
async fn test_unknown_cart_is_rejected_without_notification() {
    let (backend, _dir, _notices, mut console) = with_carts_loaded().await;

    // The backend rejects it, so nothing else happens
    assert!(
        console
            .set_cart_status(&CartId::new("nope"), CartStatus::Shipped)
            .await
            .is_err()
    );
    assert!(backend.created_notifications().is_empty());
}
