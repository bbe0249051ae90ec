// Identity flows: one-time sign-up gating, credential checks, session
// lifecycle, and password-reset dispatch.

use std::sync::Arc;

use reeltally::modules::accounts::repositories::AccountRepository;
use reeltally::modules::accounts::services::{AuthService, Identity, Mailer, SessionRegistry};
use reeltally::store::{DocumentStore, MemoryStore};

use reeltally::core::Result;

struct RecordingMailer {
    sent: std::sync::Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl Mailer for RecordingMailer {
    async fn send_password_reset(&self, email: &str) -> Result<()> {
        self.sent.lock().unwrap().push(email.to_string());
        Ok(())
    }
}

fn service() -> (AuthService, SessionRegistry, Arc<RecordingMailer>) {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let sessions = SessionRegistry::new();
    let mailer = Arc::new(RecordingMailer {
        sent: std::sync::Mutex::new(Vec::new()),
    });
    let auth = AuthService::new(
        AccountRepository::new(store),
        sessions.clone(),
        mailer.clone(),
    );
    (auth, sessions, mailer)
}

#[tokio::test]
async fn test_sign_up_is_open_exactly_once() {
    let (auth, _, _) = service();

    assert!(auth.sign_up_allowed().await.unwrap());
    auth.sign_up("admin@example.com", "a strong password")
        .await
        .unwrap();

    assert!(!auth.sign_up_allowed().await.unwrap());
    let second = auth.sign_up("other@example.com", "another password").await;
    assert!(second.is_err());
    assert!(second
        .unwrap_err()
        .to_string()
        .contains("Sign-up is disabled"));
}

#[tokio::test]
async fn test_sign_in_issues_an_admin_session() {
    let (auth, sessions, _) = service();
    let account_id = auth
        .sign_up("admin@example.com", "a strong password")
        .await
        .unwrap();

    let (token, signed_in_id) = auth
        .sign_in("admin@example.com", "a strong password")
        .await
        .unwrap();
    assert_eq!(signed_in_id, account_id);

    match sessions.resolve(&token) {
        Some(Identity::Admin { account_id: id }) => assert_eq!(id, account_id),
        other => panic!("expected admin identity, got {:?}", other),
    }
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_are_rejected() {
    let (auth, _, _) = service();
    auth.sign_up("admin@example.com", "a strong password")
        .await
        .unwrap();

    assert!(auth
        .sign_in("admin@example.com", "wrong password")
        .await
        .is_err());
    assert!(auth
        .sign_in("nobody@example.com", "a strong password")
        .await
        .is_err());
}

#[tokio::test]
async fn test_sign_out_revokes_the_session() {
    let (auth, sessions, _) = service();
    auth.sign_up("admin@example.com", "a strong password")
        .await
        .unwrap();
    let (token, _) = auth
        .sign_in("admin@example.com", "a strong password")
        .await
        .unwrap();

    auth.sign_out(&token);
    auth.sign_out(&token); // idempotent
    assert!(sessions.resolve(&token).is_none());
}

#[tokio::test]
async fn test_short_passwords_are_rejected_before_any_write() {
    let (auth, _, _) = service();

    assert!(auth.sign_up("admin@example.com", "short").await.is_err());
    // Nothing was created, so sign-up is still open.
    assert!(auth.sign_up_allowed().await.unwrap());
}

#[tokio::test]
async fn test_password_reset_dispatches_through_the_mailer() {
    let (auth, _, mailer) = service();
    auth.sign_up("admin@example.com", "a strong password")
        .await
        .unwrap();

    auth.send_password_reset("admin@example.com").await.unwrap();
    assert_eq!(
        mailer.sent.lock().unwrap().as_slice(),
        ["admin@example.com".to_string()]
    );

    // Unknown addresses surface as not-found, nothing is sent.
    assert!(auth.send_password_reset("nobody@example.com").await.is_err());
    assert_eq!(mailer.sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_freelancer_sessions_are_read_scoped_identities() {
    let (auth, sessions, _) = service();

    let token = auth.open_freelancer_session("admin-1".to_string(), "Jane Doe".to_string());
    match sessions.resolve(&token) {
        Some(Identity::Freelancer {
            admin_id,
            freelancer_name,
        }) => {
            assert_eq!(admin_id, "admin-1");
            assert_eq!(freelancer_name, "Jane Doe");
        }
        other => panic!("expected freelancer identity, got {:?}", other),
    }
}
