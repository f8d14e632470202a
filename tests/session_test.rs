use std::time::Duration;

use chrono::{DateTime, Duration as TimeDelta, Utc};
use serde_json::json;
use tempfile::TempDir;
use toptify::session::{
    ACCESS_TOKEN_COOKIE, Credential, CredentialStore, EXPIRY_STORAGE_KEY, FileCredentialStore,
    REFRESH_TOKEN_COOKIE, SessionManager, TokenBackend,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn manager(root: &TempDir, server: &MockServer) -> SessionManager<FileCredentialStore> {
    SessionManager::new(
        FileCredentialStore::new(root.path()),
        TokenBackend::new(server.uri()),
    )
}

fn store(root: &TempDir) -> FileCredentialStore {
    FileCredentialStore::new(root.path())
}

async fn seed(root: &TempDir, access: &str, refresh: Option<&str>, expires_at: DateTime<Utc>) {
    let credential = Credential {
        access_token: Some(access.to_string()),
        refresh_token: refresh.map(ToString::to_string),
        expires_at: Some(expires_at),
    };
    store(root)
        .save(&credential)
        .await
        .expect("seed credential");
}

fn exchange_mock() -> Mock {
    Mock::given(method("POST"))
        .and(path("/getAccess"))
        .and(body_json(json!({ "authCode": "abc123" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "AT1",
            "refreshToken": "RT1",
            "expiresIn": 3600
        })))
}

#[tokio::test]
async fn resolve_without_code_or_session_is_absent_and_quiet() {
    let server = MockServer::start().await;
    let root = TempDir::new().expect("tempdir");
    let session = manager(&root, &server);

    assert_eq!(session.resolve_token(None).await, None);
    assert!(server.received_requests().await.expect("recording").is_empty());
}

#[tokio::test]
async fn code_exchange_persists_token_pair_and_expiry() {
    let server = MockServer::start().await;
    let root = TempDir::new().expect("tempdir");
    let session = manager(&root, &server);

    exchange_mock().expect(1).mount(&server).await;

    let before = Utc::now();
    let token = session.resolve_token(Some("abc123")).await;
    assert_eq!(token.as_deref(), Some("AT1"));

    let credential = store(&root).load().await.expect("load");
    assert_eq!(credential.access_token.as_deref(), Some("AT1"));
    assert_eq!(credential.refresh_token.as_deref(), Some("RT1"));

    // expiry is now + server-reported lifetime, no skew adjustment
    let expires_at = credential.expires_at.expect("expiry recorded");
    assert!(expires_at >= before + TimeDelta::seconds(3600));
    assert!(expires_at <= Utc::now() + TimeDelta::seconds(3600));
}

#[tokio::test]
async fn persisted_layout_matches_browser_storage() {
    let server = MockServer::start().await;
    let root = TempDir::new().expect("tempdir");
    let session = manager(&root, &server);

    exchange_mock().expect(1).mount(&server).await;
    session.resolve_token(Some("abc123")).await;

    let cookies: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(root.path().join("cookies.json")).expect("cookies.json"),
    )
    .expect("cookie document");
    assert_eq!(cookies[ACCESS_TOKEN_COOKIE]["value"], "AT1");
    assert_eq!(cookies[ACCESS_TOKEN_COOKIE]["path"], "/");
    assert_eq!(cookies[REFRESH_TOKEN_COOKIE]["value"], "RT1");
    assert_eq!(cookies[REFRESH_TOKEN_COOKIE]["path"], "/");

    let storage: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(root.path().join("storage.json")).expect("storage.json"),
    )
    .expect("storage document");
    let raw = storage[EXPIRY_STORAGE_KEY].as_str().expect("expiry entry");
    assert!(DateTime::parse_from_rfc3339(raw).is_ok());
}

#[tokio::test]
async fn successful_exchange_is_not_reissued() {
    let server = MockServer::start().await;
    let root = TempDir::new().expect("tempdir");
    let session = manager(&root, &server);

    exchange_mock().expect(1).mount(&server).await;

    assert_eq!(
        session.resolve_token(Some("abc123")).await.as_deref(),
        Some("AT1")
    );
    // same persisted state, code still present in the input: no second call
    assert_eq!(
        session.resolve_token(Some("abc123")).await.as_deref(),
        Some("AT1")
    );
    assert_eq!(server.received_requests().await.expect("recording").len(), 1);
}

#[tokio::test]
async fn expired_session_refreshes_and_keeps_refresh_token() {
    let server = MockServer::start().await;
    let root = TempDir::new().expect("tempdir");
    let session = manager(&root, &server);

    seed(&root, "AT1", Some("RT1"), Utc::now() - TimeDelta::minutes(10)).await;

    Mock::given(method("POST"))
        .and(path("/refresh"))
        .and(body_json(json!({ "refreshToken": "RT1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "AT2",
            "expiresIn": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(session.resolve_token(None).await.as_deref(), Some("AT2"));

    let credential = store(&root).load().await.expect("load");
    assert_eq!(credential.access_token.as_deref(), Some("AT2"));
    assert_eq!(credential.refresh_token.as_deref(), Some("RT1"));
    assert!(credential.expires_at.expect("expiry recorded") > Utc::now());
}

#[tokio::test]
async fn live_session_makes_no_network_call() {
    let server = MockServer::start().await;
    let root = TempDir::new().expect("tempdir");
    let session = manager(&root, &server);

    seed(&root, "AT1", Some("RT1"), Utc::now() + TimeDelta::minutes(10)).await;

    assert_eq!(session.resolve_token(None).await.as_deref(), Some("AT1"));
    // an authorization code is ignored while a token is persisted
    assert_eq!(
        session.resolve_token(Some("later-code")).await.as_deref(),
        Some("AT1")
    );
    assert!(server.received_requests().await.expect("recording").is_empty());
}

#[tokio::test]
async fn repeated_resolution_is_idempotent() {
    let server = MockServer::start().await;
    let root = TempDir::new().expect("tempdir");
    let session = manager(&root, &server);

    seed(&root, "AT1", Some("RT1"), Utc::now() + TimeDelta::minutes(10)).await;

    for _ in 0..3 {
        assert_eq!(session.resolve_token(None).await.as_deref(), Some("AT1"));
    }
    assert!(server.received_requests().await.expect("recording").is_empty());
}

#[tokio::test]
async fn logout_clears_all_persisted_state() {
    let server = MockServer::start().await;
    let root = TempDir::new().expect("tempdir");
    let session = manager(&root, &server);

    seed(&root, "AT1", Some("RT1"), Utc::now() + TimeDelta::minutes(10)).await;

    session.logout().await.expect("logout");

    assert_eq!(store(&root).load().await.expect("load"), Credential::default());
    assert!(!root.path().join("cookies.json").exists());
    assert!(!root.path().join("storage.json").exists());

    // a fresh resolution finds nothing to do
    assert_eq!(session.resolve_token(None).await, None);
    assert!(server.received_requests().await.expect("recording").is_empty());
}

#[tokio::test]
async fn failed_exchange_leaves_no_session() {
    let server = MockServer::start().await;
    let root = TempDir::new().expect("tempdir");
    let session = manager(&root, &server);

    Mock::given(method("POST"))
        .and(path("/getAccess"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(session.resolve_token(Some("abc123")).await, None);
    assert_eq!(store(&root).load().await.expect("load"), Credential::default());
}

#[tokio::test]
async fn failed_refresh_keeps_stale_session() {
    let server = MockServer::start().await;
    let root = TempDir::new().expect("tempdir");
    let session = manager(&root, &server);

    seed(&root, "AT1", Some("RT1"), Utc::now() - TimeDelta::minutes(10)).await;

    Mock::given(method("POST"))
        .and(path("/refresh"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    // the stale token keeps being reported until a later refresh succeeds
    assert_eq!(session.resolve_token(None).await.as_deref(), Some("AT1"));

    let credential = store(&root).load().await.expect("load");
    assert_eq!(credential.access_token.as_deref(), Some("AT1"));
    assert_eq!(credential.refresh_token.as_deref(), Some("RT1"));
    assert!(credential.is_expired());
}

#[tokio::test]
async fn concurrent_triggers_fire_a_single_exchange() {
    let server = MockServer::start().await;
    let root = TempDir::new().expect("tempdir");
    let session = manager(&root, &server);

    Mock::given(method("POST"))
        .and(path("/getAccess"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "accessToken": "AT1",
                    "refreshToken": "RT1",
                    "expiresIn": 3600
                }))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (first, second) = tokio::join!(
        session.resolve_token(Some("abc123")),
        session.resolve_token(Some("abc123"))
    );

    assert_eq!(server.received_requests().await.expect("recording").len(), 1);

    // one cycle completed the exchange; the overlapping one reported the
    // token as persisted before the result landed
    assert!([&first, &second]
        .iter()
        .any(|token| token.as_deref() == Some("AT1")));

    let credential = store(&root).load().await.expect("load");
    assert_eq!(credential.access_token.as_deref(), Some("AT1"));
}

#[tokio::test]
async fn refresh_requires_a_stored_refresh_token() {
    let server = MockServer::start().await;
    let root = TempDir::new().expect("tempdir");
    let session = manager(&root, &server);

    // expiry is in the past but there is nothing to present to the backend
    seed(&root, "AT1", None, Utc::now() - TimeDelta::minutes(10)).await;

    assert_eq!(session.resolve_token(None).await.as_deref(), Some("AT1"));
    assert!(server.received_requests().await.expect("recording").is_empty());
}

#[tokio::test]
async fn missing_expiry_never_refreshes() {
    let server = MockServer::start().await;
    let root = TempDir::new().expect("tempdir");
    let session = manager(&root, &server);

    let credential = Credential {
        access_token: Some("AT1".to_string()),
        refresh_token: Some("RT1".to_string()),
        expires_at: None,
    };
    store(&root).save(&credential).await.expect("seed credential");

    assert_eq!(session.resolve_token(None).await.as_deref(), Some("AT1"));
    assert!(server.received_requests().await.expect("recording").is_empty());
}
