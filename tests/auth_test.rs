mod common;

use chrono::{Duration, Utc};
use common::*;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{basic_auth, body_string_contains, method, path},
};
use wspotify::{
    Error,
    auth::{
        AuthorizationCode, AuthorizationCodePkce, AuthorizationFlow, ClientCredentials, Scope,
        Token,
    },
    utils::generate_code_challenge,
};

const REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";

fn expired_token(refresh_token: &str) -> Token {
    Token::new("expired-access-token", 3600)
        .with_created_at(Utc::now() - Duration::hours(2))
        .with_refresh_token(refresh_token)
}

fn token_url(server: &MockServer) -> String {
    format!("{}/api/token", server.uri())
}

#[tokio::test]
async fn test_client_credentials_obtain_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(basic_auth("client-id", "client-secret"))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ok_json(token_body("app-token", None)))
        .expect(1)
        .mount(&server)
        .await;

    let mut flow = ClientCredentials::new("client-id", "client-secret").with_token_url(token_url(&server));
    let token = flow.obtain_token().await.unwrap();

    assert_eq!(token.access_token, "app-token");
    assert!(token.valid());
    assert_eq!(flow.token().map(|t| t.access_token.as_str()), Some("app-token"));
}

#[tokio::test]
async fn test_client_credentials_refresh_with_valid_token_is_offline() {
    let server = MockServer::start().await;

    let mut flow: AuthorizationFlow = ClientCredentials::new("client-id", "client-secret")
        .with_token(Token::new("still-valid", 3600))
        .with_token_url(token_url(&server))
        .into();

    let first = flow.refresh_token(None).await.unwrap().clone();
    let second = flow.refresh_token(Some("ignored")).await.unwrap().clone();

    assert_eq!(first, second);
    assert_eq!(first.access_token, "still-valid");
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn test_client_credentials_refresh_without_token_requests_one() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ok_json(token_body("fresh-app-token", None)))
        .expect(1)
        .mount(&server)
        .await;

    let mut flow: AuthorizationFlow = ClientCredentials::new("client-id", "client-secret")
        .with_token_url(token_url(&server))
        .into();

    let token = flow.refresh_token(None).await.unwrap();
    assert_eq!(token.access_token, "fresh-app-token");
}

#[tokio::test]
async fn test_authorization_code_exchange() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(basic_auth("client-id", "client-secret"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=one-time-code"))
        .respond_with(ok_json(token_body("user-token", Some("user-refresh"))))
        .expect(1)
        .mount(&server)
        .await;

    let mut flow: AuthorizationFlow =
        AuthorizationCode::new("client-id", "client-secret", REDIRECT_URI)
            .with_token_url(token_url(&server))
            .into();

    let token = flow.exchange_code("one-time-code").await.unwrap();
    assert_eq!(token.access_token, "user-token");
    assert_eq!(token.refresh_token.as_deref(), Some("user-refresh"));
}

#[tokio::test]
async fn test_token_exchange_failure_reports_reason() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_grant",
            "error_description": "Invalid authorization code"
        })))
        .mount(&server)
        .await;

    let mut flow = AuthorizationCode::new("client-id", "client-secret", REDIRECT_URI)
        .with_token_url(token_url(&server));

    match flow.obtain_token("bad-code").await {
        Err(Error::TokenExchangeFailed(reason)) => assert_eq!(reason, "invalid_grant"),
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(flow.token().is_none());
}

#[tokio::test]
async fn test_refresh_with_explicit_refresh_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(basic_auth("client-id", "client-secret"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=stored-refresh"))
        .respond_with(ok_json(token_body("resumed-token", None)))
        .expect(1)
        .mount(&server)
        .await;

    let mut flow = AuthorizationCode::new("client-id", "client-secret", REDIRECT_URI)
        .with_token_url(token_url(&server));

    let token = flow.refresh_token(Some("stored-refresh")).await.unwrap();
    assert_eq!(token.access_token, "resumed-token");
    // omitted by the server, so the one used stays
    assert_eq!(token.refresh_token.as_deref(), Some("stored-refresh"));
}

#[tokio::test]
async fn test_refresh_uses_current_refresh_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(body_string_contains("refresh_token=old-refresh"))
        .respond_with(ok_json(token_body("new-token", Some("rotated-refresh"))))
        .expect(1)
        .mount(&server)
        .await;

    let mut flow = AuthorizationCode::new("client-id", "client-secret", REDIRECT_URI)
        .with_token(expired_token("old-refresh"))
        .with_token_url(token_url(&server));

    let token = flow.refresh_token(None).await.unwrap();
    assert_eq!(token.access_token, "new-token");
    assert_eq!(token.refresh_token.as_deref(), Some("rotated-refresh"));
}

#[tokio::test]
async fn test_refresh_with_valid_token_makes_no_request() {
    let server = MockServer::start().await;

    let mut flow = AuthorizationCodePkce::new("client-id", REDIRECT_URI)
        .with_token(Token::new("valid-token", 3600).with_refresh_token("refresh"))
        .with_token_url(token_url(&server));

    for _ in 0..2 {
        let token = flow.refresh_token(None).await.unwrap();
        assert_eq!(token.access_token, "valid-token");
    }
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn test_refresh_without_any_token() {
    let server = MockServer::start().await;

    let mut flow = AuthorizationCode::new("client-id", "client-secret", REDIRECT_URI)
        .with_token_url(token_url(&server));
    assert!(matches!(
        flow.refresh_token(None).await,
        Err(Error::NoTokenAvailable)
    ));

    // expired and no refresh token to fall back on
    let mut flow = AuthorizationCodePkce::new("client-id", REDIRECT_URI)
        .with_token(Token::new("expired", 3600).with_created_at(Utc::now() - Duration::hours(2)))
        .with_token_url(token_url(&server));
    assert!(matches!(
        flow.refresh_token(None).await,
        Err(Error::NoTokenAvailable)
    ));

    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn test_pkce_exchange_sends_verifier_without_secret() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("client_id=client-id"))
        .and(body_string_contains("code_verifier=fixedverifier0123456789"))
        .respond_with(ok_json(token_body("pkce-token", Some("pkce-refresh"))))
        .expect(1)
        .mount(&server)
        .await;

    let mut flow = AuthorizationCodePkce::new("client-id", REDIRECT_URI)
        .with_code_verifier("fixedverifier0123456789")
        .with_token_url(token_url(&server));

    let token = flow.obtain_token("one-time-code").await.unwrap();
    assert_eq!(token.access_token, "pkce-token");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_pkce_refresh_sends_client_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("client_id=client-id"))
        .and(body_string_contains("refresh_token=pkce-refresh"))
        .respond_with(ok_json(token_body("pkce-token-2", None)))
        .expect(1)
        .mount(&server)
        .await;

    let mut flow = AuthorizationCodePkce::new("client-id", REDIRECT_URI)
        .with_token(expired_token("pkce-refresh"))
        .with_token_url(token_url(&server));

    let token = flow.refresh_token(None).await.unwrap();
    assert_eq!(token.access_token, "pkce-token-2");
    assert_eq!(token.refresh_token.as_deref(), Some("pkce-refresh"));
}

#[test]
fn test_authorization_code_url() {
    let flow = AuthorizationCode::new("client-id", "client-secret", REDIRECT_URI)
        .with_state("xyz")
        .with_scopes([Scope::UserLibraryRead, Scope::UserTopRead])
        .with_show_dialog(true);

    let url = flow.authorization_url().unwrap();
    assert_eq!(url.host_str(), Some("accounts.spotify.com"));
    assert_eq!(url.path(), "/authorize");

    let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    let get = |key: &str| {
        query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    };

    assert_eq!(get("client_id"), Some("client-id"));
    assert_eq!(get("response_type"), Some("code"));
    assert_eq!(get("redirect_uri"), Some(REDIRECT_URI));
    assert_eq!(get("state"), Some("xyz"));
    assert_eq!(get("scope"), Some("user-library-read user-top-read"));
    assert_eq!(get("show_dialog"), Some("true"));
    assert_eq!(get("code_challenge"), None);
}

#[test]
fn test_pkce_authorization_url_carries_challenge() {
    let flow = AuthorizationCodePkce::new("client-id", REDIRECT_URI).with_state("xyz");

    let url = flow.authorization_url().unwrap();
    let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    let get = |key: &str| {
        query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.to_string())
    };

    let expected = generate_code_challenge(flow.code_verifier());
    assert_eq!(get("code_challenge_method").as_deref(), Some("S256"));
    assert_eq!(get("code_challenge"), Some(expected));
    assert_eq!(get("scope"), None);
    assert_eq!(get("show_dialog"), None);
}

#[test]
fn test_flow_redirect_parsing_uses_own_state() {
    let flow: AuthorizationFlow = AuthorizationCodePkce::new("client-id", REDIRECT_URI)
        .with_state("xyz")
        .into();

    assert_eq!(
        flow.parse_redirect_uri("http://127.0.0.1:8888/callback?code=c&state=xyz")
            .unwrap(),
        "c"
    );
    assert!(matches!(
        flow.parse_redirect_uri("http://127.0.0.1:8888/callback?code=c&state=abc"),
        Err(Error::StateMismatch)
    ));
}

#[test]
fn test_client_credentials_has_no_user_authorization() {
    let flow: AuthorizationFlow = ClientCredentials::new("client-id", "client-secret").into();

    assert!(flow.scopes().is_none());
    assert!(matches!(flow.authorization_url(), Err(Error::UnsupportedOperation)));
    assert!(matches!(
        flow.parse_redirect_uri("http://127.0.0.1:8888/callback?code=c"),
        Err(Error::UnsupportedOperation)
    ));
}
