//! Error taxonomy shared by the authorization flows and the resource client.

use serde_json::Value;

use crate::auth::Scope;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The token endpoint rejected a grant.
    #[error("unable to fetch access token: {0}")]
    TokenExchangeFailed(String),

    /// A refresh was requested without a token or an explicit refresh token.
    #[error("access token not found, use an authorization flow to fetch one")]
    NoTokenAvailable,

    /// The user (or the authorization server) refused the authorize request.
    #[error("user authorization failed: {0}")]
    AuthorizationDenied(String),

    #[error("state parsed from the redirect URI does not match the initial state")]
    StateMismatch,

    /// The operation needs user scopes but the flow carries none.
    #[error("operation is not supported by this authorization flow")]
    UnsupportedOperation,

    #[error("authorization flow is missing the following scopes: {}", format_scopes(.0))]
    IncompleteScopes(Vec<Scope>),

    /// A resource endpoint answered with a non-2xx status.
    #[error("remote request failed: {0}")]
    RemoteRequestFailed(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("configuration error: {0}")]
    Config(String),
}

fn format_scopes(scopes: &[Scope]) -> String {
    scopes
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Pulls the server-reported reason out of an error body.
///
/// The token endpoint answers `{"error": "invalid_grant", ...}` while the
/// resource endpoints answer `{"error": {"status": 401, "message": "..."}}`.
/// Anything else falls back to `"unknown"`.
pub(crate) fn error_detail(body: &[u8]) -> String {
    let Ok(json) = serde_json::from_slice::<Value>(body) else {
        return "unknown".to_string();
    };

    match json.get("error") {
        Some(Value::String(reason)) => reason.clone(),
        Some(Value::Object(obj)) => obj
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string(),
        _ => "unknown".to_string(),
    }
}
