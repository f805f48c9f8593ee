//! # Authorization
//!
//! OAuth 2.0 flows supported by the Spotify accounts service:
//!
//! - [`ClientCredentials`] - server-to-server, no user context, no scopes
//! - [`AuthorizationCode`] - user authorization with a confidential client secret
//! - [`AuthorizationCodePkce`] - user authorization for public clients, proven
//!   with a code verifier instead of a secret
//!
//! Every flow owns at most one [`Token`]. A refresh replaces it with a new
//! value; a still-valid token is returned as is without touching the network.
//!
//! [`AuthorizationFlow`] is the tagged union the resource client works with.

mod authorization_code;
mod authorization_code_pkce;
mod client_credentials;
mod scope;
mod token;

pub use authorization_code::AuthorizationCode;
pub use authorization_code_pkce::AuthorizationCodePkce;
pub use client_credentials::ClientCredentials;
pub use scope::{Scope, check_scopes, join_scopes, parse_scopes};
pub use token::Token;

use reqwest::Client;
use url::Url;

use crate::error::{Error, Result, error_detail};

pub const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const SPOTIFY_AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";

#[derive(Debug, Clone)]
pub enum AuthorizationFlow {
    ClientCredentials(ClientCredentials),
    AuthorizationCode(AuthorizationCode),
    AuthorizationCodePkce(AuthorizationCodePkce),
}

impl AuthorizationFlow {
    pub fn client_id(&self) -> &str {
        match self {
            Self::ClientCredentials(flow) => flow.client_id(),
            Self::AuthorizationCode(flow) => flow.client_id(),
            Self::AuthorizationCodePkce(flow) => flow.client_id(),
        }
    }

    pub fn token(&self) -> Option<&Token> {
        match self {
            Self::ClientCredentials(flow) => flow.token(),
            Self::AuthorizationCode(flow) => flow.token(),
            Self::AuthorizationCodePkce(flow) => flow.token(),
        }
    }

    /// Scopes granted to the flow, `None` for flows without a user context.
    pub fn scopes(&self) -> Option<&[Scope]> {
        match self {
            Self::ClientCredentials(_) => None,
            Self::AuthorizationCode(flow) => Some(flow.scopes()),
            Self::AuthorizationCodePkce(flow) => Some(flow.scopes()),
        }
    }

    /// Refreshes the flow's token if it has expired.
    ///
    /// Client credentials issue no refresh token, so for them a refresh is a
    /// new `client_credentials` grant and `explicit_refresh_token` is ignored.
    pub async fn refresh_token(&mut self, explicit_refresh_token: Option<&str>) -> Result<&Token> {
        match self {
            Self::ClientCredentials(flow) => flow.refresh_token().await,
            Self::AuthorizationCode(flow) => flow.refresh_token(explicit_refresh_token).await,
            Self::AuthorizationCodePkce(flow) => flow.refresh_token(explicit_refresh_token).await,
        }
    }

    pub fn authorization_url(&self) -> Result<Url> {
        match self {
            Self::ClientCredentials(_) => Err(Error::UnsupportedOperation),
            Self::AuthorizationCode(flow) => flow.authorization_url(),
            Self::AuthorizationCodePkce(flow) => flow.authorization_url(),
        }
    }

    pub fn parse_redirect_uri(&self, uri: &str) -> Result<String> {
        match self {
            Self::ClientCredentials(_) => Err(Error::UnsupportedOperation),
            Self::AuthorizationCode(flow) => flow.parse_redirect_uri(uri),
            Self::AuthorizationCodePkce(flow) => flow.parse_redirect_uri(uri),
        }
    }

    /// Exchanges a one-time authorization code for a token.
    pub async fn exchange_code(&mut self, code: &str) -> Result<&Token> {
        match self {
            Self::ClientCredentials(_) => Err(Error::UnsupportedOperation),
            Self::AuthorizationCode(flow) => flow.obtain_token(code).await,
            Self::AuthorizationCodePkce(flow) => flow.obtain_token(code).await,
        }
    }
}

impl From<ClientCredentials> for AuthorizationFlow {
    fn from(flow: ClientCredentials) -> Self {
        Self::ClientCredentials(flow)
    }
}

impl From<AuthorizationCode> for AuthorizationFlow {
    fn from(flow: AuthorizationCode) -> Self {
        Self::AuthorizationCode(flow)
    }
}

impl From<AuthorizationCodePkce> for AuthorizationFlow {
    fn from(flow: AuthorizationCodePkce) -> Self {
        Self::AuthorizationCodePkce(flow)
    }
}

/// Posts a grant to the token endpoint.
///
/// `basic` carries the client id and secret for confidential clients; public
/// clients put their id in the form instead.
pub(crate) async fn request_token(
    http: &Client,
    token_url: &str,
    form: &[(&str, &str)],
    basic: Option<(&str, &str)>,
) -> Result<Token> {
    let mut request = http.post(token_url).form(form);
    if let Some((client_id, client_secret)) = basic {
        request = request.basic_auth(client_id, Some(client_secret));
    }

    let response = request.send().await?;
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        return Err(Error::TokenExchangeFailed(error_detail(&body)));
    }

    Ok(serde_json::from_slice(&body)?)
}

/// Decides which refresh token to use, or `None` if `current` is still valid.
pub(crate) fn refresh_credential(
    current: Option<&Token>,
    explicit: Option<&str>,
) -> Result<Option<String>> {
    match (current, explicit) {
        (None, None) => Err(Error::NoTokenAvailable),
        (Some(token), _) if token.valid() => Ok(None),
        (_, Some(explicit)) => Ok(Some(explicit.to_string())),
        (Some(token), None) => token
            .refresh_token
            .clone()
            .map(Some)
            .ok_or(Error::NoTokenAvailable),
    }
}

/// The accounts service may omit `refresh_token` on refresh; the old one stays usable.
pub(crate) fn carry_refresh_token(mut token: Token, used: String) -> Token {
    if token.refresh_token.is_none() {
        token.refresh_token = Some(used);
    }
    token
}
