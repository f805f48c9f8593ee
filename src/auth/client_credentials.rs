use reqwest::Client;

use crate::{
    auth::{SPOTIFY_TOKEN_URL, Token, request_token},
    error::{Error, Result},
};

/// Client credentials grant for server-to-server calls.
///
/// Only endpoints that do not touch user data are reachable with the
/// resulting token.
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    client_id: String,
    client_secret: String,
    token_url: String,
    token: Option<Token>,
    http: Client,
}

impl ClientCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_url: SPOTIFY_TOKEN_URL.to_string(),
            token: None,
            http: Client::new(),
        }
    }

    /// Starts from an already issued token, e.g. one kept by the caller.
    pub fn with_token(mut self, token: Token) -> Self {
        self.token = Some(token);
        self
    }

    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub async fn obtain_token(&mut self) -> Result<&Token> {
        let token = request_token(
            &self.http,
            &self.token_url,
            &[("grant_type", "client_credentials")],
            Some((self.client_id.as_str(), self.client_secret.as_str())),
        )
        .await?;

        Ok(&*self.token.insert(token))
    }

    /// No refresh token is issued for this grant: an expired (or missing)
    /// token is replaced by requesting a new one.
    pub async fn refresh_token(&mut self) -> Result<&Token> {
        if self.token.as_ref().is_some_and(Token::valid) {
            return self.token.as_ref().ok_or(Error::NoTokenAvailable);
        }

        self.obtain_token().await
    }
}
