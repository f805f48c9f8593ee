use reqwest::Client;
use url::Url;

use crate::{
    auth::{
        SPOTIFY_AUTHORIZE_URL, SPOTIFY_TOKEN_URL, Scope, Token, carry_refresh_token,
        join_scopes, refresh_credential, request_token,
    },
    error::{Error, Result},
    utils,
};

/// Authorization code grant for long-running applications that can keep a
/// client secret. The user grants permission once; afterwards the refresh
/// token keeps the access token alive.
#[derive(Debug, Clone)]
pub struct AuthorizationCode {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    state: Option<String>,
    scopes: Vec<Scope>,
    show_dialog: bool,
    authorize_url: String,
    token_url: String,
    token: Option<Token>,
    http: Client,
}

impl AuthorizationCode {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            state: None,
            scopes: Vec::new(),
            show_dialog: false,
            authorize_url: SPOTIFY_AUTHORIZE_URL.to_string(),
            token_url: SPOTIFY_TOKEN_URL.to_string(),
            token: None,
            http: Client::new(),
        }
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_scopes(mut self, scopes: impl IntoIterator<Item = Scope>) -> Self {
        self.scopes = scopes.into_iter().collect();
        self
    }

    pub fn with_show_dialog(mut self, show_dialog: bool) -> Self {
        self.show_dialog = show_dialog;
        self
    }

    pub fn with_authorize_url(mut self, authorize_url: impl Into<String>) -> Self {
        self.authorize_url = authorize_url.into();
        self
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

    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// URL the user has to visit to grant access.
    pub fn authorization_url(&self) -> Result<Url> {
        let mut params = vec![
            ("client_id", self.client_id.clone()),
            ("response_type", "code".to_string()),
            ("redirect_uri", self.redirect_uri.clone()),
        ];
        if let Some(state) = &self.state {
            params.push(("state", state.clone()));
        }
        if !self.scopes.is_empty() {
            params.push(("scope", join_scopes(&self.scopes)));
        }
        if self.show_dialog {
            params.push(("show_dialog", "true".to_string()));
        }

        Ok(Url::parse_with_params(&self.authorize_url, &params)?)
    }

    pub fn parse_redirect_uri(&self, uri: &str) -> Result<String> {
        utils::parse_redirect_uri(uri, self.state.as_deref())
    }

    pub async fn obtain_token(&mut self, code: &str) -> Result<&Token> {
        let token = request_token(
            &self.http,
            &self.token_url,
            &[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
            ],
            Some((self.client_id.as_str(), self.client_secret.as_str())),
        )
        .await?;

        Ok(&*self.token.insert(token))
    }

    /// Obtains a new access token without asking the user again.
    ///
    /// `explicit_refresh_token` takes precedence over the refresh token of
    /// the current token, which allows resuming a session from a stored
    /// refresh token.
    pub async fn refresh_token(&mut self, explicit_refresh_token: Option<&str>) -> Result<&Token> {
        let Some(refresh_token) = refresh_credential(self.token.as_ref(), explicit_refresh_token)?
        else {
            return self.token.as_ref().ok_or(Error::NoTokenAvailable);
        };

        let token = request_token(
            &self.http,
            &self.token_url,
            &[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token.as_str()),
            ],
            Some((self.client_id.as_str(), self.client_secret.as_str())),
        )
        .await?;

        Ok(&*self.token.insert(carry_refresh_token(token, refresh_token)))
    }
}
