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

/// Authorization code grant with PKCE, for clients that cannot keep a secret.
///
/// The code verifier is generated on construction; its SHA-256 challenge is
/// sent with the authorize request and the verifier itself with the code
/// exchange.
#[derive(Debug, Clone)]
pub struct AuthorizationCodePkce {
    client_id: String,
    redirect_uri: String,
    state: Option<String>,
    scopes: Vec<Scope>,
    code_verifier: String,
    code_challenge: String,
    authorize_url: String,
    token_url: String,
    token: Option<Token>,
    http: Client,
}

impl AuthorizationCodePkce {
    pub fn new(client_id: impl Into<String>, redirect_uri: impl Into<String>) -> Self {
        let code_verifier = utils::generate_code_verifier();
        let code_challenge = utils::generate_code_challenge(&code_verifier);

        Self {
            client_id: client_id.into(),
            redirect_uri: redirect_uri.into(),
            state: None,
            scopes: Vec::new(),
            code_verifier,
            code_challenge,
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

    /// Replaces the generated verifier, e.g. when resuming an authorize
    /// request started by another process.
    pub fn with_code_verifier(mut self, code_verifier: impl Into<String>) -> Self {
        self.code_verifier = code_verifier.into();
        self.code_challenge = utils::generate_code_challenge(&self.code_verifier);
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

    pub fn code_verifier(&self) -> &str {
        &self.code_verifier
    }

    pub fn code_challenge(&self) -> &str {
        &self.code_challenge
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn authorization_url(&self) -> Result<Url> {
        let mut params = vec![
            ("client_id", self.client_id.clone()),
            ("response_type", "code".to_string()),
            ("redirect_uri", self.redirect_uri.clone()),
            ("code_challenge_method", "S256".to_string()),
            ("code_challenge", self.code_challenge.clone()),
        ];
        if let Some(state) = &self.state {
            params.push(("state", state.clone()));
        }
        if !self.scopes.is_empty() {
            params.push(("scope", join_scopes(&self.scopes)));
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
                ("client_id", self.client_id.as_str()),
                ("code_verifier", self.code_verifier.as_str()),
            ],
            None,
        )
        .await?;

        Ok(&*self.token.insert(token))
    }

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
                ("client_id", self.client_id.as_str()),
            ],
            None,
        )
        .await?;

        Ok(&*self.token.insert(carry_refresh_token(token, refresh_token)))
    }
}
