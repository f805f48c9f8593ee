use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    auth::{AuthorizationFlow, Scope, check_scopes},
    batch::BatchChunker,
    error::{Error, Result, error_detail},
    paginate::PaginationEngine,
};

pub const SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";

/// Upper bound of sub-requests in flight for a single fan-out.
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Base client for the Web API resources.
///
/// Owns the authorization flow. Every resource operation first calls
/// [`ApiReference::ensure_valid_token`], which hands out a [`Requester`]
/// bound to the token that was valid at that moment. All sub-requests of a
/// fan-out share that one token; nothing in flight ever sees a header change.
#[derive(Debug, Clone)]
pub struct ApiReference {
    flow: AuthorizationFlow,
    http: Client,
    base_url: String,
    max_concurrency: usize,
}

impl ApiReference {
    pub fn new(flow: impl Into<AuthorizationFlow>) -> Self {
        Self {
            flow: flow.into(),
            http: Client::new(),
            base_url: SPOTIFY_API_URL.to_string(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn flow(&self) -> &AuthorizationFlow {
        &self.flow
    }

    pub fn flow_mut(&mut self) -> &mut AuthorizationFlow {
        &mut self.flow
    }

    pub fn into_flow(self) -> AuthorizationFlow {
        self.flow
    }

    pub fn check_scopes(&self, required: &[Scope]) -> Result<()> {
        check_scopes(&self.flow, required)
    }

    /// Refreshes an expired token and returns a requester for the current one.
    pub async fn ensure_valid_token(&mut self) -> Result<Requester> {
        let expired = !self.flow.token().ok_or(Error::NoTokenAvailable)?.valid();
        if expired {
            self.flow.refresh_token(None).await?;
        }

        let token = self.flow.token().ok_or(Error::NoTokenAvailable)?;
        Ok(Requester {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            access_token: token.access_token.clone(),
        })
    }

    pub(crate) fn paginator<'a>(&self, requester: &'a Requester) -> PaginationEngine<'a> {
        PaginationEngine::new(requester, self.max_concurrency)
    }

    pub(crate) fn batcher<'a>(&self, requester: &'a Requester, size: usize) -> BatchChunker<'a> {
        BatchChunker::new(requester, size, self.max_concurrency)
    }
}

/// Issues requests against the API with one fixed bearer token.
#[derive(Debug, Clone)]
pub struct Requester {
    http: Client,
    base_url: String,
    access_token: String,
}

impl Requester {
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            access_token: access_token.into(),
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(self.url(path)).bearer_auth(&self.access_token)
    }

    pub fn put(&self, path: &str) -> RequestBuilder {
        self.http.put(self.url(path)).bearer_auth(&self.access_token)
    }

    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.http.delete(self.url(path)).bearer_auth(&self.access_token)
    }

    /// Sends `request` and decodes the body as JSON.
    ///
    /// A non-2xx status always becomes [`Error::RemoteRequestFailed`] carrying
    /// the server's `error` detail. An empty success body decodes to `null`.
    pub async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(Error::RemoteRequestFailed(error_detail(&body)));
        }

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let body = self.send(request).await?;
        Ok(serde_json::from_value(body)?)
    }
}

pub(crate) fn market_params(market: Option<&str>) -> Vec<(String, String)> {
    market
        .map(|m| vec![("market".to_string(), m.to_string())])
        .unwrap_or_default()
}
