use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// An access token issued by the token endpoint.
///
/// Tokens are never updated in place. A refresh produces a new `Token` which
/// replaces the old one inside its flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl Token {
    pub fn new(access_token: impl Into<String>, expires_in: i64) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: "Bearer".to_string(),
            scope: None,
            created_at: Utc::now(),
            expires_in,
            refresh_token: None,
        }
    }

    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// `None` when `expires_in` lies beyond the representable time range.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        TimeDelta::try_seconds(self.expires_in)
            .and_then(|lifetime| self.created_at.checked_add_signed(lifetime))
    }

    /// Whether the token is still usable at `now`. The expiry instant itself
    /// already counts as expired.
    pub fn valid_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at() {
            Some(expires_at) => now < expires_at,
            // out of range: a positive lifetime never ends, a negative one has ended
            None => self.expires_in > 0,
        }
    }

    pub fn valid(&self) -> bool {
        self.valid_at(Utc::now())
    }
}
