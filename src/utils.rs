use std::collections::HashMap;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};
use url::Url;

use crate::error::{Error, Result};

/// Length of the PKCE code verifier. RFC 7636 allows 43 to 128 characters.
pub const CODE_VERIFIER_LENGTH: usize = 64;

pub fn generate_random_string(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

pub fn generate_code_verifier() -> String {
    generate_random_string(CODE_VERIFIER_LENGTH)
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

fn query_params(uri: &str) -> Result<HashMap<String, String>> {
    let url = Url::parse(uri)?;
    // first occurrence wins
    let mut params = HashMap::new();
    for (key, value) in url.query_pairs() {
        params
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    Ok(params)
}

/// Extracts the authorization code from the URI the user agent was redirected to.
///
/// A redirect without `code` is a denial, reported with the server's `error`
/// value. A `state` parameter, when present, must match `expected_state`; a
/// redirect that omits `state` altogether is accepted.
pub fn parse_redirect_uri(uri: &str, expected_state: Option<&str>) -> Result<String> {
    let mut params = query_params(uri)?;

    let Some(code) = params.remove("code").filter(|c| !c.is_empty()) else {
        let reason = params
            .remove("error")
            .unwrap_or_else(|| "unknown".to_string());
        return Err(Error::AuthorizationDenied(reason));
    };

    if let Some(state) = params.get("state") {
        if expected_state != Some(state.as_str()) {
            return Err(Error::StateMismatch);
        }
    }

    Ok(code)
}
