//! # CLI Module
//!
//! Command implementations for the `wspotify` binary. Each command connects to
//! the Web API through [`connect`], runs one library operation behind a
//! spinner and prints the result as a table.
//!
//! ## Authentication
//!
//! - [`auth`] - PKCE authorization in the browser; prints the refresh token to
//!   store as `SPOTIFY_REFRESH_TOKEN`
//!
//! Other commands pick their flow from the configuration: a refresh token
//! resumes the user session (PKCE refresh), otherwise a client secret enables
//! client credentials, which only reach catalog endpoints.
//!
//! ## Catalog
//!
//! - [`album`], [`albums`], [`tracks`], [`new_releases`]
//! - [`artist`], [`artist_albums`]
//!
//! ## Library
//!
//! - [`saved_albums`]

mod albums;
mod artists;
mod auth;

pub use albums::album;
pub use albums::albums;
pub use albums::new_releases;
pub use albums::saved_albums;
pub use albums::tracks;
pub use artists::artist;
pub use artists::artist_albums;
pub use auth::auth;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    ApiReference, Res,
    auth::{AuthorizationCodePkce, AuthorizationFlow, ClientCredentials},
    config::Config,
    paginate::Limit,
};

/// Builds a client with a fresh token for the configured flow.
pub async fn connect(config: &Config) -> Res<ApiReference> {
    if let Some(refresh_token) = &config.refresh_token {
        let pkce = AuthorizationCodePkce::new(
            &config.client_id,
            config.redirect_uri.clone().unwrap_or_default(),
        )
        .with_scopes(config.scopes.iter().copied());

        let mut flow = AuthorizationFlow::from(pkce);
        flow.refresh_token(Some(refresh_token.as_str())).await?;
        return Ok(ApiReference::new(flow));
    }

    if let Some(client_secret) = &config.client_secret {
        let mut flow = ClientCredentials::new(&config.client_id, client_secret);
        flow.obtain_token().await?;
        return Ok(ApiReference::new(flow));
    }

    Err("Neither SPOTIFY_REFRESH_TOKEN nor SPOTIFY_CLIENT_SECRET is set. Run wspotify auth.".into())
}

pub fn limit(all: bool, limit: u32) -> Limit {
    if all { Limit::All } else { Limit::Count(limit) }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
