//! Configuration management for the `wspotify` command-line tool.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Environment variables that are already
//! set take precedence over the file.
//!
//! | Variable | Required | Meaning |
//! |---|---|---|
//! | `SPOTIFY_CLIENT_ID` | yes | application client id |
//! | `SPOTIFY_CLIENT_SECRET` | no | enables the client credentials flow |
//! | `SPOTIFY_REDIRECT_URI` | for `auth` | redirect registered with the application |
//! | `SPOTIFY_SCOPES` | no | space separated scopes requested during `auth` |
//! | `SPOTIFY_REFRESH_TOKEN` | no | resumes a user session obtained with `auth` |
//! | `SPOTIFY_MARKET` | no | default market (2 letter country code) |
//! | `SERVER_ADDRESS` | no | bind address of the redirect catcher |

use std::{env, path::PathBuf};

use crate::{
    auth::{Scope, parse_scopes},
    error::{Error, Result},
};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file lives at:
/// - Linux: `~/.local/share/wspotify/.env`
/// - macOS: `~/Library/Application Support/wspotify/.env`
/// - Windows: `%LOCALAPPDATA%/wspotify/.env`
///
/// A missing file is fine; a file that cannot be parsed is an error.
pub async fn load_env() -> Result<()> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::Config(e.to_string()))?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| Error::Config(e.to_string()))?;
    }
    Ok(())
}

pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("wspotify/.env");
    path
}

#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
    pub scopes: Vec<Scope>,
    pub refresh_token: Option<String>,
    pub market: Option<String>,
    pub server_address: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let scopes = match optional("SPOTIFY_SCOPES") {
            Some(value) => parse_scopes(&value).map_err(Error::Config)?,
            None => Vec::new(),
        };

        Ok(Self {
            client_id: required("SPOTIFY_CLIENT_ID")?,
            client_secret: optional("SPOTIFY_CLIENT_SECRET"),
            redirect_uri: optional("SPOTIFY_REDIRECT_URI"),
            scopes,
            refresh_token: optional("SPOTIFY_REFRESH_TOKEN"),
            market: optional("SPOTIFY_MARKET"),
            server_address: optional("SERVER_ADDRESS")
                .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string()),
        })
    }

    pub fn redirect_uri(&self) -> Result<&str> {
        self.redirect_uri
            .as_deref()
            .ok_or_else(|| Error::Config("SPOTIFY_REDIRECT_URI must be set".to_string()))
    }
}

fn required(key: &str) -> Result<String> {
    optional(key).ok_or_else(|| Error::Config(format!("{} must be set", key)))
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
