//! Spotify Web API client library.
//!
//! Authenticates with one of the three OAuth 2.0 flows of the Spotify
//! accounts service, keeps the bearer token valid across calls and fetches
//! catalog and library resources. Collections longer than one page and ID
//! lists longer than one batch are fetched with concurrent requests and
//! merged back in catalog order.
//!
//! # Modules
//!
//! - `auth` - token, scopes and the authorization flows
//! - `client` - [`ApiReference`], the base client every resource call goes through
//! - `paginate` - concurrent offset pagination
//! - `batch` - concurrent multi-ID batching
//! - `types` - decoded response records
//! - `config`, `server`, `api`, `cli` - support for the `wspotify` binary
//!
//! # Example
//!
//! ```
//! use wspotify::{ApiReference, auth::ClientCredentials, paginate::Limit};
//!
//! #[tokio::main]
//! async fn main() -> wspotify::Result<()> {
//!     let mut flow = ClientCredentials::new("client-id", "client-secret");
//!     flow.obtain_token().await?;
//!
//!     let mut client = ApiReference::new(flow);
//!     let tracks = client
//!         .get_album_tracks("70hX7IYqmUGV97OXs2v848", None, Limit::All, 0)
//!         .await?;
//!     println!("{} tracks", tracks.len());
//!     Ok(())
//! }
//! ```

pub mod album;
pub mod api;
pub mod artist;
pub mod auth;
pub mod batch;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod paginate;
pub mod server;
pub mod types;
pub mod utils;

pub use client::ApiReference;
pub use error::{Error, Result};

/// Boxed result used by the command-line layer, where library errors mix
/// with address parsing and other one-off failures.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
///
/// # Example
///
/// ```
/// use wspotify::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints a status line prefixed with a blue `o`.
///
/// ```
/// info!("Waiting for authorization on {}...", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a line prefixed with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a line prefixed with a red `!` and exits with status 1.
///
/// Only for the binary: the library reports failures through [`Error`].
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a line prefixed with a yellow `!`; execution continues.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
