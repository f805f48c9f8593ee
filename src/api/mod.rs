//! # Redirect catcher endpoints
//!
//! Routes served by the short-lived local server that the `auth` command
//! starts while the user authorizes the application in the browser:
//!
//! - [`callback`] - the `redirect_uri` target; stores the redirect's query
//!   string so the command can extract the authorization code
//! - [`health`] - liveness probe
//!
//! The server never talks to Spotify itself; the code exchange happens in
//! [`crate::cli`] through the PKCE flow.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
