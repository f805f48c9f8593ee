use axum::{Extension, extract::RawQuery, response::Html};

use crate::server::RedirectCapture;

/// Receives the authorization server's redirect and hands its query string
/// to the waiting `auth` command. Code and state are checked there.
pub async fn callback(
    RawQuery(query): RawQuery,
    Extension(capture): Extension<RedirectCapture>,
) -> Html<&'static str> {
    let Some(query) = query else {
        return Html("<h4>Missing authorization response.</h4>");
    };

    let denied = query.split('&').any(|pair| pair.starts_with("error="));
    *capture.lock().await = Some(query);

    if denied {
        Html("<h4>Authorization denied.</h4>")
    } else {
        Html("<h2>Authorization received.</h2><p>Close this browser window.</p>")
    }
}
