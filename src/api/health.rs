use axum::response::Json;
use serde_json::{Value, json};

/// Lets the `auth` command (or a user) confirm the redirect catcher is up.
pub async fn health() -> Json<Value> {
    Json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "status": "listening",
        "callback": "/callback",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
