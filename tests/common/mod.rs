#![allow(dead_code)]

use std::time::Duration;

use serde_json::{Value, json};
use wiremock::{MockServer, ResponseTemplate};
use wspotify::{
    ApiReference,
    auth::{AuthorizationCodePkce, ClientCredentials, Scope, Token},
};

pub const ACCESS_TOKEN: &str = "test-access-token";

// Helper function to create a client holding a valid user token
pub fn user_client(server: &MockServer, scopes: &[Scope]) -> ApiReference {
    let flow = AuthorizationCodePkce::new("client-id", "http://127.0.0.1:8888/callback")
        .with_scopes(scopes.iter().copied())
        .with_token(Token::new(ACCESS_TOKEN, 3600).with_refresh_token("test-refresh-token"))
        .with_token_url(format!("{}/api/token", server.uri()));

    ApiReference::new(flow)
        .with_base_url(server.uri())
        .with_max_concurrency(8)
}

// Helper function to create a client credentials client holding a valid token
pub fn app_client(server: &MockServer) -> ApiReference {
    let flow = ClientCredentials::new("client-id", "client-secret")
        .with_token(Token::new(ACCESS_TOKEN, 3600))
        .with_token_url(format!("{}/api/token", server.uri()));

    ApiReference::new(flow).with_base_url(server.uri())
}

pub fn track(index: usize) -> Value {
    json!({
        "id": format!("track{}", index),
        "name": format!("Track {}", index),
        "track_number": index + 1,
        "duration_ms": 180000,
        "is_local": false,
    })
}

pub fn album(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Album {}", id),
        "album_type": "album",
        "release_date": "2024-01-01",
        "total_tracks": 10,
    })
}

pub fn artist(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Artist {}", id),
        "genres": ["indie"],
        "followers": { "href": null, "total": 42 },
        "popularity": 50,
    })
}

/// A page of `items` located at `offset` in a collection of `total`.
pub fn page(items: Vec<Value>, offset: usize, total: usize) -> Value {
    json!({
        "href": "",
        "limit": 50,
        "offset": offset,
        "total": total,
        "next": null,
        "previous": null,
        "items": items,
    })
}

pub fn track_page(offset: usize, total: usize) -> Value {
    let end = (offset + 50).min(total);
    page((offset..end).map(track).collect(), offset, total)
}

pub fn ok_json(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

pub fn delayed_json(body: Value, millis: u64) -> ResponseTemplate {
    ok_json(body).set_delay(Duration::from_millis(millis))
}

pub fn api_error(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "error": { "status": status, "message": message }
    }))
}

pub fn token_body(access_token: &str, refresh_token: Option<&str>) -> Value {
    let mut body = json!({
        "access_token": access_token,
        "token_type": "Bearer",
        "scope": "user-library-read",
        "expires_in": 3600,
    });
    if let Some(refresh_token) = refresh_token {
        body["refresh_token"] = json!(refresh_token);
    }
    body
}

pub async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or(0)
}
