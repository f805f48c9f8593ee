use std::{net::SocketAddr, sync::Arc};

use axum::{Extension, Router, routing::get};
use tokio::sync::Mutex;

use crate::{
    api,
    error::{Error, Result},
};

/// Query string of the redirect the browser delivered, if any yet.
pub type RedirectCapture = Arc<Mutex<Option<String>>>;

pub async fn start_api_server(addr: SocketAddr, capture: RedirectCapture) -> Result<()> {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(capture)));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Config(format!("cannot bind {}: {}", addr, e)))?;
    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Config(e.to_string()))
}
