use std::{
    net::SocketAddr,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::Mutex;

use crate::{
    Res,
    auth::AuthorizationCodePkce,
    config::{self, Config},
    info,
    server::{RedirectCapture, start_api_server},
    success, utils, warning,
};

const STATE_LENGTH: usize = 16;

pub async fn auth(config: &Config) -> Res<()> {
    let redirect_uri = config.redirect_uri()?;
    let mut flow = AuthorizationCodePkce::new(&config.client_id, redirect_uri)
        .with_state(utils::generate_random_string(STATE_LENGTH))
        .with_scopes(config.scopes.iter().copied());

    let addr: SocketAddr = config.server_address.parse()?;
    let capture: RedirectCapture = Arc::new(Mutex::new(None));

    let server_capture = Arc::clone(&capture);
    let server = tokio::spawn(async move { start_api_server(addr, server_capture).await });

    let auth_url = flow.authorization_url()?;
    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    info!("Waiting for authorization on {}...", addr);
    let query = wait_for_redirect(capture).await;
    server.abort();

    let Some(query) = query else {
        return Err("Authorization timed out.".into());
    };

    let code = flow.parse_redirect_uri(&format!("{}?{}", redirect_uri, query))?;
    let token = flow.obtain_token(&code).await?;

    success!("Authentication successful!");
    match &token.refresh_token {
        Some(refresh_token) => info!(
            "Add the following line to {} to stay signed in:\nSPOTIFY_REFRESH_TOKEN={}",
            config::env_path().display(),
            refresh_token
        ),
        None => warning!("No refresh token was issued."),
    }

    Ok(())
}

async fn wait_for_redirect(capture: RedirectCapture) -> Option<String> {
    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        if let Some(query) = capture.lock().await.take() {
            return Some(query);
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    None
}
