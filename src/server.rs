use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use crate::{Res, api, config::SpotifyConfig, spotify::auth::AuthState};

/// Builds the routes of the local authorization server.
pub fn router(state: AuthState, config: Arc<SpotifyConfig>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .layer(Extension(state))
        .layer(Extension(config))
}

/// Serves the OAuth callback until the task running it is aborted.
pub async fn start_api_server(state: AuthState, config: Arc<SpotifyConfig>) -> Res<()> {
    let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
    axum::serve(listener, router(state, config)).await?;
    Ok(())
}
