use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tokio::{sync::Mutex, task::JoinHandle};

use crate::{
    Res,
    config::SpotifyConfig,
    management::TokenManager,
    server::start_api_server,
    success,
    types::{PkceToken, Token, TokenResponse},
    utils, warning,
};

/// Shared between the authorization flow and the callback handler.
pub type AuthState = Arc<Mutex<Option<PkceToken>>>;

const AUTH_TIMEOUT: Duration = Duration::from_secs(60);

/// Runs the interactive OAuth 2.0 PKCE flow and persists the resulting token.
///
/// 1. Generates the code verifier and its S256 challenge
/// 2. Starts the local callback server on `config.server_addr`
/// 3. Opens the authorization URL in the browser (or prints it)
/// 4. Waits up to 60 seconds for the callback to exchange the code
/// 5. Stores the token in the local cache
///
/// The callback server is shut down as soon as the flow finishes.
pub async fn authorize(config: &SpotifyConfig) -> Res<TokenManager> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let shared_state: AuthState = Arc::new(Mutex::new(Some(PkceToken {
        code_verifier,
        token: None,
    })));

    let server_state = Arc::clone(&shared_state);
    let server_config = Arc::new(config.clone());
    let server = tokio::spawn(async move {
        if let Err(e) = start_api_server(server_state, server_config).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    let auth_url = authorization_url(config, &code_challenge)?;
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(shared_state, &server, AUTH_TIMEOUT).await;
    server.abort();

    let Some(token) = token else {
        return Err("Authentication failed or timed out.".into());
    };

    let token_manager = TokenManager::new(token, config);
    token_manager
        .persist()
        .await
        .map_err(|e| format!("Failed to save token to cache: {}", e))?;

    success!("Authentication successful!");
    Ok(token_manager)
}

/// Builds the URL the user has to visit to grant access.
pub fn authorization_url(config: &SpotifyConfig, code_challenge: &str) -> Res<String> {
    let scope = config.scope();
    let url = reqwest::Url::parse_with_params(
        &config.auth_url,
        &[
            ("client_id", config.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256"),
            ("scope", scope.as_str()),
        ],
    )?;
    Ok(url.to_string())
}

/// Polls the shared state once a second until the callback stored a token,
/// the callback server stopped, or the timeout is reached.
pub async fn wait_for_token(
    shared_state: AuthState,
    server: &JoinHandle<()>,
    timeout: Duration,
) -> Option<Token> {
    let pb = ProgressBar::new_spinner();
    pb.set_message("Waiting for Spotify authorization...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let start = Instant::now();
    while start.elapsed() < timeout {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|pkce| pkce.token.clone()) {
            pb.finish_and_clear();
            return Some(token);
        }
        drop(lock);

        if server.is_finished() {
            break;
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    pb.finish_and_clear();
    None
}

/// Exchanges an authorization code for a token, proving possession of the
/// PKCE verifier.
pub async fn exchange_code_pkce(
    config: &SpotifyConfig,
    code: &str,
    verifier: &str,
) -> Result<Token, reqwest::Error> {
    let client = Client::new();
    let res = client
        .post(&config.token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", config.client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", config.redirect_uri.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?;

    let json: TokenResponse = res.json().await?;

    Ok(Token {
        access_token: json.access_token,
        refresh_token: json.refresh_token.unwrap_or_default(),
        scope: json.scope.unwrap_or_else(|| config.scope()),
        expires_in: json.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    })
}

/// Trades the refresh token of `current` for a new access token.
pub async fn refresh_token(
    token_url: &str,
    client_id: &str,
    current: &Token,
) -> Result<Token, String> {
    let client = Client::new();
    let res = client
        .post(token_url)
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", current.refresh_token.as_str()),
            ("client_id", client_id),
        ])
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| format!("Token refresh failed: {}", e))?;

    let json: TokenResponse = res.json().await.map_err(|e| e.to_string())?;

    Ok(Token {
        access_token: json.access_token,
        refresh_token: json
            .refresh_token
            .unwrap_or_else(|| current.refresh_token.clone()),
        scope: json.scope.unwrap_or_else(|| current.scope.clone()),
        expires_in: json.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    })
}
