//! Configuration management for lastsync.
//!
//! Configuration comes from environment variables, optionally loaded from a
//! `.env` file in the local data directory. Values are read once into
//! explicit structs ([`LastFmCredentials`], [`SpotifyConfig`]) which are then
//! handed to the client constructors, so nothing below this module touches
//! the process environment.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, net::SocketAddr, path::PathBuf, str::FromStr};

use thiserror::Error;

/// Permissions requested from Spotify during authorization.
pub const SPOTIFY_SCOPES: [&str; 4] = [
    "playlist-modify-public",
    "app-remote-control",
    "user-read-playback-state",
    "user-modify-playback-state",
];

pub const DEFAULT_LASTFM_API_URL: &str = "https://ws.audioscrobbler.com/2.0/";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Last.fm credentials required")]
    MissingLastFmCredentials,

    #[error("{0} must be set")]
    MissingVar(&'static str),

    #[error("Invalid server address {0}")]
    InvalidServerAddress(String),
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file is looked up in:
/// - Linux: `~/.local/share/lastsync/.env`
/// - macOS: `~/Library/Application Support/lastsync/.env`
/// - Windows: `%LOCALAPPDATA%/lastsync/.env`
///
/// Variables already present in the environment win over the file. A missing
/// file is reported as an error so the caller can decide whether to warn.
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    dotenv::from_path(&path)
        .map_err(|e| format!("Failed to load {}: {}", path.display(), e))?;
    Ok(())
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("lastsync/.env");
    path
}

fn var_or_empty(key: &str) -> String {
    env::var(key).unwrap_or_default()
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// API access for the Last.fm web service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastFmCredentials {
    pub api_key: String,
    pub api_secret: String,
    pub api_url: String,
}

impl LastFmCredentials {
    /// Validates the given values. Only the case where both secrets are
    /// empty is rejected; whether the key actually works is discovered by the
    /// first API call.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();

        if api_key.is_empty() && api_secret.is_empty() {
            return Err(ConfigError::MissingLastFmCredentials);
        }

        Ok(Self {
            api_key,
            api_secret,
            api_url: api_url.into(),
        })
    }

    /// Reads `LASTFM_API_KEY`, `LASTFM_API_SECRET` and `LASTFM_API_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(
            var_or_empty("LASTFM_API_KEY"),
            var_or_empty("LASTFM_API_SECRET"),
            var_or("LASTFM_API_URL", DEFAULT_LASTFM_API_URL),
        )
    }
}

/// Everything the Spotify client and its authorization flow need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub redirect_uri: String,
    pub server_addr: SocketAddr,
    pub api_url: String,
    pub auth_url: String,
    pub token_url: String,
}

impl SpotifyConfig {
    /// Builds a configuration pointing at the public Spotify endpoints.
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            server_addr: SocketAddr::from(([127, 0, 0, 1], 8888)),
            api_url: DEFAULT_SPOTIFY_API_URL.to_string(),
            auth_url: DEFAULT_SPOTIFY_AUTH_URL.to_string(),
            token_url: DEFAULT_SPOTIFY_TOKEN_URL.to_string(),
        }
    }

    /// Reads the `SPOTIFY_*` variables and `SERVER_ADDRESS`.
    ///
    /// # Errors
    ///
    /// Fails if `SPOTIFY_API_AUTH_CLIENT_ID` is unset or `SERVER_ADDRESS`
    /// is not a socket address.
    pub fn from_env() -> Result<Self, ConfigError> {
        let client_id = var_or_empty("SPOTIFY_API_AUTH_CLIENT_ID");
        if client_id.is_empty() {
            return Err(ConfigError::MissingVar("SPOTIFY_API_AUTH_CLIENT_ID"));
        }

        let addr = var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS);
        let server_addr =
            SocketAddr::from_str(&addr).map_err(|_| ConfigError::InvalidServerAddress(addr))?;

        Ok(Self {
            client_id,
            redirect_uri: var_or("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI),
            server_addr,
            api_url: var_or("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL),
            auth_url: var_or("SPOTIFY_API_AUTH_URL", DEFAULT_SPOTIFY_AUTH_URL),
            token_url: var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL),
        })
    }

    /// Space separated scope string as sent in the authorization request.
    pub fn scope(&self) -> String {
        SPOTIFY_SCOPES.join(" ")
    }
}
