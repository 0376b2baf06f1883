//! # Spotify Integration Module
//!
//! Thin wrappers around the Spotify Web API endpoints lastsync needs, plus
//! [`SpotifyClient`], which carries the HTTP client and the token and
//! implements the playlist, search and playback capabilities used by
//! [`crate::sync`].
//!
//! ```text
//! sync::run
//!     ↓
//! SpotifyClient (PlaylistStore, CatalogSearch, PlaybackController)
//!     ├── auth      OAuth 2.0 PKCE flow, token exchange and refresh
//!     ├── playlist  GET/DELETE/POST /playlists/{id}/tracks
//!     ├── search    GET /search?type=track&limit=1
//!     └── player    PUT /me/player/play
//!     ↓
//! reqwest
//! ```
//!
//! ## Authentication
//!
//! [`SpotifyClient::connect`] reuses the cached token when it was granted all
//! of [`crate::config::SPOTIFY_SCOPES`]. Otherwise it runs the interactive
//! flow from [`auth::authorize`], which needs a browser once; scheduled runs
//! afterwards only refresh the cached token.
//!
//! ## Error Handling
//!
//! Every non-2xx response becomes a `reqwest::Error` and is propagated. There
//! is no retry and no rate limit handling, a failing call ends the run.

pub mod auth;
pub mod player;
pub mod playlist;
pub mod search;

use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    Res,
    config::{SPOTIFY_SCOPES, SpotifyConfig},
    info,
    management::TokenManager,
    sync::{CatalogSearch, PlaybackController, PlaylistStore},
    types::PlaylistPage,
    warning,
};

pub struct SpotifyClient {
    http: Client,
    api_url: String,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(config: &SpotifyConfig, tokens: TokenManager) -> Self {
        Self {
            http: Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            tokens: Mutex::new(tokens),
        }
    }

    /// Builds a client from the cached token, authorizing interactively
    /// when there is no usable one.
    pub async fn connect(config: &SpotifyConfig) -> Res<Self> {
        let tokens = match TokenManager::load(config).await {
            Ok(mgr) if mgr.covers_scopes(&SPOTIFY_SCOPES) => mgr,
            Ok(_) => {
                warning!("Cached Spotify token is missing required scopes.");
                auth::authorize(config).await?
            }
            Err(_) => {
                info!("No cached Spotify token found, starting authorization.");
                auth::authorize(config).await?
            }
        };

        Ok(Self::new(config, tokens))
    }

    async fn access_token(&self) -> Res<String> {
        let mut tokens = self.tokens.lock().await;
        Ok(tokens.get_valid_token().await?)
    }
}

#[async_trait]
impl PlaylistStore for SpotifyClient {
    async fn playlist_items(&self, playlist: &str, limit: usize) -> Res<PlaylistPage> {
        let token = self.access_token().await?;
        let res = playlist::get_items(&self.http, &self.api_url, &token, playlist, limit).await?;
        Ok(res.into())
    }

    async fn remove_all_occurrences(&self, playlist: &str, uris: &[String]) -> Res<()> {
        let token = self.access_token().await?;
        playlist::remove_tracks(&self.http, &self.api_url, &token, playlist, uris).await?;
        Ok(())
    }

    async fn add_items(&self, playlist: &str, uris: &[String]) -> Res<()> {
        let token = self.access_token().await?;
        playlist::add_tracks(&self.http, &self.api_url, &token, playlist, uris).await?;
        Ok(())
    }
}

#[async_trait]
impl CatalogSearch for SpotifyClient {
    async fn find_track(&self, query: &str) -> Res<Option<String>> {
        let token = self.access_token().await?;
        let track = search::search_track(&self.http, &self.api_url, &token, query).await?;
        Ok(track.map(|t| t.uri))
    }
}

#[async_trait]
impl PlaybackController for SpotifyClient {
    async fn start_playback(&self, device: Option<&str>, context_uri: &str) -> Res<()> {
        let token = self.access_token().await?;
        player::start_playback(&self.http, &self.api_url, &token, device, context_uri).await?;
        Ok(())
    }
}
