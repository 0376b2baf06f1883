//! # Last.fm Module
//!
//! Read access to a user's listening history through the Last.fm web
//! service. [`LastFmClient`] walks every page of `user.getRecentTracks` for a
//! time window and implements [`HistorySource`].

mod recent;

pub use recent::{
    RECENT_TRACKS_PAGE_LIMIT, RecentTracksPage, collect_pages, decode_recent_tracks,
    get_recent_tracks, parse_recent_tracks,
};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::{
    Res,
    config::LastFmCredentials,
    sync::HistorySource,
    types::{ScrobbleRecord, TimeWindow},
};

#[derive(Debug, Error)]
pub enum LastFmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Last.fm responded with status {0}")]
    Status(StatusCode),

    /// Error payload returned by the API, e.g. code 10 for an invalid key.
    #[error("Last.fm API error {code}: {message}")]
    Api { code: u32, message: String },

    #[error("Malformed Last.fm response: {0}")]
    Parse(String),
}

pub struct LastFmClient {
    http: Client,
    credentials: LastFmCredentials,
}

impl LastFmClient {
    pub fn new(credentials: LastFmCredentials) -> Self {
        Self {
            http: Client::new(),
            credentials,
        }
    }

    /// Collects all plays in the window, in the order Last.fm returns them
    /// (most recent first).
    pub async fn recent_tracks(
        &self,
        username: &str,
        window: &TimeWindow,
    ) -> Result<Vec<ScrobbleRecord>, LastFmError> {
        collect_pages(|page| {
            get_recent_tracks(&self.http, &self.credentials, username, window, page)
        })
        .await
    }
}

#[async_trait]
impl HistorySource for LastFmClient {
    async fn recent_plays(
        &self,
        username: &str,
        window: &TimeWindow,
    ) -> Res<Vec<ScrobbleRecord>> {
        Ok(self.recent_tracks(username, window).await?)
    }
}
