use async_trait::async_trait;

use crate::{
    Res,
    types::{PlaylistPage, ScrobbleRecord, TimeWindow},
};

/// Read and mutate the contents of a playlist.
#[async_trait]
pub trait PlaylistStore: Send + Sync {
    /// Fetches up to `limit` items from the head of the playlist.
    async fn playlist_items(&self, playlist: &str, limit: usize) -> Res<PlaylistPage>;

    /// Removes every occurrence of each URI from the playlist.
    async fn remove_all_occurrences(&self, playlist: &str, uris: &[String]) -> Res<()>;

    /// Appends the URIs, in order, to the end of the playlist.
    async fn add_items(&self, playlist: &str, uris: &[String]) -> Res<()>;
}

#[async_trait]
pub trait CatalogSearch: Send + Sync {
    /// Runs a track search limited to one result and returns its URI.
    async fn find_track(&self, query: &str) -> Res<Option<String>>;
}

#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Returns every play of `username` inside the window.
    async fn recent_plays(&self, username: &str, window: &TimeWindow) -> Res<Vec<ScrobbleRecord>>;
}

#[async_trait]
pub trait PlaybackController: Send + Sync {
    /// Starts playing `context_uri` from its first track. Without a device
    /// the currently active one is used.
    async fn start_playback(&self, device: Option<&str>, context_uri: &str) -> Res<()>;
}
