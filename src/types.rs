use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Body of a successful token endpoint response. A refresh may omit the
/// refresh token and the scope, in which case the previous values stay valid.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// A single play of a track, as recorded by Last.fm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrobbleRecord {
    pub artist: String,
    pub title: String,
    pub album: String,
    pub played_at: DateTime<Utc>,
}

/// Range of play times to sync. `from` is always before `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TimeWindow {
    pub fn from_timestamp(&self) -> i64 {
        self.from.timestamp()
    }

    pub fn to_timestamp(&self) -> i64 {
        self.to.timestamp()
    }
}

/// One page of a playlist as seen from its head.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistPage {
    pub total: u64,
    pub uris: Vec<String>,
}

/// Outcome of one sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub removed: usize,
    pub scrobbles: usize,
    pub resolved: usize,
    pub unresolved: usize,
    pub batches: usize,
    pub playback_started: bool,
}

// Spotify Web API payloads

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    #[serde(default)]
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItemsResponse {
    pub total: u64,
    pub items: Vec<PlaylistItem>,
}

impl From<PlaylistItemsResponse> for PlaylistPage {
    fn from(res: PlaylistItemsResponse) -> Self {
        PlaylistPage {
            total: res.total,
            uris: res
                .items
                .into_iter()
                .filter_map(|item| item.track.map(|t| t.uri))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackUri {
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveTracksRequest {
    pub tracks: Vec<TrackUri>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tracks {
    pub items: Vec<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub tracks: Option<Tracks>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartPlaybackRequest {
    pub context_uri: String,
}

// Last.fm API payloads

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(v) => v,
            OneOrMany::One(t) => vec![t],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextField {
    #[serde(rename = "#text", default)]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayDate {
    pub uts: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NowPlayingAttr {
    #[serde(default)]
    pub nowplaying: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecentTrack {
    pub artist: TextField,
    pub name: String,
    pub album: TextField,
    #[serde(default)]
    pub date: Option<PlayDate>,
    #[serde(rename = "@attr", default)]
    pub attr: Option<NowPlayingAttr>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecentTracksAttr {
    pub page: String,
    #[serde(rename = "totalPages")]
    pub total_pages: String,
    #[serde(default)]
    pub total: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecentTracks {
    #[serde(default)]
    pub track: OneOrMany<RecentTrack>,
    #[serde(rename = "@attr")]
    pub attr: RecentTracksAttr,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecentTracksResponse {
    pub recenttracks: RecentTracks,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LastFmErrorResponse {
    pub error: u32,
    pub message: String,
}
