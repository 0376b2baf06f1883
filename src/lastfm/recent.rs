use chrono::DateTime;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use super::LastFmError;
use crate::{
    config::LastFmCredentials,
    types::{LastFmErrorResponse, RecentTrack, RecentTracksResponse, ScrobbleRecord, TimeWindow},
};

/// Largest page size `user.getRecentTracks` accepts.
pub const RECENT_TRACKS_PAGE_LIMIT: u32 = 200;

/// One decoded page of `user.getRecentTracks`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentTracksPage {
    pub page: u32,
    pub total_pages: u32,
    pub scrobbles: Vec<ScrobbleRecord>,
}

impl RecentTracksPage {
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }
}

/// Fetches a single page of a user's plays inside `window`.
pub async fn get_recent_tracks(
    client: &Client,
    credentials: &LastFmCredentials,
    username: &str,
    window: &TimeWindow,
    page: u32,
) -> Result<RecentTracksPage, LastFmError> {
    let res = client
        .get(&credentials.api_url)
        .query(&[
            ("method", "user.getrecenttracks".to_string()),
            ("user", username.to_string()),
            ("api_key", credentials.api_key.clone()),
            ("from", window.from_timestamp().to_string()),
            ("to", window.to_timestamp().to_string()),
            ("limit", RECENT_TRACKS_PAGE_LIMIT.to_string()),
            ("page", page.to_string()),
            ("format", "json".to_string()),
        ])
        .send()
        .await?;

    let status = res.status();
    let body = res.text().await?;
    decode_recent_tracks(status, &body)
}

/// Decodes a response body received with `status`.
///
/// Last.fm reports API errors as JSON bodies on 4xx responses, so the body
/// is decoded first; only an undecodable body on a non-2xx status becomes
/// [`LastFmError::Status`].
pub fn decode_recent_tracks(
    status: StatusCode,
    body: &str,
) -> Result<RecentTracksPage, LastFmError> {
    match parse_recent_tracks(body) {
        Err(LastFmError::Parse(_)) if !status.is_success() => Err(LastFmError::Status(status)),
        other => other,
    }
}

/// Requests pages starting at 1 until the last one and concatenates their
/// plays in order.
pub async fn collect_pages<F, Fut>(mut fetch_page: F) -> Result<Vec<ScrobbleRecord>, LastFmError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<RecentTracksPage, LastFmError>>,
{
    let mut scrobbles = Vec::new();
    let mut page = 1;

    loop {
        let res = fetch_page(page).await?;
        let last = res.is_last();
        scrobbles.extend(res.scrobbles);

        if last {
            break;
        }
        page += 1;
    }

    Ok(scrobbles)
}

/// Decodes a `user.getRecentTracks` response body.
///
/// The now-playing entry has no play time and is left out.
pub fn parse_recent_tracks(body: &str) -> Result<RecentTracksPage, LastFmError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| LastFmError::Parse(e.to_string()))?;

    if value.get("error").is_some() {
        let err: LastFmErrorResponse =
            serde_json::from_value(value).map_err(|e| LastFmError::Parse(e.to_string()))?;
        return Err(LastFmError::Api {
            code: err.error,
            message: err.message,
        });
    }

    let res: RecentTracksResponse =
        serde_json::from_value(value).map_err(|e| LastFmError::Parse(e.to_string()))?;

    let page = parse_count(&res.recenttracks.attr.page)?;
    let total_pages = parse_count(&res.recenttracks.attr.total_pages)?;

    let mut scrobbles = Vec::new();
    for track in res.recenttracks.track.into_vec() {
        if let Some(scrobble) = to_scrobble(track)? {
            scrobbles.push(scrobble);
        }
    }

    Ok(RecentTracksPage {
        page,
        total_pages,
        scrobbles,
    })
}

fn parse_count(value: &str) -> Result<u32, LastFmError> {
    value
        .parse()
        .map_err(|_| LastFmError::Parse(format!("invalid page number {:?}", value)))
}

fn to_scrobble(track: RecentTrack) -> Result<Option<ScrobbleRecord>, LastFmError> {
    let now_playing = track
        .attr
        .as_ref()
        .and_then(|a| a.nowplaying.as_deref())
        .is_some_and(|v| v == "true");

    let Some(date) = track.date.filter(|_| !now_playing) else {
        return Ok(None);
    };

    let uts: i64 = date
        .uts
        .parse()
        .map_err(|_| LastFmError::Parse(format!("invalid play time {:?}", date.uts)))?;
    let played_at = DateTime::from_timestamp(uts, 0)
        .ok_or_else(|| LastFmError::Parse(format!("play time out of range: {}", uts)))?;

    Ok(Some(ScrobbleRecord {
        artist: track.artist.text,
        title: track.name,
        album: track.album.text,
        played_at,
    }))
}
