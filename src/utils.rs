use std::sync::LazyLock;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Duration, Utc};
use rand::{Rng, distr::Alphanumeric};
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::types::TimeWindow;

static FEATURING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(ft|feat)\.").expect("valid featuring pattern"));

const APOSTROPHES: [char; 2] = ['\'', '’'];

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Drops everything from the first `ft.`/`feat.` marker on.
pub fn clean_artist(artist: &str) -> String {
    match FEATURING.find(artist) {
        Some(m) => artist[..m.start()].trim().to_string(),
        None => artist.to_string(),
    }
}

/// Removes straight and curly apostrophes. Spotify's search chokes on them.
pub fn strip_apostrophes(value: &str) -> String {
    value.chars().filter(|c| !APOSTROPHES.contains(c)).collect()
}

/// Builds the field-filtered catalog query for a scrobble.
pub fn build_search_query(title: &str, album: &str, artist: &str) -> String {
    format!(
        "track:{track} album:{album} artist:{artist}",
        track = strip_apostrophes(title),
        album = strip_apostrophes(album),
        artist = strip_apostrophes(&clean_artist(artist)),
    )
}

/// Computes the window ending `days_end` days before `now` and spanning
/// `days` days.
pub fn time_window(now: DateTime<Utc>, days: u32, days_end: u32) -> Result<TimeWindow, String> {
    if days == 0 {
        return Err("The sync window must span at least one day".to_string());
    }

    let to = now
        .checked_sub_signed(Duration::days(days_end as i64))
        .ok_or("The sync window is out of range")?;
    let from = to
        .checked_sub_signed(Duration::days(days as i64))
        .ok_or("The sync window is out of range")?;
    Ok(TimeWindow { from, to })
}

pub fn playlist_context_uri(playlist: &str) -> String {
    format!("spotify:playlist:{}", playlist)
}
