//! # Sync Module
//!
//! The run itself: clear the target playlist, read the listening history,
//! resolve every scrobble against the catalog, append the matches and start
//! playback. Each step talks to the outside world only through the
//! capability traits in [`traits`], which [`crate::spotify::SpotifyClient`]
//! and [`crate::lastfm::LastFmClient`] implement and which tests replace with
//! in-memory fakes.
//!
//! ```text
//! clear_playlist  ->  HistorySource::recent_plays
//!                          |
//!                     (empty? stop)
//!                          |
//!                 populate_playlist  ->  start_playback
//! ```

mod traits;

pub use traits::{CatalogSearch, HistorySource, PlaybackController, PlaylistStore};

use crate::{
    Res, info,
    types::{ScrobbleRecord, SyncReport, TimeWindow},
    utils, warning,
};

/// Maximum number of items Spotify accepts per playlist read, add or remove
/// request.
pub const PLAYLIST_BATCH_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub playlist: String,
    pub device: Option<String>,
    pub username: String,
    pub window: TimeWindow,
    pub playback: bool,
}

/// Scrobbles that were matched in the catalog, in scrobble order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub uris: Vec<String>,
    pub unresolved: usize,
}

/// Empties the playlist page by page. Returns the number of removed items.
///
/// There is no iteration cap, a playlist that keeps growing while it is
/// being cleared keeps this loop going.
pub async fn clear_playlist<S>(store: &S, playlist: &str) -> Res<usize>
where
    S: PlaylistStore + ?Sized,
{
    let mut removed = 0;

    loop {
        let page = store.playlist_items(playlist, PLAYLIST_BATCH_LIMIT).await?;
        if page.total == 0 {
            break;
        }

        if page.uris.is_empty() {
            return Err(format!(
                "Playlist {} reports {} items but none of them can be removed",
                playlist, page.total
            )
            .into());
        }

        store.remove_all_occurrences(playlist, &page.uris).await?;
        removed += page.uris.len();
    }

    Ok(removed)
}

/// Searches the catalog for each scrobble. Misses are reported and skipped.
pub async fn resolve_tracks<C>(search: &C, scrobbles: &[ScrobbleRecord]) -> Res<Resolution>
where
    C: CatalogSearch + ?Sized,
{
    let mut resolution = Resolution::default();

    for scrobble in scrobbles {
        let query = utils::build_search_query(&scrobble.title, &scrobble.album, &scrobble.artist);
        match search.find_track(&query).await? {
            Some(uri) => resolution.uris.push(uri),
            None => {
                warning!("Couldn't find {}", query);
                resolution.unresolved += 1;
            }
        }
    }

    Ok(resolution)
}

/// Appends `uris` in consecutive batches of at most [`PLAYLIST_BATCH_LIMIT`].
/// Returns the number of add requests issued.
pub async fn append_in_batches<S>(store: &S, playlist: &str, uris: &[String]) -> Res<usize>
where
    S: PlaylistStore + ?Sized,
{
    let mut batches = 0;
    for chunk in uris.chunks(PLAYLIST_BATCH_LIMIT) {
        store.add_items(playlist, chunk).await?;
        batches += 1;
    }
    Ok(batches)
}

/// Resolves the scrobbles and appends every match to the playlist.
pub async fn populate_playlist<S, C>(
    store: &S,
    search: &C,
    scrobbles: &[ScrobbleRecord],
    playlist: &str,
) -> Res<(Resolution, usize)>
where
    S: PlaylistStore + ?Sized,
    C: CatalogSearch + ?Sized,
{
    let resolution = resolve_tracks(search, scrobbles).await?;
    info!("Found {} items", resolution.uris.len());

    let batches = append_in_batches(store, playlist, &resolution.uris).await?;
    Ok((resolution, batches))
}

pub async fn start_playback<P>(player: &P, device: Option<&str>, playlist: &str) -> Res<()>
where
    P: PlaybackController + ?Sized,
{
    player
        .start_playback(device, &utils::playlist_context_uri(playlist))
        .await
}

/// Runs one complete sync.
///
/// An empty history ends the run right after the playlist has been cleared:
/// nothing is searched, added or played.
pub async fn run<S, C, H, P>(
    store: &S,
    search: &C,
    history: &H,
    player: &P,
    opts: &SyncOptions,
) -> Res<SyncReport>
where
    S: PlaylistStore + ?Sized,
    C: CatalogSearch + ?Sized,
    H: HistorySource + ?Sized,
    P: PlaybackController + ?Sized,
{
    let mut report = SyncReport::default();

    report.removed = clear_playlist(store, &opts.playlist).await?;

    let scrobbles = history.recent_plays(&opts.username, &opts.window).await?;
    report.scrobbles = scrobbles.len();

    if scrobbles.is_empty() {
        info!("No scrobbles for {} in the requested window", opts.username);
        info!("Found 0 items");
        return Ok(report);
    }

    let (resolution, batches) =
        populate_playlist(store, search, &scrobbles, &opts.playlist).await?;
    report.resolved = resolution.uris.len();
    report.unresolved = resolution.unresolved;
    report.batches = batches;

    if opts.playback {
        start_playback(player, opts.device.as_deref(), &opts.playlist).await?;
        report.playback_started = true;
    }

    Ok(report)
}
