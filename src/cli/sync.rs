use chrono::Utc;

use crate::{
    Res,
    config::{LastFmCredentials, SpotifyConfig},
    error, info,
    lastfm::LastFmClient,
    spotify::SpotifyClient,
    success,
    sync::{self, SyncOptions},
    types::SyncReport,
    utils, warning,
};

#[derive(Debug, Clone)]
pub struct SyncArgs {
    pub playlist: String,
    pub device: Option<String>,
    pub username: String,
    pub days: u32,
    pub days_end: u32,
    pub disable_playback: bool,
}

/// Syncs the user's recent scrobbles into the playlist.
///
/// Missing Last.fm credentials end the process with status 1 before the
/// Spotify client is built.
pub async fn sync(args: SyncArgs) -> Res<SyncReport> {
    let credentials = match LastFmCredentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => error!("{}", e),
    };

    let window = utils::time_window(Utc::now(), args.days, args.days_end)?;

    let spotify_config = SpotifyConfig::from_env()?;
    let spotify = SpotifyClient::connect(&spotify_config).await?;
    let lastfm = LastFmClient::new(credentials);

    info!(
        "Syncing scrobbles of {} between {} and {}",
        args.username,
        window.from.format("%Y-%m-%d %H:%M"),
        window.to.format("%Y-%m-%d %H:%M")
    );

    let opts = SyncOptions {
        playlist: args.playlist,
        device: args.device,
        username: args.username,
        window,
        playback: !args.disable_playback,
    };

    let report = sync::run(&spotify, &spotify, &lastfm, &spotify, &opts).await?;

    if report.unresolved > 0 {
        warning!("{} scrobbles had no match", report.unresolved);
    }
    success!(
        "Removed {} items, added {} of {} scrobbles in {} batches",
        report.removed,
        report.resolved,
        report.scrobbles,
        report.batches
    );
    if report.playback_started {
        success!("Playback started");
    }

    Ok(report)
}
