use reqwest::Client;

use crate::types::{
    AddTrackToPlaylistRequest, PlaylistItemsResponse, RemoveTracksRequest, SnapshotResponse,
    TrackUri,
};

fn tracks_url(api_url: &str, playlist_id: &str) -> String {
    format!(
        "{uri}/playlists/{id}/tracks",
        uri = api_url,
        id = playlist_id
    )
}

/// Fetches up to `limit` (1-100) items from the start of a playlist.
///
/// The response carries the playlist's total item count next to the page,
/// which is what the clearer uses to decide whether it is done.
pub async fn get_items(
    client: &Client,
    api_url: &str,
    token: &str,
    playlist_id: &str,
    limit: usize,
) -> Result<PlaylistItemsResponse, reqwest::Error> {
    client
        .get(tracks_url(api_url, playlist_id))
        .query(&[("limit", limit.to_string())])
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?
        .json::<PlaylistItemsResponse>()
        .await
}

/// Removes all occurrences of the given track URIs (at most 100).
pub async fn remove_tracks(
    client: &Client,
    api_url: &str,
    token: &str,
    playlist_id: &str,
    uris: &[String],
) -> Result<SnapshotResponse, reqwest::Error> {
    let body = RemoveTracksRequest {
        tracks: uris.iter().map(|uri| TrackUri { uri: uri.clone() }).collect(),
    };

    client
        .delete(tracks_url(api_url, playlist_id))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await?
        .error_for_status()?
        .json::<SnapshotResponse>()
        .await
}

/// Appends track URIs (at most 100) to the end of a playlist.
pub async fn add_tracks(
    client: &Client,
    api_url: &str,
    token: &str,
    playlist_id: &str,
    uris: &[String],
) -> Result<SnapshotResponse, reqwest::Error> {
    let body = AddTrackToPlaylistRequest {
        uris: uris.to_vec(),
    };

    client
        .post(tracks_url(api_url, playlist_id))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await?
        .error_for_status()?
        .json::<SnapshotResponse>()
        .await
}
