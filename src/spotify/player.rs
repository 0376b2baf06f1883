use reqwest::Client;

use crate::types::StartPlaybackRequest;

/// Starts playback of a context (album, playlist, ...) from its beginning.
///
/// Without a `device_id` Spotify targets the user's currently active device.
pub async fn start_playback(
    client: &Client,
    api_url: &str,
    token: &str,
    device_id: Option<&str>,
    context_uri: &str,
) -> Result<(), reqwest::Error> {
    let mut request = client
        .put(format!("{uri}/me/player/play", uri = api_url))
        .bearer_auth(token)
        .json(&StartPlaybackRequest {
            context_uri: context_uri.to_string(),
        });

    if let Some(device_id) = device_id {
        request = request.query(&[("device_id", device_id)]);
    }

    request.send().await?.error_for_status()?;
    Ok(())
}
