use reqwest::Client;

use crate::types::{SearchResponse, Track};

/// Searches the catalog for tracks and returns the best match, if any.
pub async fn search_track(
    client: &Client,
    api_url: &str,
    token: &str,
    query: &str,
) -> Result<Option<Track>, reqwest::Error> {
    let res = client
        .get(format!("{uri}/search", uri = api_url))
        .query(&[("q", query), ("type", "track"), ("limit", "1")])
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?
        .json::<SearchResponse>()
        .await?;

    Ok(first_track(res))
}

pub fn first_track(res: SearchResponse) -> Option<Track> {
    res.tracks.and_then(|t| t.items.into_iter().next())
}
