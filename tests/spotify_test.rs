use chrono::Utc;
use lastsync::{
    config::{SPOTIFY_SCOPES, SpotifyConfig},
    management::TokenManager,
    spotify::{auth::authorization_url, search::first_track},
    types::{PlaylistItemsResponse, PlaylistPage, SearchResponse, Token},
};

fn create_test_token(scope: &str, obtained_at: u64) -> Token {
    Token {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        scope: scope.to_string(),
        expires_in: 3600,
        obtained_at,
    }
}

#[test]
fn test_playlist_items_to_page_skips_missing_tracks() {
    let body = r#"{
      "href": "https://api.spotify.com/v1/playlists/abc/tracks?offset=0&limit=100",
      "total": 3,
      "items": [
        { "added_at": "2024-03-10T12:00:00Z", "track": { "id": "1", "name": "One", "uri": "spotify:track:1" } },
        { "added_at": "2024-03-10T12:00:00Z", "track": null },
        { "added_at": "2024-03-10T12:00:00Z", "track": { "id": null, "name": "Local", "uri": "spotify:local:a:b:c:1" } }
      ]
    }"#;

    let res: PlaylistItemsResponse = serde_json::from_str(body).unwrap();
    let page: PlaylistPage = res.into();

    assert_eq!(page.total, 3);
    assert_eq!(page.uris, vec!["spotify:track:1", "spotify:local:a:b:c:1"]);
}

#[test]
fn test_search_first_track() {
    let body = r#"{
      "tracks": {
        "href": "https://api.spotify.com/v1/search?query=track%3ADreams&type=track&limit=1",
        "items": [ { "id": "0ofHAoxe9vBkTCp2UQIavz", "name": "Dreams", "uri": "spotify:track:0ofHAoxe9vBkTCp2UQIavz" } ],
        "total": 812
      }
    }"#;

    let res: SearchResponse = serde_json::from_str(body).unwrap();
    let track = first_track(res).unwrap();
    assert_eq!(track.uri, "spotify:track:0ofHAoxe9vBkTCp2UQIavz");
}

#[test]
fn test_search_without_results() {
    let res: SearchResponse =
        serde_json::from_str(r#"{ "tracks": { "items": [], "total": 0 } }"#).unwrap();
    assert!(first_track(res).is_none());

    let res: SearchResponse = serde_json::from_str("{}").unwrap();
    assert!(first_track(res).is_none());
}

#[test]
fn test_authorization_url() {
    let config = SpotifyConfig::new("my-client");
    let url = authorization_url(&config, "challenge123").unwrap();

    assert!(url.starts_with("https://accounts.spotify.com/authorize?"));
    assert!(url.contains("client_id=my-client"));
    assert!(url.contains("response_type=code"));
    assert!(url.contains("code_challenge=challenge123"));
    assert!(url.contains("code_challenge_method=S256"));
    assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A8888%2Fcallback"));
    for scope in SPOTIFY_SCOPES {
        assert!(url.contains(scope), "missing scope {}", scope);
    }
}

#[test]
fn test_token_covers_scopes() {
    let config = SpotifyConfig::new("client");

    let full = TokenManager::new(create_test_token(&SPOTIFY_SCOPES.join(" "), 0), &config);
    assert!(full.covers_scopes(&SPOTIFY_SCOPES));

    let partial = TokenManager::new(
        create_test_token("playlist-modify-public user-read-playback-state", 0),
        &config,
    );
    assert!(!partial.covers_scopes(&SPOTIFY_SCOPES));
}

#[test]
fn test_token_expiry() {
    let config = SpotifyConfig::new("client");
    let now = Utc::now().timestamp() as u64;

    let fresh = TokenManager::new(create_test_token("", now), &config);
    assert!(!fresh.is_expired());

    // within the four minute refresh margin
    let almost = TokenManager::new(create_test_token("", now - 3600 + 120), &config);
    assert!(almost.is_expired());

    let old = TokenManager::new(create_test_token("", 0), &config);
    assert!(old.is_expired());
    assert_eq!(old.current_token().access_token, "access");
}
