use chrono::{Duration, TimeZone, Utc};
use lastsync::utils::*;

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    assert_eq!(verifier.len(), 128);
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let challenge = generate_code_challenge("test_verifier_123");

    assert!(!challenge.is_empty());
    assert_eq!(challenge, generate_code_challenge("test_verifier_123"));
    assert_ne!(challenge, generate_code_challenge("different_verifier"));

    // URL-safe base64 without padding
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
    // SHA-256 digest is 32 bytes, 43 chars unpadded
    assert_eq!(challenge.len(), 43);
}

#[test]
fn test_generate_code_challenge_known_value() {
    // RFC 7636 appendix B
    let challenge = generate_code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");
    assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
}

#[test]
fn test_clean_artist_featuring() {
    assert_eq!(clean_artist("Artist feat. Other"), "Artist");
    assert_eq!(clean_artist("Artist ft. Other"), "Artist");
}

#[test]
fn test_clean_artist_is_case_insensitive() {
    assert_eq!(clean_artist("Artist FT. Other"), "Artist");
    assert_eq!(clean_artist("Artist Feat. Other & Another"), "Artist");
}

#[test]
fn test_clean_artist_without_marker() {
    assert_eq!(clean_artist("Artist"), "Artist");
    assert_eq!(clean_artist("Feat Without Dot"), "Feat Without Dot");
    assert_eq!(clean_artist(""), "");
}

#[test]
fn test_clean_artist_keeps_part_before_first_marker() {
    assert_eq!(clean_artist("  A ft. B feat. C"), "A");
}

#[test]
fn test_strip_apostrophes() {
    assert_eq!(strip_apostrophes("Don't Stop"), "Dont Stop");
    assert_eq!(strip_apostrophes("Don’t Stop"), "Dont Stop");
    assert_eq!(strip_apostrophes("Rock 'n’ Roll"), "Rock n Roll");
}

#[test]
fn test_strip_apostrophes_leaves_other_punctuation() {
    assert_eq!(strip_apostrophes("Hello, \"World\"!"), "Hello, \"World\"!");
}

#[test]
fn test_build_search_query() {
    let query = build_search_query("Don't Stop", "Rumours", "Fleetwood Mac");
    assert_eq!(query, "track:Dont Stop album:Rumours artist:Fleetwood Mac");
}

#[test]
fn test_build_search_query_cleans_artist() {
    let query = build_search_query("Song", "Album’s", "Lead feat. Guest");
    assert_eq!(query, "track:Song album:Albums artist:Lead");
}

#[test]
fn test_time_window_defaults() {
    let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
    let window = time_window(now, 1, 0).unwrap();

    assert_eq!(window.to, now);
    assert_eq!(window.from, now - Duration::days(1));
    assert_eq!(window.to_timestamp() - window.from_timestamp(), 86_400);
}

#[test]
fn test_time_window_with_end_offset() {
    let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();

    for days in 1..=10u32 {
        for days_end in 0..=10u32 {
            let window = time_window(now, days, days_end).unwrap();
            assert!(window.from < window.to);
            assert_eq!(
                window.to_timestamp(),
                now.timestamp() - days_end as i64 * 86_400
            );
            assert_eq!(
                window.from_timestamp(),
                window.to_timestamp() - days as i64 * 86_400
            );
        }
    }
}

#[test]
fn test_time_window_rejects_zero_days() {
    assert!(time_window(Utc::now(), 0, 0).is_err());
}

#[test]
fn test_playlist_context_uri() {
    assert_eq!(
        playlist_context_uri("37i9dQZF1DX0XUsuxWHRQd"),
        "spotify:playlist:37i9dQZF1DX0XUsuxWHRQd"
    );
}

#[test]
fn test_time_window_out_of_range() {
    let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();

    assert!(time_window(now, 1, 200_000_000).is_err());
    assert!(time_window(now, u32::MAX, 0).is_err());
    assert!(time_window(now, 1, u32::MAX).is_err());
}
