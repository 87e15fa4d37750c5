//! Integration tests for mixspotify

use mixconfig::SpotifyCredentials;
use mixspotify::{SpotifyClient, SpotifyError, SpotifySettings};
use serde_json::json;
use wiremock::matchers::{body_json, body_string, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> SpotifySettings {
    SpotifySettings {
        api_base: format!("{}/v1", server.uri()),
        accounts_base: server.uri(),
        timeout_secs: 5,
    }
}

fn client_for(server: &MockServer) -> SpotifyClient {
    SpotifyClient::with_access_token(&settings_for(server), "test-token").unwrap()
}

fn mock_track(id: &str, artist: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "uri": format!("spotify:track:{}", id),
        "artists": [{ "id": "artist-1", "name": artist }]
    })
}

#[tokio::test]
async fn test_refresh_token_grant() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header("authorization", "Basic aWQ6c2VjcmV0"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=my-refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh-token",
            "token_type": "Bearer",
            "expires_in": 3600,
            "scope": "playlist-modify-public ugc-image-upload"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .and(header("authorization", "Bearer fresh-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "owner", "display_name": "Owner" })),
        )
        .mount(&mock_server)
        .await;

    let credentials = SpotifyCredentials {
        client_id: "id".into(),
        client_secret: "secret".into(),
        redirect_uri: "http://localhost:8888/callback".into(),
        refresh_token: Some("my-refresh".into()),
    };

    let client = SpotifyClient::connect(&settings_for(&mock_server), &credentials)
        .await
        .unwrap();
    assert_eq!(client.token().unwrap().expires_in, Some(3600));

    let me = client.current_user().await.unwrap();
    assert_eq!(me.id, "owner");
}

#[tokio::test]
async fn test_refresh_token_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Refresh token revoked"
        })))
        .mount(&mock_server)
        .await;

    let credentials = SpotifyCredentials {
        client_id: "id".into(),
        client_secret: "secret".into(),
        redirect_uri: "http://localhost".into(),
        refresh_token: Some("revoked".into()),
    };

    let result = SpotifyClient::connect(&settings_for(&mock_server), &credentials).await;
    match result {
        Err(SpotifyError::Unauthorized(message)) => {
            assert!(message.contains("invalid_grant"));
            assert!(message.contains("Refresh token revoked"));
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("refresh should have failed"),
    }
}

#[tokio::test]
async fn test_search_tracks() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("q", "Foo Bar"))
        .and(query_param("type", "track"))
        .and(query_param("limit", "1"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": { "items": [mock_track("t1", "Foo", "Bar")], "total": 1 }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let tracks = client.search_tracks("Foo Bar", 1).await.unwrap();

    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].id, "t1");
    assert_eq!(tracks[0].primary_artist(), Some("Foo"));
}

#[tokio::test]
async fn test_search_without_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "tracks": { "items": [], "total": 0 } })),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert!(client.search_tracks("Baz Qux", 1).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_expired_token_is_an_auth_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "status": 401, "message": "The access token expired" }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.search_tracks("Foo Bar", 1).await.unwrap_err();
    assert!(err.is_auth_error());
    assert!(err.to_string().contains("The access token expired"));
}

#[tokio::test]
async fn test_create_playlist() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/users/owner/playlists"))
        .and(body_json(json!({
            "name": "r/listentothis 3/2025",
            "public": true,
            "description": "Top tracks from r/listentothis for 3/2025."
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "pl1",
            "name": "r/listentothis 3/2025",
            "public": true,
            "description": "Top tracks from r/listentothis for 3/2025.",
            "external_urls": { "spotify": "https://open.spotify.com/playlist/pl1" }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let playlist = client
        .create_playlist(
            "owner",
            "r/listentothis 3/2025",
            "Top tracks from r/listentothis for 3/2025.",
            true,
        )
        .await
        .unwrap();

    assert_eq!(playlist.id, "pl1");
    assert_eq!(playlist.public, Some(true));
    assert_eq!(
        playlist.external_urls.spotify.as_deref(),
        Some("https://open.spotify.com/playlist/pl1")
    );
}

#[tokio::test]
async fn test_add_tracks_sends_uris_in_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/playlists/pl1/tracks"))
        .and(body_json(json!({
            "uris": ["spotify:track:a", "spotify:track:b", "spotify:track:c"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "snapshot_id": "snap-1" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let ids = vec!["a".to_string(), "b".to_string(), "spotify:track:c".to_string()];
    let snapshot = client.add_tracks("pl1", &ids).await.unwrap();
    assert_eq!(snapshot, "snap-1");
}

#[tokio::test]
async fn test_add_tracks_rejects_oversized_batch() {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    let ids: Vec<String> = (0..101).map(|i| format!("t{i}")).collect();
    let err = client.add_tracks("pl1", &ids).await.unwrap_err();
    assert!(matches!(err, SpotifyError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_upload_cover_image() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/playlists/pl1/images"))
        .and(header("content-type", "image/jpeg"))
        .and(body_string("/9j/4AAQSkZJRg=="))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client
        .upload_cover_image("pl1", "/9j/4AAQSkZJRg==")
        .await
        .unwrap();
}
