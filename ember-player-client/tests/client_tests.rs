//! Gateway tests against a mock catalog server.

use ember_player_client::{
    Error,
    catalog_models::{recommendations::Seeds, track::TrackPayload},
    client::{self, Client, ClientConfig},
};
use wiremock::matchers::{any, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, api_key: Option<&str>) -> Client {
    client::new(ClientConfig {
        base_url: server.uri(),
        api_host: "catalog.test".to_string(),
        api_key: api_key.map(str::to_string),
    })
    .unwrap()
}

#[tokio::test]
async fn missing_api_key_fails_without_a_request() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let result = client.search_multi("daft punk", 10, 0).await;

    assert!(matches!(result, Err(Error::MissingApiKey)));

    let blank = client_for(&server, Some("   "));
    let result = blank.playlist_tracks("37i9dQZF1DXcBWIGoYBM5M", 0, 50).await;

    assert!(matches!(result, Err(Error::MissingApiKey)));
}

#[tokio::test]
async fn search_sends_credentials_and_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/"))
        .and(query_param("type", "multi"))
        .and(query_param("q", "daft punk"))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "0"))
        .and(header("x-rapidapi-key", "secret"))
        .and(header("x-rapidapi-host", "catalog.test"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{
                "tracks": {"totalCount": 1, "items": [
                    {"data": {"id": "t1", "name": "One More Time",
                              "artists": {"items": [{"profile": {"name": "Daft Punk"}}]},
                              "duration": {"totalMilliseconds": 320357}}}
                ]},
                "artists": {"items": [{"data": {"uri": "spotify:artist:1", "profile": {"name": "Daft Punk"}}}]},
                "albums": {"items": []}
            }"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("secret"));
    let results = client.search_multi("daft punk", 10, 0).await.unwrap();

    let tracks = results.tracks.unwrap().into_items();
    assert_eq!(tracks.len(), 1);
    assert!(matches!(tracks[0], TrackPayload::Wrapped { .. }));
    assert_eq!(results.artists.unwrap().into_items().len(), 1);
}

#[tokio::test]
async fn error_status_is_an_api_error() {
    let server = MockServer::start().await;
    Mock::given(path("/recommendations/"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = client_for(&server, Some("secret"));
    let seeds = Seeds {
        genres: vec!["pop".into(), "rock".into()],
        ..Default::default()
    };

    match client.recommendations(&seeds).await {
        Err(Error::Api { message }) => assert!(message.contains("429")),
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn recommendation_seeds_are_comma_joined() {
    let server = MockServer::start().await;
    Mock::given(path("/recommendations/"))
        .and(query_param("seed_genres", "pop,rock,electronic"))
        .and(query_param("seed_tracks", "0c6xIDDpzE81m2q797ordA"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"tracks": [{"id": "a"}]}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("secret"));
    let seeds = Seeds {
        tracks: vec!["0c6xIDDpzE81m2q797ordA".into()],
        artists: vec![],
        genres: vec!["pop".into(), "rock".into(), "electronic".into()],
        limit: 10,
    };

    let recommendations = client.recommendations(&seeds).await.unwrap();
    assert_eq!(recommendations.tracks.map(|t| t.len()), Some(1));
}

#[tokio::test]
async fn malformed_body_is_a_deserialize_error() {
    let server = MockServer::start().await;
    Mock::given(path("/playlist_tracks/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, Some("secret"));
    let result = client.playlist_tracks("abc", 0, 50).await;

    assert!(matches!(result, Err(Error::DeserializeJSON { .. })));
}

#[tokio::test]
async fn playlist_tracks_pass_paging_parameters() {
    let server = MockServer::start().await;
    Mock::given(path("/playlist_tracks/"))
        .and(query_param("id", "abc"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"items": [null, {"track": null}, {"track": {"id": "t1", "name": "First"}}]}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("secret"));
    let tracks: Vec<_> = client
        .playlist_tracks("abc", 0, 50)
        .await
        .unwrap()
        .into_tracks()
        .collect();

    assert_eq!(tracks.len(), 1);
}

#[tokio::test]
async fn batch_track_lookup_drops_unknown_ids() {
    let server = MockServer::start().await;
    Mock::given(path("/tracks/"))
        .and(query_param("ids", "a,b"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"tracks": [{"id": "a"}, null]}"#),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, Some("secret"));
    let tracks = client.tracks(&["a", "b"]).await.unwrap();

    assert_eq!(tracks.len(), 1);
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = client::new(ClientConfig {
        base_url: "not a url".to_string(),
        ..Default::default()
    });

    assert!(matches!(result, Err(Error::InvalidUrl { .. })));
}

#[tokio::test]
async fn null_search_entries_are_skipped() {
    let server = MockServer::start().await;
    Mock::given(path("/search/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"tracks": {"items": [null, {"data": {"id": "t1", "name": "One"}}]},
                "albums": {"items": [null]}}"#,
        ))
        .mount(&server)
        .await;

    let client = client_for(&server, Some("secret"));
    let results = client.search_multi("one", 10, 0).await.unwrap();

    assert_eq!(results.tracks.unwrap().into_items().len(), 1);
    assert!(results.albums.unwrap().into_items().is_empty());
}

#[tokio::test]
async fn null_recommendation_entries_do_not_fail_the_response() {
    let server = MockServer::start().await;
    Mock::given(path("/recommendations/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"tracks": [null, {"id": "t1", "name": "One"}]}"#),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, Some("secret"));
    let seeds = Seeds {
        genres: vec!["house".into()],
        ..Seeds::default()
    };

    let recommendations = client.recommendations(&seeds).await.unwrap();
    let tracks: Vec<_> = recommendations.tracks.unwrap().into_iter().flatten().collect();
    assert_eq!(tracks.len(), 1);
}
