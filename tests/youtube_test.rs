//! YouTube trailer client tests
//!
//! The client never errors: every failure class resolves to "no trailer".

use mockito::{Matcher, Server};
use streamvault::api::YoutubeClient;

#[tokio::test]
async fn test_finds_official_trailer() {
    let mut server = Server::new_async().await;

    let mock_response = r#"{
        "items": [
            {
                "id": {"kind": "youtube#video", "videoId": "zSWdZVtXT7E"},
                "snippet": {
                    "title": "Interstellar Movie - Official Trailer",
                    "channelTitle": "Paramount Pictures"
                }
            }
        ]
    }"#;

    let mock = server
        .mock("GET", "/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("part".into(), "snippet".into()),
            Matcher::UrlEncoded("maxResults".into(), "1".into()),
            Matcher::UrlEncoded("q".into(), "Interstellar 2014 official trailer".into()),
            Matcher::UrlEncoded("type".into(), "video".into()),
            Matcher::UrlEncoded("videoType".into(), "official".into()),
            Matcher::UrlEncoded("key".into(), "yt_key".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(mock_response)
        .create_async()
        .await;

    let client = YoutubeClient::with_base_url(Some("yt_key".to_string()), server.url());
    let trailer = client.find_trailer("Interstellar", "2014").await.unwrap();

    mock.assert_async().await;

    assert_eq!(trailer.video_id, "zSWdZVtXT7E");
    assert_eq!(trailer.title, "Interstellar Movie - Official Trailer");
    assert_eq!(trailer.channel, "Paramount Pictures");
}

#[tokio::test]
async fn test_no_results_is_none() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"items": []}"#)
        .create_async()
        .await;

    let client = YoutubeClient::with_base_url(Some("yt_key".to_string()), server.url());
    let trailer = client.find_trailer("Some Obscure Film", "1931").await;

    mock.assert_async().await;
    assert!(trailer.is_none());
}

#[tokio::test]
async fn test_quota_error_is_none() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body(r#"{"error": {"code": 403, "message": "quotaExceeded"}}"#)
        .create_async()
        .await;

    let client = YoutubeClient::with_base_url(Some("yt_key".to_string()), server.url());
    let trailer = client.find_trailer("Interstellar", "2014").await;

    mock.assert_async().await;
    assert!(trailer.is_none());
}

#[tokio::test]
async fn test_malformed_body_is_none() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>definitely not json</html>")
        .create_async()
        .await;

    let client = YoutubeClient::with_base_url(Some("yt_key".to_string()), server.url());
    let trailer = client.find_trailer("Interstellar", "2014").await;

    mock.assert_async().await;
    assert!(trailer.is_none());
}

#[tokio::test]
async fn test_missing_key_is_none() {
    // No key configured: the lookup short-circuits without any request
    let client = YoutubeClient::with_base_url(None, "http://127.0.0.1:1");
    let trailer = client.find_trailer("Interstellar", "2014").await;
    assert!(trailer.is_none());
}
