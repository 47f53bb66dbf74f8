use meal_planner::models::VideoResult;
use meal_planner::youtube::{VideoError, YouTubeClient};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer, key: Option<&str>) -> YouTubeClient {
    YouTubeClient::new(reqwest::Client::new(), key.map(String::from), server.uri())
}

#[tokio::test]
async fn returns_first_short_video() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "lentil stew recipe under 5 minutes"))
        .and(query_param("type", "video"))
        .and(query_param("videoDuration", "short"))
        .and(query_param("maxResults", "1"))
        .and(query_param("key", "yt-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": { "kind": "youtube#video", "videoId": "abc123" },
                "snippet": {
                    "title": "Lentil Stew in 5",
                    "thumbnails": { "medium": { "url": "https://img.example/abc123.jpg" } }
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let video = client(&server, Some("yt-key")).search("lentil stew").await.unwrap();
    assert_eq!(
        video,
        Some(VideoResult {
            id: "abc123".into(),
            title: "Lentil Stew in 5".into(),
            thumbnail: "https://img.example/abc123.jpg".into(),
        })
    );
}

#[tokio::test]
async fn empty_results_are_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;

    assert_eq!(client(&server, Some("yt-key")).search("nothing").await.unwrap(), None);
}

#[tokio::test]
async fn missing_key_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    assert_eq!(client(&server, None).search("anything").await.unwrap(), None);
}

#[tokio::test]
async fn quota_errors_surface_as_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(403).set_body_string("quotaExceeded"))
        .mount(&server)
        .await;

    let err = client(&server, Some("yt-key")).search("rice").await.unwrap_err();
    assert!(matches!(err, VideoError::Status { status: 403, .. }));
}
