//! Integration tests for `DeskClient` using wiremock HTTP mocks.

use std::io::Write;

use postdeck::api::{ApiError, DeskClient, GenerateRequest, Platform, ScheduleRequest};
use wiremock::matchers::{body_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> DeskClient {
    DeskClient::new(base_url, 30).expect("client construction should not fail")
}

#[tokio::test]
async fn upload_sends_the_file_field_and_returns_the_storage_path() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("sample image bytes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "path": "/static/uploads/photo.jpg"
        })))
        .mount(&server)
        .await;

    let mut file = tempfile::NamedTempFile::new().expect("temp file should be created");
    file.write_all(b"sample image bytes")
        .expect("temp file should be writable");

    let client = test_client(&server.uri());
    let response = client
        .upload_image(file.path())
        .await
        .expect("upload should succeed");

    assert_eq!(response.path, "/static/uploads/photo.jpg");
}

#[tokio::test]
async fn upload_of_a_missing_file_fails_without_a_request() {
    let server = MockServer::start().await;

    let client = test_client(&server.uri());
    let error = client
        .upload_image(std::path::Path::new("/nonexistent/photo.jpg"))
        .await
        .expect_err("missing file should fail");

    assert!(matches!(error, ApiError::Io { .. }));
    assert_eq!(server.received_requests().await.unwrap_or_default().len(), 0);
}

#[tokio::test]
async fn generate_sends_the_exact_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_json(serde_json::json!({
            "filepath": "/static/uploads/photo.jpg",
            "platform": "Instagram",
            "topic": "product launch"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "image_url": "/static/generated/1.png",
            "caption": "Fresh off the press"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let response = client
        .generate_content(&GenerateRequest {
            filepath: "/static/uploads/photo.jpg".to_string(),
            platform: Platform::Instagram,
            topic: "product launch".to_string(),
        })
        .await
        .expect("generation should succeed");

    assert_eq!(response.image_url, "/static/generated/1.png");
    assert_eq!(response.caption, "Fresh off the press");
}

#[tokio::test]
async fn schedule_posts_the_previewed_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/schedule"))
        .and(body_json(serde_json::json!({
            "image_url": "/static/generated/1.png",
            "caption": "Hello, edited before posting",
            "platform": "LinkedIn"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "msg": "Post scheduled for LinkedIn"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let response = client
        .schedule_post(&ScheduleRequest {
            image_url: "/static/generated/1.png".to_string(),
            caption: "Hello, edited before posting".to_string(),
            platform: Platform::LinkedIn,
        })
        .await
        .expect("scheduling should succeed");

    assert_eq!(response.msg, "Post scheduled for LinkedIn");
}

#[tokio::test]
async fn analytics_parses_both_series_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/analytics-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "engagement_trend": [120, 150, 170, 140, 180, 210, 190],
            "platforms": [45, 30, 25]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let data = client
        .analytics_data()
        .await
        .expect("analytics should parse");

    assert_eq!(
        data.engagement_trend,
        vec![120.0, 150.0, 170.0, 140.0, 180.0, 210.0, 190.0]
    );
    assert_eq!(data.platforms, vec![45.0, 30.0, 25.0]);
}

#[tokio::test]
async fn non_success_status_is_reported_with_the_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/analytics-data"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend down"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let error = client
        .analytics_data()
        .await
        .expect_err("500 should be an error");

    match error {
        ApiError::Status { status, message } => {
            assert_eq!(status.as_u16(), 500);
            assert!(message.contains("backend down"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_payload_is_a_shape_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/analytics-data"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<!doctype html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let error = client
        .analytics_data()
        .await
        .expect_err("non-JSON body should be an error");

    assert!(matches!(error, ApiError::Deserialize { .. }));
}

#[tokio::test]
async fn preview_fetch_resolves_relative_urls_against_the_server() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/static/generated/1.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x89, 0x50, 0x4e, 0x47]))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let bytes = client
        .fetch_image("/static/generated/1.png")
        .await
        .expect("image fetch should succeed");

    assert_eq!(bytes, vec![0x89, 0x50, 0x4e, 0x47]);
}
