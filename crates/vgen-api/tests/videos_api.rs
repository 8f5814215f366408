//! Polling, gallery and style endpoints.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;

use common::spawn_app;

#[tokio::test]
async fn unknown_video_is_not_found() {
    let app = spawn_app(Duration::from_secs(60)).await;

    let (status, body) = app.get("/api/video/does-not-exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Video not found");
}

#[tokio::test]
async fn get_returns_submitted_job() {
    let app = spawn_app(Duration::from_secs(60)).await;

    let (_, submitted) = app
        .post_json(
            "/api/generate-text-to-video",
            json!({"prompt": "A fox", "style": "cartoon", "duration": 9}),
        )
        .await;
    let id = submitted["id"].as_str().unwrap();

    let (status, job) = app.get(&format!("/api/video/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(job, submitted);
}

#[tokio::test]
async fn gallery_lists_newest_first_with_total() {
    let app = spawn_app(Duration::from_secs(60)).await;

    let mut ids = Vec::new();
    for prompt in ["first", "second", "third"] {
        let (_, job) = app
            .post_json(
                "/api/generate-text-to-video",
                json!({"prompt": prompt, "style": "anime"}),
            )
            .await;
        ids.push(job["id"].as_str().unwrap().to_string());
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let (status, gallery) = app.get("/api/videos").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(gallery["total_count"], 3);
    let listed: Vec<&str> = gallery["videos"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_str().unwrap())
        .collect();
    assert_eq!(listed, vec![ids[2].as_str(), ids[1].as_str(), ids[0].as_str()]);

    let (_, page) = app.get("/api/videos?limit=1&offset=1").await;
    assert_eq!(page["total_count"], 3);
    assert_eq!(page["videos"].as_array().unwrap().len(), 1);
    assert_eq!(page["videos"][0]["prompt"], "second");

    let (_, past_end) = app.get("/api/videos?offset=10").await;
    assert_eq!(past_end["total_count"], 3);
    assert!(past_end["videos"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn empty_gallery() {
    let app = spawn_app(Duration::from_secs(60)).await;

    let (status, gallery) = app.get("/api/videos").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(gallery, json!({"videos": [], "total_count": 0}));
}

#[tokio::test]
async fn styles_are_grouped_by_flow() {
    let app = spawn_app(Duration::from_secs(60)).await;

    let (status, styles) = app.get("/api/styles").await;
    assert_eq!(status, StatusCode::OK);

    let text: Vec<&str> = styles["text_to_video_styles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        text,
        vec!["realistic", "anime", "cartoon", "surreal", "talking_image"]
    );

    let image = styles["image_to_video_styles"].as_array().unwrap();
    assert_eq!(image.len(), 3);
    assert_eq!(image[2]["id"], "talking_face");
    assert_eq!(image[2]["name"], "Talking Face");
    assert_eq!(image[2]["description"], "Make faces speak and move");
}

#[tokio::test]
async fn invalid_pagination_uses_error_body() {
    let app = spawn_app(Duration::from_secs(60)).await;

    for query in ["limit=abc", "offset=-1"] {
        let (status, body) = app.get(&format!("/api/videos?{query}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{query}");
        assert!(body["detail"].as_str().unwrap().contains("query"), "{body}");
    }
}
