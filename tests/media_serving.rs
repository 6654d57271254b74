//! Static media serving integration tests
//!
//! Drives the assembled router directly so the full middleware stack and the
//! streamed file responses are exercised.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use storefront_server::{Config, MediaKind, ServerState, api};
use tempfile::TempDir;
use tower::ServiceExt;

async fn setup() -> (ServerState, TempDir) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = Config::with_overrides(tmp.path().to_string_lossy().to_string(), 0);
    let state = ServerState::initialize_in_memory(&config).await;
    (state, tmp)
}

fn png_bytes() -> Vec<u8> {
    let img = image::RgbImage::new(4, 4);
    let mut buf = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, image::ImageFormat::Png)
        .expect("encode png");
    buf.into_inner()
}

async fn get(state: &ServerState, uri: &str) -> axum::response::Response {
    let app = api::build_app(state).with_state(state.clone());
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request"),
    )
    .await
    .expect("response")
}

#[tokio::test]
async fn stored_image_is_served_with_content_type() {
    let (state, _tmp) = setup().await;
    let payload = png_bytes();
    let filename = state
        .media
        .save(MediaKind::Image, "photo.png", &payload)
        .expect("save");

    let response = get(&state, &format!("/image/{}", filename)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .expect("content type"),
        "image/png"
    );
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(body.as_ref(), payload.as_slice());
}

#[tokio::test]
async fn video_round_trips_through_the_stream() {
    let (state, _tmp) = setup().await;
    // Larger than a single stream chunk, so the body spans multiple frames
    let payload = vec![7u8; 256 * 1024];
    let filename = state
        .media
        .save(MediaKind::Video, "clip.mp4", &payload)
        .expect("save");

    let response = get(&state, &format!("/video/{}", filename)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .expect("content type"),
        "video/mp4"
    );
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(body.len(), payload.len());
    assert_eq!(body.as_ref(), payload.as_slice());
}

#[tokio::test]
async fn missing_file_answers_not_found() {
    let (state, _tmp) = setup().await;
    let response = get(&state, "/image/no-such-file.png").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
