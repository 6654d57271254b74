//! Static Media Serving
//!
//! Each media kind is served under its directory name: `/image/{filename}`,
//! `/video/{filename}`, `/banner/{filename}`, `/blog/{filename}`,
//! `/blogVideos/{filename}`, `/profile/{filename}`. Files are public and
//! immutable once written, so responses carry a long-lived cache header.

use axum::{
    Router,
    body::Body,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tokio_util::io::ReaderStream;

use crate::core::ServerState;
use crate::media::MediaKind;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/image/{filename}", get(serve_image))
        .route("/video/{filename}", get(serve_video))
        .route("/banner/{filename}", get(serve_banner))
        .route("/blog/{filename}", get(serve_blog))
        .route("/blogVideos/{filename}", get(serve_blog_video))
        .route("/profile/{filename}", get(serve_profile))
}

async fn serve_image(state: State<ServerState>, filename: Path<String>) -> Response {
    serve(state, MediaKind::Image, filename).await
}

async fn serve_video(state: State<ServerState>, filename: Path<String>) -> Response {
    serve(state, MediaKind::Video, filename).await
}

async fn serve_banner(state: State<ServerState>, filename: Path<String>) -> Response {
    serve(state, MediaKind::Banner, filename).await
}

async fn serve_blog(state: State<ServerState>, filename: Path<String>) -> Response {
    serve(state, MediaKind::Blog, filename).await
}

async fn serve_blog_video(state: State<ServerState>, filename: Path<String>) -> Response {
    serve(state, MediaKind::BlogVideo, filename).await
}

async fn serve_profile(state: State<ServerState>, filename: Path<String>) -> Response {
    serve(state, MediaKind::Profile, filename).await
}

/// Stream one stored file with its guessed content type
///
/// The body is streamed rather than buffered; stored videos run to 50 MB.
/// Unsafe names (traversal attempts) and missing files both answer 404.
async fn serve(
    State(state): State<ServerState>,
    kind: MediaKind,
    Path(filename): Path<String>,
) -> Response {
    let Some(path) = state.media.path_for(kind, &filename) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match tokio::fs::File::open(&path).await {
        Ok(file) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            (
                [
                    (header::CONTENT_TYPE, mime.to_string()),
                    (
                        header::CACHE_CONTROL,
                        "public, max-age=31536000, immutable".to_string(),
                    ),
                ],
                Body::from_stream(ReaderStream::new(file)),
            )
                .into_response()
        }
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}
