//! Embedded page assets
//!
//! The page lives in `ui/` and is compiled into the binary. In development,
//! falls back to serving from the filesystem.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
};
use rust_embed::Embed;
use std::path::PathBuf;

const UI_DIR: &str = "ui";

#[derive(Embed)]
#[folder = "ui"]
struct Assets;

/// Serve embedded static files, with filesystem fallback for development
pub async fn serve_static(req: Request<Body>) -> Response {
    let path = req.uri().path().trim_start_matches('/');

    // Try embedded assets first
    if let Some(content) = Assets::get(path) {
        return asset_response(path, content.data.to_vec());
    }

    // Fallback to filesystem in development, never outside `ui/`
    let fs_path = PathBuf::from(UI_DIR).join(path);
    if !path.split('/').any(|seg| seg == "..") && fs_path.is_file() {
        if let Ok(content) = tokio::fs::read(&fs_path).await {
            return asset_response(path, content);
        }
    }

    (StatusCode::NOT_FOUND, "Not found").into_response()
}

fn asset_response(path: &str, content: Vec<u8>) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, mime.as_ref().to_string())],
        content,
    )
        .into_response()
}

/// Get the index.html content (embedded or from filesystem)
pub fn get_index_html() -> Option<String> {
    // Try embedded first
    if let Some(content) = Assets::get("index.html") {
        return String::from_utf8(content.data.to_vec()).ok();
    }

    // Fallback to filesystem
    std::fs::read_to_string(PathBuf::from(UI_DIR).join("index.html")).ok()
}
