use axum::{
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

// Embed the demo page at compile time
#[derive(RustEmbed)]
#[folder = "static"]
pub struct StaticAssets;

/// Serve the landing page.
///
/// Also used by the callback route, which renders the page directly after a
/// successful redirect instead of bouncing the browser.
pub async fn serve_index() -> Response {
    serve_path("index.html")
}

/// Serve an embedded static asset by URI path.
///
/// Unknown paths are a plain 404; there is no SPA-style index fallback.
pub async fn serve_asset(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    let path = if path.is_empty() { "index.html" } else { path };
    serve_path(path)
}

fn serve_path(path: &str) -> Response {
    match StaticAssets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.as_ref())], content.data).into_response()
        }
        None => (StatusCode::NOT_FOUND, "404 Not Found").into_response(),
    }
}
