//! Embedded static asset serving

use axum::{
    body::Body,
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use crate::api::middleware::AppState;
use crate::theme::SiteAssets;

pub fn router() -> Router<AppState> {
    Router::new().route("/static/{*path}", get(serve_static))
}

/// GET /static/{*path} - Serve a file compiled in from `static/`
async fn serve_static(Path(path): Path<String>) -> Response {
    match SiteAssets::get(&path) {
        Some(content) => (
            [
                (header::CONTENT_TYPE, get_content_type(&path)),
                (header::CACHE_CONTROL, "public, max-age=3600"),
            ],
            Body::from(content.data.into_owned()),
        )
            .into_response(),
        None => not_found(),
    }
}

/// 404 response
pub async fn fallback() -> Response {
    not_found()
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "Not Found",
    )
        .into_response()
}

/// Get content type from file extension
pub fn get_content_type(path: &str) -> &'static str {
    match path.rsplit('.').next().unwrap_or("") {
        "css" => "text/css",
        "js" => "application/javascript",
        _ => "application/octet-stream",
    }
}
