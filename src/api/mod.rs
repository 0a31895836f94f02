//! API layer - HTTP handlers and routing
//!
//! - Static site pages (home, writing, design, process)
//! - Help Center CSV export endpoint
//! - Embedded static assets

pub mod export;
pub mod middleware;
pub mod pages;
pub mod static_files;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use middleware::{ApiError, AppState};

/// Build the complete router with middleware
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(pages::router())
        .merge(export::router())
        .merge(static_files::router())
        .fallback(static_files::fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
