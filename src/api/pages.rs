//! Static site pages

use axum::{extract::State, response::Html, routing::get, Router};

use crate::api::middleware::{ApiError, AppState};
use crate::theme::{PageVars, SitePage};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/writing", get(writing))
        .route("/writing/", get(writing))
        .route("/design", get(design))
        .route("/design/", get(design))
        .route("/process_page", get(process_page))
        .route("/process_page/", get(process_page))
}

fn render(state: &AppState, page: SitePage) -> Result<Html<String>, ApiError> {
    let html = state.renderer.render_page(page, &PageVars::new(page, "/"))?;
    Ok(Html(html))
}

async fn home(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    render(&state, SitePage::Home)
}

async fn writing(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    render(&state, SitePage::Writing)
}

async fn design(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    render(&state, SitePage::Design)
}

async fn process_page(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    render(&state, SitePage::Process)
}
