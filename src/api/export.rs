//! Help Center CSV export endpoint

use axum::{
    extract::{rejection::FormRejection, State},
    http::header,
    response::{IntoResponse, Response},
    routing::post,
    Form, Router,
};
use serde::Deserialize;

use crate::api::middleware::{ApiError, AppState};
use crate::services::export::ExportError;

pub fn router() -> Router<AppState> {
    Router::new().route("/process", post(process))
}

#[derive(Debug, Deserialize)]
pub struct ProcessForm {
    #[serde(default)]
    pub subdomain: String,
}

/// POST /process - Export a tenant's articles as a CSV attachment
async fn process(
    State(state): State<AppState>,
    form: Result<Form<ProcessForm>, FormRejection>,
) -> Result<Response, ApiError> {
    let Form(form) = form.map_err(|rejection| {
        tracing::debug!("Rejected export form: {}", rejection);
        ApiError::from(ExportError::MissingSubdomain)
    })?;

    let export = state.exporter.export(&form.subdomain).await?;

    Ok((
        [
            (header::CONTENT_TYPE, export.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", export.filename),
            ),
        ],
        export.body,
    )
        .into_response())
}
