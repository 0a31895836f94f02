//! Shared request state and error responses
//!
//! Every failure surfaced to a browser is a fixed plain-text message with
//! the status code the export form understands.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::config::Config;
use crate::services::export::{ArticleExporter, ExportError};
use crate::services::fetcher::HelpCenterClient;
use crate::theme::{PageRenderer, ThemeError};

/// Application state, constructed once at startup and handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub renderer: Arc<PageRenderer>,
    pub exporter: Arc<ArticleExporter>,
}

impl AppState {
    pub fn new(renderer: PageRenderer, exporter: ArticleExporter) -> Self {
        Self {
            renderer: Arc::new(renderer),
            exporter: Arc::new(exporter),
        }
    }

    /// Build the embedded renderer and an exporter for the configured API
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let renderer = PageRenderer::embedded()?;
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let exporter = ArticleExporter::new(HelpCenterClient::new(http), config.zendesk.api_base.clone());
        Ok(Self::new(renderer, exporter))
    }
}

/// Plain-text error response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

pub const MSG_MISSING_SUBDOMAIN: &str = "Subdomain is required.";
pub const MSG_INVALID_SUBDOMAIN: &str = "Invalid subdomain format.";
pub const MSG_NO_ARTICLES: &str = "No articles found.";
pub const MSG_AUTH_REQUIRED: &str = "This help center requires authentication to access the API.";
pub const MSG_NOT_FOUND: &str = "Help center not found. Check the subdomain spelling.";
pub const MSG_EXPORT_FAILED: &str = "An error occurred while processing the export.";

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.message,
        )
            .into_response()
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::MissingSubdomain => Self::validation_error(MSG_MISSING_SUBDOMAIN),
            ExportError::InvalidSubdomain(_) => Self::validation_error(MSG_INVALID_SUBDOMAIN),
            ExportError::NoArticles => Self::validation_error(MSG_NO_ARTICLES),
            ExportError::AuthRequired => Self::unauthorized(MSG_AUTH_REQUIRED),
            ExportError::NotFound => Self::not_found(MSG_NOT_FOUND),
            ExportError::Upstream { .. }
            | ExportError::Transport(_)
            | ExportError::Decode { .. }
            | ExportError::MalformedDate(_)
            | ExportError::Csv(_) => {
                tracing::error!("Export failed: {}", err);
                Self::internal_error(MSG_EXPORT_FAILED)
            }
        }
    }
}

impl From<ThemeError> for ApiError {
    fn from(err: ThemeError) -> Self {
        tracing::error!("Page rendering failed: {}", err);
        Self::internal_error("Failed to render page.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResourceKind;

    #[test]
    fn test_export_error_status_mapping() {
        let cases = [
            (ExportError::MissingSubdomain, StatusCode::BAD_REQUEST, MSG_MISSING_SUBDOMAIN),
            (ExportError::InvalidSubdomain("-bad-".into()), StatusCode::BAD_REQUEST, MSG_INVALID_SUBDOMAIN),
            (ExportError::NoArticles, StatusCode::BAD_REQUEST, MSG_NO_ARTICLES),
            (ExportError::AuthRequired, StatusCode::UNAUTHORIZED, MSG_AUTH_REQUIRED),
            (ExportError::NotFound, StatusCode::NOT_FOUND, MSG_NOT_FOUND),
            (
                ExportError::Upstream { status: 502, resource: ResourceKind::Sections },
                StatusCode::INTERNAL_SERVER_ERROR,
                MSG_EXPORT_FAILED,
            ),
            (
                ExportError::MalformedDate("yesterday".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                MSG_EXPORT_FAILED,
            ),
        ];

        for (err, status, message) in cases {
            let api_error = ApiError::from(err);
            assert_eq!(api_error.status, status);
            assert_eq!(api_error.message, message);
        }
    }

    #[test]
    fn test_api_error_is_plain_text() {
        let response = ApiError::validation_error(MSG_NO_ARTICLES).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
    }
}
