//! Page rendering error types

use thiserror::Error;

/// Template and asset errors
#[derive(Debug, Error)]
pub enum ThemeError {
    /// Template not registered
    #[error("Template not found: {0}")]
    NotFound(String),

    /// Template parsing or rendering error
    #[error("Template error: {0}")]
    TemplateError(String),

    /// Embedded file is not valid UTF-8
    #[error("Template {0} is not valid UTF-8")]
    InvalidEncoding(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
