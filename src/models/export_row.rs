//! CSV export row

use serde::Serialize;

/// One line of the exported CSV, derived from a single article.
///
/// Fields serialize in declaration order, matching [`EXPORT_HEADERS`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExportRow {
    pub id: String,
    pub title: String,
    pub url: String,
    pub created: String,
    pub section: String,
    pub category: String,
    pub labels: String,
}

/// Header row written at the top of every export
pub const EXPORT_HEADERS: [&str; 7] = [
    "ID",
    "Article title",
    "URL",
    "Created",
    "Section",
    "Category",
    "Labels",
];
