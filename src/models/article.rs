//! Help Center article model

use serde::Deserialize;

use super::ResourceId;

/// Article as returned by the `articles.json` endpoint.
///
/// Only the fields used by the export are decoded; everything else on
/// the upstream record is ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Article {
    pub id: ResourceId,
    #[serde(default)]
    pub title: String,
    /// Canonical public URL of the article
    #[serde(default)]
    pub html_url: String,
    /// ISO 8601 creation timestamp, UTC (`2024-01-05T10:00:00Z`)
    pub created_at: String,
    #[serde(default)]
    pub section_id: Option<ResourceId>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub label_names: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
