//! Help Center section model

use serde::Deserialize;

use super::ResourceId;

/// Section grouping articles inside a category
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Section {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category_id: Option<ResourceId>,
}
