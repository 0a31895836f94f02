//! Help Center category model

use serde::Deserialize;

use super::ResourceId;

/// Top-level Help Center category
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Category {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
}
