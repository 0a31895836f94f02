//! Help Center resource identity and response shapes

use serde::{Deserialize, Deserializer};
use std::fmt;

/// Identifier of a Help Center record.
///
/// The API returns numeric IDs, but references between records are
/// matched as strings so that `123` and `"123"` resolve to the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Uint(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => Self(n.to_string()),
            RawId::Uint(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s),
        })
    }
}

/// The three list endpoints of the Help Center API.
///
/// Each page of an endpoint carries its records under exactly one key,
/// so the fetcher is told which key to read instead of guessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Articles,
    Sections,
    Categories,
}

impl ResourceKind {
    /// JSON key holding the records on each page
    pub fn key(&self) -> &'static str {
        match self {
            ResourceKind::Articles => "articles",
            ResourceKind::Sections => "sections",
            ResourceKind::Categories => "categories",
        }
    }

    /// Endpoint path relative to the API base
    pub fn endpoint(&self) -> &'static str {
        match self {
            ResourceKind::Articles => "articles.json",
            ResourceKind::Sections => "sections.json",
            ResourceKind::Categories => "categories.json",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
