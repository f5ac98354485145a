//! Tag statistics

use serde::{Deserialize, Serialize};

/// Response of `GET /api/tags/stats`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagStats {
    /// Number of distinct tags
    pub total_tags: usize,
    /// Per-tag usage, most used first
    #[serde(default)]
    pub tags: Vec<TagCount>,
}

/// Usage count of one tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    /// Tag text
    pub name: String,
    /// Number of tools carrying the tag
    pub count: usize,
}
