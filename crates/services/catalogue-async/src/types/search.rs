//! Metadata (AI) search and document search types

use serde::{Deserialize, Serialize};

use super::tool::{DocMatch, Tool};

/// Default result cap for remote searches
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;

/// Query string parameters shared by both search endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchParams {
    /// Natural-language query
    pub q: String,
    /// Maximum number of results
    pub limit: u32,
}

impl SearchParams {
    /// Creates parameters with the default limit
    #[must_use]
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    /// Sets the result cap
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

/// Response of `GET /api/ai-search`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiSearchResponse {
    /// Echo of the query
    #[serde(default)]
    pub query: String,
    /// Tool-shaped matches, best first
    #[serde(default)]
    pub results: Vec<AiSearchHit>,
    /// Number of results
    #[serde(default)]
    pub total: usize,
}

/// One metadata match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiSearchHit {
    /// Tool id
    pub id: String,
    /// Tool name
    pub name: String,
    /// Tool description
    #[serde(default)]
    pub description: String,
    /// Tool icon
    #[serde(default)]
    pub icon: Option<String>,
    /// Primary link
    pub tool_link: String,
    /// Documentation link
    #[serde(default)]
    pub documentation_link: Option<String>,
    /// Tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Relevance in `[0, 1]`
    #[serde(default)]
    pub score: f64,
}

impl From<AiSearchHit> for Tool {
    fn from(hit: AiSearchHit) -> Self {
        Self {
            id: hit.id,
            name: hit.name,
            description: hit.description,
            icon: hit.icon,
            tool_link: hit.tool_link,
            documentation_link: hit.documentation_link,
            keywords: None,
            tags: hit.tags,
            created_at: None,
            updated_at: None,
            doc_match: None,
        }
    }
}

/// Response of `GET /api/doc-search`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocSearchResponse {
    /// Echo of the query
    #[serde(default)]
    pub query: String,
    /// Document chunks, possibly several per tool
    #[serde(default)]
    pub results: Vec<DocSearchHit>,
    /// Number of results
    #[serde(default)]
    pub total: usize,
}

/// One matching documentation chunk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocSearchHit {
    /// Owning tool id
    pub tool_id: String,
    /// Owning tool name
    #[serde(default)]
    pub tool_name: String,
    /// Matched excerpt
    pub content_snippet: String,
    /// Source page
    pub doc_url: String,
    /// Kind of source (`confluence`, `webpage`, ...)
    #[serde(default)]
    pub doc_type: Option<String>,
    /// Relevance in `[0, 1]`
    pub relevance_score: f64,
}

impl DocSearchHit {
    /// Payload attached to a fused tool
    #[must_use]
    pub fn to_doc_match(&self) -> DocMatch {
        DocMatch {
            content_snippet: self.content_snippet.clone(),
            relevance_score: self.relevance_score,
            doc_url: self.doc_url.clone(),
        }
    }
}
