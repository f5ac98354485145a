//! Tool records and their create/update payloads

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A catalogue entry describing one internal service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    /// Stable unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Emoji, short label, or image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Primary link to the tool
    pub tool_link: String,
    /// Link to the tool's documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_link: Option<String>,
    /// Comma-separated hints used by the server-side AI search
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    /// Category tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Creation time
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    /// Present only when the tool matched through document search
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_match: Option<DocMatch>,
}

impl Tool {
    /// True if any of the tool's tags is in `selected`
    pub fn has_any_tag<S: AsRef<str>>(&self, selected: &[S]) -> bool {
        selected
            .iter()
            .any(|s| self.tags.iter().any(|t| t == s.as_ref()))
    }
}

/// Documentation snippet that matched a hybrid search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocMatch {
    /// Matching excerpt of the documentation
    pub content_snippet: String,
    /// Relevance in `[0, 1]`
    pub relevance_score: f64,
    /// Page the snippet came from
    pub doc_url: String,
}

/// Payload for `POST /api/tools`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCreate {
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Emoji, short label, or image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Primary link to the tool
    pub tool_link: String,
    /// Link to the tool's documentation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation_link: Option<String>,
    /// Comma-separated AI-search hints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    /// Category tags
    pub tags: Vec<String>,
}

impl ToolCreate {
    /// Creates a payload with the three required fields
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        tool_link: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            tool_link: tool_link.into(),
            ..Default::default()
        }
    }

    /// Sets the icon
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Sets the documentation link
    #[must_use]
    pub fn with_documentation_link(mut self, link: impl Into<String>) -> Self {
        self.documentation_link = Some(link.into());
        self
    }

    /// Sets the AI-search keywords
    #[must_use]
    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    /// Sets the tags
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Partial payload for `PUT /api/tools/{id}`; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolUpdate {
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New icon
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// New primary link
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_link: Option<String>,
    /// New documentation link
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation_link: Option<String>,
    /// New AI-search keywords
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    /// Replacement tag list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl ToolUpdate {
    /// True when no field would be changed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<ToolCreate> for ToolUpdate {
    fn from(c: ToolCreate) -> Self {
        Self {
            name: Some(c.name),
            description: Some(c.description),
            icon: c.icon,
            tool_link: Some(c.tool_link),
            documentation_link: c.documentation_link,
            keywords: c.keywords,
            tags: Some(c.tags),
        }
    }
}

/// Accepts RFC 3339 timestamps as well as the naive `YYYY-MM-DDTHH:MM:SS[.f]`
/// form the API emits; naive values are taken as UTC.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Some(naive.and_utc()))
        .map_err(serde::de::Error::custom)
}
