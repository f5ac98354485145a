use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when using the catalogue API client
#[derive(Debug, Error)]
pub enum CatalogueError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The server rejected the bearer token (HTTP 401)
    #[error("Not authenticated")]
    Unauthorized,

    /// The server rejected a create/update payload field by field
    #[error("Validation failed: {}", format_field_errors(.0))]
    Validation(Vec<FieldError>),

    /// Any other non-success response
    #[error("API error: {0}")]
    Api(ApiErrorObject),

    /// Configuration error (e.g., malformed token)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(String),
}

/// Non-success response from the catalogue API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorObject {
    /// HTTP status code
    #[serde(default)]
    pub status_code: Option<u16>,
    /// Human-readable error message
    #[serde(default)]
    pub message: String,
}

impl std::fmt::Display for ApiErrorObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "{code}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// One entry of a structured validation error (`detail` array)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    /// Location of the offending field, e.g. `["body", "tool_link"]`
    #[serde(default)]
    pub loc: Vec<serde_json::Value>,
    /// Message describing the problem
    pub msg: String,
    /// Machine-readable error kind
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl FieldError {
    /// Dotted field path (`body.tool_link`)
    #[must_use]
    pub fn path(&self) -> String {
        self.loc
            .iter()
            .map(|part| match part {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path(), self.msg)
    }
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Detail {
    Message(String),
    Fields(Vec<FieldError>),
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Detail,
}

impl CatalogueError {
    /// True for a 401 from the server
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// HTTP status of the failed response, when there was one
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Api(obj) => obj.status_code,
            Self::Reqwest(e) => e.status().map(|s| s.as_u16()),
            Self::Validation(_) | Self::Config(_) | Self::Serde(_) => None,
        }
    }
}

/// Maps a serde deserialization error to a `CatalogueError` with context
#[must_use]
pub fn map_deser(e: &serde_json::Error, body: &[u8]) -> CatalogueError {
    let snippet = String::from_utf8_lossy(&body[..body.len().min(400)]).to_string();
    CatalogueError::Serde(format!("{e}: {snippet}"))
}

/// Deserializes an API error from the response body
///
/// Understands `{"detail": "..."}` and `{"detail": [{"loc": [...], "msg": "..."}]}`,
/// falling back to the raw (truncated) body.
#[must_use]
pub fn deserialize_api_error(status: StatusCode, body: &[u8]) -> CatalogueError {
    if status == StatusCode::UNAUTHORIZED {
        return CatalogueError::Unauthorized;
    }

    let status_code = Some(status.as_u16());

    if let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) {
        return match parsed.detail {
            Detail::Fields(fields) if status.is_client_error() && !fields.is_empty() => {
                CatalogueError::Validation(fields)
            }
            Detail::Fields(fields) => CatalogueError::Api(ApiErrorObject {
                status_code,
                message: format_field_errors(&fields),
            }),
            Detail::Message(message) => CatalogueError::Api(ApiErrorObject {
                status_code,
                message,
            }),
        };
    }

    // Server may return plain text on 5xx; cap body to avoid log/memory bloat
    CatalogueError::Api(ApiErrorObject {
        status_code,
        message: String::from_utf8_lossy(&body[..body.len().min(400)]).into_owned(),
    })
}
