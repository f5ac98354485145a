//! Configuration types for the catalogue client.
//!
//! [`CatalogueSettings`] is the root; each concern gets its own section.
//! Every struct uses `#[serde(default)]` so partial files deserialize.

use schemars::JsonSchema;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Tools pulled to the front of an unfiltered listing, in this order.
pub const DEFAULT_PRIORITY_NAMES: [&str; 3] = ["ag trades db", "ag cms", "periscope"];

/// Root configuration, loaded from `catalogue.json` files.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CatalogueSettings {
    /// Optional JSON Schema URL for IDE autocomplete support.
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Remote API connection.
    pub api: ApiConfig,

    /// Login and token storage.
    pub auth: AuthConfig,

    /// Who may see the admin panel.
    pub admin: AdminConfig,

    /// Ranking and hybrid search behavior.
    pub search: SearchConfig,

    /// Logging and diagnostics.
    pub logging: LoggingConfig,
}

/// Remote API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the catalogue REST API.
    pub base_url: String,

    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,

    /// Bearer token (env-only, never serialized to config files).
    #[serde(skip)]
    #[schemars(skip)]
    pub token: Option<SecretString>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8889".into(),
            timeout_secs: 30,
            token: None,
        }
    }
}

/// Where the bearer token is persisted between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TokenStoreKind {
    /// Operating system keyring.
    #[default]
    Keyring,

    /// Encrypted file under the XDG data directory.
    File,
}

/// Login flow settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AuthConfig {
    /// Login entry point; defaults to `{api.base_url}/auth/google/login`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_url: Option<String>,

    /// Port of the local one-shot callback server.
    pub callback_port: u16,

    /// Token storage backend.
    pub store: TokenStoreKind,

    /// Skip authentication entirely and act as a synthetic admin.
    pub dev_bypass: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_url: None,
            callback_port: 19877,
            store: TokenStoreKind::default(),
            dev_bypass: false,
        }
    }
}

impl AuthConfig {
    /// Login URL, falling back to the API's Google login route.
    pub fn resolved_login_url(&self, api_base: &str) -> String {
        self.login_url.clone().unwrap_or_else(|| {
            format!("{}/auth/google/login", api_base.trim_end_matches('/'))
        })
    }
}

/// Admin visibility settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AdminConfig {
    /// Emails granted admin access regardless of role (case-insensitive).
    pub emails: Vec<String>,

    /// Development switch: every signed-in user is an admin.
    pub everyone_is_admin: bool,
}

/// How the document-only bucket of a hybrid search is bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DocOnlyMode {
    /// Fill the list up to `doc_only_cap` results in total.
    #[default]
    Capped,

    /// Append every document-only match.
    Uncapped,
}

/// Ranking and hybrid search settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SearchConfig {
    /// Result cap sent to both remote search endpoints.
    pub limit: u32,

    /// Document-only bucket policy.
    pub doc_only: DocOnlyMode,

    /// Total result count the document-only bucket may fill up to.
    pub doc_only_cap: usize,

    /// Tool names boosted to the front when no query is active.
    pub priority_names: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: 20,
            doc_only: DocOnlyMode::default(),
            doc_only_cap: 10,
            priority_names: DEFAULT_PRIORITY_NAMES.iter().map(|s| (*s).into()).collect(),
        }
    }
}

/// Logging and diagnostics configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,

    /// Whether to enable JSON-formatted logs.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
        }
    }
}
