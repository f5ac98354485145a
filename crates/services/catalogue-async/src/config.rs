use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use std::sync::{Arc, PoisonError, RwLock};

/// Default catalogue API base URL
pub const CATALOGUE_DEFAULT_BASE: &str = "http://localhost:8889";
/// Environment variable overriding the API base URL
pub const ENV_API_BASE: &str = "CATALOGUE_API_BASE";
/// Environment variable supplying a bearer token
pub const ENV_TOKEN: &str = "CATALOGUE_TOKEN";

/// Source of the bearer token attached to every request.
///
/// `evict` is called by the client when the server answers 401, so the
/// stored token is dropped before the caller sees the error.
pub trait CredentialSource: Send + Sync + std::fmt::Debug {
    /// Current bearer token, if any
    fn bearer_token(&self) -> Option<SecretString>;

    /// Forget the current token
    fn evict(&self);
}

/// In-memory credential source holding a single token.
#[derive(Debug, Default)]
pub struct StaticToken {
    token: RwLock<Option<SecretString>>,
}

impl StaticToken {
    /// Creates a source holding `token`
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(SecretString::from(token.into()))),
        }
    }

    /// Returns true while the token has not been evicted
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl CredentialSource for StaticToken {
    fn bearer_token(&self) -> Option<SecretString> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn evict(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Configuration for the catalogue client
///
/// Debug output never contains the token: [`SecretString`] redacts it.
#[derive(Clone, Debug)]
pub struct CatalogueConfig {
    api_base: String,
    credentials: Option<Arc<dyn CredentialSource>>,
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        let credentials = std::env::var(ENV_TOKEN)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(|v| Arc::new(StaticToken::new(v)) as Arc<dyn CredentialSource>);

        let api_base = std::env::var(ENV_API_BASE)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| CATALOGUE_DEFAULT_BASE.into());

        Self {
            api_base,
            credentials,
        }
    }
}

impl CatalogueConfig {
    /// Creates a new configuration with default settings
    ///
    /// Attempts to read from environment variables:
    /// - `CATALOGUE_API_BASE` for the API base URL
    /// - `CATALOGUE_TOKEN` for a bearer token
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Uses a fixed bearer token
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.credentials = Some(Arc::new(StaticToken::new(token)));
        self
    }

    /// Uses a shared credential source (e.g. a persistent token store)
    #[must_use]
    pub fn with_credentials(mut self, source: Arc<dyn CredentialSource>) -> Self {
        self.credentials = Some(source);
        self
    }

    /// Drops any configured credentials
    #[must_use]
    pub fn without_credentials(mut self) -> Self {
        self.credentials = None;
        self
    }

    /// Returns the configured API base URL
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

/// Configuration trait for the catalogue client
pub trait Config: Send + Sync {
    /// Returns HTTP headers to include in requests
    ///
    /// # Errors
    ///
    /// Returns an error if header values contain invalid characters.
    fn headers(&self) -> Result<HeaderMap, crate::error::CatalogueError>;

    /// Constructs the full URL for an API endpoint
    fn url(&self, path: &str) -> String;

    /// Whether a bearer token is currently available
    fn has_credentials(&self) -> bool;

    /// Called once per 401 response, before the error is returned
    fn on_unauthorized(&self);
}

impl Config for CatalogueConfig {
    fn headers(&self) -> Result<HeaderMap, crate::error::CatalogueError> {
        use crate::error::CatalogueError;

        let mut h = HeaderMap::new();

        if let Some(secret) = self.credentials.as_ref().and_then(|c| c.bearer_token()) {
            let token = secret.expose_secret().trim();
            if !token.is_empty() {
                let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                    .map_err(|_| CatalogueError::Config("Invalid bearer token value".into()))?;
                value.set_sensitive(true);
                h.insert(AUTHORIZATION, value);
            }
        }

        Ok(h)
    }

    fn url(&self, path: &str) -> String {
        let base = self.api_base.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    fn has_credentials(&self) -> bool {
        self.credentials
            .as_ref()
            .and_then(|c| c.bearer_token())
            .is_some_and(|t| !t.expose_secret().trim().is_empty())
    }

    fn on_unauthorized(&self) {
        if let Some(source) = &self.credentials {
            tracing::info!("Server rejected credentials; evicting stored token");
            source.evict();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::EnvGuard;
    use serial_test::serial;

    #[test]
    #[serial(env)]
    fn config_reads_env_vars() {
        let _token = EnvGuard::set(ENV_TOKEN, "tok-123");
        let _base = EnvGuard::set(ENV_API_BASE, "https://catalogue.internal");

        let cfg = CatalogueConfig::new();
        assert_eq!(cfg.api_base(), "https://catalogue.internal");

        let h = cfg.headers().unwrap();
        assert_eq!(
            h.get(AUTHORIZATION).unwrap().to_str().unwrap(),
            "Bearer tok-123"
        );
    }

    #[test]
    #[serial(env)]
    fn config_defaults_base_url() {
        let _token = EnvGuard::remove(ENV_TOKEN);
        let _base = EnvGuard::remove(ENV_API_BASE);

        let cfg = CatalogueConfig::new();
        assert_eq!(cfg.api_base(), CATALOGUE_DEFAULT_BASE);
        assert!(!cfg.has_credentials());
        assert!(cfg.headers().unwrap().is_empty());
    }

    #[test]
    #[serial(env)]
    fn whitespace_only_env_token_is_ignored() {
        let _token = EnvGuard::set(ENV_TOKEN, "   ");
        let cfg = CatalogueConfig::new();
        assert!(!cfg.has_credentials());
    }

    #[test]
    fn url_joins_without_double_slash() {
        let cfg = CatalogueConfig::new().with_api_base("http://host:8889/");
        assert_eq!(cfg.url("/api/tools"), "http://host:8889/api/tools");
        assert_eq!(cfg.url("api/tags"), "http://host:8889/api/tags");
    }

    #[test]
    fn unauthorized_evicts_shared_source() {
        let source = Arc::new(StaticToken::new("abc"));
        let cfg = CatalogueConfig::new().with_credentials(Arc::clone(&source) as Arc<dyn CredentialSource>);
        assert!(cfg.has_credentials());

        cfg.on_unauthorized();

        assert!(!source.is_present());
        assert!(!cfg.has_credentials());
        assert!(cfg.headers().unwrap().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn debug_output_redacts_token() {
        let cfg = CatalogueConfig::new().with_bearer_token("super-secret-token-12345");
        let debug_str = format!("{cfg:?}");

        assert!(!debug_str.contains("super-secret-token-12345"));
        assert!(debug_str.contains("[REDACTED]"), "got: {debug_str}");
    }
}
