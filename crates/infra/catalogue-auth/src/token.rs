//! The bearer token, persisted in a [`SecureStore`] under a fixed key.

use crate::{error::AuthError, store::SecureStore};
use catalogue_async::CredentialSource;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

/// Name the token is stored under.
pub const TOKEN_KEY: &str = "access_token";

/// Read-through view of the stored bearer token.
///
/// Implements [`CredentialSource`] so the API client can attach the token
/// and drop it when the server answers 401.
#[derive(Debug, Clone)]
pub struct TokenStore {
    backend: Arc<dyn SecureStore>,
}

impl TokenStore {
    /// Wrap a storage backend
    pub fn new(backend: Arc<dyn SecureStore>) -> Self {
        Self { backend }
    }

    /// The stored token, if any
    pub fn load(&self) -> Result<Option<SecretString>, AuthError> {
        let Some(bytes) = self.backend.get_secret(TOKEN_KEY)? else {
            return Ok(None);
        };
        let token = String::from_utf8(bytes)
            .map_err(|_| AuthError::Token("Stored token is not valid UTF-8".into()))?;
        let token = token.trim();
        if token.is_empty() {
            return Ok(None);
        }
        Ok(Some(SecretString::from(token.to_string())))
    }

    /// Persist a new token, replacing any previous one
    pub fn save(&self, token: &SecretString) -> Result<(), AuthError> {
        let token = token.expose_secret().trim();
        if token.is_empty() {
            return Err(AuthError::Token("Refusing to store an empty token".into()));
        }
        self.backend.set_secret(TOKEN_KEY, token.as_bytes())?;
        tracing::info!("Stored access token");
        Ok(())
    }

    /// Remove the stored token
    pub fn clear(&self) -> Result<(), AuthError> {
        self.backend.delete_secret(TOKEN_KEY)
    }

    /// True when a non-empty token is stored
    pub fn is_present(&self) -> bool {
        matches!(self.load(), Ok(Some(_)))
    }
}

impl CredentialSource for TokenStore {
    fn bearer_token(&self) -> Option<SecretString> {
        match self.load() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("Could not read stored token: {e}");
                None
            }
        }
    }

    fn evict(&self) {
        if let Err(e) = self.clear() {
            tracing::warn!("Could not remove rejected token: {e}");
        }
    }
}
