//! Keyring-based secure storage

use super::SecureStore;
use crate::error::AuthError;
use base64::{Engine, engine::general_purpose::STANDARD};

/// Secret storage in the system keychain, one entry per secret name
#[derive(Debug, Clone)]
pub struct KeyringStore {
    service: String,
}

impl KeyringStore {
    /// Create a keyring store for the given service name
    pub fn new(service: &str) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, name: &str) -> Result<keyring::Entry, AuthError> {
        keyring::Entry::new(&self.service, name).map_err(|e| AuthError::Storage(e.to_string()))
    }
}

impl SecureStore for KeyringStore {
    fn set_secret(&self, name: &str, value: &[u8]) -> Result<(), AuthError> {
        self.entry(name)?
            .set_password(&STANDARD.encode(value))
            .map_err(|e| AuthError::Storage(e.to_string()))
    }

    fn get_secret(&self, name: &str) -> Result<Option<Vec<u8>>, AuthError> {
        match self.entry(name)?.get_password() {
            Ok(s) => STANDARD
                .decode(s)
                .map(Some)
                .map_err(|e| AuthError::Storage(format!("Corrupt keyring entry: {e}"))),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(AuthError::Storage(e.to_string())),
        }
    }

    fn delete_secret(&self, name: &str) -> Result<(), AuthError> {
        match self.entry(name)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(AuthError::Storage(e.to_string())),
        }
    }
}
