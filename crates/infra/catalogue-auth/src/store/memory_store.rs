//! In-memory secret storage

use super::SecureStore;
use crate::error::AuthError;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Process-local secret storage; contents vanish with the value.
///
/// Used by tests and by the development bypass, where nothing should
/// touch the keychain or disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    secrets: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored secrets
    pub fn len(&self) -> usize {
        self.secrets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SecureStore for MemoryStore {
    fn set_secret(&self, name: &str, value: &[u8]) -> Result<(), AuthError> {
        self.secrets
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), value.to_vec());
        Ok(())
    }

    fn get_secret(&self, name: &str) -> Result<Option<Vec<u8>>, AuthError> {
        Ok(self
            .secrets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned())
    }

    fn delete_secret(&self, name: &str) -> Result<(), AuthError> {
        self.secrets
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name);
        Ok(())
    }
}
