//! Secret storage backends

mod keyring_store;
mod memory_store;
mod xdg_store;

pub use keyring_store::KeyringStore;
pub use memory_store::MemoryStore;
pub use xdg_store::XdgFileStore;

use crate::error::AuthError;

/// Byte-oriented secret storage keyed by name
pub trait SecureStore: Send + Sync + std::fmt::Debug {
    /// Store a secret value
    fn set_secret(&self, name: &str, value: &[u8]) -> Result<(), AuthError>;
    /// Retrieve a secret value
    fn get_secret(&self, name: &str) -> Result<Option<Vec<u8>>, AuthError>;
    /// Delete a secret value; deleting a missing secret succeeds
    fn delete_secret(&self, name: &str) -> Result<(), AuthError>;
}
