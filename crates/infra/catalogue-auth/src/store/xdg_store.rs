//! Encrypted file storage under the XDG data directory

use super::SecureStore;
use crate::error::AuthError;
use chacha20poly1305::{
    ChaCha20Poly1305, Key, Nonce,
    aead::{Aead, KeyInit},
};
use rand::{RngCore, rngs::OsRng};
use std::{fs, path::PathBuf};

const NONCE_SIZE: usize = 12;

/// File-per-secret storage, encrypted with ChaCha20-Poly1305.
///
/// The key is derived from `/etc/machine-id` and the store directory, so a
/// copied file does not decrypt on another machine or under another path.
#[derive(Debug, Clone)]
pub struct XdgFileStore {
    base_path: PathBuf,
}

impl XdgFileStore {
    /// Store under `$XDG_DATA_HOME/<app_name>`
    pub fn new(app_name: &str) -> Result<Self, AuthError> {
        let base = dirs::data_dir()
            .ok_or_else(|| AuthError::Storage("Could not determine data dir".into()))?
            .join(app_name);
        Self::at(base)
    }

    /// Store under an explicit directory, creating it if needed
    pub fn at(base_path: impl Into<PathBuf>) -> Result<Self, AuthError> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path).map_err(|e| {
            AuthError::Storage(format!("Failed to create {}: {e}", base_path.display()))
        })?;
        Ok(Self { base_path })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_path.join(format!("{name}.secret"))
    }

    fn derive_key(&self) -> Key {
        let machine_id = fs::read_to_string("/etc/machine-id")
            .unwrap_or_else(|_| "catalogue-no-machine-id".to_string());

        let mut hasher = blake3::Hasher::new();
        hasher.update(self.base_path.to_string_lossy().as_bytes());
        hasher.update(machine_id.trim().as_bytes());
        *Key::from_slice(hasher.finalize().as_bytes())
    }

    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, AuthError> {
        let cipher = ChaCha20Poly1305::new(&self.derive_key());

        let mut nonce_bytes = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce_bytes);

        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
            .map_err(|e| AuthError::Storage(format!("Encryption failed: {e}")))?;

        let mut output = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        output.extend_from_slice(&nonce_bytes);
        output.extend_from_slice(&ciphertext);
        Ok(output)
    }

    fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, AuthError> {
        if data.len() < NONCE_SIZE {
            return Err(AuthError::Storage("Corrupt secret: too short".into()));
        }

        let (nonce_bytes, ciphertext) = data.split_at(NONCE_SIZE);
        ChaCha20Poly1305::new(&self.derive_key())
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|e| AuthError::Storage(format!("Decryption failed: {e}")))
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &std::path::Path) -> Result<(), AuthError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
        .map_err(|e| AuthError::Storage(e.to_string()))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &std::path::Path) -> Result<(), AuthError> {
    Ok(())
}

impl SecureStore for XdgFileStore {
    fn set_secret(&self, name: &str, value: &[u8]) -> Result<(), AuthError> {
        let path = self.file_path(name);
        let encrypted = self.encrypt(value)?;
        fs::write(&path, encrypted).map_err(|e| AuthError::Storage(e.to_string()))?;
        restrict_permissions(&path)
    }

    fn get_secret(&self, name: &str) -> Result<Option<Vec<u8>>, AuthError> {
        match fs::read(self.file_path(name)) {
            Ok(data) => Ok(Some(self.decrypt(&data)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AuthError::Storage(e.to_string())),
        }
    }

    fn delete_secret(&self, name: &str) -> Result<(), AuthError> {
        match fs::remove_file(self.file_path(name)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::Storage(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn stored_bytes_are_not_plaintext() {
        let dir = tempdir().unwrap();
        let store = XdgFileStore::at(dir.path()).unwrap();

        store.set_secret("access_token", b"tok-plain").unwrap();

        let raw = fs::read(dir.path().join("access_token.secret")).unwrap();
        assert!(!raw.windows(9).any(|w| w == b"tok-plain"));
        assert_eq!(
            store.get_secret("access_token").unwrap().as_deref(),
            Some(b"tok-plain".as_slice())
        );
    }

    #[test]
    fn other_directory_cannot_decrypt() {
        let dir = tempdir().unwrap();
        let store = XdgFileStore::at(dir.path()).unwrap();
        let encrypted = store.encrypt(b"secret").unwrap();

        let other = XdgFileStore::at(dir.path().join("elsewhere")).unwrap();
        assert!(other.decrypt(&encrypted).is_err());
    }

    #[test]
    fn truncated_file_is_an_error() {
        let dir = tempdir().unwrap();
        let store = XdgFileStore::at(dir.path()).unwrap();
        fs::write(dir.path().join("t.secret"), b"short").unwrap();
        assert!(matches!(store.get_secret("t"), Err(AuthError::Storage(_))));
    }

    #[test]
    fn delete_missing_is_ok() {
        let dir = tempdir().unwrap();
        let store = XdgFileStore::at(dir.path()).unwrap();
        store.delete_secret("nothing").unwrap();
        assert!(store.get_secret("nothing").unwrap().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn secret_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempdir().unwrap();
        let store = XdgFileStore::at(dir.path()).unwrap();
        store.set_secret("k", b"v").unwrap();
        let mode = fs::metadata(dir.path().join("k.secret")).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
