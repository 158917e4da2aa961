//! Persistent storage for the bearer credential.
//!
//! The CLI analogue of origin-scoped browser storage: a single file under the
//! configured data directory. No expiry logic lives here; a stale credential
//! is only discovered when the backend rejects it.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed credential store.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(data_dir: &Path, file_name: &str) -> Self {
        Self {
            path: data_dir.join(file_name),
        }
    }

    /// Persist the credential, creating the data directory if needed.
    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
        }
        fs::write(&self.path, token)
            .with_context(|| format!("Failed to write token file: {}", self.path.display()))
    }

    /// Load the stored credential, if any. A missing, unreadable, or empty
    /// file all count as no credential.
    pub fn load(&self) -> Option<String> {
        let contents = fs::read_to_string(&self.path).ok()?;
        let token = contents.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    /// Remove the stored credential. Clearing an already-empty store is a
    /// no-op.
    pub fn clear(&self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(error = %e, path = %self.path.display(), "Failed to remove token file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path(), "token");

        assert_eq!(store.load(), None);
        store.save("abc123").unwrap();
        assert_eq!(store.load(), Some("abc123".to_string()));

        // A fresh token overwrites the old one
        store.save("def456").unwrap();
        assert_eq!(store.load(), Some("def456".to_string()));
    }

    #[test]
    fn test_save_creates_data_dir() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(&dir.path().join("nested"), "token");

        store.save("abc123").unwrap();
        assert_eq!(store.load(), Some("abc123".to_string()));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path(), "token");

        store.save("abc123").unwrap();
        store.clear();
        assert_eq!(store.load(), None);

        // Clearing twice is a no-op
        store.clear();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_empty_file_is_no_credential() {
        let dir = tempdir().unwrap();
        let store = TokenStore::new(dir.path(), "token");

        store.save("").unwrap();
        assert_eq!(store.load(), None);

        store.save("  \n").unwrap();
        assert_eq!(store.load(), None);
    }
}
