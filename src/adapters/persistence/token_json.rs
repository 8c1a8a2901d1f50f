//! Implements TokenStore using a JSON file.
//!
//! Holds the token of the last successful sign-in so the next launch can skip the prompt.

use crate::domain::{DomainError, Token};
use crate::ports::TokenStore;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// On-disk layout: `{"token": "..."}`
#[derive(Debug, Default, Serialize, Deserialize)]
struct TokenFile {
    token: Option<Token>,
}

/// JSON file-based token storage.
pub struct JsonTokenStore {
    path: PathBuf,
}

impl JsonTokenStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Persist the token. Atomic: write temp file, fsync, rename over the target.
    pub async fn save(&self, token: &Token) -> Result<(), DomainError> {
        let json = serde_json::to_string_pretty(&TokenFile {
            token: Some(token.clone()),
        })
        .map_err(|e| DomainError::Storage(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Storage(format!("create token directory: {}", e)))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::Storage(format!("create temp file: {}", e)))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| DomainError::Storage(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::Storage(format!("sync temp file: {}", e)))?;
        drop(f);

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::Storage(format!("atomic rename failed: {}", e)))?;
        debug!(path = %self.path.display(), "token saved");
        Ok(())
    }

    /// Forget the stored token. Missing file is not an error.
    pub async fn clear(&self) -> Result<(), DomainError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::Storage(format!("remove token file: {}", e))),
        }
    }
}

#[async_trait::async_trait]
impl TokenStore for JsonTokenStore {
    async fn get(&self) -> Option<Token> {
        let raw = fs::read_to_string(&self.path).await.ok()?;
        match serde_json::from_str::<TokenFile>(&raw) {
            Ok(file) => file.token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "token file unreadable; ignoring");
                None
            }
        }
    }
}
