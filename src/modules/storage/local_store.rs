//! Local-disk storage for uploaded result proofs.
//!
//! Files are written under a configured directory and served as static
//! files by `tower_http::services::ServeDir`, so the stored URL is the
//! public path the SPA can render directly.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::config::UploadConfig;
use crate::core::error::{AppError, Result};

/// Map a MIME type to the extension stored files get
fn extension_for_content_type(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "application/pdf" => Some("pdf"),
        _ => None,
    }
}

/// A file persisted by the store
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Key relative to the upload root, e.g. "results/<uuid>.jpg"
    pub key: String,
    /// Public URL path, e.g. "/uploads/results/<uuid>.jpg"
    pub url: String,
}

pub struct LocalStore {
    config: UploadConfig,
}

impl LocalStore {
    pub fn new(config: UploadConfig) -> Self {
        Self { config }
    }

    /// Create the upload directory if it does not exist yet
    pub async fn ensure_root_exists(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.config.dir)
            .await
            .map_err(|e| {
                AppError::Internal(format!(
                    "Failed to create upload directory {}: {}",
                    self.config.dir, e
                ))
            })?;
        info!("Upload directory ready: {}", self.config.dir);
        Ok(())
    }

    /// Directory the static file service should serve
    pub fn root_dir(&self) -> &str {
        &self.config.dir
    }

    /// URL path prefix the static file service is mounted at
    pub fn public_path(&self) -> &str {
        &self.config.public_path
    }

    pub fn is_mime_type_allowed(&self, content_type: &str) -> bool {
        self.config
            .allowed_mime_types
            .contains(&content_type.to_lowercase())
    }

    pub fn max_file_size(&self) -> usize {
        self.config.max_file_size
    }

    /// Persist an uploaded file under `{purpose}/{uuid}.{ext}`.
    ///
    /// The caller has already validated size and MIME type against the
    /// configured limits; this re-checks both so the store stays safe when
    /// called from a new code path.
    pub async fn save(
        &self,
        purpose: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredFile> {
        if data.len() > self.config.max_file_size {
            return Err(AppError::Validation(format!(
                "File exceeds maximum size of {} bytes",
                self.config.max_file_size
            )));
        }

        if !self.is_mime_type_allowed(content_type) {
            return Err(AppError::Validation(format!(
                "File type '{}' is not allowed",
                content_type
            )));
        }

        let extension = extension_for_content_type(content_type).unwrap_or("bin");
        let key = format!("{}/{}.{}", purpose, Uuid::new_v4(), extension);

        let path = Path::new(&self.config.dir).join(&key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::Internal(format!("Failed to create upload subdirectory: {}", e))
            })?;
        }

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write uploaded file: {}", e)))?;

        debug!("File stored: {}", key);

        let url = format!("{}/{}", self.config.public_path.trim_end_matches('/'), key);
        Ok(StoredFile { key, url })
    }

    /// Delete a stored file by its public URL.
    ///
    /// Deletion is best-effort: a URL outside the public path or a missing
    /// file logs a warning instead of failing the surrounding request.
    pub async fn delete_by_url(&self, url: &str) {
        let Some(key) = self.key_from_url(url) else {
            warn!("Refusing to delete file outside upload path: {}", url);
            return;
        };

        let path = Path::new(&self.config.dir).join(&key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => debug!("File deleted: {}", key.display()),
            Err(e) => warn!("Failed to delete file {}: {}", key.display(), e),
        }
    }

    /// Extract the storage key from a public URL, rejecting path traversal
    fn key_from_url(&self, url: &str) -> Option<PathBuf> {
        let prefix = format!("{}/", self.config.public_path.trim_end_matches('/'));
        let key = url.strip_prefix(&prefix)?;

        let path = PathBuf::from(key);
        let is_clean = path
            .components()
            .all(|c| matches!(c, std::path::Component::Normal(_)));
        if !is_clean || key.is_empty() {
            return None;
        }
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn store() -> LocalStore {
        LocalStore::new(UploadConfig {
            dir: "/tmp/parinam-test-uploads".to_string(),
            public_path: "/uploads".to_string(),
            max_file_size: 1024,
            allowed_mime_types: HashSet::from(["image/jpeg".to_string()]),
        })
    }

    #[test]
    fn key_from_url_accepts_stored_urls() {
        let store = store();
        let key = store.key_from_url("/uploads/results/abc.jpg");
        assert_eq!(key, Some(PathBuf::from("results/abc.jpg")));
    }

    #[test]
    fn key_from_url_rejects_traversal_and_foreign_urls() {
        let store = store();
        assert_eq!(store.key_from_url("/uploads/../etc/passwd"), None);
        assert_eq!(store.key_from_url("/elsewhere/abc.jpg"), None);
        assert_eq!(store.key_from_url("/uploads/"), None);
    }

    #[test]
    fn mime_allow_list_is_case_insensitive() {
        let store = store();
        assert!(store.is_mime_type_allowed("IMAGE/JPEG"));
        assert!(!store.is_mime_type_allowed("image/gif"));
    }

    #[tokio::test]
    async fn delete_by_url_removes_a_saved_file() {
        let store = store();
        let saved = store
            .save("results", vec![1u8; 64], "image/jpeg")
            .await
            .unwrap();

        let path = Path::new(store.root_dir()).join(&saved.key);
        assert!(path.exists());

        store.delete_by_url(&saved.url).await;
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn save_rejects_oversized_file() {
        let store = store();
        let result = store.save("results", vec![0u8; 2048], "image/jpeg").await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
