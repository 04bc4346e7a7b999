//! Local-filesystem document store
//!
//! Files live under a configured root, mirroring the object-store layout
//! (`documents/<id>/...`, `documents/clients/<id>/...`). Download URLs are
//! time-bounded HMAC-signed links served by the raw-download endpoint.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, error};

use portal_core::error::DomainError;
use portal_core::repositories::{DocumentStore, StoredDocument};
use portal_security::signing::UrlSigner;

pub struct LocalDocumentStore {
    root: PathBuf,
    signer: UrlSigner,
    public_url: String,
    url_ttl_seconds: u64,
}

impl LocalDocumentStore {
    pub fn new(
        root: impl Into<PathBuf>,
        signer: UrlSigner,
        public_url: String,
        url_ttl_seconds: u64,
    ) -> Self {
        Self {
            root: root.into(),
            signer,
            public_url,
            url_ttl_seconds,
        }
    }

    pub fn signer(&self) -> &UrlSigner {
        &self.signer
    }

    /// Resolve a store path under the root. Only plain path components are
    /// accepted; anything that could escape the root is refused.
    fn resolve(&self, path: &str) -> Result<PathBuf, DomainError> {
        let relative = Path::new(path);
        if relative.components().any(|c| !matches!(c, Component::Normal(_))) {
            return Err(DomainError::StorageError(format!(
                "invalid document path: {}",
                path
            )));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl DocumentStore for LocalDocumentStore {
    async fn save(&self, path: &str, content: &[u8]) -> Result<String, DomainError> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::StorageError(e.to_string()))?;
        }
        tokio::fs::write(&full, content)
            .await
            .map_err(|e| DomainError::StorageError(e.to_string()))?;

        debug!("Stored document: {} ({} bytes)", path, content.len());
        Ok(path.to_string())
    }

    async fn open(&self, path: &str) -> Result<Vec<u8>, DomainError> {
        let full = self.resolve(path)?;
        tokio::fs::read(&full)
            .await
            .map_err(|e| DomainError::StorageError(format!("{}: {}", path, e)))
    }

    async fn list(&self, prefix: &str) -> Result<Vec<StoredDocument>, DomainError> {
        let dir = self.resolve(prefix)?;
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            // A client without uploads simply has no folder yet
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(DomainError::StorageError(e.to_string())),
        };

        let mut documents = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| DomainError::StorageError(e.to_string()))?
        {
            let metadata = entry
                .metadata()
                .await
                .map_err(|e| DomainError::StorageError(e.to_string()))?;
            if !metadata.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            documents.push(StoredDocument {
                path: format!("{}/{}", prefix, name),
                name,
                size: metadata.len(),
            });
        }
        documents.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(documents)
    }

    async fn delete(&self, path: &str) -> Result<(), DomainError> {
        let full = self.resolve(path)?;
        tokio::fs::remove_file(&full)
            .await
            .map_err(|e| DomainError::StorageError(format!("{}: {}", path, e)))
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<(), DomainError> {
        let dir = self.resolve(prefix)?;
        match tokio::fs::remove_dir_all(&dir).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                error!("Failed to delete folder {}: {}", prefix, e);
                Err(DomainError::StorageError(e.to_string()))
            }
        }
    }

    async fn signed_url(&self, path: &str) -> Result<String, DomainError> {
        // Refuse to sign paths that the download endpoint would refuse
        self.resolve(path)?;
        let expires_at = Utc::now().timestamp() + self.url_ttl_seconds as i64;
        let signature = self.signer.sign(path, expires_at);
        Ok(format!(
            "{}/api/documents/raw/{}?expires={}&sig={}",
            self.public_url, path, expires_at, signature
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn unique_test_root() -> PathBuf {
        std::env::temp_dir().join(format!("portal-store-{}", Uuid::new_v4()))
    }

    fn store() -> LocalDocumentStore {
        LocalDocumentStore::new(
            unique_test_root(),
            UrlSigner::new("test-signing-key"),
            "http://localhost:8080".to_string(),
            900,
        )
    }

    #[tokio::test]
    async fn test_save_list_delete_roundtrip() {
        let store = store();
        let client = Uuid::new_v4();
        let prefix = format!("documents/clients/{}", client);

        store
            .save(&format!("{}/statuts.pdf", prefix), b"contenu")
            .await
            .unwrap();
        store
            .save(&format!("{}/kbis.pdf", prefix), b"contenu")
            .await
            .unwrap();

        let listed = store.list(&prefix).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "kbis.pdf");

        store.delete(&format!("{}/kbis.pdf", prefix)).await.unwrap();
        assert_eq!(store.list(&prefix).await.unwrap().len(), 1);

        store.delete_prefix(&prefix).await.unwrap();
        assert!(store.list(&prefix).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_folder_lists_empty() {
        let store = store();
        let listed = store
            .list(&format!("documents/{}", Uuid::new_v4()))
            .await
            .unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_path_traversal_refused() {
        let store = store();
        assert!(store.save("../evasion.txt", b"nope").await.is_err());
        assert!(store.open("documents/../../etc/passwd").await.is_err());
    }

    #[tokio::test]
    async fn test_signed_url_verifies() {
        let store = store();
        let path = format!("documents/{}/passeport.pdf", Uuid::new_v4());
        store.save(&path, b"scan").await.unwrap();

        let url = store.signed_url(&path).await.unwrap();
        let query = url.split('?').nth(1).unwrap();
        let mut expires = 0i64;
        let mut sig = String::new();
        for pair in query.split('&') {
            match pair.split_once('=') {
                Some(("expires", v)) => expires = v.parse().unwrap(),
                Some(("sig", v)) => sig = v.to_string(),
                _ => {}
            }
        }
        assert!(store.signer().verify(&path, expires, &sig));
    }
}
