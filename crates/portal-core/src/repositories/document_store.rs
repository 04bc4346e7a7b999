//! Document store trait (port)

use async_trait::async_trait;
use serde::Serialize;

use crate::error::DomainError;

#[derive(Debug, Clone, Serialize)]
pub struct StoredDocument {
    /// File name within its folder.
    pub name: String,
    /// Full path relative to the store root.
    pub path: String,
    pub size: u64,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Save a file, returning its final path relative to the store root.
    async fn save(&self, path: &str, content: &[u8]) -> Result<String, DomainError>;
    async fn open(&self, path: &str) -> Result<Vec<u8>, DomainError>;
    async fn list(&self, prefix: &str) -> Result<Vec<StoredDocument>, DomainError>;
    async fn delete(&self, path: &str) -> Result<(), DomainError>;
    /// Remove a whole folder. Missing folders are not an error.
    async fn delete_prefix(&self, prefix: &str) -> Result<(), DomainError>;
    /// Time-bounded signed URL for a stored file.
    async fn signed_url(&self, path: &str) -> Result<String, DomainError>;
}
