//! Storage module for report photos
//!
//! Defines the object storage seam used by the report creation flow and a
//! MinIO/S3-compatible implementation of it.

mod minio_client;

use async_trait::async_trait;

use crate::core::error::AppError;

pub use minio_client::MinIOStorage;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to upload '{path}': {message}")]
    Upload { path: String, message: String },
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err.to_string())
    }
}

/// Object storage holding uploaded report photos
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store raw bytes under `path`
    async fn upload(&self, path: &str, data: &[u8], content_type: &str)
        -> Result<(), StorageError>;

    /// Stable URL anyone can fetch the object from
    fn public_url(&self, path: &str) -> String;
}
