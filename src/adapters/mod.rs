// Adapters layer: concrete implementations of the storage ports for the
// hosted Firebase services, a local directory and (optionally) S3.

pub mod firebase_storage;
pub mod firestore;
mod firestore_value;
pub mod local;
#[cfg(feature = "s3")]
pub mod s3;

use crate::config::toml_config::{AppConfig, BlobBackend, OrderBackend};
use crate::domain::ports::{BlobStore, OrderStore};
use crate::utils::error::{IntakeError, Result};
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;

pub use firebase_storage::FirebaseBlobStore;
pub use firestore::FirestoreOrderStore;
pub use local::{JsonFileOrderStore, LocalBlobStore};

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

pub(crate) fn http_client(timeout_seconds: Option<u64>) -> Result<Client> {
    let timeout = Duration::from_secs(timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS));
    Ok(Client::builder().timeout(timeout).build()?)
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    error: GoogleError,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    message: String,
}

/// Turns a non-2xx response into [`IntakeError::BackendError`], preferring the
/// service's own `error.message` over the raw body.
pub(crate) async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<GoogleErrorBody>(&body)
        .map(|parsed| parsed.error.message)
        .unwrap_or_else(|_| {
            if body.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                body
            }
        });

    tracing::warn!(status = status.as_u16(), "backend request failed: {}", message);
    Err(IntakeError::BackendError {
        status: status.as_u16(),
        message,
    })
}

pub fn order_store(config: &AppConfig) -> Result<Box<dyn OrderStore>> {
    match config.backend.orders {
        OrderBackend::Firestore => Ok(Box::new(FirestoreOrderStore::from_config(
            config.firebase()?,
        )?)),
        OrderBackend::Local => Ok(Box::new(JsonFileOrderStore::new(
            &config.local()?.data_dir,
        ))),
    }
}

pub async fn blob_store(config: &AppConfig) -> Result<Box<dyn BlobStore>> {
    match config.backend.blobs {
        BlobBackend::FirebaseStorage => Ok(Box::new(FirebaseBlobStore::from_config(
            config.firebase()?,
        )?)),
        BlobBackend::Local => Ok(Box::new(LocalBlobStore::new(&config.local()?.data_dir))),
        BlobBackend::S3 => s3_blob_store(config).await,
    }
}

#[cfg(feature = "s3")]
async fn s3_blob_store(config: &AppConfig) -> Result<Box<dyn BlobStore>> {
    Ok(Box::new(s3::S3BlobStore::from_config(config.s3()?).await))
}

#[cfg(not(feature = "s3"))]
async fn s3_blob_store(_config: &AppConfig) -> Result<Box<dyn BlobStore>> {
    Err(IntakeError::ConfigError {
        message: "backend.blobs = \"s3\" requires building with the `s3` feature".to_string(),
    })
}
