use crate::domain::model::{Attachment, Order, SortDirection, StoredOrder};
use crate::domain::ports::{BlobStore, OrderStore};
use crate::utils::error::{IntakeError, Result};
use async_trait::async_trait;
use chrono::DateTime;
use serde_json::Value;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use url::Url;
use uuid::Uuid;

const ORDERS_DIR: &str = "orders";
const BLOBS_DIR: &str = "blobs";

/// Files written below `{base}/blobs`, addressed by `file://` URLs.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    base_path: PathBuf,
}

impl LocalBlobStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into().join(BLOBS_DIR),
        }
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn upload(&self, key: &str, attachment: &Attachment) -> Result<String> {
        let full_path = self.base_path.join(key);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&full_path, &attachment.bytes).await?;

        let absolute = tokio::fs::canonicalize(&full_path).await?;
        let url = Url::from_file_path(&absolute).map_err(|_| IntakeError::StorageError {
            message: format!("cannot express {} as a file URL", absolute.display()),
        })?;
        tracing::debug!("Stored {} at {}", key, absolute.display());
        Ok(url.to_string())
    }
}

/// One pretty-printed JSON file per order below `{base}/orders`.
#[derive(Debug, Clone)]
pub struct JsonFileOrderStore {
    orders_path: PathBuf,
}

impl JsonFileOrderStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            orders_path: base_path.into().join(ORDERS_DIR),
        }
    }

    async fn read_order(path: &Path) -> Result<Option<StoredOrder>> {
        let Some(id) = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_string)
        else {
            return Ok(None);
        };
        let data = tokio::fs::read(path).await?;
        match serde_json::from_slice::<Order>(&data) {
            Ok(order) => Ok(Some(StoredOrder { id, order })),
            Err(e) => {
                tracing::warn!(path = %path.display(), "skipping undecodable order: {}", e);
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl OrderStore for JsonFileOrderStore {
    async fn create_order(&self, order: &Order) -> Result<String> {
        tokio::fs::create_dir_all(&self.orders_path).await?;

        let id = Uuid::new_v4().simple().to_string();
        let path = self.orders_path.join(format!("{}.json", id));
        let data = serde_json::to_vec_pretty(order)?;
        tokio::fs::write(&path, data).await?;

        tracing::debug!("Order {} written to {}", id, path.display());
        Ok(id)
    }

    async fn list_orders(
        &self,
        order_by: &str,
        direction: SortDirection,
    ) -> Result<Vec<StoredOrder>> {
        let mut entries = match tokio::fs::read_dir(&self.orders_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut keyed = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(stored) = Self::read_order(&path).await? {
                let key = sort_key(&stored.order, order_by)?;
                keyed.push((key, stored));
            }
        }

        keyed.sort_by(|(a, _), (b, _)| compare_keys(a.as_ref(), b.as_ref(), direction));
        Ok(keyed.into_iter().map(|(_, stored)| stored).collect())
    }
}

fn sort_key(order: &Order, field: &str) -> Result<Option<Value>> {
    let value = serde_json::to_value(order)?;
    Ok(value.get(field).filter(|v| !v.is_null()).cloned())
}

/// Orders present values by direction; missing values always sort last.
fn compare_keys(a: Option<&Value>, b: Option<&Value>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ordering = compare_values(a, b);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::String(a), Value::String(b)) => {
            match (DateTime::parse_from_rfc3339(a), DateTime::parse_from_rfc3339(b)) {
                (Ok(a), Ok(b)) => a.cmp(&b),
                _ => a.cmp(b),
            }
        }
        (Value::Number(a), Value::Number(b)) => a
            .as_f64()
            .unwrap_or_default()
            .total_cmp(&b.as_f64().unwrap_or_default()),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => Ordering::Equal,
    }
}
