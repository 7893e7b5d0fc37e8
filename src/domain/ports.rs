use crate::domain::model::{Attachment, Order, SortDirection, StoredOrder};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Binary object storage. Returns a URL the stored object can be fetched from.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn upload(&self, key: &str, attachment: &Attachment) -> Result<String>;
}

/// Document storage for submitted orders. There is no update or delete.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn create_order(&self, order: &Order) -> Result<String>;

    async fn list_orders(&self, order_by: &str, direction: SortDirection)
        -> Result<Vec<StoredOrder>>;
}

#[async_trait]
impl<T: BlobStore + ?Sized> BlobStore for Box<T> {
    async fn upload(&self, key: &str, attachment: &Attachment) -> Result<String> {
        (**self).upload(key, attachment).await
    }
}

#[async_trait]
impl<T: OrderStore + ?Sized> OrderStore for Box<T> {
    async fn create_order(&self, order: &Order) -> Result<String> {
        (**self).create_order(order).await
    }

    async fn list_orders(
        &self,
        order_by: &str,
        direction: SortDirection,
    ) -> Result<Vec<StoredOrder>> {
        (**self).list_orders(order_by, direction).await
    }
}
