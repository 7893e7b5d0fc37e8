pub mod dashboard;
pub mod intake;
pub mod payment;
pub mod submission;

pub use crate::domain::model::{Order, StoredOrder};
pub use crate::domain::ports::{BlobStore, OrderStore};
pub use crate::utils::error::Result;
