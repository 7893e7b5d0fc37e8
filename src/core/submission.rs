use crate::domain::catalog::Catalog;
use crate::domain::form::{self, FormState};
use crate::domain::model::{blob_key, FileSlot, Order};
use crate::domain::ports::{BlobStore, OrderStore};
use crate::utils::error::{IntakeError, Result};
use chrono::Utc;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReceipt {
    pub id: String,
    pub order: Order,
}

/// Validates a form, uploads its files one after another and writes the order.
///
/// Steps never overlap and the first failure stops the run, so an order is
/// only written once every referenced file exists. The caller keeps its
/// [`FormState`] untouched on error and can retry with it as is.
pub struct SubmissionEngine<B: BlobStore, O: OrderStore> {
    blobs: B,
    orders: O,
    catalog: &'static Catalog,
}

impl<B: BlobStore, O: OrderStore> SubmissionEngine<B, O> {
    pub fn new(blobs: B, orders: O) -> Self {
        Self::with_catalog(blobs, orders, Catalog::standard())
    }

    pub fn with_catalog(blobs: B, orders: O, catalog: &'static Catalog) -> Self {
        Self {
            blobs,
            orders,
            catalog,
        }
    }

    pub async fn submit(&self, form: &FormState) -> Result<SubmissionReceipt> {
        tracing::info!("Starting submission for {}", form.email);

        form::validate(form).map_err(|errors| {
            tracing::warn!("Submission blocked by {} invalid field(s)", errors.len());
            IntakeError::ValidationError(errors)
        })?;

        let uploaded = self.upload_attachments(form).await?;

        let order = form.to_order(self.catalog, &uploaded, Utc::now());

        tracing::info!("Saving order...");
        let id = self.orders.create_order(&order).await?;
        tracing::info!("✅ Order written with id {}", id);

        Ok(SubmissionReceipt { id, order })
    }

    async fn upload_attachments(&self, form: &FormState) -> Result<BTreeMap<FileSlot, String>> {
        let mut uploaded = BTreeMap::new();

        for slot in FileSlot::ALL {
            let Some(attachment) = form.attachment(slot) else {
                tracing::debug!("No {} attached, skipping upload", slot);
                continue;
            };

            let key = blob_key(slot, &attachment.file_name, Utc::now());
            tracing::info!("Uploading {}...", slot);
            let url = self.blobs.upload(&key, attachment).await.map_err(|e| {
                tracing::error!("🚨 Upload of {} failed: {}", slot, e);
                IntakeError::UploadError {
                    slot: slot.to_string(),
                    message: e.to_string(),
                }
            })?;
            tracing::info!("✅ {} uploaded: {}", slot, url);
            uploaded.insert(slot, url);
        }

        Ok(uploaded)
    }
}

/// The order a submission would write, without touching any store. File
/// fields hold the attachment names instead of URLs.
pub fn preview(form: &FormState, catalog: &Catalog) -> Result<Order> {
    form::validate(form).map_err(IntakeError::ValidationError)?;

    let names: BTreeMap<FileSlot, String> = form
        .attachments
        .iter()
        .map(|(slot, attachment)| (*slot, attachment.file_name.clone()))
        .collect();
    Ok(form.to_order(catalog, &names, Utc::now()))
}
