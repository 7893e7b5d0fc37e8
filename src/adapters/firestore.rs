use crate::adapters::{ensure_success, firestore_value, http_client};
use crate::config::toml_config::FirebaseConfig;
use crate::domain::model::{Order, SortDirection, StoredOrder};
use crate::domain::ports::OrderStore;
use crate::utils::error::{IntakeError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::{json, Map, Value};

/// Orders kept in a Firestore collection, reached over the REST v1 API.
#[derive(Debug, Clone)]
pub struct FirestoreOrderStore {
    client: Client,
    documents_url: String,
    collection: String,
    api_key: Option<String>,
    auth_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FirestoreDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RunQueryItem {
    document: Option<FirestoreDocument>,
}

impl FirestoreOrderStore {
    pub fn new(client: Client, config: &FirebaseConfig) -> Self {
        let documents_url = format!(
            "{}/v1/projects/{}/databases/{}/documents",
            config.firestore_url().trim_end_matches('/'),
            config.project_id,
            config.database()
        );
        Self {
            client,
            documents_url,
            collection: config.collection().to_string(),
            api_key: config.api_key.clone(),
            auth_token: config.auth_token.clone(),
        }
    }

    pub fn from_config(config: &FirebaseConfig) -> Result<Self> {
        Ok(Self::new(http_client(config.timeout_seconds)?, config))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = match &self.api_key {
            Some(key) => request.query(&[("key", key)]),
            None => request,
        };
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn decode_document(document: FirestoreDocument) -> Result<StoredOrder> {
        let id = document_id(&document.name).to_string();
        let data = firestore_value::decode_fields(&document.fields)?;
        let order: Order = serde_json::from_value(data)?;
        Ok(StoredOrder { id, order })
    }
}

/// Last path segment of `projects/{p}/databases/{d}/documents/{collection}/{id}`.
fn document_id(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

#[async_trait]
impl OrderStore for FirestoreOrderStore {
    async fn create_order(&self, order: &Order) -> Result<String> {
        let fields = firestore_value::encode_fields(&serde_json::to_value(order)?)?;
        let url = format!("{}/{}", self.documents_url, self.collection);

        tracing::debug!("Creating document in collection {}", self.collection);
        let response = self
            .authorize(self.client.post(&url))
            .json(&json!({ "fields": fields }))
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let document: FirestoreDocument = response.json().await?;
        let id = document_id(&document.name);
        if id.is_empty() {
            return Err(IntakeError::MalformedDataError {
                message: format!("created document has no id: {:?}", document.name),
            });
        }
        tracing::debug!("Document written with id {}", id);
        Ok(id.to_string())
    }

    async fn list_orders(
        &self,
        order_by: &str,
        direction: SortDirection,
    ) -> Result<Vec<StoredOrder>> {
        let url = format!("{}:runQuery", self.documents_url);
        let query = json!({
            "structuredQuery": {
                "from": [{ "collectionId": self.collection }],
                "orderBy": [{
                    "field": { "fieldPath": order_by },
                    "direction": direction.as_firestore()
                }]
            }
        });

        tracing::debug!(order_by, ?direction, "Querying collection {}", self.collection);
        let response = self
            .authorize(self.client.post(&url))
            .json(&query)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let items: Vec<RunQueryItem> = response.json().await?;
        let orders = items
            .into_iter()
            .filter_map(|item| item.document)
            .filter_map(|document| {
                let name = document.name.clone();
                match Self::decode_document(document) {
                    Ok(stored) => Some(stored),
                    Err(e) => {
                        tracing::warn!(document = %name, "skipping undecodable order: {}", e);
                        None
                    }
                }
            })
            .collect();
        Ok(orders)
    }
}
