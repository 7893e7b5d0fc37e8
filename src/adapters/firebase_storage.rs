use crate::adapters::{ensure_success, http_client};
use crate::config::toml_config::FirebaseConfig;
use crate::domain::model::Attachment;
use crate::domain::ports::BlobStore;
use crate::utils::error::{IntakeError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

/// Firebase Storage bucket reached over its v0 REST endpoint.
#[derive(Debug, Clone)]
pub struct FirebaseBlobStore {
    client: Client,
    base_url: Url,
    bucket: String,
    auth_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    name: String,
    download_tokens: Option<String>,
}

impl FirebaseBlobStore {
    pub fn new(client: Client, config: &FirebaseConfig) -> Result<Self> {
        let base_url = Url::parse(config.storage_url()).map_err(|e| IntakeError::InvalidConfigValueError {
            field: "firebase.storage_url".to_string(),
            value: config.storage_url().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            client,
            base_url,
            bucket: config.storage_bucket.clone(),
            auth_token: config.auth_token.clone(),
        })
    }

    pub fn from_config(config: &FirebaseConfig) -> Result<Self> {
        Self::new(http_client(config.timeout_seconds)?, config)
    }

    /// `{base}/v0/b/{bucket}/o[/{object}]`; the object name is one encoded segment.
    fn object_url(&self, object: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| IntakeError::ConfigError {
                message: format!("storage URL cannot be a base: {}", self.base_url),
            })?;
            segments
                .pop_if_empty()
                .extend(["v0", "b", self.bucket.as_str(), "o"]);
            if let Some(object) = object {
                segments.push(object);
            }
        }
        Ok(url)
    }

    pub fn download_url(&self, object: &str, token: Option<&str>) -> Result<String> {
        let mut url = self.object_url(Some(object))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("alt", "media");
            if let Some(token) = token {
                query.append_pair("token", token);
            }
        }
        Ok(url.to_string())
    }
}

#[async_trait]
impl BlobStore for FirebaseBlobStore {
    async fn upload(&self, key: &str, attachment: &Attachment) -> Result<String> {
        let mut url = self.object_url(None)?;
        url.query_pairs_mut()
            .append_pair("uploadType", "media")
            .append_pair("name", key);

        tracing::debug!("Uploading {} ({} bytes)", key, attachment.bytes.len());
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, &attachment.content_type)
            .body(attachment.bytes.clone());
        let request = match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = ensure_success(request.send().await?).await?;
        let uploaded: UploadResponse = response.json().await?;

        // Several tokens may be issued, comma separated; any of them works.
        let token = uploaded
            .download_tokens
            .as_deref()
            .and_then(|tokens| tokens.split(',').next())
            .filter(|t| !t.is_empty());
        self.download_url(&uploaded.name, token)
    }
}
