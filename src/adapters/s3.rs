use crate::config::toml_config::S3Config;
use crate::domain::model::Attachment;
use crate::domain::ports::BlobStore;
use crate::utils::error::{IntakeError, Result};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::ProvideErrorMetadata;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use url::Url;

#[derive(Debug, Clone)]
pub struct S3BlobStore {
    client: S3Client,
    bucket: String,
    region: String,
    prefix: Option<String>,
}

impl S3BlobStore {
    pub fn new(client: S3Client, config: &S3Config) -> Self {
        Self {
            client,
            bucket: config.bucket.clone(),
            region: config.region.clone(),
            prefix: config.prefix.clone(),
        }
    }

    pub async fn from_config(config: &S3Config) -> Self {
        let shared = aws_config::load_defaults(BehaviorVersion::latest()).await;
        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .region(Region::new(config.region.clone()))
            .build();
        Self::new(S3Client::from_conf(s3_config), config)
    }

    fn object_key(&self, key: &str) -> String {
        match &self.prefix {
            Some(prefix) if !prefix.is_empty() => {
                format!("{}/{}", prefix.trim_end_matches('/'), key)
            }
            _ => key.to_string(),
        }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn upload(&self, key: &str, attachment: &Attachment) -> Result<String> {
        let object_key = self.object_key(key);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&object_key)
            .content_type(&attachment.content_type)
            .body(ByteStream::from(attachment.bytes.clone()))
            .send()
            .await
            .map_err(|err| {
                let service_error = err.into_service_error();
                IntakeError::StorageError {
                    message: format!(
                        "put_object {} failed: {}",
                        object_key,
                        service_error.message().unwrap_or("unhandled S3 error")
                    ),
                }
            })?;

        object_url(&self.bucket, &self.region, &object_key)
    }
}

/// Virtual-hosted style URL; each `/`-separated part of the key is encoded
/// as its own path segment.
fn object_url(bucket: &str, region: &str, object_key: &str) -> Result<String> {
    let endpoint = format!("https://{}.s3.{}.amazonaws.com/", bucket, region);
    let mut url = Url::parse(&endpoint).map_err(|e| IntakeError::InvalidConfigValueError {
        field: "s3.bucket".to_string(),
        value: bucket.to_string(),
        reason: e.to_string(),
    })?;
    url.path_segments_mut()
        .map_err(|_| IntakeError::ConfigError {
            message: format!("S3 endpoint cannot be a base: {}", endpoint),
        })?
        .pop_if_empty()
        .extend(object_key.split('/'));
    Ok(url.to_string())
}
