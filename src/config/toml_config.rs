use crate::utils::error::{IntakeError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern compiles"));

pub const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com";
pub const DEFAULT_STORAGE_URL: &str = "https://firebasestorage.googleapis.com";
pub const DEFAULT_DATABASE: &str = "(default)";
pub const DEFAULT_COLLECTION: &str = "orders";
pub const DEFAULT_QR_BASE_URL: &str = "https://upiqr.in/api/qr";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub firebase: Option<FirebaseConfig>,
    pub local: Option<LocalConfig>,
    pub s3: Option<S3Config>,
    pub payment: Option<PaymentConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderBackend {
    Firestore,
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlobBackend {
    FirebaseStorage,
    Local,
    S3,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub orders: OrderBackend,
    pub blobs: BlobBackend,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirebaseConfig {
    pub project_id: String,
    pub storage_bucket: String,
    pub api_key: Option<String>,
    pub auth_token: Option<String>,
    pub database: Option<String>,
    pub collection: Option<String>,
    pub firestore_url: Option<String>,
    pub storage_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalConfig {
    pub data_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    pub prefix: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfig {
    pub upi_id: String,
    pub qr_base_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: Option<LogFormat>,
    pub verbose: Option<bool>,
}

impl FirebaseConfig {
    pub fn database(&self) -> &str {
        self.database.as_deref().unwrap_or(DEFAULT_DATABASE)
    }

    pub fn collection(&self) -> &str {
        self.collection.as_deref().unwrap_or(DEFAULT_COLLECTION)
    }

    pub fn firestore_url(&self) -> &str {
        self.firestore_url.as_deref().unwrap_or(DEFAULT_FIRESTORE_URL)
    }

    pub fn storage_url(&self) -> &str {
        self.storage_url.as_deref().unwrap_or(DEFAULT_STORAGE_URL)
    }
}

impl PaymentConfig {
    pub fn qr_base_url(&self) -> &str {
        self.qr_base_url.as_deref().unwrap_or(DEFAULT_QR_BASE_URL)
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(IntakeError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| IntakeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unset variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures<'_>| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn firebase(&self) -> Result<&FirebaseConfig> {
        validation::validate_required_field("firebase", &self.firebase)
    }

    pub fn local(&self) -> Result<&LocalConfig> {
        validation::validate_required_field("local", &self.local)
    }

    pub fn s3(&self) -> Result<&S3Config> {
        validation::validate_required_field("s3", &self.s3)
    }

    pub fn payment(&self) -> Result<&PaymentConfig> {
        validation::validate_required_field("payment", &self.payment)
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging
            .as_ref()
            .and_then(|l| l.format)
            .unwrap_or_default()
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    fn uses_firebase(&self) -> bool {
        self.backend.orders == OrderBackend::Firestore
            || self.backend.blobs == BlobBackend::FirebaseStorage
    }

    fn uses_local(&self) -> bool {
        self.backend.orders == OrderBackend::Local || self.backend.blobs == BlobBackend::Local
    }
}

impl Validate for FirebaseConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_resource_name("firebase.project_id", &self.project_id)?;
        validation::validate_resource_name("firebase.storage_bucket", &self.storage_bucket)?;
        validation::validate_url("firebase.firestore_url", self.firestore_url())?;
        validation::validate_url("firebase.storage_url", self.storage_url())?;
        validation::validate_non_empty_string("firebase.collection", self.collection())?;

        if let Some(key) = &self.api_key {
            if key.starts_with("${") {
                return Err(IntakeError::InvalidConfigValueError {
                    field: "firebase.api_key".to_string(),
                    value: key.clone(),
                    reason: "Environment variable is not set".to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        if self.uses_firebase() {
            self.firebase()?.validate()?;
        }

        if self.uses_local() {
            validation::validate_path("local.data_dir", &self.local()?.data_dir)?;
        }

        if self.backend.blobs == BlobBackend::S3 {
            let s3 = self.s3()?;
            validation::validate_resource_name("s3.bucket", &s3.bucket)?;
            validation::validate_non_empty_string("s3.region", &s3.region)?;
        }

        if let Some(payment) = &self.payment {
            validation::validate_non_empty_string("payment.upi_id", &payment.upi_id)?;
            validation::validate_url("payment.qr_base_url", payment.qr_base_url())?;
        }

        tracing::debug!("configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FIREBASE_TOML: &str = r#"
[backend]
orders = "firestore"
blobs = "firebase-storage"

[firebase]
project_id = "classic-vantage"
storage_bucket = "classic-vantage.appspot.com"
api_key = "test-key"

[payment]
upi_id = "studio@oksbi"
"#;

    #[test]
    fn test_parse_firebase_config() {
        let config = AppConfig::from_toml_str(FIREBASE_TOML).unwrap();

        assert_eq!(config.backend.orders, OrderBackend::Firestore);
        assert_eq!(config.backend.blobs, BlobBackend::FirebaseStorage);
        let firebase = config.firebase().unwrap();
        assert_eq!(firebase.collection(), "orders");
        assert_eq!(firebase.database(), "(default)");
        assert_eq!(firebase.firestore_url(), DEFAULT_FIRESTORE_URL);
        assert_eq!(config.log_format(), LogFormat::Compact);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("VANTAGE_TEST_API_KEY", "from-env");

        let toml_content = FIREBASE_TOML.replace("test-key", "${VANTAGE_TEST_API_KEY}");
        let config = AppConfig::from_toml_str(&toml_content).unwrap();
        assert_eq!(
            config.firebase().unwrap().api_key.as_deref(),
            Some("from-env")
        );

        std::env::remove_var("VANTAGE_TEST_API_KEY");
    }

    #[test]
    fn test_unset_env_var_fails_validation() {
        let toml_content = FIREBASE_TOML.replace("test-key", "${VANTAGE_UNSET_VARIABLE}");
        let config = AppConfig::from_toml_str(&toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_backend_section_fails_validation() {
        let toml_content = r#"
[backend]
orders = "local"
blobs = "local"
"#;
        let config = AppConfig::from_toml_str(toml_content).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, IntakeError::MissingConfigError { field } if field == "local"));
    }

    #[test]
    fn test_unknown_backend_is_parse_error() {
        let toml_content = r#"
[backend]
orders = "mongodb"
blobs = "local"
"#;
        assert!(AppConfig::from_toml_str(toml_content).is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[backend]
orders = "local"
blobs = "local"

[local]
data_dir = "./intake-data"

[logging]
format = "json"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.local().unwrap().data_dir, "./intake-data");
        assert_eq!(config.log_format(), LogFormat::Json);
        assert!(config.validate().is_ok());
    }
}
