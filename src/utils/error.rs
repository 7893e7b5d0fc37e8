use crate::domain::form::FieldErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Form validation failed: {0}")]
    ValidationError(FieldErrors),

    #[error("Upload of {slot} failed: {message}")]
    UploadError { slot: String, message: String },

    #[error("Storage operation failed: {message}")]
    StorageError { message: String },

    #[error("Backend responded with {status}: {message}")]
    BackendError { status: u16, message: String },

    #[error("Stored data is malformed: {message}")]
    MalformedDataError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Validation,
    Network,
    Backend,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit status for a command that failed with this severity.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,   // 重試錯誤
            ErrorSeverity::High => 1,     // 處理錯誤
            ErrorSeverity::Critical => 3, // 系統錯誤
        }
    }
}

impl IntakeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::ValidationError(_) => ErrorCategory::Validation,
            Self::ApiError(_) | Self::UploadError { .. } => ErrorCategory::Network,
            Self::BackendError { .. } | Self::StorageError { .. } => ErrorCategory::Backend,
            Self::CsvError(_) | Self::SerializationError(_) | Self::MalformedDataError { .. } => {
                ErrorCategory::Data
            }
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::High,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Backend => match self {
                Self::BackendError { status, .. } if *status >= 500 || *status == 429 => {
                    ErrorSeverity::Medium
                }
                _ => ErrorSeverity::High,
            },
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError(errors) => format!(
                "Please review and correct the highlighted fields before submitting.\n{}",
                errors
            ),
            Self::UploadError { .. }
            | Self::ApiError(_)
            | Self::BackendError { .. }
            | Self::StorageError { .. } => format!(
                "There was an error submitting your form. Please try again.\n\n{}",
                self
            ),
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => {
                format!("The configuration is not usable: {}", self)
            }
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => "Check the configuration file and environment variables",
            ErrorCategory::Validation => "Fix the listed fields in the intake file and submit again",
            ErrorCategory::Network => "Check connectivity to the storage service and retry",
            ErrorCategory::Backend => "Check the project credentials and the service status",
            ErrorCategory::Data => "Inspect the stored documents for unexpected fields",
            ErrorCategory::System => "Check file paths and permissions",
        }
    }
}

pub type Result<T> = std::result::Result<T, IntakeError>;
