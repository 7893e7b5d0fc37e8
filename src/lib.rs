pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command, OutputFormat};

pub use config::AppConfig;
pub use core::{dashboard::Dashboard, intake::IntakeFile, submission::SubmissionEngine};
pub use domain::catalog::Catalog;
pub use domain::form::{FormAction, FormState};
pub use utils::error::{IntakeError, Result};
