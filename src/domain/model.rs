use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;

/// Reads an explicit `null` as the type's default. Stored documents are not
/// guaranteed to carry every field with its declared type.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub link: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLink {
    #[serde(deserialize_with = "null_as_default")]
    pub platform: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

/// One client's completed submission. Written once, never updated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Order {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub desired_portfolio_style: String,
    #[serde(deserialize_with = "null_as_default")]
    pub achievements: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub projects: Vec<Project>,
    #[serde(deserialize_with = "null_as_default")]
    pub social_links: Vec<SocialLink>,
    /// Selected plan amount, e.g. "199".
    pub price_range: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub selected_features: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub preferred_colors: Vec<String>,
    #[serde(
        rename = "portfolioSections",
        alias = "selectedSections",
        deserialize_with = "null_as_default"
    )]
    pub selected_sections: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub other_requirements: String,
    #[serde(deserialize_with = "null_as_default")]
    pub consent_to_proceed: bool,
    pub resume: Option<String>,
    pub profile_photo: Option<String>,
    pub payment_screenshot: Option<String>,
    pub submission_date: Option<DateTime<Utc>>,
}

/// An order as read back, with the id the store assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredOrder {
    pub id: String,
    #[serde(flatten)]
    pub order: Order,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_firestore(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASCENDING",
            SortDirection::Descending => "DESCENDING",
        }
    }
}

/// The three upload fields of the form, each with its own blob folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileSlot {
    Resume,
    ProfilePhoto,
    PaymentScreenshot,
}

impl FileSlot {
    /// Upload order used by the submission pipeline.
    pub const ALL: [FileSlot; 3] = [
        FileSlot::Resume,
        FileSlot::ProfilePhoto,
        FileSlot::PaymentScreenshot,
    ];

    pub fn folder(self) -> &'static str {
        match self {
            FileSlot::Resume => "resumes",
            FileSlot::ProfilePhoto => "profilePhotos",
            FileSlot::PaymentScreenshot => "paymentScreenshots",
        }
    }

    pub fn field_name(self) -> &'static str {
        match self {
            FileSlot::Resume => "resume",
            FileSlot::ProfilePhoto => "profilePhoto",
            FileSlot::PaymentScreenshot => "paymentScreenshot",
        }
    }
}

impl fmt::Display for FileSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// `{folder}/{originalFileName}_{epochMillis}`
pub fn blob_key(slot: FileSlot, file_name: &str, at: DateTime<Utc>) -> String {
    format!("{}/{}_{}", slot.folder(), file_name, at.timestamp_millis())
}

/// A file picked for upload, held in memory until submission.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = guess_content_type(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        Ok(Self::new(file_name, bytes))
    }
}

fn guess_content_type(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_blob_key_layout() {
        let at = Utc.timestamp_millis_opt(1_760_000_000_123).unwrap();
        assert_eq!(
            blob_key(FileSlot::PaymentScreenshot, "upi.png", at),
            "paymentScreenshots/upi.png_1760000000123"
        );
    }

    #[test]
    fn test_order_wire_names() {
        let order = Order {
            name: "Sarah Chen".to_string(),
            selected_sections: vec!["aboutMe".to_string()],
            ..Default::default()
        };
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["portfolioSections"][0], "aboutMe");
        assert!(value.get("desiredPortfolioStyle").is_some());
        assert!(value["paymentScreenshot"].is_null());
    }

    #[test]
    fn test_order_reads_sparse_documents() {
        let order: Order = serde_json::from_value(serde_json::json!({
            "name": "Ravi",
            "selectedSections": ["blog"]
        }))
        .unwrap();
        assert_eq!(order.name, "Ravi");
        assert_eq!(order.selected_sections, vec!["blog".to_string()]);
        assert!(order.submission_date.is_none());
    }

    #[test]
    fn test_order_reads_null_fields_as_defaults() {
        let order: Order = serde_json::from_value(serde_json::json!({
            "name": "Ravi",
            "email": null,
            "otherRequirements": null,
            "achievements": null,
            "consentToProceed": null,
            "projects": [{ "name": "Atlas", "time": null }],
            "resume": null
        }))
        .unwrap();
        assert_eq!(order.name, "Ravi");
        assert_eq!(order.email, "");
        assert_eq!(order.other_requirements, "");
        assert!(order.achievements.is_empty());
        assert!(!order.consent_to_proceed);
        assert_eq!(order.projects[0].time, "");
        assert!(order.resume.is_none());
    }

    #[test]
    fn test_content_type_guess() {
        assert_eq!(Attachment::new("CV.PDF", vec![]).content_type, "application/pdf");
        assert_eq!(Attachment::new("me.jpeg", vec![]).content_type, "image/jpeg");
        assert_eq!(
            Attachment::new("notes", vec![]).content_type,
            "application/octet-stream"
        );
    }
}
