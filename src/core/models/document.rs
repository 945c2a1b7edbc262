use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum DocumentCategory {
    #[display("contract")]
    Contract,
    #[display("id")]
    Id,
    #[display("resume")]
    Resume,
    #[display("certificate")]
    Certificate,
    #[display("other")]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub employee_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub file_url: String,
    pub file_type: String,
    pub file_size: u64,
    pub category: DocumentCategory,
    pub uploaded_by: String,
    pub uploaded_at: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Metadata edit for an existing document
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<DocumentCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}
