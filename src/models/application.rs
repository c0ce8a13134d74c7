//! Applications received through the upload forms.

use serde::Serialize;

/// Metadata of a stored attachment. The bytes stay in the database.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentMeta {
    /// Position among the accepted files of the submission (`data-index`).
    pub index: i64,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    pub size: i64,
}

/// A persisted application.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredApplication {
    pub id: String,
    pub form: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vacancy: Option<String>,
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub lang: String,
    pub received_at: String,
    pub attachments: Vec<AttachmentMeta>,
}

/// An accepted file waiting to be written.
#[derive(Debug, Clone)]
pub struct NewAttachment {
    pub index: usize,
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// An application that passed intake review.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub form: String,
    pub vacancy: Option<String>,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub lang: String,
    pub attachments: Vec<NewAttachment>,
}
