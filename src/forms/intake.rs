//! Server side of the upload contract.
//!
//! The intake re-runs the controller's checks against the submitted
//! multipart body and either accepts an application or answers with the
//! error map the controller knows how to route.

use axum::extract::Multipart;

use super::reply::ErrorMap;
use super::validation::{check_attachment, sanitize_phone, AttachmentError, FieldError};
use super::{FormConfig, AGREEMENT_FIELD, ATTACHMENT_FIELD, CAPTCHA_FIELD, VACANCY_FIELD};
use crate::catalog::Catalog;
use crate::errors::AppError;
use crate::locale::LocaleTable;
use crate::models::{NewApplication, NewAttachment};

/// A file part of the submission.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// Decoded multipart body. Files keep their arrival order.
#[derive(Debug, Clone, Default)]
pub struct Incoming {
    fields: Vec<(String, String)>,
    files: Vec<IncomingFile>,
}

impl Incoming {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.fields.push((name.to_string(), value.to_string()));
        self
    }

    pub fn file(mut self, filename: &str, data: Vec<u8>) -> Self {
        self.files.push(IncomingFile {
            filename: filename.to_string(),
            content_type: None,
            data,
        });
        self
    }

    /// First value of a text field.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn files(&self) -> &[IncomingFile] {
        &self.files
    }

    /// Read every part of the body. Empty file inputs are skipped.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut incoming = Self::new();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            if name == ATTACHMENT_FIELD || field.file_name().is_some() {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await?;
                if filename.is_empty() && data.is_empty() {
                    continue;
                }
                incoming.files.push(IncomingFile {
                    filename,
                    content_type,
                    data: data.to_vec(),
                });
            } else {
                let value = field.text().await?;
                incoming.fields.push((name, value));
            }
        }
        Ok(incoming)
    }
}

/// Result of reviewing one submission.
#[derive(Debug, Clone)]
pub enum IntakeOutcome {
    Accepted(NewApplication),
    Rejected(ErrorMap),
}

fn is_checked(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "" | "0" | "off" | "false"
    )
}

/// Check a submission against `config`, answering in `table`'s language.
pub fn review(
    config: &FormConfig,
    catalog: &Catalog,
    table: &LocaleTable,
    incoming: Incoming,
) -> IntakeOutcome {
    let Incoming { fields, files } = incoming;
    let value = |name: &str| {
        fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.trim())
            .unwrap_or_default()
    };
    let mut errors = ErrorMap::new();

    for spec in config.fields() {
        let raw = value(&spec.name);
        let normalized = if spec.is_phone() {
            sanitize_phone(raw)
        } else {
            raw.to_string()
        };
        if let Err(err) = spec.validate(&normalized) {
            if spec.name == CAPTCHA_FIELD {
                errors.field(CAPTCHA_FIELD, table.t("validation.captcha"));
            } else {
                errors.field(&spec.name, err.message(table));
            }
        }
    }

    if config.is_agreement && !is_checked(value(AGREEMENT_FIELD)) {
        errors.field(AGREEMENT_FIELD, FieldError::Agreement.message(table));
    }

    let mut vacancy = None;
    if config.is_vacancy {
        match catalog.open_by_slug(value(VACANCY_FIELD)) {
            Some(v) => vacancy = Some(v.button_data.clone()),
            None => {
                errors.log(table.t("validation.unknownVacancy"));
            }
        }
    }

    let mut attachments = Vec::new();
    if config.is_attachments {
        for (index, file) in files.into_iter().enumerate() {
            let checked = if index >= config.max_attachments {
                Err(AttachmentError::TooMany)
            } else {
                check_attachment(config, &file.filename, file.data.len() as u64)
            };
            match checked {
                Ok(()) => attachments.push(NewAttachment {
                    index,
                    filename: file.filename,
                    content_type: file.content_type,
                    data: file.data,
                }),
                Err(err) => {
                    errors.attachment(index, err.message(config, table));
                }
            }
        }
    }

    if !errors.is_empty() {
        tracing::info!(form = %config.selector, errors = errors.len(), "Submission rejected");
        return IntakeOutcome::Rejected(errors);
    }

    let email = value("email");
    IntakeOutcome::Accepted(NewApplication {
        form: config.selector.clone(),
        vacancy,
        name: value("name").to_string(),
        phone: sanitize_phone(value("phone")),
        email: (!email.is_empty()).then(|| email.to_string()),
        lang: table.lang().as_str().to_string(),
        attachments,
    })
}
