//! Field and attachment checks shared by the controller and the intake.

use once_cell::sync::Lazy;
use regex::Regex;

use super::FormConfig;
use crate::locale::LocaleTable;

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?3?8?(0(66|95|99|50|67|68|96|97|98|63|73|93|39|91|92|94)\d{7})$")
        .expect("phone pattern is valid")
});

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-zA-Z0-9_\-\.]+){2,30}@([a-zA-Z0-9-]+.[a-zA-Z0-9-]+)$")
        .expect("email pattern is valid")
});

/// A constraint on a text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Phone,
    /// Only checked when the value is non-empty.
    Email,
}

/// Why a field failed its constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    TooShort(usize),
    TooLong(usize),
    Phone,
    Email,
    Agreement,
}

impl FieldError {
    pub fn message(&self, table: &LocaleTable) -> String {
        match self {
            FieldError::Required => table.t("validation.required").to_string(),
            FieldError::TooShort(min) => {
                table.t_with("validation.tooShort", &[("min", &min.to_string())])
            }
            FieldError::TooLong(max) => {
                table.t_with("validation.tooLong", &[("max", &max.to_string())])
            }
            FieldError::Phone => table.t("validation.phone").to_string(),
            FieldError::Email => table.t("validation.email").to_string(),
            FieldError::Agreement => table.t("validation.agreement").to_string(),
        }
    }
}

/// A named input and its constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub rules: Vec<Rule>,
}

impl FieldSpec {
    pub fn new(name: &str, rules: Vec<Rule>) -> Self {
        Self {
            name: name.to_string(),
            rules,
        }
    }

    pub fn is_phone(&self) -> bool {
        self.rules.contains(&Rule::Phone)
    }

    /// Check `value` against every rule; the first failure wins.
    pub fn validate(&self, value: &str) -> Result<(), FieldError> {
        let value = value.trim();
        let len = value.chars().count();
        if value.is_empty() && !self.rules.contains(&Rule::Required) {
            return Ok(());
        }
        for rule in &self.rules {
            match *rule {
                Rule::Required if value.is_empty() => return Err(FieldError::Required),
                Rule::MinLength(min) if len < min => return Err(FieldError::TooShort(min)),
                Rule::MaxLength(max) if len > max => return Err(FieldError::TooLong(max)),
                Rule::Phone if !PHONE_RE.is_match(value) => return Err(FieldError::Phone),
                Rule::Email if !EMAIL_RE.is_match(value) => return Err(FieldError::Email),
                _ => {}
            }
        }
        Ok(())
    }
}

/// Drop everything a phone input does not accept.
pub fn sanitize_phone(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '+' || *c == ',')
        .collect()
}

/// Why an attachment slot will not be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentError {
    TooLarge,
    WrongType,
    NotSelected,
    TooMany,
}

impl AttachmentError {
    pub fn message(&self, config: &FormConfig, table: &LocaleTable) -> String {
        match self {
            AttachmentError::TooLarge => table.t_with(
                "validation.fileTooLarge",
                &[("size", &config.max_size_kb_label())],
            ),
            AttachmentError::WrongType => table.t("validation.fileType").to_string(),
            AttachmentError::NotSelected => table.t("validation.fileNotSelected").to_string(),
            AttachmentError::TooMany => table.t_with(
                "validation.tooManyFiles",
                &[("max", &config.max_attachments.to_string())],
            ),
        }
    }
}

/// Extension after the last dot. Names without a dot, or whose only dot
/// is the first character, have none.
pub fn file_extension(filename: &str) -> Option<&str> {
    match filename.rfind('.') {
        None | Some(0) => None,
        Some(i) => Some(&filename[i + 1..]).filter(|ext| !ext.is_empty()),
    }
}

/// Case-insensitive membership of the extension in the allow-list.
pub fn has_valid_extension(filename: &str, allowed: &[String]) -> bool {
    file_extension(filename).is_some_and(|ext| {
        let ext = ext.to_lowercase();
        allowed.iter().any(|a| *a == ext)
    })
}

/// Size is checked before type, so an oversize file always reports
/// [`AttachmentError::TooLarge`].
pub fn check_attachment(config: &FormConfig, filename: &str, size: u64) -> Result<(), AttachmentError> {
    if size as f64 > config.max_size_bytes() {
        return Err(AttachmentError::TooLarge);
    }
    if !has_valid_extension(filename, &config.valid_file_extensions) {
        return Err(AttachmentError::WrongType);
    }
    Ok(())
}
