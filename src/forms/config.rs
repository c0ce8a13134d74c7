//! Configuration of an upload form instance.

use serde::Serialize;

use super::validation::{FieldSpec, Rule};

/// Markup of one empty attachment slot.
pub const DEFAULT_ATTACHMENT_FRAGMENT: &str = concat!(
    r#"<div class="form-group"><div class="custom-file">"#,
    r#"<input name="attachment[]" type="file" class="custom-file-input">"#,
    r#"<label class="custom-file-label" translate-id="form.chooseFile"></label>"#,
    r#"<p class="file-hint"></p><div class="invalid-feedback"></div>"#,
    "</div></div>"
);

/// Name of the multipart field carrying attachments.
pub const ATTACHMENT_FIELD: &str = "attachment[]";
/// Name of the consent checkbox.
pub const AGREEMENT_FIELD: &str = "agree";
/// Name of the captcha answer field.
pub const CAPTCHA_FIELD: &str = "captcha";
/// Hidden field carrying the vacancy slug.
pub const VACANCY_FIELD: &str = "vacancy";
/// Hidden field carrying the page language.
pub const LANG_FIELD: &str = "lang";

/// Options recognised by the form controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormConfig {
    /// Form identifier; also the last path segment of `action`.
    pub selector: String,
    /// Upload URL the form posts to.
    pub action: String,
    pub is_captcha: bool,
    pub is_agreement: bool,
    pub is_attachments: bool,
    /// Whether the form carries the hidden vacancy slug.
    pub is_vacancy: bool,
    /// Megabytes.
    pub max_size_file: f64,
    /// Lowercase, without dots.
    pub valid_file_extensions: Vec<String>,
    pub attachment_fragment: String,
    /// Upper bound on attachment slots.
    pub max_attachments: usize,
    /// Base image source of the captcha, refreshed with a nonce.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captcha_src: Option<String>,
}

impl FormConfig {
    fn preset(selector: &str, extensions: &[&str]) -> Self {
        Self {
            selector: selector.to_string(),
            action: format!("/forms/{selector}"),
            is_captcha: false,
            is_agreement: false,
            is_attachments: true,
            is_vacancy: false,
            max_size_file: 5.5,
            valid_file_extensions: extensions.iter().map(|e| e.to_string()).collect(),
            attachment_fragment: DEFAULT_ATTACHMENT_FRAGMENT.to_string(),
            max_attachments: 3,
            captcha_src: None,
        }
    }

    /// Interview request form in the contacts section.
    pub fn contact() -> Self {
        Self::preset("contact", &["jpg", "jpeg", "doc", "pdf", "png"])
    }

    /// Application form inside the vacancy detail panel.
    pub fn vacancy() -> Self {
        Self {
            is_agreement: true,
            is_vacancy: true,
            ..Self::preset("vacancy", &["doc", "pdf"])
        }
    }

    pub fn presets() -> Vec<Self> {
        vec![Self::contact(), Self::vacancy()]
    }

    pub fn by_selector(selector: &str) -> Option<Self> {
        Self::presets().into_iter().find(|c| c.selector == selector)
    }

    /// Size limit in bytes.
    pub fn max_size_bytes(&self) -> f64 {
        self.max_size_file * 1024.0 * 1024.0
    }

    /// Size limit in kilobytes, as shown in the "too large" message.
    pub fn max_size_kb_label(&self) -> String {
        let kb = self.max_size_file * 1024.0;
        if kb.fract() == 0.0 {
            format!("{}", kb as u64)
        } else {
            format!("{kb:.1}")
        }
    }

    /// Value for the file input's `accept` attribute.
    pub fn accept(&self) -> String {
        self.valid_file_extensions
            .iter()
            .map(|ext| format!(".{ext}"))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Validated inputs in document order.
    pub fn fields(&self) -> Vec<FieldSpec> {
        let mut fields = vec![
            FieldSpec::new(
                "name",
                vec![Rule::Required, Rule::MinLength(1), Rule::MaxLength(100)],
            ),
            FieldSpec::new("phone", vec![Rule::Required, Rule::MinLength(10), Rule::Phone]),
            FieldSpec::new("email", vec![Rule::Email]),
        ];
        if self.is_captcha {
            fields.push(FieldSpec::new(CAPTCHA_FIELD, vec![Rule::Required]));
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_differ_only_in_configuration() {
        let contact = FormConfig::contact();
        let vacancy = FormConfig::vacancy();

        assert!(!contact.is_agreement);
        assert!(vacancy.is_agreement);
        assert_eq!(vacancy.valid_file_extensions, vec!["doc", "pdf"]);
        assert_eq!(contact.action, "/forms/contact");
        assert_eq!(vacancy.max_size_file, contact.max_size_file);
    }

    #[test]
    fn test_size_helpers() {
        let config = FormConfig::contact();
        assert_eq!(config.max_size_kb_label(), "5632");
        assert_eq!(config.max_size_bytes(), 5_767_168.0);
        assert_eq!(FormConfig::vacancy().accept(), ".doc,.pdf");
    }

    #[test]
    fn test_captcha_field_only_when_enabled() {
        let mut config = FormConfig::contact();
        assert!(config.fields().iter().all(|f| f.name != CAPTCHA_FIELD));
        config.is_captcha = true;
        assert!(config.fields().iter().any(|f| f.name == CAPTCHA_FIELD));
    }

    #[test]
    fn test_by_selector() {
        assert_eq!(FormConfig::by_selector("vacancy"), Some(FormConfig::vacancy()));
        assert_eq!(FormConfig::by_selector("feedback"), None);
    }
}
