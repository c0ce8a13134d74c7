//! Client-side controller of an upload form.
//!
//! `Idle -> Validating -> { Invalid | Submitting -> { Success | ServerError } }`,
//! every branch ending back in `Idle`. The controller owns no DOM: a
//! rendering adapter reads its state (field decorations, slot hints, focus,
//! panels, progress) after each transition.

use std::sync::Arc;

use super::reply::{ReplyError, ServerReply};
use super::transport::Transport;
use super::validation::{check_attachment, sanitize_phone, AttachmentError, FieldSpec};
use super::{FormConfig, AGREEMENT_FIELD, LANG_FIELD};
use crate::locale::LocaleTable;

/// Decoration of one input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Validation {
    #[default]
    Unvalidated,
    Valid,
    Invalid(String),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Validation::Invalid(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Validation::Invalid(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Validating,
    Submitting,
}

/// How the last submit attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Submit control disabled (agreement unchecked or upload in flight).
    Blocked,
    /// Local validation failed; nothing was sent.
    Invalid,
    Success,
    /// The endpoint answered with an error map.
    ServerError,
    /// The endpoint could not be reached or answered outside the contract.
    TransportFailure,
}

/// A file picked into an attachment slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: data.len() as u64,
            content_type: None,
            data,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    pub spec: FieldSpec,
    pub value: String,
    pub validation: Validation,
}

/// One file input of the growable attachment block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttachmentSlot {
    pub file: Option<SelectedFile>,
    pub touched: bool,
    pub validation: Validation,
    /// "Not selected" hint for a slot cleared after being touched.
    pub hint: Option<String>,
    /// Correlation key with server-side messages; `-1` when excluded.
    pub data_index: i32,
}

impl AttachmentSlot {
    fn empty() -> Self {
        Self {
            data_index: -1,
            ..Self::default()
        }
    }

    pub fn is_included(&self) -> bool {
        self.file.is_some() && self.validation.is_valid()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Focus {
    Field(String),
    Agreement,
    Attachment(usize),
}

/// A file as it goes on the wire.
#[derive(Debug, Clone)]
pub struct OutgoingFile {
    pub data_index: usize,
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// Payload of one multipart POST.
#[derive(Debug, Clone)]
pub struct Submission {
    pub action: String,
    pub fields: Vec<(String, String)>,
    pub files: Vec<OutgoingFile>,
}

impl Submission {
    /// Bytes of the text fields, names included.
    pub fn text_bytes(&self) -> u64 {
        self.fields.iter().map(|(k, v)| k.len() + v.len()).sum::<usize>() as u64
    }

    pub fn total_bytes(&self) -> u64 {
        let files: usize = self.files.iter().map(|f| f.data.len()).sum();
        self.text_bytes() + files as u64
    }
}

/// Round `loaded / total` to a percentage with one decimal.
pub fn progress_percent(loaded: u64, total: u64) -> f64 {
    let pct = loaded as f64 * 100.0 / total as f64;
    ((pct * 10.0).round() / 10.0).clamp(0.0, 100.0)
}

/// State of one form instance. Instances share nothing mutable.
#[derive(Debug, Clone)]
pub struct FormSession {
    config: FormConfig,
    locale: Arc<LocaleTable>,
    fields: Vec<FieldState>,
    hidden: Vec<(String, String)>,
    agreement: bool,
    agreement_validation: Validation,
    attachments: Vec<AttachmentSlot>,
    status: FormStatus,
    outcome: Option<Outcome>,
    submit_enabled: bool,
    progress: Option<f64>,
    focus: Option<Focus>,
    log: Vec<String>,
    error_panel: bool,
    success_panel: bool,
    captcha_nonce: u64,
}

impl FormSession {
    pub fn new(config: FormConfig, locale: Arc<LocaleTable>) -> Self {
        let fields = config
            .fields()
            .into_iter()
            .map(|spec| FieldState {
                spec,
                value: String::new(),
                validation: Validation::Unvalidated,
            })
            .collect();
        let hidden = vec![(LANG_FIELD.to_string(), locale.lang().as_str().to_string())];
        let mut session = Self {
            config,
            locale,
            fields,
            hidden,
            agreement: false,
            agreement_validation: Validation::Unvalidated,
            attachments: Vec::new(),
            status: FormStatus::Idle,
            outcome: None,
            submit_enabled: true,
            progress: None,
            focus: None,
            log: Vec::new(),
            error_panel: false,
            success_panel: false,
            captcha_nonce: 0,
        };
        session.reset();
        session
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn field(&self, name: &str) -> Option<&FieldState> {
        self.fields.iter().find(|f| f.spec.name == name)
    }

    pub fn fields(&self) -> &[FieldState] {
        &self.fields
    }

    pub fn attachments(&self) -> &[AttachmentSlot] {
        &self.attachments
    }

    pub fn agreement_validation(&self) -> &Validation {
        &self.agreement_validation
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn progress(&self) -> Option<f64> {
        self.progress
    }

    pub fn progress_label(&self) -> Option<String> {
        self.progress.map(|p| format!("{p:.1}%"))
    }

    pub fn focus(&self) -> Option<&Focus> {
        self.focus.as_ref()
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn error_panel_visible(&self) -> bool {
        self.error_panel
    }

    pub fn success_panel_visible(&self) -> bool {
        self.success_panel
    }

    /// Captcha image source with a cache-busting nonce.
    pub fn captcha_src(&self) -> Option<String> {
        if !self.config.is_captcha {
            return None;
        }
        let base = self.config.captcha_src.as_deref()?;
        let separator = if base.contains("?id") { "&rnd=" } else { "?rnd=" };
        Some(format!("{base}{separator}{}", self.captcha_nonce))
    }

    pub fn refresh_captcha(&mut self) {
        if self.config.is_captcha {
            self.captcha_nonce += 1;
        }
    }

    /// Type into a field. Phone inputs drop disallowed characters.
    pub fn set_value(&mut self, name: &str, value: &str) -> bool {
        let Some(field) = self.fields.iter_mut().find(|f| f.spec.name == name) else {
            return false;
        };
        field.value = if field.spec.is_phone() {
            sanitize_phone(value)
        } else {
            value.to_string()
        };
        true
    }

    /// Set a hidden input such as the vacancy slug.
    pub fn set_hidden(&mut self, name: &str, value: &str) {
        match self.hidden.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.hidden.push((name.to_string(), value.to_string())),
        }
    }

    /// Toggle the consent checkbox; it gates the submit control.
    pub fn set_agreement(&mut self, checked: bool) {
        self.agreement = checked;
        self.agreement_validation = Validation::Unvalidated;
        if self.config.is_agreement && self.status != FormStatus::Submitting {
            self.submit_enabled = checked;
        }
    }

    /// Pick (`Some`) or clear (`None`) the file of an attachment slot.
    ///
    /// Picking a file in the last slot appends an empty slot while the
    /// block is below its capacity. Returns `false` for unknown slots.
    pub fn select_file(&mut self, slot: usize, file: Option<SelectedFile>) -> bool {
        if !self.config.is_attachments || slot >= self.attachments.len() {
            return false;
        }
        let grows = file.is_some()
            && slot + 1 == self.attachments.len()
            && self.attachments.len() < self.config.max_attachments;

        let (validation, hint) = match &file {
            Some(f) => match check_attachment(&self.config, &f.name, f.size) {
                Ok(()) => (Validation::Valid, None),
                Err(e) => (
                    Validation::Invalid(e.message(&self.config, &self.locale)),
                    None,
                ),
            },
            None => (
                Validation::Unvalidated,
                Some(AttachmentError::NotSelected.message(&self.config, &self.locale)),
            ),
        };

        let entry = &mut self.attachments[slot];
        entry.touched = true;
        entry.file = file;
        entry.validation = validation;
        entry.hint = hint;
        entry.data_index = -1;

        if grows {
            self.attachments.push(AttachmentSlot::empty());
        }
        true
    }

    /// Run the input constraints on every text field.
    fn validate(&mut self) -> bool {
        let mut valid = true;
        for field in &mut self.fields {
            field.validation = match field.spec.validate(&field.value) {
                Ok(()) => Validation::Valid,
                Err(e) => {
                    valid = false;
                    Validation::Invalid(e.message(&self.locale))
                }
            };
        }
        self.focus_first_invalid();
        valid
    }

    fn focus_first_invalid(&mut self) {
        self.focus = self
            .fields
            .iter()
            .find(|f| f.validation.is_invalid())
            .map(|f| Focus::Field(f.spec.name.clone()))
            .or_else(|| {
                self.agreement_validation
                    .is_invalid()
                    .then_some(Focus::Agreement)
            })
            .or_else(|| {
                self.attachments
                    .iter()
                    .position(|a| a.validation.is_invalid())
                    .map(Focus::Attachment)
            });
    }

    /// Number valid slots from zero; everything else gets `-1`.
    fn assign_data_indexes(&mut self) {
        let mut next = 0;
        for slot in &mut self.attachments {
            if slot.is_included() {
                slot.data_index = next;
                next += 1;
            } else {
                slot.data_index = -1;
            }
        }
    }

    fn collect(&self) -> Submission {
        let mut fields: Vec<(String, String)> = self
            .fields
            .iter()
            .map(|f| (f.spec.name.clone(), f.value.trim().to_string()))
            .collect();
        fields.extend(self.hidden.iter().cloned());
        if self.agreement {
            fields.push((AGREEMENT_FIELD.to_string(), "on".to_string()));
        }

        let files = self
            .attachments
            .iter()
            .filter(|slot| slot.data_index >= 0)
            .filter_map(|slot| {
                slot.file.as_ref().map(|file| OutgoingFile {
                    data_index: slot.data_index as usize,
                    filename: file.name.clone(),
                    content_type: file.content_type.clone(),
                    data: file.data.clone(),
                })
            })
            .collect();

        Submission {
            action: self.config.action.clone(),
            fields,
            files,
        }
    }

    /// Validate locally and, when everything passes, enter `Submitting`.
    pub fn begin_submit(&mut self) -> Result<Submission, Outcome> {
        if self.status == FormStatus::Submitting || !self.submit_enabled {
            return Err(Outcome::Blocked);
        }

        self.status = FormStatus::Validating;
        if !self.validate() {
            self.status = FormStatus::Idle;
            self.outcome = Some(Outcome::Invalid);
            return Err(Outcome::Invalid);
        }

        self.error_panel = false;
        self.assign_data_indexes();
        let submission = self.collect();

        self.status = FormStatus::Submitting;
        self.submit_enabled = false;
        self.progress = Some(0.0);
        Ok(submission)
    }

    /// Upload progress; ignored unless the total is known.
    pub fn on_progress(&mut self, loaded: u64, total: Option<u64>) -> Option<f64> {
        if self.status != FormStatus::Submitting {
            return None;
        }
        let total = total.filter(|t| *t > 0)?;
        let pct = progress_percent(loaded, total);
        self.progress = Some(pct);
        Some(pct)
    }

    /// Apply the endpoint's reply.
    pub fn on_reply(&mut self, reply: ServerReply) -> Outcome {
        self.progress = None;
        match reply {
            ServerReply::Success => {
                self.reset();
                self.success_panel = true;
                self.outcome = Some(Outcome::Success);
                Outcome::Success
            }
            ServerReply::Rejected(errors) => {
                self.error_panel = true;
                for error in errors.iter() {
                    self.route_error(error);
                }
                self.focus_first_invalid();
                self.status = FormStatus::Idle;
                self.submit_enabled = self.agreement_allows_submit();
                self.outcome = Some(Outcome::ServerError);
                Outcome::ServerError
            }
        }
    }

    /// Submit state once an upload settles without success.
    fn agreement_allows_submit(&self) -> bool {
        !self.config.is_agreement || self.agreement
    }

    fn route_error(&mut self, error: &ReplyError) {
        match error {
            ReplyError::Field { name, message } if name == AGREEMENT_FIELD => {
                self.agreement_validation = Validation::Invalid(message.clone());
            }
            ReplyError::Field { name, message } => {
                match self.fields.iter_mut().find(|f| f.spec.name == *name) {
                    Some(field) => field.validation = Validation::Invalid(message.clone()),
                    None => self.log.push(format!("{name}: {message}")),
                }
            }
            ReplyError::Captcha(message) => {
                self.refresh_captcha();
                match self.fields.iter_mut().find(|f| f.spec.name == super::CAPTCHA_FIELD) {
                    Some(field) => field.validation = Validation::Invalid(message.clone()),
                    None => self.log.push(message.clone()),
                }
            }
            ReplyError::Attachment { index, message } => {
                let slot = self
                    .attachments
                    .iter_mut()
                    .find(|s| s.data_index >= 0 && s.data_index as usize == *index);
                match slot {
                    Some(slot) => slot.validation = Validation::Invalid(message.clone()),
                    None => self.log.push(message.clone()),
                }
            }
            ReplyError::Log(message) => self.log.push(message.clone()),
        }
    }

    /// The upload never produced a contract reply.
    pub fn on_transport_failure(&mut self) -> Outcome {
        self.progress = None;
        self.error_panel = true;
        self.status = FormStatus::Idle;
        self.submit_enabled = self.agreement_allows_submit();
        self.outcome = Some(Outcome::TransportFailure);
        Outcome::TransportFailure
    }

    /// Back to a pristine form: values, decorations, slots and panels.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
            field.validation = Validation::Unvalidated;
        }
        self.agreement = false;
        self.agreement_validation = Validation::Unvalidated;
        self.attachments = if self.config.is_attachments {
            vec![AttachmentSlot::empty()]
        } else {
            Vec::new()
        };
        self.refresh_captcha();
        self.submit_enabled = !self.config.is_agreement;
        self.status = FormStatus::Idle;
        self.progress = None;
        self.focus = None;
        self.log.clear();
        self.error_panel = false;
        self.success_panel = false;
    }

    /// Validate, upload through `transport`, and apply the result.
    pub async fn submit<T: Transport>(&mut self, transport: &T) -> Outcome {
        let submission = match self.begin_submit() {
            Ok(submission) => submission,
            Err(outcome) => return outcome,
        };

        let result = {
            let mut report = |loaded: u64, total: Option<u64>| {
                self.on_progress(loaded, total);
            };
            transport.send(&submission, &mut report).await
        };

        match result {
            Ok(reply) => self.on_reply(reply),
            Err(err) => {
                tracing::warn!(form = %self.config.selector, error = %err, "Form upload failed");
                self.on_transport_failure()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::reply::ErrorMap;
    use crate::locale::{Lang, Locales};

    const MB: usize = 1024 * 1024;

    fn session(config: FormConfig) -> FormSession {
        let locales = Locales::embedded(Lang::En).unwrap();
        FormSession::new(config, locales.shared(Lang::En))
    }

    fn filled(config: FormConfig) -> FormSession {
        let mut form = session(config);
        form.set_value("name", "Olena");
        form.set_value("phone", "+38 067 123 45 67");
        form.set_value("email", "olena@example.com");
        form
    }

    #[test]
    fn test_invalid_fields_block_submit_and_focus_first() {
        let mut form = session(FormConfig::contact());
        form.set_value("phone", "123");

        assert_eq!(form.begin_submit().unwrap_err(), Outcome::Invalid);
        assert_eq!(form.status(), FormStatus::Idle);
        assert_eq!(form.focus(), Some(&Focus::Field("name".into())));
        assert_eq!(
            form.field("name").unwrap().validation.message(),
            Some("This field is required")
        );
        assert!(form.field("phone").unwrap().validation.is_invalid());
        assert!(form.field("email").unwrap().validation.is_valid());
    }

    #[test]
    fn test_valid_form_without_attachment_submits() {
        let mut form = filled(FormConfig::contact());
        let submission = form.begin_submit().unwrap();

        assert_eq!(form.status(), FormStatus::Submitting);
        assert!(!form.submit_enabled());
        assert!(submission.files.is_empty());
        assert!(submission
            .fields
            .contains(&("phone".to_string(), "+380671234567".to_string())));
        assert_eq!(submission.action, "/forms/contact");
    }

    #[test]
    fn test_second_submit_blocked_while_in_flight() {
        let mut form = filled(FormConfig::contact());
        form.begin_submit().unwrap();
        assert_eq!(form.begin_submit().unwrap_err(), Outcome::Blocked);
    }

    #[test]
    fn test_agreement_gates_submit() {
        let mut form = filled(FormConfig::vacancy());
        assert!(!form.submit_enabled());
        assert_eq!(form.begin_submit().unwrap_err(), Outcome::Blocked);

        form.set_agreement(true);
        assert!(form.submit_enabled());
        let submission = form.begin_submit().unwrap();
        assert!(submission
            .fields
            .contains(&("agree".to_string(), "on".to_string())));
    }

    #[test]
    fn test_consent_withdrawn_in_flight_keeps_submit_disabled() {
        let mut form = filled(FormConfig::vacancy());
        form.set_agreement(true);
        form.begin_submit().unwrap();

        form.set_agreement(false);
        assert!(!form.submit_enabled());

        let mut errors = ErrorMap::new();
        errors.field("name", "Too short");
        assert_eq!(form.on_reply(ServerReply::Rejected(errors)), Outcome::ServerError);
        assert!(!form.submit_enabled());
        assert_eq!(form.begin_submit().unwrap_err(), Outcome::Blocked);

        form.set_agreement(true);
        let submission = form.begin_submit().unwrap();
        assert!(submission
            .fields
            .contains(&("agree".to_string(), "on".to_string())));
    }

    #[test]
    fn test_slots_grow_up_to_capacity() {
        let mut form = session(FormConfig::contact());
        assert_eq!(form.attachments().len(), 1);

        form.select_file(0, Some(SelectedFile::new("a.pdf", vec![1])));
        form.select_file(1, Some(SelectedFile::new("b.pdf", vec![1])));
        form.select_file(2, Some(SelectedFile::new("c.pdf", vec![1])));

        assert_eq!(form.attachments().len(), 3);
        assert!(!form.select_file(3, Some(SelectedFile::new("d.pdf", vec![1]))));
    }

    #[test]
    fn test_reselecting_same_file_is_idempotent() {
        let mut form = session(FormConfig::vacancy());
        let file = SelectedFile::new("cv.pdf", vec![0; 128]);

        form.select_file(0, Some(file.clone()));
        form.select_file(0, Some(file));

        assert_eq!(form.attachments().len(), 2);
        assert!(form.attachments()[0].validation.is_valid());
        assert!(form.attachments()[1].file.is_none());
    }

    #[test]
    fn test_slot_messages_per_failure_kind() {
        let mut form = session(FormConfig::vacancy());
        form.select_file(0, Some(SelectedFile::new("cv.pdf", vec![0; 6 * MB])));
        form.select_file(1, Some(SelectedFile::new("photo.png", vec![0; 10])));

        let slots = form.attachments();
        assert!(slots[0].validation.message().unwrap().contains("5632 KB"));
        assert_eq!(
            slots[1].validation.message(),
            Some("*The file will not be sent because its type is not allowed")
        );
    }

    #[test]
    fn test_cleared_slot_hints_but_does_not_block() {
        let mut form = filled(FormConfig::contact());
        form.select_file(0, Some(SelectedFile::new("cv.pdf", vec![1, 2, 3])));
        form.select_file(0, None);

        let slot = &form.attachments()[0];
        assert!(slot.touched);
        assert!(slot.hint.as_deref().unwrap().contains("not selected"));
        assert!(!slot.validation.is_invalid());
        assert!(form.begin_submit().is_ok());
    }

    #[test]
    fn test_data_index_skips_excluded_slots() {
        let mut form = filled(FormConfig::vacancy());
        form.set_agreement(true);
        form.select_file(0, Some(SelectedFile::new("bad.exe", vec![1])));
        form.select_file(1, Some(SelectedFile::new("cv.pdf", vec![1])));
        form.select_file(2, Some(SelectedFile::new("letter.DOC", vec![1])));

        let submission = form.begin_submit().unwrap();
        let indexes: Vec<_> = form.attachments().iter().map(|s| s.data_index).collect();
        assert_eq!(indexes, vec![-1, 0, 1]);

        let sent: Vec<_> = submission
            .files
            .iter()
            .map(|f| (f.data_index, f.filename.as_str()))
            .collect();
        assert_eq!(sent, vec![(0, "cv.pdf"), (1, "letter.DOC")]);
    }

    #[test]
    fn test_progress_one_decimal_only_with_total() {
        let mut form = filled(FormConfig::contact());
        form.begin_submit().unwrap();

        assert_eq!(form.on_progress(1, None), None);
        assert_eq!(form.on_progress(1, Some(3)), Some(33.3));
        assert_eq!(form.progress_label().as_deref(), Some("33.3%"));
        assert_eq!(form.on_progress(3, Some(3)), Some(100.0));
    }

    #[test]
    fn test_server_field_error_touches_only_that_field() {
        let mut form = filled(FormConfig::contact());
        form.begin_submit().unwrap();

        let mut errors = ErrorMap::new();
        errors.field("name", "Too short");
        assert_eq!(form.on_reply(ServerReply::Rejected(errors)), Outcome::ServerError);

        assert_eq!(form.field("name").unwrap().validation.message(), Some("Too short"));
        assert!(form.field("phone").unwrap().validation.is_valid());
        assert!(form.field("email").unwrap().validation.is_valid());
        assert!(form.submit_enabled());
        assert_eq!(form.status(), FormStatus::Idle);
        assert_eq!(form.focus(), Some(&Focus::Field("name".into())));
        assert!(form.error_panel_visible());
    }

    #[test]
    fn test_server_attachment_and_log_routing() {
        let mut form = filled(FormConfig::contact());
        form.select_file(0, Some(SelectedFile::new("cv.pdf", vec![1])));
        form.begin_submit().unwrap();

        let mut errors = ErrorMap::new();
        errors.attachment(0, "Virus found").log("retry later");
        form.on_reply(ServerReply::Rejected(errors));

        assert_eq!(form.attachments()[0].validation.message(), Some("Virus found"));
        assert_eq!(form.log(), ["retry later".to_string()]);
        assert_eq!(form.focus(), Some(&Focus::Attachment(0)));
    }

    #[test]
    fn test_captcha_error_refreshes_image() {
        let mut config = FormConfig::contact();
        config.is_captcha = true;
        config.captcha_src = Some("/captcha.php?id=feedback".to_string());
        let mut form = filled(config);
        form.set_value("captcha", "12345");
        let before = form.captcha_src().unwrap();
        assert!(before.starts_with("/captcha.php?id=feedback&rnd="));

        form.begin_submit().unwrap();
        let mut errors = ErrorMap::new();
        errors.field("captcha", "Wrong code");
        form.on_reply(ServerReply::Rejected(errors));

        assert_ne!(form.captcha_src().unwrap(), before);
        assert_eq!(form.field("captcha").unwrap().validation.message(), Some("Wrong code"));
    }

    #[test]
    fn test_success_resets_form() {
        let mut form = filled(FormConfig::vacancy());
        form.set_agreement(true);
        form.select_file(0, Some(SelectedFile::new("cv.pdf", vec![1])));
        form.begin_submit().unwrap();

        assert_eq!(form.on_reply(ServerReply::Success), Outcome::Success);
        assert!(form.success_panel_visible());
        assert!(form.field("name").unwrap().value.is_empty());
        assert!(form.fields().iter().all(|f| f.validation == Validation::Unvalidated));
        assert_eq!(form.attachments().len(), 1);
        assert!(!form.submit_enabled());
        assert_eq!(form.progress(), None);
    }

    #[test]
    fn test_transport_failure_returns_to_idle() {
        let mut form = filled(FormConfig::contact());
        form.begin_submit().unwrap();

        assert_eq!(form.on_transport_failure(), Outcome::TransportFailure);
        assert!(form.error_panel_visible());
        assert!(form.submit_enabled());
        assert_eq!(form.status(), FormStatus::Idle);
        assert!(form.fields().iter().all(|f| !f.validation.is_invalid()));
    }

    #[test]
    fn test_instances_do_not_share_state() {
        let mut contact = filled(FormConfig::contact());
        let vacancy = session(FormConfig::vacancy());
        contact.begin_submit().unwrap();

        assert_eq!(vacancy.status(), FormStatus::Idle);
        assert!(vacancy.field("name").unwrap().value.is_empty());
    }
}
