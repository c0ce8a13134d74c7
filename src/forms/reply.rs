//! The upload endpoint's reply contract.
//!
//! Success is `{"result": "success"}`. Anything else is an error map keyed by
//! field name, with three reserved keys: `attachment` (a map from attachment
//! index to message), `captcha`, and `log` (general messages).

use serde_json::{Map, Value};

const RESULT_KEY: &str = "result";
const SUCCESS: &str = "success";
const ATTACHMENT_KEY: &str = "attachment";
const CAPTCHA_KEY: &str = "captcha";
const LOG_KEY: &str = "log";

/// One routed error of a rejected submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyError {
    Field { name: String, message: String },
    Captcha(String),
    Attachment { index: usize, message: String },
    Log(String),
}

/// Errors of a rejected submission, in reply order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap(Vec<ReplyError>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&mut self, name: &str, message: impl Into<String>) -> &mut Self {
        let message = message.into();
        if name == CAPTCHA_KEY {
            self.0.push(ReplyError::Captcha(message));
        } else {
            self.0.push(ReplyError::Field {
                name: name.to_string(),
                message,
            });
        }
        self
    }

    pub fn attachment(&mut self, index: usize, message: impl Into<String>) -> &mut Self {
        self.0.push(ReplyError::Attachment {
            index,
            message: message.into(),
        });
        self
    }

    pub fn log(&mut self, message: impl Into<String>) -> &mut Self {
        self.0.push(ReplyError::Log(message.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReplyError> {
        self.0.iter()
    }
}

/// Parsed reply of the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerReply {
    Success,
    Rejected(ErrorMap),
}

impl ServerReply {
    /// Interpret a reply body. Non-object bodies are not part of the
    /// contract and yield `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        if object.get(RESULT_KEY).and_then(Value::as_str) == Some(SUCCESS) {
            return Some(ServerReply::Success);
        }

        let mut errors = ErrorMap::new();
        for (key, value) in object {
            match key.as_str() {
                RESULT_KEY => {}
                ATTACHMENT_KEY => {
                    for (index, message) in entries(value) {
                        match index.parse::<usize>() {
                            Ok(index) => {
                                errors.attachment(index, message);
                            }
                            Err(_) => {
                                errors.log(message);
                            }
                        }
                    }
                }
                LOG_KEY => {
                    for (_, message) in entries(value) {
                        errors.log(message);
                    }
                }
                name => {
                    errors.field(name, message_of(value));
                }
            }
        }
        Some(ServerReply::Rejected(errors))
    }

    pub fn to_json(&self) -> Value {
        let errors = match self {
            ServerReply::Success => {
                let mut object = Map::new();
                object.insert(RESULT_KEY.to_string(), Value::String(SUCCESS.to_string()));
                return Value::Object(object);
            }
            ServerReply::Rejected(errors) => errors,
        };

        let mut object = Map::new();
        let mut attachments = Map::new();
        let mut log = Map::new();
        for error in errors.iter() {
            match error {
                ReplyError::Field { name, message } => {
                    object.insert(name.clone(), Value::String(message.clone()));
                }
                ReplyError::Captcha(message) => {
                    object.insert(CAPTCHA_KEY.to_string(), Value::String(message.clone()));
                }
                ReplyError::Attachment { index, message } => {
                    attachments.insert(index.to_string(), Value::String(message.clone()));
                }
                ReplyError::Log(message) => {
                    log.insert(log.len().to_string(), Value::String(message.clone()));
                }
            }
        }
        if !attachments.is_empty() {
            object.insert(ATTACHMENT_KEY.to_string(), Value::Object(attachments));
        }
        if !log.is_empty() {
            object.insert(LOG_KEY.to_string(), Value::Object(log));
        }
        Value::Object(object)
    }
}

fn message_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Key/message pairs of a map, a list, or a lone message.
fn entries(value: &Value) -> Vec<(String, String)> {
    match value {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), message_of(v))).collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), message_of(v)))
            .collect(),
        other => vec![("0".to_string(), message_of(other))],
    }
}
