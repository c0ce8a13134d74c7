//! Vacancy records as stored in the baked-in catalog table.

use serde::{Deserialize, Serialize};

/// A display string: either literal text or a key into the locale tables.
///
/// In the catalog JSON a bare string is a literal and `{"key": "..."}` is a
/// locale key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Text {
    Key { key: String },
    Literal(String),
}

impl Text {
    pub fn key(key: impl Into<String>) -> Self {
        Text::Key { key: key.into() }
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Text::Literal(text.into())
    }

    /// The value written into a node's `translate-id` attribute.
    ///
    /// Literals are tagged with themselves; lookup falls back to the id, so
    /// they survive the substitution pass unchanged.
    pub fn translate_id(&self) -> &str {
        match self {
            Text::Key { key } => key,
            Text::Literal(text) => text,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.translate_id().is_empty()
    }
}

impl From<&str> for Text {
    fn from(text: &str) -> Self {
        Text::literal(text)
    }
}

/// A named block of the detail panel: a subtitle and its bullets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: Text,
    #[serde(default)]
    pub items: Vec<Text>,
}

/// A hiring listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vacancy {
    pub id: u32,
    pub icon: String,
    pub position: Text,
    pub description: Text,
    pub experience: Text,
    pub office_location: Text,
    pub collaboration_variant: Text,
    /// Stable slug tying a rendered card to its detail panel.
    pub button_data: String,
    /// Listed, but the position is filled and cannot be opened.
    #[serde(default)]
    pub close_vac: bool,
    /// Included in the featured card strip.
    #[serde(default)]
    pub visibility: bool,
    #[serde(default)]
    pub inside: Vec<Section>,
}

impl Vacancy {
    pub fn is_open(&self) -> bool {
        !self.close_vac
    }

    pub fn is_featured(&self) -> bool {
        self.visibility && !self.close_vac
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_deserializes_literal_and_key() {
        let literal: Text = serde_json::from_str(r#""Офис""#).unwrap();
        assert_eq!(literal, Text::literal("Офис"));

        let key: Text = serde_json::from_str(r#"{"key": "pythonDev.position"}"#).unwrap();
        assert_eq!(key, Text::key("pythonDev.position"));
        assert_eq!(key.translate_id(), "pythonDev.position");
    }

    #[test]
    fn test_vacancy_flags() {
        let json = r#"{
            "id": 7,
            "icon": "/img/x.svg",
            "position": "QA",
            "description": "",
            "experience": "1 year",
            "officeLocation": "Kyiv",
            "collaborationVariant": "Office",
            "buttonData": "QA",
            "closeVac": true,
            "visibility": true
        }"#;
        let vacancy: Vacancy = serde_json::from_str(json).unwrap();
        assert!(!vacancy.is_open());
        assert!(!vacancy.is_featured());
        assert!(vacancy.inside.is_empty());
        assert!(vacancy.description.is_empty());
    }
}
