//! Locale tables and the text substitution pass.
//!
//! Every user-visible string is rendered as a node tagged with a
//! `translate-id`. After a view is built, [`Localize::localize`] walks its
//! tagged nodes and replaces their content from a [`LocaleTable`]. Switching
//! language is the same walk with the other table.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::Text;

const UA_JSON: &str = include_str!("../../locales/ua.json");
const EN_JSON: &str = include_str!("../../locales/en.json");

/// Supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Ua,
    En,
}

impl Lang {
    pub const ALL: [Lang; 2] = [Lang::Ua, Lang::En];

    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::Ua => "ua",
            Lang::En => "en",
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "ua" | "uk" => Some(Lang::Ua),
            "en" => Some(Lang::En),
            _ => None,
        }
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flattened translation table for one language (`a.b.c` keys).
#[derive(Debug, Clone)]
pub struct LocaleTable {
    lang: Lang,
    entries: BTreeMap<String, String>,
}

impl LocaleTable {
    /// Parse a nested resource document into a flat table.
    pub fn from_json(lang: Lang, json: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(json)?;
        let mut entries = BTreeMap::new();
        flatten("", &value, &mut entries);
        Ok(Self { lang, entries })
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Look up `key`, falling back to the key itself.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.entries.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Look up `key` and substitute `{{name}}` placeholders.
    pub fn t_with(&self, key: &str, vars: &[(&str, &str)]) -> String {
        let mut out = self.t(key).to_string();
        for (name, value) in vars {
            out = out.replace(&format!("{{{{{name}}}}}"), value);
        }
        out
    }

    pub fn text(&self, text: &Text) -> String {
        self.t(text.translate_id()).to_string()
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut BTreeMap<String, String>) {
    let join = |key: &str| {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}.{key}")
        }
    };

    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten(&join(key), child, out);
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                flatten(&join(&i.to_string()), child, out);
            }
        }
        Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        Value::Number(n) => {
            out.insert(prefix.to_string(), n.to_string());
        }
        Value::Bool(b) => {
            out.insert(prefix.to_string(), b.to_string());
        }
        Value::Null => {}
    }
}

/// Both language tables, immutable after start-up.
#[derive(Debug, Clone)]
pub struct Locales {
    default: Lang,
    ua: Arc<LocaleTable>,
    en: Arc<LocaleTable>,
}

impl Locales {
    pub fn new(default: Lang, ua: LocaleTable, en: LocaleTable) -> Self {
        Self {
            default,
            ua: Arc::new(ua),
            en: Arc::new(en),
        }
    }

    /// Tables compiled into the binary.
    pub fn embedded(default: Lang) -> Result<Self, serde_json::Error> {
        Ok(Self::new(
            default,
            LocaleTable::from_json(Lang::Ua, UA_JSON)?,
            LocaleTable::from_json(Lang::En, EN_JSON)?,
        ))
    }

    pub fn default_lang(&self) -> Lang {
        self.default
    }

    pub fn table(&self, lang: Lang) -> &LocaleTable {
        match lang {
            Lang::Ua => &self.ua,
            Lang::En => &self.en,
        }
    }

    pub fn shared(&self, lang: Lang) -> Arc<LocaleTable> {
        match lang {
            Lang::Ua => Arc::clone(&self.ua),
            Lang::En => Arc::clone(&self.en),
        }
    }

    /// Requested language code, or the default when absent or unknown.
    pub fn pick(&self, requested: Option<&str>) -> Lang {
        requested.and_then(Lang::parse).unwrap_or(self.default)
    }

    pub fn resolve(&self, requested: Option<&str>) -> &LocaleTable {
        self.table(self.pick(requested))
    }
}

/// The substitution pass over a rendered view.
pub trait Localize {
    fn localize(&mut self, table: &LocaleTable);
}

impl<T: Localize> Localize for Vec<T> {
    fn localize(&mut self, table: &LocaleTable) {
        for item in self.iter_mut() {
            item.localize(table);
        }
    }
}

impl<T: Localize> Localize for Option<T> {
    fn localize(&mut self, table: &LocaleTable) {
        if let Some(inner) = self {
            inner.localize(table);
        }
    }
}

/// A text node carrying its `translate-id`.
///
/// Freshly rendered nodes hold the raw id as content, as the static markup
/// does before the first substitution pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tagged {
    pub translate_id: String,
    pub text: String,
}

impl Tagged {
    pub fn new(text: &Text) -> Self {
        Self::id(text.translate_id())
    }

    pub fn id(translate_id: impl Into<String>) -> Self {
        let translate_id = translate_id.into();
        Self {
            text: translate_id.clone(),
            translate_id,
        }
    }
}

impl Localize for Tagged {
    fn localize(&mut self, table: &LocaleTable) {
        self.text = table.t(&self.translate_id).to_string();
    }
}
