//! The page location as the only persisted selection state.

use url::form_urlencoded;

/// Query parameter holding the numeric id of the opened vacancy.
pub const VACANCY_PARAM: &str = "vacancy";
/// Query parameter holding the language code.
pub const LANG_PARAM: &str = "lang";

/// A path plus its ordered query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
    params: Vec<(String, String)>,
}

impl Default for Location {
    fn default() -> Self {
        Self::new("/", None)
    }
}

impl Location {
    pub fn new(path: impl Into<String>, query: Option<&str>) -> Self {
        let path = path.into();
        let params = query
            .map(|q| {
                form_urlencoded::parse(q.trim_start_matches('?').as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default();
        Self {
            path: if path.is_empty() { "/".to_string() } else { path },
            params,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set `name`, keeping the position of an existing parameter.
    pub fn with_param(&self, name: &str, value: &str) -> Self {
        let mut params = Vec::with_capacity(self.params.len() + 1);
        let mut replaced = false;
        for (k, v) in &self.params {
            if k == name {
                if !replaced {
                    params.push((k.clone(), value.to_string()));
                    replaced = true;
                }
            } else {
                params.push((k.clone(), v.clone()));
            }
        }
        if !replaced {
            params.push((name.to_string(), value.to_string()));
        }
        Self {
            path: self.path.clone(),
            params,
        }
    }

    /// Path with the serialized query, as passed to a history replace.
    pub fn href(&self) -> String {
        if self.params.is_empty() {
            return self.path.clone();
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish();
        format!("{}?{}", self.path, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_lookup() {
        let location = Location::new("/", Some("?vacancy=4&lang=en"));
        assert_eq!(location.param(VACANCY_PARAM), Some("4"));
        assert_eq!(location.param(LANG_PARAM), Some("en"));
        assert_eq!(location.param("missing"), None);
    }

    #[test]
    fn test_with_param_replaces_in_place() {
        let location = Location::new("/", Some("vacancy=4&lang=en"));
        assert_eq!(location.with_param(VACANCY_PARAM, "5").href(), "/?vacancy=5&lang=en");
        assert_eq!(
            Location::new("/", Some("lang=en")).with_param(VACANCY_PARAM, "5").href(),
            "/?lang=en&vacancy=5"
        );
    }

    #[test]
    fn test_bare_href() {
        assert_eq!(Location::new("", None).href(), "/");
        assert_eq!(Location::default().href(), "/");
        assert_eq!(Location::new("/", Some("?")).href(), "/");
    }
}
