//! Vacancy catalog: the static table plus the pure views built from it.
//!
//! The table is compiled into the binary and never mutated; it is only
//! filtered for display and looked up for the detail panel.

mod detail;
mod location;
mod render;

pub use detail::*;
pub use location::*;
pub use render::*;

use std::collections::HashSet;

use crate::models::Vacancy;

const VACANCIES_JSON: &str = include_str!("../../data/vacancies.json");

/// Problems with the vacancy table detected at load time.
#[derive(Debug)]
pub enum CatalogError {
    Parse(serde_json::Error),
    DuplicateId(u32),
    DuplicateSlug(String),
    EmptySlug(u32),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Parse(e) => write!(f, "invalid vacancy table: {e}"),
            CatalogError::DuplicateId(id) => write!(f, "duplicate vacancy id {id}"),
            CatalogError::DuplicateSlug(slug) => write!(f, "duplicate vacancy slug {slug}"),
            CatalogError::EmptySlug(id) => write!(f, "vacancy {id} has an empty slug"),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Parse(err)
    }
}

/// The vacancy table in iteration order.
#[derive(Debug, Clone)]
pub struct Catalog {
    vacancies: Vec<Vacancy>,
}

impl Catalog {
    /// Build a catalog, enforcing unique ids and unique non-empty slugs.
    pub fn from_records(vacancies: Vec<Vacancy>) -> Result<Self, CatalogError> {
        let mut ids = HashSet::new();
        let mut slugs = HashSet::new();
        for vacancy in &vacancies {
            if vacancy.button_data.is_empty() {
                return Err(CatalogError::EmptySlug(vacancy.id));
            }
            if !ids.insert(vacancy.id) {
                return Err(CatalogError::DuplicateId(vacancy.id));
            }
            if !slugs.insert(vacancy.button_data.as_str()) {
                return Err(CatalogError::DuplicateSlug(vacancy.button_data.clone()));
            }
        }
        Ok(Self { vacancies })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::from_records(serde_json::from_str(json)?)
    }

    /// The table compiled into the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(VACANCIES_JSON)
    }

    pub fn vacancies(&self) -> &[Vacancy] {
        &self.vacancies
    }

    pub fn by_slug(&self, slug: &str) -> Option<&Vacancy> {
        self.vacancies.iter().find(|v| v.button_data == slug)
    }

    pub fn by_id(&self, id: u32) -> Option<&Vacancy> {
        self.vacancies.iter().find(|v| v.id == id)
    }

    /// Vacancies that accept applications, looked up by slug.
    pub fn open_by_slug(&self, slug: &str) -> Option<&Vacancy> {
        self.by_slug(slug).filter(|v| v.is_open())
    }

    /// Featured entries with their 1-based display index.
    pub fn featured(&self) -> impl Iterator<Item = (usize, &Vacancy)> {
        self.vacancies
            .iter()
            .filter(|v| v.is_featured())
            .enumerate()
            .map(|(i, v)| (i + 1, v))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::models::{Section, Text, Vacancy};

    pub fn vacancy(id: u32, slug: &str, visibility: bool, close_vac: bool) -> Vacancy {
        Vacancy {
            id,
            icon: format!("/img/{}.svg", slug.to_lowercase()),
            position: Text::literal(format!("{slug} position")),
            description: Text::literal(format!("{slug} description")),
            experience: Text::literal("2+ years"),
            office_location: Text::literal("Kyiv"),
            collaboration_variant: Text::literal("Office"),
            button_data: slug.to_string(),
            close_vac,
            visibility,
            inside: vec![
                Section {
                    title: Text::literal("Requirements:"),
                    items: vec![Text::literal("Rust"), Text::literal("SQL")],
                },
                Section {
                    title: Text::literal("Will be a plus:"),
                    items: vec![Text::literal("Tokio")],
                },
            ],
        }
    }

    /// A (visible, open), B (hidden), C (visible, closed).
    pub fn abc() -> super::Catalog {
        super::Catalog::from_records(vec![
            vacancy(1, "A", true, false),
            vacancy(2, "B", false, false),
            vacancy(3, "C", true, true),
        ])
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{abc, vacancy};
    use super::*;

    #[test]
    fn test_embedded_table_loads() {
        let catalog = Catalog::embedded().unwrap();
        assert!(catalog.by_slug("PYTHON_DEV").is_some());
        assert_eq!(catalog.by_id(4).unwrap().button_data, "FRONTEND_DEV");
        assert!(catalog.vacancies().iter().any(|v| v.close_vac));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = Catalog::from_records(vec![vacancy(1, "A", true, false), vacancy(1, "B", true, false)])
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(1)));
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let err = Catalog::from_records(vec![vacancy(1, "A", true, false), vacancy(2, "A", true, false)])
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateSlug(ref s) if s == "A"));
    }

    #[test]
    fn test_featured_only_visible_and_open() {
        let catalog = abc();
        let featured: Vec<_> = catalog.featured().map(|(i, v)| (i, v.button_data.as_str())).collect();
        assert_eq!(featured, vec![(1, "A")]);
    }

    #[test]
    fn test_open_by_slug_skips_closed() {
        let catalog = abc();
        assert!(catalog.open_by_slug("A").is_some());
        assert!(catalog.open_by_slug("C").is_none());
        assert!(catalog.open_by_slug("missing").is_none());
    }
}
