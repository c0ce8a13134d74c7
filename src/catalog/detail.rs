//! The vacancy detail panel and deep-link resolution.

use serde::Serialize;

use super::{Catalog, Location, VACANCY_PARAM};
use crate::locale::{LocaleTable, Localize, Tagged};
use crate::models::Vacancy;

/// Where the panel returns the page when it closes.
pub const CLOSED_LOCATION: &str = "/";

/// How a vacancy is being opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// User selection: the id is written into the location.
    RecordInUrl,
    /// Deep-link restore: the location already carries the id.
    DisplayOnly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionView {
    pub subtitle: Tagged,
    pub bullets: Vec<Tagged>,
}

/// Content of an open detail panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailView {
    pub vacancy_id: u32,
    pub slug: String,
    pub title: Tagged,
    pub description: Tagged,
    pub sections: Vec<SectionView>,
}

impl DetailView {
    pub fn from_vacancy(vacancy: &Vacancy) -> Self {
        Self {
            vacancy_id: vacancy.id,
            slug: vacancy.button_data.clone(),
            title: Tagged::new(&vacancy.position),
            description: Tagged::new(&vacancy.description),
            sections: vacancy
                .inside
                .iter()
                .map(|section| SectionView {
                    subtitle: Tagged::new(&section.title),
                    bullets: section.items.iter().map(Tagged::new).collect(),
                })
                .collect(),
        }
    }
}

impl Localize for SectionView {
    fn localize(&mut self, table: &LocaleTable) {
        self.subtitle.localize(table);
        self.bullets.localize(table);
    }
}

impl Localize for DetailView {
    fn localize(&mut self, table: &LocaleTable) {
        self.title.localize(table);
        self.description.localize(table);
        self.sections.localize(table);
    }
}

/// Result of a successful open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opened {
    pub vacancy_id: u32,
    /// Replacement location, present only in [`OpenMode::RecordInUrl`].
    pub location: Option<String>,
}

/// Holds at most one active detail view.
#[derive(Debug, Clone, Default)]
pub struct DetailPanel {
    active: Option<DetailView>,
}

impl DetailPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&DetailView> {
        self.active.as_ref()
    }

    pub fn into_active(self) -> Option<DetailView> {
        self.active
    }

    /// Open the vacancy behind `slug`.
    ///
    /// Unknown slugs and closed vacancies leave the panel untouched and
    /// return `None`.
    pub fn open(
        &mut self,
        catalog: &Catalog,
        slug: &str,
        location: &Location,
        mode: OpenMode,
    ) -> Option<Opened> {
        let vacancy = catalog.open_by_slug(slug)?;

        self.active = Some(DetailView::from_vacancy(vacancy));

        let location = match mode {
            OpenMode::RecordInUrl => Some(
                location
                    .with_param(VACANCY_PARAM, &vacancy.id.to_string())
                    .href(),
            ),
            OpenMode::DisplayOnly => None,
        };
        tracing::debug!(slug, vacancy_id = vacancy.id, ?mode, "Opened vacancy");

        Some(Opened {
            vacancy_id: vacancy.id,
            location,
        })
    }

    /// Close the panel; the page goes back to the bare path.
    pub fn close(&mut self) -> &'static str {
        self.active = None;
        CLOSED_LOCATION
    }

    /// Restore the panel from `?vacancy=<id>` without rewriting the location.
    pub fn resolve_from_query(&mut self, catalog: &Catalog, location: &Location) -> Option<Opened> {
        // Plain decimal ids only: "4.0" and "0x4" are not ids.
        let id: u32 = location.param(VACANCY_PARAM)?.trim().parse().ok()?;
        let vacancy = catalog.by_id(id).filter(|v| v.is_open())?;
        self.open(catalog, &vacancy.button_data, location, OpenMode::DisplayOnly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::abc;

    #[test]
    fn test_open_records_id_in_location() {
        let catalog = abc();
        let mut panel = DetailPanel::new();
        let opened = panel
            .open(&catalog, "A", &Location::new("/", Some("lang=en")), OpenMode::RecordInUrl)
            .unwrap();

        assert_eq!(opened.location.as_deref(), Some("/?lang=en&vacancy=1"));
        let detail = panel.active().unwrap();
        assert_eq!(detail.title.translate_id, "A position");
        assert_eq!(detail.sections.len(), 2);
        assert_eq!(detail.sections[0].bullets.len(), 2);
    }

    #[test]
    fn test_unknown_slug_is_noop() {
        let catalog = abc();
        let mut panel = DetailPanel::new();
        panel.open(&catalog, "A", &Location::default(), OpenMode::RecordInUrl);
        let before = panel.active().cloned();

        assert!(panel
            .open(&catalog, "NOPE", &Location::default(), OpenMode::RecordInUrl)
            .is_none());
        assert_eq!(panel.active().cloned(), before);
    }

    #[test]
    fn test_closed_vacancy_does_not_open() {
        let catalog = abc();
        let mut panel = DetailPanel::new();
        assert!(panel
            .open(&catalog, "C", &Location::default(), OpenMode::RecordInUrl)
            .is_none());
        assert!(panel.active().is_none());
    }

    #[test]
    fn test_opening_replaces_previous_content() {
        let catalog = abc();
        let mut panel = DetailPanel::new();
        panel.open(&catalog, "A", &Location::default(), OpenMode::RecordInUrl);
        panel.open(&catalog, "B", &Location::default(), OpenMode::RecordInUrl);
        assert_eq!(panel.active().unwrap().slug, "B");
    }

    #[test]
    fn test_close_returns_bare_path() {
        let catalog = abc();
        let mut panel = DetailPanel::new();
        panel.open(&catalog, "A", &Location::default(), OpenMode::RecordInUrl);
        assert_eq!(panel.close(), "/");
        assert!(panel.active().is_none());
    }

    #[test]
    fn test_query_round_trip_reopens_same_content() {
        let catalog = abc();
        let mut first = DetailPanel::new();
        let opened = first
            .open(&catalog, "A", &Location::default(), OpenMode::RecordInUrl)
            .unwrap();
        let href = opened.location.unwrap();
        let (path, query) = href.split_once('?').unwrap();

        let mut reloaded = DetailPanel::new();
        let restored = reloaded
            .resolve_from_query(&catalog, &Location::new(path, Some(query)))
            .unwrap();

        assert!(restored.location.is_none());
        assert_eq!(reloaded.active(), first.active());
    }

    #[test]
    fn test_query_ignores_invalid_missing_and_closed_ids() {
        let catalog = abc();
        for query in [
            None,
            Some("vacancy=abc"),
            Some("vacancy=99"),
            Some("vacancy=3"),
            Some("vacancy=1.0"),
            Some("vacancy=0x1"),
        ] {
            let mut panel = DetailPanel::new();
            assert!(panel
                .resolve_from_query(&catalog, &Location::new("/", query))
                .is_none());
            assert!(panel.active().is_none());
        }
    }
}
