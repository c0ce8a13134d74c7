//! Summary views of the catalog: the featured strip and the full list.

use serde::Serialize;

use super::Catalog;
use crate::locale::{LocaleTable, Localize, Tagged};
use crate::models::Text;

const LOOK_VACANCY: &str = "hero.lookVac";
const OPEN_VACANCY: &str = "descVac.openVacancy";
const CLOSED_VACANCY: &str = "descVac.closedVacancy";

/// Link that opens a vacancy and records the selection.
pub fn vacancy_href(slug: &str) -> String {
    format!("/vacancies/{slug}")
}

/// A card in the featured strip.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedCard {
    /// 1-based position in the strip.
    pub display_index: usize,
    pub slug: String,
    pub icon: String,
    pub position: Tagged,
    pub experience: Tagged,
    pub call_to_action: Tagged,
    pub href: String,
}

/// A row of the full list. Closed rows carry no link.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRow {
    pub slug: String,
    pub icon: String,
    pub position: Tagged,
    pub experience: Tagged,
    pub office_location: Tagged,
    pub collaboration_variant: Tagged,
    pub status: Tagged,
    pub interactive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogView {
    pub featured: Vec<FeaturedCard>,
    pub all: Vec<ListRow>,
}

/// Build both summary lists from the table.
pub fn render_catalog(catalog: &Catalog) -> CatalogView {
    let featured = catalog
        .featured()
        .map(|(display_index, v)| FeaturedCard {
            display_index,
            slug: v.button_data.clone(),
            icon: v.icon.clone(),
            position: Tagged::new(&v.position),
            experience: Tagged::new(&v.experience),
            call_to_action: Tagged::id(LOOK_VACANCY),
            href: vacancy_href(&v.button_data),
        })
        .collect();

    let all = catalog
        .vacancies()
        .iter()
        .map(|v| ListRow {
            slug: v.button_data.clone(),
            icon: v.icon.clone(),
            position: Tagged::new(&v.position),
            experience: Tagged::new(&v.experience),
            office_location: Tagged::new(&v.office_location),
            collaboration_variant: Tagged::new(&v.collaboration_variant),
            status: Tagged::new(&Text::key(if v.is_open() {
                OPEN_VACANCY
            } else {
                CLOSED_VACANCY
            })),
            interactive: v.is_open(),
            href: v.is_open().then(|| vacancy_href(&v.button_data)),
        })
        .collect();

    CatalogView { featured, all }
}

impl Localize for FeaturedCard {
    fn localize(&mut self, table: &LocaleTable) {
        self.position.localize(table);
        self.experience.localize(table);
        self.call_to_action.localize(table);
    }
}

impl Localize for ListRow {
    fn localize(&mut self, table: &LocaleTable) {
        self.position.localize(table);
        self.experience.localize(table);
        self.office_location.localize(table);
        self.collaboration_variant.localize(table);
        self.status.localize(table);
    }
}

impl Localize for CatalogView {
    fn localize(&mut self, table: &LocaleTable) {
        self.featured.localize(table);
        self.all.localize(table);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::abc;
    use crate::locale::{Lang, Locales};

    #[test]
    fn test_featured_strip_and_full_list() {
        let view = render_catalog(&abc());

        assert_eq!(view.featured.len(), 1);
        assert_eq!(view.featured[0].slug, "A");
        assert_eq!(view.featured[0].display_index, 1);

        assert_eq!(view.all.len(), 3);
        let closed = view.all.iter().find(|r| r.slug == "C").unwrap();
        assert!(!closed.interactive);
        assert!(closed.href.is_none());
        assert_eq!(closed.status.translate_id, CLOSED_VACANCY);

        let hidden = view.all.iter().find(|r| r.slug == "B").unwrap();
        assert!(hidden.interactive);
        assert_eq!(hidden.href.as_deref(), Some("/vacancies/B"));
    }

    #[test]
    fn test_display_index_follows_table_order() {
        let catalog = crate::catalog::Catalog::embedded().unwrap();
        let view = render_catalog(&catalog);
        let slugs: Vec<_> = view.featured.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["FRONTEND_DEV", "PYTHON_DEV"]);
        let indexes: Vec<_> = view.featured.iter().map(|c| c.display_index).collect();
        assert_eq!(indexes, vec![1, 2]);
    }

    #[test]
    fn test_localize_resolves_keys_and_keeps_literals() {
        let locales = Locales::embedded(Lang::En).unwrap();
        let catalog = crate::catalog::Catalog::embedded().unwrap();
        let mut view = render_catalog(&catalog);
        view.localize(locales.table(Lang::En));

        let python = view.featured.iter().find(|c| c.slug == "PYTHON_DEV").unwrap();
        assert_eq!(python.position.text, "Python Back-end Developer");
        assert_eq!(python.call_to_action.text, "See the vacancy");

        let devops = view.all.iter().find(|r| r.slug == "DEV_OPS").unwrap();
        assert_eq!(devops.position.text, "Devops Engineer");
        assert_eq!(devops.status.text, "Vacancy closed");
    }
}
