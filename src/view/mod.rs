//! HTML rendering of the landing page.
//!
//! The page is assembled from core views (catalog, detail panel, fresh form
//! sessions, stage plan), localised once, and handed to askama.

use askama::Template;

use crate::catalog::{
    render_catalog, Catalog, CatalogView, DetailPanel, DetailView, Location, CLOSED_LOCATION,
    LANG_PARAM,
};
use crate::errors::AppError;
use crate::forms::{FormConfig, FormSession, VACANCY_FIELD};
use crate::locale::{Lang, LocaleTable, Locales, Localize};
use crate::stages::{Stage, StagePlan};

/// Escape JSON for inlining inside `<script>` or an attribute.
fn inline_json<T: serde::Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// Language switcher entry.
#[derive(Debug, Clone)]
pub struct LangLink {
    pub code: &'static str,
    pub href: String,
    pub active: bool,
}

/// Menu entry of a slide.
#[derive(Debug, Clone)]
pub struct StageLink {
    pub index: usize,
    pub menu_key: &'static str,
}

/// Initial markup state of one upload form.
#[derive(Template)]
#[template(path = "form.html")]
pub struct FormView<'a> {
    pub t: &'a LocaleTable,
    pub selector: String,
    pub action: String,
    pub accept: String,
    pub max_size_kb: String,
    pub is_captcha: bool,
    pub is_agreement: bool,
    pub is_attachments: bool,
    pub captcha_src: Option<String>,
    pub vacancy_slug: Option<String>,
    pub lang: &'static str,
    pub attachment_fragment: String,
    pub submit_enabled: bool,
    pub config_json: String,
}

impl<'a> FormView<'a> {
    pub fn from_session(
        t: &'a LocaleTable,
        session: &FormSession,
        vacancy_slug: Option<&str>,
    ) -> Result<Self, serde_json::Error> {
        let config = session.config();
        Ok(Self {
            t,
            selector: config.selector.clone(),
            action: config.action.clone(),
            accept: config.accept(),
            max_size_kb: config.max_size_kb_label(),
            is_captcha: config.is_captcha,
            is_agreement: config.is_agreement,
            is_attachments: config.is_attachments,
            captcha_src: session.captcha_src(),
            vacancy_slug: vacancy_slug.map(str::to_string),
            lang: t.lang().as_str(),
            attachment_fragment: config.attachment_fragment.clone(),
            submit_enabled: session.submit_enabled(),
            config_json: inline_json(config)?,
        })
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct LandingPage<'a> {
    pub t: &'a LocaleTable,
    pub lang: &'static str,
    pub languages: Vec<LangLink>,
    pub menu: Vec<StageLink>,
    pub catalog: CatalogView,
    pub detail: Option<DetailView>,
    pub close_href: &'static str,
    pub contact_form: FormView<'a>,
    pub vacancy_form: FormView<'a>,
    pub stage_plan_json: String,
}

impl<'a> LandingPage<'a> {
    /// Build the page for `location`, opening the detail panel when the
    /// query carries an open vacancy id.
    pub fn build(
        catalog: &Catalog,
        locales: &'a Locales,
        location: &Location,
    ) -> Result<Self, AppError> {
        let lang = locales.pick(location.param(LANG_PARAM));
        let table = locales.table(lang);

        let mut view = render_catalog(catalog);
        view.localize(table);

        let mut panel = DetailPanel::new();
        panel.resolve_from_query(catalog, location);
        let mut detail = panel.into_active();
        detail.localize(table);

        let contact = FormSession::new(FormConfig::contact(), locales.shared(lang));
        let mut vacancy = FormSession::new(FormConfig::vacancy(), locales.shared(lang));
        let slug = detail.as_ref().map(|d| d.slug.as_str());
        if let Some(slug) = slug {
            vacancy.set_hidden(VACANCY_FIELD, slug);
        }

        let languages = Lang::ALL
            .iter()
            .map(|l| LangLink {
                code: l.as_str(),
                href: location.with_param(LANG_PARAM, l.as_str()).href(),
                active: *l == lang,
            })
            .collect();

        let menu = Stage::ALL
            .iter()
            .map(|s| StageLink {
                index: s.index(),
                menu_key: s.menu_key(),
            })
            .collect();

        let render_err = |e: serde_json::Error| AppError::Render(e.to_string());
        Ok(Self {
            t: table,
            lang: lang.as_str(),
            languages,
            menu,
            contact_form: FormView::from_session(table, &contact, None).map_err(render_err)?,
            vacancy_form: FormView::from_session(table, &vacancy, slug).map_err(render_err)?,
            catalog: view,
            detail,
            close_href: CLOSED_LOCATION,
            stage_plan_json: StagePlan::standard()
                .to_script_json()
                .map_err(render_err)?,
        })
    }

    pub fn to_html(&self) -> Result<String, AppError> {
        Ok(self.render()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures;

    fn page_html(query: Option<&str>) -> String {
        let locales = Locales::embedded(Lang::Ua).unwrap();
        let catalog = fixtures::abc();
        let location = Location::new("/", query);
        LandingPage::build(&catalog, &locales, &location)
            .unwrap()
            .to_html()
            .unwrap()
    }

    #[test]
    fn test_page_lists_catalog() {
        let html = page_html(Some("lang=en"));
        assert!(html.contains(r#"lang="en""#));
        assert_eq!(html.matches(r#"class="vacancy-card""#).count(), 1);
        assert_eq!(html.matches(r#"class="vacancy-row"#).count(), 3);
        assert!(html.contains(r#"href="/vacancies/A""#));
        assert!(!html.contains(r#"href="/vacancies/C""#));
        assert!(html.contains("Vacancy closed"));
    }

    #[test]
    fn test_detail_panel_from_query() {
        let html = page_html(Some("vacancy=1&lang=en"));
        assert!(html.contains(r#"data-vacancy-id="1""#));
        assert!(html.contains(r#"name="vacancy" value="A""#));

        let closed = page_html(Some("vacancy=3"));
        assert!(!closed.contains("data-vacancy-id="));
    }

    #[test]
    fn test_translate_ids_and_stage_plan() {
        let html = page_html(None);
        assert!(html.contains(r#"translate-id="hero.lookVac""#));
        assert!(html.contains("Дивитись вакансію"));
        assert!(html.contains(r#""start-counters""#));
    }
}
