//! Assembly of page templates from config and content.

use crate::templates::*;
use askama::Template;
use folio_core::{
    build_research_url, has_link, mailto_fallback, research_type_tone, Config, ContactMessage,
    ContentStore, IndustryResearch, ResearchSelection, ResearchTab, ResearchView,
};

/// Number of industry reports featured on the home page
pub const FEATURED_REPORTS: usize = 3;

/// Vendors shown per report card before "+N more"
pub const VENDOR_PREVIEW: usize = 3;

/// A top-level page and where it is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    About,
    Research,
    Projects,
    Speaking,
    Contact,
}

impl Page {
    pub const NAV: [Page; 6] = [
        Page::Home,
        Page::About,
        Page::Research,
        Page::Projects,
        Page::Speaking,
        Page::Contact,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::About => "About",
            Page::Research => "Research",
            Page::Projects => "Projects",
            Page::Speaking => "Speaking",
            Page::Contact => "Contact",
        }
    }

    /// Output path (no leading slash)
    pub fn output_rel_path(&self) -> &'static str {
        match self {
            Page::Home => "index.html",
            Page::About => "about/index.html",
            Page::Research => "research/index.html",
            Page::Projects => "projects/index.html",
            Page::Speaking => "speaking/index.html",
            Page::Contact => "contact/index.html",
        }
    }

    pub fn url_with_base(&self, base_url: &str) -> String {
        format!(
            "{}{}",
            base_url,
            self.output_rel_path().trim_end_matches("index.html")
        )
    }
}

/// Renders every page of the site from one config/content snapshot
pub struct SitePages<'a> {
    config: &'a Config,
    content: &'a ContentStore,
    base_url: String,
    year: i32,
}

impl<'a> SitePages<'a> {
    pub fn new(config: &'a Config, content: &'a ContentStore, year: i32) -> Self {
        Self {
            config,
            content,
            base_url: config.normalized_base_url(),
            year,
        }
    }

    fn layout(&self, active: Option<Page>, page_title: &str) -> Layout {
        let nav = Page::NAV
            .iter()
            .map(|page| NavLink {
                label: page.label().to_string(),
                url: page.url_with_base(&self.base_url),
                active: active == Some(*page),
            })
            .collect();

        Layout {
            page_title: page_title.to_string(),
            description: self.config.site.description.clone(),
            site_title: self.config.site.title.clone(),
            site_author: self.config.site.author.clone(),
            year: self.year,
            base_url: self.base_url.clone(),
            nav,
        }
    }

    fn industry_entry(&self, item: &IndustryResearch) -> Option<IndustryEntry> {
        if !has_link(item) {
            return None;
        }
        let (vendors, more_vendors) = item.vendor_preview(VENDOR_PREVIEW);
        Some(IndustryEntry {
            title: item.title.clone(),
            research_type: item.research_type.clone(),
            tone: research_type_tone(&item.research_type).to_string(),
            year: item.year,
            summary: item.summary.clone(),
            roi_claim: item.roi_claim.clone(),
            vendors: vendors.to_vec(),
            more_vendors,
            url: build_research_url(item),
        })
    }

    pub fn home(&self) -> Result<String, askama::Error> {
        let profile = &self.config.profile;
        let featured = self
            .content
            .industry_research
            .iter()
            .filter_map(|item| self.industry_entry(item))
            .take(FEATURED_REPORTS)
            .collect();

        HomeTemplate {
            layout: self.layout(Some(Page::Home), "Home"),
            headline: profile
                .headline
                .clone()
                .unwrap_or_else(|| self.config.site.author.clone()),
            tagline: self.config.site.tagline.clone(),
            intro: profile.bio.iter().take(1).cloned().collect(),
            industry_count: self.content.industry_research.len(),
            industry_url: ResearchView::new(ResearchTab::Industry, None)
                .url_with_base(&self.base_url),
            featured,
        }
        .render()
    }

    pub fn about(&self) -> Result<String, askama::Error> {
        let profile = &self.config.profile;
        AboutTemplate {
            layout: self.layout(Some(Page::About), "About"),
            bio: profile.bio.clone(),
            email: profile.email.clone(),
            linkedin: profile.linkedin.clone(),
            github: profile.github.clone(),
        }
        .render()
    }

    pub fn research(&self, view: &ResearchView) -> Result<String, askama::Error> {
        let tabs = vec![
            TabLink {
                label: "Academic".to_string(),
                url: view
                    .with_tab(ResearchTab::Academic)
                    .url_with_base(&self.base_url),
                active: view.tab == ResearchTab::Academic,
            },
            TabLink {
                label: format!("Industry ({})", self.content.industry_research.len()),
                url: view
                    .with_tab(ResearchTab::Industry)
                    .url_with_base(&self.base_url),
                active: view.tab == ResearchTab::Industry,
            },
        ];

        let year_counts = match view.tab {
            ResearchTab::Academic => self.content.academic_year_counts(),
            ResearchTab::Industry => self.content.industry_year_counts(),
        };
        let mut years = vec![YearOption {
            label: "All Years".to_string(),
            url: view.with_year(None).url_with_base(&self.base_url),
            selected: view.year.is_none(),
        }];
        years.extend(year_counts.into_iter().map(|(year, count)| YearOption {
            label: format!("{} ({})", year, count),
            url: view.with_year(Some(year)).url_with_base(&self.base_url),
            selected: view.year == Some(year),
        }));

        let (papers, reports) = match view.apply(self.content) {
            ResearchSelection::Academic(items) => {
                (items.into_iter().cloned().collect(), Vec::new())
            }
            ResearchSelection::Industry(items) => (
                Vec::new(),
                items
                    .into_iter()
                    .filter_map(|item| self.industry_entry(item))
                    .collect(),
            ),
        };

        ResearchTemplate {
            layout: self.layout(Some(Page::Research), "Research"),
            tabs,
            years,
            showing_industry: view.tab == ResearchTab::Industry,
            papers,
            reports,
        }
        .render()
    }

    pub fn projects(&self) -> Result<String, askama::Error> {
        ProjectsTemplate {
            layout: self.layout(Some(Page::Projects), "Projects"),
            projects: self.content.projects.clone(),
        }
        .render()
    }

    pub fn speaking(&self) -> Result<String, askama::Error> {
        SpeakingTemplate {
            layout: self.layout(Some(Page::Speaking), "Speaking"),
            talks: self.content.talks.clone(),
        }
        .render()
    }

    pub fn contact(&self) -> Result<String, askama::Error> {
        let admin_email = self.config.contact.admin_email.clone();
        ContactTemplate {
            layout: self.layout(Some(Page::Contact), "Contact"),
            endpoint: self.config.contact.endpoint.clone(),
            mailto: mailto_fallback(&admin_email, &ContactMessage::default()),
            admin_email,
        }
        .render()
    }

    pub fn not_found(&self) -> Result<String, askama::Error> {
        NotFoundTemplate {
            layout: self.layout(None, "Not Found"),
        }
        .render()
    }

    /// Render a top-level page
    pub fn render(&self, page: Page) -> Result<String, askama::Error> {
        match page {
            Page::Home => self.home(),
            Page::About => self.about(),
            Page::Research => self.research(&ResearchView::default()),
            Page::Projects => self.projects(),
            Page::Speaking => self.speaking(),
            Page::Contact => self.contact(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::from_yaml(
            r#"
site:
  title: "Jane Doe"
  author: "Jane Doe"
  description: "Analyst and researcher"
  url: "https://janedoe.com"
  tagline: "Principal Analyst"
paths:
  data: "data"
  output: "public"
base_url: "/folio"
profile:
  bio:
    - "First paragraph."
    - "Second paragraph."
  email: "jane@janedoe.com"
contact:
  admin_email: "jane@janedoe.com"
"#,
        )
        .unwrap()
    }

    fn content() -> ContentStore {
        let mut content = ContentStore::samples();
        let template = content.industry_research[0].clone();
        content.industry_research = vec![
            IndustryResearch {
                title: "Oracle & NetSuite: Cloud Solutions!".into(),
                research_type: "Solution Analysis".into(),
                year: 2021,
                vendors: vec!["Oracle".into(), "NetSuite".into(), "A".into(), "B".into()],
                ..template.clone()
            },
            IndustryResearch {
                title: "Custom".into(),
                year: 2023,
                nucleus_url: Some("https://custom-url.com".into()),
                ..template
            },
        ];
        content
    }

    #[test]
    fn test_page_paths() {
        assert_eq!(Page::Home.url_with_base("/"), "/");
        assert_eq!(Page::Speaking.url_with_base("/folio/"), "/folio/speaking/");
        assert_eq!(Page::Contact.output_rel_path(), "contact/index.html");
    }

    #[test]
    fn test_home_features_reports_with_links() {
        let (config, content) = (config(), content());
        let html = SitePages::new(&config, &content, 2025).home().unwrap();

        assert!(html.contains("2 Reports from Nucleus Research"));
        assert!(html.contains(
            "https://nucleusresearch.com/research/single/oracle-netsuite-cloud-solutions/"
        ));
        assert!(html.contains("https://custom-url.com"));
        assert!(html.contains("+1 more"));
        assert!(html.contains("First paragraph."));
        assert!(!html.contains("Second paragraph."));
        assert!(html.contains("/folio/css/folio.css"));
    }

    #[test]
    fn test_research_industry_view_filters_year() {
        let (config, content) = (config(), content());
        let pages = SitePages::new(&config, &content, 2025);
        let view = ResearchView::new(ResearchTab::Industry, Some(2023));
        let html = pages.research(&view).unwrap();

        assert!(html.contains("https://custom-url.com"));
        assert!(!html.contains("oracle-netsuite-cloud-solutions"));
        assert!(html.contains("Industry (2)"));
        assert!(html.contains("2023 (1)"));
        assert!(html.contains("/folio/research/industry/2023/"));
    }

    #[test]
    fn test_research_academic_view() {
        let (config, content) = (config(), content());
        let html = SitePages::new(&config, &content, 2025)
            .research(&ResearchView::default())
            .unwrap();

        assert!(html.contains("Sample Research Paper"));
        assert!(html.contains("2024 (1)"));
        assert!(!html.contains("Read Research"));
    }

    #[test]
    fn test_contact_page_has_fallback() {
        let (config, content) = (config(), content());
        let html = SitePages::new(&config, &content, 2025).contact().unwrap();

        assert!(html.contains("action=\"/api/contact\""));
        assert!(html.contains("mailto:jane@janedoe.com?subject="));
    }

    #[test]
    fn test_every_page_renders() {
        let (config, content) = (config(), content());
        let pages = SitePages::new(&config, &content, 2025);
        for page in Page::NAV {
            let html = pages.render(page).unwrap();
            assert!(html.contains("aria-current=\"page\""), "{:?} has no active nav", page);
        }
        assert!(pages.not_found().unwrap().contains("Page not found"));
    }
}
