//! Research page view state.
//!
//! The active tab and year filter are plain data. A view is parsed from a
//! query string, rendered to a static path, and applied to the collections.

use crate::content::ContentStore;
use crate::models::{IndustryResearch, ResearchPaper};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResearchTab {
    #[default]
    Academic,
    Industry,
}

impl ResearchTab {
    /// Only the exact value "industry" selects the industry tab
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("industry") => ResearchTab::Industry,
            _ => ResearchTab::Academic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResearchTab::Academic => "academic",
            ResearchTab::Industry => "industry",
        }
    }
}

/// Selected tab plus optional year filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ResearchView {
    pub tab: ResearchTab,
    pub year: Option<i32>,
}

/// Items visible under a view
#[derive(Debug, Clone)]
pub enum ResearchSelection<'a> {
    Academic(Vec<&'a ResearchPaper>),
    Industry(Vec<&'a IndustryResearch>),
}

impl ResearchSelection<'_> {
    pub fn len(&self) -> usize {
        match self {
            ResearchSelection::Academic(items) => items.len(),
            ResearchSelection::Industry(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResearchView {
    pub fn new(tab: ResearchTab, year: Option<i32>) -> Self {
        Self { tab, year }
    }

    /// Parse `tab` and `year` from a URL query string (with or without `?`).
    ///
    /// Unparseable years are treated as "all years".
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut tab = None;
        let mut year = None;

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match &*key {
                "tab" if tab.is_none() => tab = Some(value.into_owned()),
                "year" if year.is_none() => year = value.trim().parse::<i32>().ok(),
                _ => {}
            }
        }

        Self {
            tab: ResearchTab::parse(tab.as_deref()),
            year,
        }
    }

    /// Query string for this view, empty for the default view
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if self.tab == ResearchTab::Industry {
            serializer.append_pair("tab", self.tab.as_str());
        }
        if let Some(year) = self.year {
            serializer.append_pair("year", &year.to_string());
        }
        serializer.finish()
    }

    /// Output path of the pre-rendered page for this view (no leading slash)
    pub fn output_rel_path(&self) -> String {
        let mut path = String::from("research/");
        if self.tab == ResearchTab::Industry {
            path.push_str("industry/");
        }
        if let Some(year) = self.year {
            path.push_str(&format!("{}/", year));
        }
        path.push_str("index.html");
        path
    }

    /// Directory URL of this view relative to the site base
    pub fn url_with_base(&self, base_url: &str) -> String {
        let rel = self.output_rel_path();
        format!("{}{}", base_url, rel.trim_end_matches("index.html"))
    }

    /// Switch tab; the year filter resets since years differ per tab
    pub fn with_tab(&self, tab: ResearchTab) -> Self {
        Self { tab, year: None }
    }

    pub fn with_year(&self, year: Option<i32>) -> Self {
        Self {
            tab: self.tab,
            year,
        }
    }

    /// Filter the collections down to what this view shows
    pub fn apply<'a>(&self, content: &'a ContentStore) -> ResearchSelection<'a> {
        let year_matches = |year: i32| self.year.map_or(true, |selected| selected == year);

        match self.tab {
            ResearchTab::Academic => ResearchSelection::Academic(
                content
                    .research
                    .iter()
                    .filter(|p| year_matches(p.year))
                    .collect(),
            ),
            ResearchTab::Industry => ResearchSelection::Industry(
                content
                    .industry_research
                    .iter()
                    .filter(|r| year_matches(r.year))
                    .collect(),
            ),
        }
    }

    /// Every view a static build should pre-render
    pub fn all(content: &ContentStore) -> Vec<ResearchView> {
        let mut views = vec![
            ResearchView::new(ResearchTab::Academic, None),
            ResearchView::new(ResearchTab::Industry, None),
        ];
        views.extend(
            content
                .academic_year_counts()
                .into_iter()
                .map(|(year, _)| ResearchView::new(ResearchTab::Academic, Some(year))),
        );
        views.extend(
            content
                .industry_year_counts()
                .into_iter()
                .map(|(year, _)| ResearchView::new(ResearchTab::Industry, Some(year))),
        );
        views
    }
}

/// Colour tone token for a research type label
pub fn research_type_tone(label: &str) -> &'static str {
    match label {
        "ROI Case Study" => "green",
        "Technology Value Matrix" => "blue",
        "Predictions" => "purple",
        "Hot Companies" => "orange",
        "ROI Guidebook" => "emerald",
        "Partnership Announcement" => "cyan",
        "M&A Analysis" => "red",
        "Solution Analysis" => "indigo",
        "Benefit Case Study" => "teal",
        _ => "gray",
    }
}
