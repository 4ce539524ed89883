//! Askama template definitions.

use askama::Template;
use folio_core::{Project, ResearchPaper, Talk};

/// A navigation link in the site header
#[derive(Debug, Clone)]
pub struct NavLink {
    pub label: String,
    pub url: String,
    pub active: bool,
}

/// Shared chrome for every page
#[derive(Debug, Clone)]
pub struct Layout {
    pub page_title: String,
    pub description: String,
    pub site_title: String,
    pub site_author: String,
    pub year: i32,
    pub base_url: String,
    pub nav: Vec<NavLink>,
}

/// An industry report card with its resolved link
#[derive(Debug, Clone)]
pub struct IndustryEntry {
    pub title: String,
    pub research_type: String,
    pub tone: String,
    pub year: i32,
    pub summary: String,
    pub roi_claim: Option<String>,
    pub vendors: Vec<String>,
    pub more_vendors: usize,
    pub url: String,
}

/// A tab on the research page
#[derive(Debug, Clone)]
pub struct TabLink {
    pub label: String,
    pub url: String,
    pub active: bool,
}

/// An entry in the research year filter
#[derive(Debug, Clone)]
pub struct YearOption {
    pub label: String,
    pub url: String,
    pub selected: bool,
}

/// Home page template
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: Layout,
    pub headline: String,
    pub tagline: Option<String>,
    pub intro: Vec<String>,
    pub industry_count: usize,
    pub industry_url: String,
    pub featured: Vec<IndustryEntry>,
}

/// About page template
#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub layout: Layout,
    pub bio: Vec<String>,
    pub email: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

/// Research page template, one per view
#[derive(Template)]
#[template(path = "research.html")]
pub struct ResearchTemplate {
    pub layout: Layout,
    pub tabs: Vec<TabLink>,
    pub years: Vec<YearOption>,
    pub showing_industry: bool,
    pub papers: Vec<ResearchPaper>,
    pub reports: Vec<IndustryEntry>,
}

/// Projects page template
#[derive(Template)]
#[template(path = "projects.html")]
pub struct ProjectsTemplate {
    pub layout: Layout,
    pub projects: Vec<Project>,
}

/// Speaking engagements page template
#[derive(Template)]
#[template(path = "speaking.html")]
pub struct SpeakingTemplate {
    pub layout: Layout,
    pub talks: Vec<Talk>,
}

/// Contact page template
#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub layout: Layout,
    pub endpoint: String,
    pub admin_email: String,
    pub mailto: String,
}

/// 404 error page template
#[derive(Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate {
    pub layout: Layout,
}

/// HTML body of the notification sent to the site owner
#[derive(Template)]
#[template(path = "email/notification.html")]
pub struct NotificationEmailTemplate<'a> {
    pub website_name: &'a str,
    pub name: &'a str,
    pub email: &'a str,
    pub subject: &'a str,
    pub message: &'a str,
}

/// HTML body of the confirmation sent back to the sender
#[derive(Template)]
#[template(path = "email/confirmation.html")]
pub struct ConfirmationEmailTemplate<'a> {
    pub website_name: &'a str,
    pub author: &'a str,
    pub name: &'a str,
    pub subject: &'a str,
    pub message: &'a str,
}
