//! Content model structs for the portfolio collections.

use serde::{Deserialize, Serialize};

/// An academic publication listed on the research page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchPaper {
    pub title: String,
    pub authors: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub year: i32,
    pub venue: String,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub pdf_url: Option<String>,
}

/// A software or research project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub description: String,

    #[serde(default)]
    pub technologies: Vec<String>,

    pub status: String,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub screenshot: Option<String>,
}

/// A speaking engagement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Talk {
    pub title: String,
    pub event: String,
    pub location: String,
    pub date: String,
    pub description: String,

    #[serde(default)]
    pub slides_url: Option<String>,

    #[serde(default)]
    pub video_url: Option<String>,
}

/// An industry research publication hosted on an external research site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryResearch {
    pub title: String,

    #[serde(default)]
    pub document_id: String,

    /// Publication type label ("ROI Case Study", "Predictions", ...)
    #[serde(rename = "type")]
    pub research_type: String,

    pub year: i32,

    #[serde(default)]
    pub quarter: Option<String>,

    #[serde(default)]
    pub publish_date: String,

    #[serde(default)]
    pub technologies: Vec<String>,

    #[serde(default)]
    pub vendors: Vec<String>,

    #[serde(default)]
    pub key_findings: Vec<String>,

    #[serde(default)]
    pub roi_claim: Option<String>,

    pub summary: String,

    #[serde(default)]
    pub pdf_url: Option<String>,

    /// Explicit link that takes priority over the title-derived URL
    #[serde(default)]
    pub nucleus_url: Option<String>,
}

impl IndustryResearch {
    /// Up to `limit` vendors, plus how many were left out
    pub fn vendor_preview(&self, limit: usize) -> (&[String], usize) {
        let shown = self.vendors.len().min(limit);
        (&self.vendors[..shown], self.vendors.len() - shown)
    }
}
