//! Canonical external links for industry research items.

use crate::models::IndustryResearch;
use crate::slug::slugify;

/// Base path of the research site's single-document pages
pub const NUCLEUS_RESEARCH_BASE: &str = "https://nucleusresearch.com/research/single";

/// Build the research-site URL from the item's title, ignoring any override.
///
/// The trailing slash is part of the published URL shape.
pub fn generate_research_url(item: &IndustryResearch) -> String {
    format!("{}/{}/", NUCLEUS_RESEARCH_BASE, slugify(&item.title))
}

/// Canonical link for a research item.
///
/// A non-empty `nucleus_url` is returned verbatim; otherwise the URL is
/// derived from the title.
pub fn build_research_url(item: &IndustryResearch) -> String {
    match item.nucleus_url.as_deref() {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => generate_research_url(item),
    }
}

/// Whether the item has an external link. Every item does.
pub fn has_link(_item: &IndustryResearch) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, document_id: &str, nucleus_url: Option<&str>) -> IndustryResearch {
        IndustryResearch {
            title: title.to_string(),
            document_id: document_id.to_string(),
            research_type: "ROI Case Study".to_string(),
            year: 2021,
            quarter: None,
            publish_date: "2021-01-01".to_string(),
            technologies: vec!["Test".to_string()],
            vendors: vec!["Test Vendor".to_string()],
            key_findings: Vec::new(),
            roi_claim: None,
            summary: "Test summary".to_string(),
            pdf_url: None,
            nucleus_url: nucleus_url.map(str::to_string),
        }
    }

    #[test]
    fn test_generated_url_from_title() {
        let research = item("ROI case study - Actian at GEMA", "z87", None);
        assert_eq!(
            build_research_url(&research),
            "https://nucleusresearch.com/research/single/roi-case-study-actian-at-gema/"
        );
    }

    #[test]
    fn test_generated_url_special_characters() {
        let research = item("Oracle & NetSuite: Cloud Solutions!", "v133", None);
        assert_eq!(
            generate_research_url(&research),
            "https://nucleusresearch.com/research/single/oracle-netsuite-cloud-solutions/"
        );
    }

    #[test]
    fn test_generated_url_dollars_and_decimals() {
        let research = item(
            "Domo's AI and Data Products Platform returns $6.93 per dollar invested",
            "z11",
            None,
        );
        assert_eq!(
            generate_research_url(&research),
            "https://nucleusresearch.com/research/single/domos-ai-and-data-products-platform-returns-6.93-per-dollar-invested/"
        );
    }

    #[test]
    fn test_generated_url_multiplier() {
        let research = item("SAP Datasphere powers 1.3X faster data access", "x64", None);
        assert_eq!(
            generate_research_url(&research),
            "https://nucleusresearch.com/research/single/sap-datasphere-powers-1.3x-faster-data-access/"
        );
    }

    #[test]
    fn test_explicit_url_takes_priority() {
        let research = item("anything", "v101", Some("https://custom-url.com"));
        assert_eq!(build_research_url(&research), "https://custom-url.com");
    }

    #[test]
    fn test_empty_explicit_url_is_ignored() {
        let research = item("Test Research", "v101", Some(""));
        assert_eq!(
            build_research_url(&research),
            "https://nucleusresearch.com/research/single/test-research/"
        );
    }

    #[test]
    fn test_generate_ignores_override() {
        let research = item("Test Research", "v101", Some("https://custom-url.com"));
        assert_eq!(
            generate_research_url(&research),
            "https://nucleusresearch.com/research/single/test-research/"
        );
    }

    #[test]
    fn test_has_link_is_always_true() {
        assert!(has_link(&item("Test Research", "v101", None)));
        assert!(has_link(&item("Test Research", "", None)));
        assert!(has_link(&item("", "", None)));
    }

    #[test]
    fn test_empty_title() {
        let research = item("", "", None);
        assert_eq!(
            build_research_url(&research),
            "https://nucleusresearch.com/research/single//"
        );
    }
}
