//! List canonical links for industry research.

use anyhow::{Context, Result};
use folio_core::{build_research_url, has_link, Config, ContentStore, IndustryResearch};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LinkEntry {
    pub title: String,
    pub year: i32,
    #[serde(rename = "type")]
    pub research_type: String,
    pub url: String,
    /// True when the URL came from the item rather than its title
    pub explicit: bool,
}

impl LinkEntry {
    fn from_item(item: &IndustryResearch) -> Self {
        Self {
            title: item.title.clone(),
            year: item.year,
            research_type: item.research_type.clone(),
            url: build_research_url(item),
            explicit: item.nucleus_url.as_deref().is_some_and(|u| !u.is_empty()),
        }
    }
}

pub fn collect_links(content: &ContentStore) -> Vec<LinkEntry> {
    content
        .industry_research
        .iter()
        .filter(|item| has_link(item))
        .map(LinkEntry::from_item)
        .collect()
}

pub fn list_links(config_path: &Path, json: bool) -> Result<()> {
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    let content = ContentStore::load(&config.data_dir());
    let links = collect_links(&content);

    if json {
        println!("{}", serde_json::to_string_pretty(&links)?);
        return Ok(());
    }

    for link in &links {
        let marker = if link.explicit { "*" } else { " " };
        println!("{} {}{} {}", link.year, link.url, marker, link.title);
    }
    let explicit = links.iter().filter(|l| l.explicit).count();
    println!("\n{} links ({} explicit)", links.len(), explicit);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_links_marks_explicit_urls() {
        let mut content = ContentStore::samples();
        let mut custom = content.industry_research[0].clone();
        custom.title = "Custom".into();
        custom.nucleus_url = Some("https://custom-url.com".into());
        content.industry_research.push(custom);

        let links = collect_links(&content);
        assert_eq!(links.len(), 2);
        assert_eq!(
            links[0].url,
            "https://nucleusresearch.com/research/single/sample-industry-research/"
        );
        assert!(!links[0].explicit);
        assert_eq!(links[1].url, "https://custom-url.com");
        assert!(links[1].explicit);
    }
}
