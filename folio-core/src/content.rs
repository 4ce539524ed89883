//! Loading of the JSON content collections.
//!
//! Every collection is optional on disk. A missing or malformed file is
//! replaced by a single sample record so pages always have something to show.

use crate::models::{IndustryResearch, Project, ResearchPaper, Talk};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const RESEARCH_FILE: &str = "research.json";
pub const PROJECTS_FILE: &str = "projects.json";
pub const TALKS_FILE: &str = "talks.json";
pub const INDUSTRY_RESEARCH_FILE: &str = "industry-research.json";

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// All content collections backing the site
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContentStore {
    pub research: Vec<ResearchPaper>,
    pub projects: Vec<Project>,
    pub talks: Vec<Talk>,
    pub industry_research: Vec<IndustryResearch>,
}

impl ContentStore {
    /// Load every collection from `data_dir`, falling back per collection
    pub fn load(data_dir: &Path) -> Self {
        let store = Self {
            research: load_or(data_dir, RESEARCH_FILE, sample_research),
            projects: load_or(data_dir, PROJECTS_FILE, sample_projects),
            talks: load_or(data_dir, TALKS_FILE, sample_talks),
            industry_research: load_or(data_dir, INDUSTRY_RESEARCH_FILE, sample_industry_research),
        };

        tracing::info!(
            "Loaded {} papers, {} projects, {} talks, {} industry reports",
            store.research.len(),
            store.projects.len(),
            store.talks.len(),
            store.industry_research.len()
        );

        store
    }

    /// Store filled with the built-in sample records
    pub fn samples() -> Self {
        Self {
            research: sample_research(),
            projects: sample_projects(),
            talks: sample_talks(),
            industry_research: sample_industry_research(),
        }
    }

    /// Distinct industry research years, newest first
    pub fn industry_years(&self) -> Vec<i32> {
        self.industry_year_counts()
            .into_iter()
            .map(|(year, _)| year)
            .collect()
    }

    /// (year, count) pairs for industry research, newest first
    pub fn industry_year_counts(&self) -> Vec<(i32, usize)> {
        year_counts(self.industry_research.iter().map(|r| r.year))
    }

    /// (year, count) pairs for academic papers, newest first
    pub fn academic_year_counts(&self) -> Vec<(i32, usize)> {
        year_counts(self.research.iter().map(|p| p.year))
    }
}

fn year_counts(years: impl Iterator<Item = i32>) -> Vec<(i32, usize)> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for year in years {
        *counts.entry(year).or_default() += 1;
    }
    counts.into_iter().rev().collect()
}

/// Read and parse a single JSON collection
pub fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ContentError> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

fn load_or<T: DeserializeOwned>(data_dir: &Path, file: &str, fallback: fn() -> Vec<T>) -> Vec<T> {
    let path = data_dir.join(file);
    match read_collection(&path) {
        Ok(items) => {
            tracing::debug!("Read {} entries from {:?}", items.len(), path);
            items
        }
        Err(err) => {
            tracing::warn!("Using sample data for {}: {}", file, err);
            fallback()
        }
    }
}

fn sample_research() -> Vec<ResearchPaper> {
    vec![ResearchPaper {
        title: "Sample Research Paper".to_string(),
        authors: "Author Name".to_string(),
        abstract_text: "This is a sample abstract for demonstration purposes.".to_string(),
        year: 2024,
        venue: "Conference Name".to_string(),
        url: Some("#".to_string()),
        pdf_url: None,
    }]
}

fn sample_projects() -> Vec<Project> {
    vec![Project {
        name: "Sample Project".to_string(),
        description: "A sample project for demonstration purposes.".to_string(),
        technologies: vec!["Rust".to_string(), "HTML".to_string()],
        status: "In Development".to_string(),
        url: Some("#".to_string()),
        screenshot: None,
    }]
}

fn sample_talks() -> Vec<Talk> {
    vec![Talk {
        title: "Sample Talk".to_string(),
        event: "Conference Name".to_string(),
        location: "City, Country".to_string(),
        date: "2024".to_string(),
        description: "A sample talk description for demonstration purposes.".to_string(),
        slides_url: Some("#".to_string()),
        video_url: Some("#".to_string()),
    }]
}

fn sample_industry_research() -> Vec<IndustryResearch> {
    vec![IndustryResearch {
        title: "Sample Industry Research".to_string(),
        document_id: "sample-001".to_string(),
        research_type: "Research Report".to_string(),
        year: 2024,
        quarter: None,
        publish_date: "2024-01-01".to_string(),
        technologies: vec!["Analytics".to_string(), "Data Management".to_string()],
        vendors: vec!["Sample Vendor".to_string()],
        key_findings: Vec::new(),
        roi_claim: None,
        summary: "A sample industry research document for demonstration purposes.".to_string(),
        pdf_url: Some("#".to_string()),
        nucleus_url: None,
    }]
}
