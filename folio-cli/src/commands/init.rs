//! Init command implementation.

use anyhow::{Context, Result};
use folio_core::content::{INDUSTRY_RESEARCH_FILE, PROJECTS_FILE, RESEARCH_FILE, TALKS_FILE};
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = include_str!("../../../folio.yml.example");

const SAMPLE_DATA: [(&str, &str); 4] = [
    (
        RESEARCH_FILE,
        include_str!("../../scaffold/data/research.json"),
    ),
    (
        PROJECTS_FILE,
        include_str!("../../scaffold/data/projects.json"),
    ),
    (TALKS_FILE, include_str!("../../scaffold/data/talks.json")),
    (
        INDUSTRY_RESEARCH_FILE,
        include_str!("../../scaffold/data/industry-research.json"),
    ),
];

/// Initialize a new folio project
pub fn init_project(path: Option<&Path>) -> Result<()> {
    let root = path.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(root).with_context(|| format!("Failed to create {:?}", root))?;

    write_config(root)?;
    scaffold_data(root)?;

    println!("✓ folio initialized in {:?}", root);
    println!("  - Edit folio.yml to customize site metadata");
    println!("  - Edit the JSON collections in data/");
    println!("  - Run `folio build` or `folio dev`");
    Ok(())
}

fn write_config(root: &Path) -> Result<()> {
    let config_path = root.join("folio.yml");
    if config_path.exists() {
        println!("folio.yml already exists at {:?}", config_path);
        return Ok(());
    }

    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {:?}", config_path))?;
    println!("Created {:?}", config_path);
    Ok(())
}

fn scaffold_data(root: &Path) -> Result<()> {
    let data_dir = root.join("data");
    fs::create_dir_all(&data_dir).with_context(|| format!("Failed to create {:?}", data_dir))?;

    for (file, contents) in SAMPLE_DATA {
        let path = data_dir.join(file);
        if path.exists() {
            continue;
        }
        fs::write(&path, contents).with_context(|| format!("Failed to write {:?}", path))?;
        println!("Created {:?}", path);
    }

    Ok(())
}
