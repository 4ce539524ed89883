//! Build command implementation.

use anyhow::{Context, Result};
use chrono::Datelike;
use folio_core::{Config, ContentStore, ResearchView};
use folio_render::{Page, SitePages};
use include_dir::{include_dir, Dir};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

// Embed static assets (CSS) at compile time so they're available after cargo install
static STATIC_ASSETS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/../static");

/// Build the static site (writes output) and discard the loaded content
pub fn build_site(config_path: &Path) -> Result<()> {
    build_site_with_content(config_path).map(|_| ())
}

/// Build the static site and return the loaded config and content
pub fn build_site_with_content(config_path: &Path) -> Result<(Config, ContentStore)> {
    tracing::info!("Loading config from {:?}", config_path);
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    build_site_with_config(config)
}

/// Build the site from an already loaded config
pub fn build_site_with_config(config: Config) -> Result<(Config, ContentStore)> {
    tracing::info!("Building site: {}", config.site.title);

    let content = ContentStore::load(&config.data_dir());

    let output_dir = config.output_dir();
    fs::create_dir_all(&output_dir).context("Failed to create output directory")?;

    let pages = SitePages::new(&config, &content, chrono::Utc::now().year());
    let mut written = 0;

    for page in Page::NAV {
        // The default research view is written with the other research views
        if page == Page::Research {
            continue;
        }
        let html = pages
            .render(page)
            .with_context(|| format!("Failed to render {} page", page.label()))?;
        write_page(&output_dir, page.output_rel_path(), &html)?;
        written += 1;
    }

    let views = ResearchView::all(&content);
    for view in &views {
        let html = pages
            .research(view)
            .with_context(|| format!("Failed to render research view {:?}", view))?;
        write_page(&output_dir, &view.output_rel_path(), &html)?;
        written += 1;
    }
    tracing::debug!("Rendered {} research views", views.len());

    let not_found = pages.not_found().context("Failed to render 404 template")?;
    write_page(&output_dir, "404.html", &not_found)?;
    tracing::info!("Rendered 404 page");

    if config.enable_sitemap {
        generate_sitemap(&config, &views)?;
    } else {
        tracing::info!("Sitemap disabled; skipping sitemap.xml");
    }

    copy_assets(&config)?;

    tracing::info!("✓ Built {} pages", written);
    tracing::info!("✓ Output written to {:?}", output_dir);

    Ok((config, content))
}

fn write_page(output_dir: &Path, rel_path: &str, html: &str) -> Result<()> {
    let output_path = output_dir.join(rel_path);
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }
    fs::write(&output_path, html).with_context(|| format!("Failed to write {:?}", output_path))?;
    tracing::debug!("Rendered: {}", rel_path);
    Ok(())
}

/// Generate sitemap.xml
fn generate_sitemap(config: &Config, views: &[ResearchView]) -> Result<()> {
    let base_url = config.normalized_base_url();
    let mut urls = String::new();

    let page_paths = Page::NAV
        .iter()
        .filter(|page| **page != Page::Research)
        .map(|page| page.output_rel_path().to_string());
    let view_paths = views.iter().map(|view| view.output_rel_path());

    for rel in page_paths.chain(view_paths) {
        let loc = absolute_url(
            &config.site.url,
            &base_url,
            rel.trim_end_matches("index.html"),
        );
        urls.push_str(&format!("<url><loc>{}</loc></url>\n", escape_xml(&loc)));
    }

    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}</urlset>
"#,
        urls
    );

    fs::write(config.output_dir().join("sitemap.xml"), xml)?;
    tracing::info!("Generated sitemap.xml");
    Ok(())
}

/// Copy the embedded stylesheet, then any user assets over it
fn copy_assets(config: &Config) -> Result<()> {
    let output_dir = config.output_dir();
    for entry in STATIC_ASSETS.entries() {
        extract_entry(entry, &output_dir)?;
    }
    tracing::info!("Copied assets from embedded static bundle");

    if let Some(assets_dir) = config.assets_dir() {
        if assets_dir.exists() {
            copy_dir(&assets_dir, &output_dir)?;
            tracing::info!("Copied assets from {:?}", assets_dir);
        } else {
            tracing::warn!("Configured assets path {:?} does not exist", assets_dir);
        }
    }

    Ok(())
}

fn copy_dir(src: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(src)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dest.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &target)
            .with_context(|| format!("Failed to copy {:?} to {:?}", entry.path(), target))?;
    }
    Ok(())
}

fn extract_entry(entry: &include_dir::DirEntry, dest: &Path) -> Result<()> {
    match entry {
        include_dir::DirEntry::Dir(dir) => {
            for sub_entry in dir.entries() {
                extract_entry(sub_entry, dest)?;
            }
        }
        include_dir::DirEntry::File(file) => {
            let target = dest.join(file.path());
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, file.contents())
                .with_context(|| format!("Failed to write embedded static file to {:?}", target))?;
        }
    }
    Ok(())
}

fn absolute_url(site_url: &str, base_url: &str, rel: &str) -> String {
    let root = site_url.trim_end_matches('/');
    let base = base_url.trim_matches('/');
    let rel_clean = rel.trim_start_matches('/');

    let mut url = root.to_string();
    if !base.is_empty() {
        url.push('/');
        url.push_str(base);
    }
    url.push('/');
    url.push_str(rel_clean);
    url
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
