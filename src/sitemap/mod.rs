//! Sitemap subsystem: discovery, aggregation, and rendering.
//!
//! # Architecture
//!
//! ```text
//! request (/sitemap.xml or /sitemap)
//!     │
//!     ├── routes::discover_routes(pages/)      ──┐
//!     │       fallback on failure               │
//!     ├── assets::discover_static_pages(public/)┤
//!     │       empty on failure                  │
//!     │                                         ▼
//!     │                              entries::aggregate()
//!     │                                         │
//!     ├── xml::render_sitemap()      ◄──────────┤   (machine)
//!     └── page::render_sitemap_page()◄──────────┘   (human)
//! ```
//!
//! Every request recomputes from the current filesystem state; nothing
//! is cached across requests. Discovery failures degrade — they never
//! surface to the HTTP caller, so both endpoints always answer 200.

pub mod assets;
pub mod entries;
pub mod page;
pub mod path;
pub mod routes;
pub mod xml;

use crate::{config::SiteConfig, log};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to read a discovery root directory.
///
/// Raised only for the root itself; unreadable entries below it are
/// skipped during the walk.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("directory not found: `{0}`")]
    MissingRoot(PathBuf),

    #[error("failed to read directory `{0}`")]
    Unreadable(PathBuf, #[source] std::io::Error),
}

/// Check that a discovery root exists and can be opened.
fn ensure_readable(root: &Path) -> Result<(), DiscoveryError> {
    if !root.is_dir() {
        return Err(DiscoveryError::MissingRoot(root.to_path_buf()));
    }
    fs::read_dir(root)
        .map(drop)
        .map_err(|err| DiscoveryError::Unreadable(root.to_path_buf(), err))
}

/// Discover routes with the endpoints' always-succeeds contract:
/// an unreadable pages tree degrades to the fixed fallback list.
fn discovered_routes(config: &SiteConfig) -> Vec<String> {
    match routes::discover_routes(&config.build.pages, &config.build.page_marker) {
        Ok(routes) => routes,
        Err(err) => {
            log!("sitemap"; "route discovery failed ({err}), using fallback routes");
            routes::fallback_routes()
        }
    }
}

/// Aggregate the current filesystem state into sitemap entries.
fn collect_entries(config: &SiteConfig) -> entries::SitemapEntries {
    let routes = discovered_routes(config);
    let static_pages = match assets::discover_static_pages(&config.build.public) {
        Ok(pages) => pages,
        Err(err) => {
            log!("sitemap"; "static export scan failed ({err}), skipping exports");
            Vec::new()
        }
    };

    entries::aggregate(&routes, &static_pages, &config.base.url)
}

/// Build the machine sitemap document from the current filesystem state.
pub fn build_sitemap_xml(config: &SiteConfig) -> String {
    xml::render_sitemap(&collect_entries(config))
}

/// Build the human sitemap page from the current filesystem state.
pub fn build_sitemap_page(config: &SiteConfig) -> String {
    let routes = discovered_routes(config);
    let index_pages = assets::discover_index_pages(&config.build.public);
    page::render_sitemap_page(&routes, &index_pages, config)
}

/// Compute the sitemap once and write it into the public directory,
/// or print it to stdout.
pub fn write_sitemap(config: &SiteConfig, to_stdout: bool) -> Result<()> {
    let entries = collect_entries(config);
    if entries.is_empty() {
        log!("sitemap"; "no urls discovered, writing an empty sitemap");
    }
    let sitemap = xml::render_sitemap(&entries);

    if to_stdout {
        print!("{sitemap}");
        return Ok(());
    }

    let path = config.build.public.join(&config.build.sitemap);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&path, &sitemap)
        .with_context(|| format!("Failed to write sitemap to {}", path.display()))?;

    log!("sitemap"; "{} urls -> {}", entries.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn config_at(root: &Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.build.pages = root.join("pages");
        config.build.public = root.join("public");
        config
    }

    #[test]
    fn test_xml_endpoint_scenario() {
        let tmp = tempdir().unwrap();
        let config = config_at(tmp.path());

        fs::create_dir_all(config.build.pages.join("contact")).unwrap();
        fs::write(config.build.pages.join("page.html"), "<main/>").unwrap();
        fs::write(config.build.pages.join("contact").join("page.html"), "<main/>").unwrap();
        fs::create_dir_all(config.build.public.join("reports")).unwrap();
        fs::write(config.build.public.join("index.html"), "<html/>").unwrap();
        fs::write(config.build.public.join("reports").join("index.html"), "<html/>").unwrap();

        let xml = build_sitemap_xml(&config);

        assert_eq!(xml.matches("<url>").count(), 4);
        assert!(xml.contains("<loc>https://mapit-services.com/</loc>"));
        assert!(xml.contains("<loc>https://mapit-services.com/contact</loc>"));
        assert!(xml.contains("<loc>https://mapit-services.com/index.html</loc>"));
        assert!(xml.contains("<loc>https://mapit-services.com/reports/index.html</loc>"));
    }

    #[test]
    fn test_missing_trees_still_render() {
        let tmp = tempdir().unwrap();
        let config = config_at(tmp.path());
        // Neither pages/ nor public/ exists

        let xml = build_sitemap_xml(&config);

        // Fallback routes only, no static entries
        assert_eq!(xml.matches("<url>").count(), 4);
        assert!(xml.contains("<loc>https://mapit-services.com/solutions</loc>"));

        let html = build_sitemap_page(&config);
        assert!(html.contains("Primary Pages"));
    }

    #[test]
    fn test_nested_non_index_excluded_from_xml() {
        let tmp = tempdir().unwrap();
        let config = config_at(tmp.path());
        fs::create_dir_all(&config.build.pages).unwrap();
        fs::create_dir_all(config.build.public.join("reports")).unwrap();
        fs::write(config.build.public.join("reports").join("summary.html"), "<html/>").unwrap();

        let xml = build_sitemap_xml(&config);
        assert!(!xml.contains("summary.html"));
    }

    #[test]
    fn test_write_sitemap_creates_file() {
        let tmp = tempdir().unwrap();
        let config = config_at(tmp.path());
        fs::create_dir_all(&config.build.pages).unwrap();
        fs::create_dir_all(&config.build.public).unwrap();
        fs::write(config.build.pages.join("page.html"), "<main/>").unwrap();

        write_sitemap(&config, false).unwrap();

        let written = fs::read_to_string(config.build.public.join("sitemap.xml")).unwrap();
        assert!(written.contains("<urlset"));
    }
}
