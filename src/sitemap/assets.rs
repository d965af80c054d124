//! Static export scanning over the public tree.
//!
//! The public directory holds pre-built HTML exports (interactive map
//! deliverables, mostly). Two views exist: the machine sitemap wants
//! entry-point documents with timestamps, the human page wants every
//! `index.html` regardless of depth.

use super::{DiscoveryError, ensure_readable, path::normalize};
use std::path::Path;
use std::time::SystemTime;
use walkdir::WalkDir;

/// An exported HTML document eligible for the machine sitemap.
#[derive(Debug, Clone)]
pub struct StaticPage {
    /// Path relative to the public root, `/`-joined, no leading slash.
    pub path: String,
    /// Filesystem mtime; `None` when the file could not be stat'ed.
    pub modified: Option<SystemTime>,
}

/// Collect entry-point HTML documents for the machine sitemap.
///
/// Every file with a case-insensitive `.html` extension is considered,
/// but only entry points are kept: documents ending in `/index.html`,
/// files named exactly `index.html` at any depth, and any HTML file
/// sitting directly at the root. A stat failure drops that entry's
/// timestamp, never the entry or the scan.
pub fn discover_static_pages(public_root: &Path) -> Result<Vec<StaticPage>, DiscoveryError> {
    ensure_readable(public_root)?;

    let pages = html_files(public_root)
        .filter(|relative| is_entry_point(relative))
        .map(|relative| {
            let modified = public_root
                .join(&relative)
                .metadata()
                .and_then(|meta| meta.modified())
                .ok();
            StaticPage { path: relative, modified }
        })
        .collect();

    Ok(pages)
}

/// Collect every `index.html` document for the human sitemap page.
///
/// Returns `/`-prefixed paths. A missing or unreadable root yields an
/// empty list; the human page simply shows no exports.
pub fn discover_index_pages(public_root: &Path) -> Vec<String> {
    WalkDir::new(public_root)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .file_name()
                .to_string_lossy()
                .eq_ignore_ascii_case("index.html")
        })
        .filter_map(|entry| {
            let relative = entry.path().strip_prefix(public_root).ok()?;
            Some(normalize(&relative.to_string_lossy()))
        })
        .collect()
}

/// All HTML files under the root as relative `/`-joined paths.
fn html_files(root: &Path) -> impl Iterator<Item = String> {
    let root = root.to_path_buf();
    WalkDir::new(root.clone())
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(move |entry| {
            let relative = entry.path().strip_prefix(&root).ok()?;
            let relative = relative.to_string_lossy().replace('\\', "/");
            relative
                .to_ascii_lowercase()
                .ends_with(".html")
                .then_some(relative)
        })
}

/// Entry-point filter for the machine sitemap.
fn is_entry_point(relative: &str) -> bool {
    let lower = relative.to_ascii_lowercase();
    if lower.ends_with("/index.html") {
        return true;
    }
    let file_name = lower.rsplit('/').next().unwrap_or(&lower);
    if file_name == "index.html" {
        return true;
    }
    // Top-level HTML files count even without the index name
    !relative.contains('/')
}
