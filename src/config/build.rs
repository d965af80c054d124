//! `[build]` section configuration.
//!
//! Paths to the two discovery roots and the sitemap output file.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in mapit.toml - discovery roots and output.
///
/// # Example
/// ```toml
/// [build]
/// pages = "pages"
/// public = "public"
/// page_marker = "page.html"
/// sitemap = "sitemap.xml"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (set from the CLI, not the config file).
    #[serde(skip)]
    pub root: Option<PathBuf>,

    /// Directory tree whose marker files encode the site routes.
    #[serde(default = "defaults::build::pages")]
    #[educe(Default = defaults::build::pages())]
    pub pages: PathBuf,

    /// Directory of exported static HTML documents, served as-is.
    #[serde(default = "defaults::build::public")]
    #[educe(Default = defaults::build::public())]
    pub public: PathBuf,

    /// File whose presence marks a directory as a routable page.
    #[serde(default = "defaults::build::page_marker")]
    #[educe(Default = defaults::build::page_marker())]
    pub page_marker: String,

    /// Sitemap file name, relative to the public directory.
    #[serde(default = "defaults::build::sitemap")]
    #[educe(Default = defaults::build::sitemap())]
    pub sitemap: PathBuf,
}
