//! `[base]` section configuration.
//!
//! Basic site metadata: title, description, and the base URL used to
//! build absolute sitemap links.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in mapit.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "MapIt Services"
/// description = "GIS consulting, data processing and web mapping"
/// url = "https://mapit-services.com"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title displayed in browser tab and headers.
    #[serde(default = "defaults::base::title")]
    #[educe(Default = defaults::base::title())]
    pub title: String,

    /// Site description for SEO meta tags.
    #[serde(default)]
    pub description: String,

    /// Base URL for absolute links in the sitemap. Fixed configuration,
    /// never derived from the incoming request.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: String,

    /// Copyright notice for the site footer.
    #[serde(default)]
    pub copyright: String,
}
