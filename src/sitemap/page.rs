//! Human-readable sitemap page.
//!
//! Renders three sections inside the site shell: the curated primary
//! links, every discovered route merged with those links, and the
//! static map exports. The shell template carries the shared
//! navigation and footer chrome.

use super::entries::encode_url;
use super::path::title_from_path;
use super::xml::escape_xml;
use crate::config::SiteConfig;
use std::collections::BTreeSet;

/// Site shell HTML template (embedded at compile time).
const SHELL_TEMPLATE: &str = include_str!("../embed/shell.html");

/// Hand-curated navigation links always shown on the sitemap page,
/// independent of filesystem discovery.
pub const PRIMARY_LINKS: [(&str, &str); 14] = [
    ("/", "Home"),
    ("/services/gis-consulting", "GIS Consulting"),
    ("/services/data-processing", "Data Processing"),
    ("/services/custom-development", "Web GIS Development"),
    ("/portfolio/mapping-solutions", "Cadastral Mapping"),
    ("/portfolio/satellite-projects", "Satellite Projects"),
    ("/portfolio/all-projects", "All Projects"),
    ("/solutions/geospatial-mapping", "Web GIS Solutions"),
    ("/solutions/data-visualization", "Data Visualization"),
    ("/solutions/environmental-monitoring", "Environmental Monitoring"),
    ("/solutions/general-mapping", "General Mapping"),
    ("/solutions/satellite-analysis", "Satellite Analysis"),
    ("/faqs", "FAQs"),
    ("/contact", "Contact"),
];

/// Render the sitemap page from discovered routes and index documents.
///
/// `routes` comes from the route discoverer (fallback already applied),
/// `index_pages` from the static export scanner's any-depth index view.
pub fn render_sitemap_page(
    routes: &[String],
    index_pages: &[String],
    config: &SiteConfig,
) -> String {
    let mut content = String::with_capacity(4096);

    content.push_str("<h1>Sitemap</h1>\n");
    content.push_str(
        "<p class=\"intro\">This human-readable sitemap lists main website pages and \
         static map exports. Use this page to quickly navigate the site or to share \
         important links.</p>\n",
    );

    push_primary_section(&mut content);
    push_routes_section(&mut content, routes);
    push_exports_section(&mut content, index_pages);

    SHELL_TEMPLATE
        .replace("{title}", &escape_xml(&format!("Sitemap | {}", config.base.title)))
        .replace("{description}", &escape_xml(&config.base.description))
        .replace("{copyright}", &escape_xml(&config.base.copyright))
        .replace("{content}", &content)
}

/// Section 1: the curated primary links, verbatim.
fn push_primary_section(content: &mut String) {
    content.push_str("<section>\n  <h2>Primary Pages</h2>\n  <ul>\n");
    for (href, title) in PRIMARY_LINKS {
        content.push_str(&format!(
            "    <li><a href=\"{}\">{}</a></li>\n",
            escape_xml(href),
            escape_xml(title)
        ));
    }
    content.push_str("  </ul>\n</section>\n");
}

/// Section 2: discovered routes merged with the primary hrefs,
/// deduplicated and sorted; the root renders as "Home".
fn push_routes_section(content: &mut String, routes: &[String]) {
    let merged: BTreeSet<&str> = routes
        .iter()
        .map(String::as_str)
        .chain(PRIMARY_LINKS.iter().map(|(href, _)| *href))
        .collect();

    content.push_str("<section>\n  <h2>All Discovered Routes</h2>\n  <ul>\n");
    for route in merged {
        let label = if route == "/" { "Home" } else { route };
        content.push_str(&format!(
            "    <li><a href=\"{}\">{}</a></li>\n",
            escape_xml(route),
            escape_xml(label)
        ));
    }
    content.push_str("  </ul>\n</section>\n");
}

/// Section 3: every static index document as a direct hyperlink.
fn push_exports_section(content: &mut String, index_pages: &[String]) {
    content.push_str("<section>\n  <h2>Static Map Exports</h2>\n  <ul>\n");
    for page in index_pages {
        content.push_str(&format!(
            "    <li><a href=\"{}\">{}</a></li>\n",
            escape_xml(&encode_url(page)),
            escape_xml(&title_from_path(page))
        ));
    }
    content.push_str("  </ul>\n</section>\n");
}
