//! Machine sitemap rendering.
//!
//! Serializes aggregated entries into a sitemap-protocol document:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <?xml-stylesheet type="text/xsl" href="/sitemap.xsl"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://mapit-services.com/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!     <changefreq>daily</changefreq>
//!     <priority>1.0</priority>
//!   </url>
//! </urlset>
//! ```

use super::entries::SitemapEntries;

/// XML namespace for the sitemap protocol.
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Stylesheet processing instruction so browsers render the document.
/// Search engines ignore it.
const STYLESHEET_PI: &str = r#"<?xml-stylesheet type="text/xsl" href="/sitemap.xsl"?>"#;

/// Render aggregated entries as a sitemap XML document.
pub fn render_sitemap(entries: &SitemapEntries) -> String {
    let mut xml = String::with_capacity(4096);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(STYLESHEET_PI);
    xml.push('\n');
    xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
    xml.push('\n');

    for (url, meta) in entries.iter() {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(url)));
        if let Some(lastmod) = &meta.lastmod {
            xml.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
        }
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            changefreq(meta.priority)
        ));
        if let Some(priority) = meta.priority {
            xml.push_str(&format!("    <priority>{priority:.1}</priority>\n"));
        }
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Crawl-frequency hint derived from priority, first match wins:
/// ≥ 0.9 daily, ≤ 0.6 monthly, otherwise weekly.
fn changefreq(priority: Option<f32>) -> &'static str {
    match priority {
        Some(p) if p >= 0.9 => "daily",
        Some(p) if p <= 0.6 => "monthly",
        _ => "weekly",
    }
}

/// Escape special XML characters.
pub(super) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
