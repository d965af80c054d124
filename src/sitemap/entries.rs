//! URL aggregation for the machine sitemap.
//!
//! Discovered routes and static exports are merged into one
//! insertion-ordered mapping keyed by the full URL, so the rendered
//! document can never repeat a `<loc>`.

use super::assets::StaticPage;
use crate::utils::date::{format_ymd, today_ymd};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use std::collections::HashMap;

/// Priority given to the home page route.
const PRIORITY_HOME: f32 = 1.0;
/// Priority given to every other discovered route.
const PRIORITY_ROUTE: f32 = 0.8;
/// Priority given to static map exports, which change rarely.
const PRIORITY_STATIC: f32 = 0.6;

/// Bytes escaped when percent-encoding a full URL in one pass.
///
/// Matches the browser `encodeURI` set: reserved delimiters (`/:?#&=`
/// and friends) stay untouched so the URL structure survives, while
/// spaces, quotes, brackets and a literal `%` are escaped. Non-ASCII
/// bytes are always escaped.
const FULL_URL: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'[')
    .add(b']')
    .add(b'%');

/// Percent-encode a full URL (or absolute path) in a single pass.
///
/// Applied exactly once per URL; the input must be a raw, unencoded
/// string. Encoding the output again would double-escape, which the
/// sitemap contract forbids.
pub fn encode_url(url: &str) -> String {
    utf8_percent_encode(url, FULL_URL).to_string()
}

/// Sitemap metadata attached to one URL.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlMeta {
    /// `YYYY-MM-DD` last-modified date, when known.
    pub lastmod: Option<String>,
    /// Crawl priority in `[0, 1]`.
    pub priority: Option<f32>,
}

/// Insertion-ordered URL → metadata map.
///
/// Re-inserting an existing URL overwrites its metadata in place and
/// keeps its original position, so iteration order is discovery order
/// and duplicate keys cannot exist.
#[derive(Debug, Default)]
pub struct SitemapEntries {
    items: Vec<(String, UrlMeta)>,
    index: HashMap<String, usize>,
}

impl SitemapEntries {
    pub fn insert(&mut self, url: String, meta: UrlMeta) {
        match self.index.get(&url) {
            Some(&at) => self.items[at].1 = meta,
            None => {
                self.index.insert(url.clone(), self.items.len());
                self.items.push((url, meta));
            }
        }
    }

    #[allow(dead_code)]
    pub fn get(&self, url: &str) -> Option<&UrlMeta> {
        self.index.get(url).map(|&at| &self.items[at].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UrlMeta)> {
        self.items.iter().map(|(url, meta)| (url.as_str(), meta))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Merge discovered routes and static exports into sitemap entries.
///
/// Routes are inserted first with today's date; static pages follow
/// with their file mtimes and a single-pass percent-encoded URL. A
/// static page that materializes to the same URL as a route therefore
/// overwrites the route's metadata — observable precedence, kept as-is.
pub fn aggregate(routes: &[String], static_pages: &[StaticPage], domain: &str) -> SitemapEntries {
    let domain = domain.trim_end_matches('/');
    let today = today_ymd();
    let mut entries = SitemapEntries::default();

    for route in routes {
        let priority = if route == "/" { PRIORITY_HOME } else { PRIORITY_ROUTE };
        entries.insert(
            format!("{domain}{route}"),
            UrlMeta {
                lastmod: Some(today.clone()),
                priority: Some(priority),
            },
        );
    }

    for page in static_pages {
        entries.insert(
            encode_url(&format!("{domain}/{}", page.path)),
            UrlMeta {
                lastmod: page.modified.map(format_ymd),
                priority: Some(PRIORITY_STATIC),
            },
        );
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    const DOMAIN: &str = "https://mapit-services.com";

    fn routes(list: &[&str]) -> Vec<String> {
        list.iter().map(|route| (*route).to_owned()).collect()
    }

    fn static_page(path: &str) -> StaticPage {
        StaticPage {
            path: path.to_owned(),
            modified: Some(UNIX_EPOCH + Duration::from_secs(20089 * 86400)),
        }
    }

    #[test]
    fn test_encode_url_keeps_structure() {
        assert_eq!(
            encode_url("https://mapit-services.com/maps/index.html"),
            "https://mapit-services.com/maps/index.html"
        );
    }

    #[test]
    fn test_encode_url_escapes_spaces_once() {
        let encoded = encode_url("https://mapit-services.com/Arizona Glamping Sites/index.html");
        assert_eq!(
            encoded,
            "https://mapit-services.com/Arizona%20Glamping%20Sites/index.html"
        );
        // Decoding once restores the original; no residual %25
        let decoded = urlencoding::decode(&encoded).unwrap();
        assert!(!decoded.contains("%25"));
        assert!(decoded.contains("Arizona Glamping Sites"));
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut entries = SitemapEntries::default();
        entries.insert("a".into(), UrlMeta { lastmod: None, priority: Some(0.8) });
        entries.insert("b".into(), UrlMeta { lastmod: None, priority: Some(0.8) });
        entries.insert("a".into(), UrlMeta { lastmod: None, priority: Some(0.6) });

        assert_eq!(entries.len(), 2);
        let order: Vec<_> = entries.iter().map(|(url, _)| url).collect();
        assert_eq!(order, vec!["a", "b"]);
        assert_eq!(entries.get("a").unwrap().priority, Some(0.6));
    }

    #[test]
    fn test_aggregate_priorities() {
        let entries = aggregate(
            &routes(&["/", "/contact"]),
            &[static_page("index.html")],
            DOMAIN,
        );

        let home = entries.get("https://mapit-services.com/").unwrap();
        assert_eq!(home.priority, Some(1.0));
        let contact = entries.get("https://mapit-services.com/contact").unwrap();
        assert_eq!(contact.priority, Some(0.8));
        let export = entries.get("https://mapit-services.com/index.html").unwrap();
        assert_eq!(export.priority, Some(0.6));
        assert_eq!(export.lastmod.as_deref(), Some("2025-01-01"));
    }

    #[test]
    fn test_aggregate_scenario_four_entries() {
        let entries = aggregate(
            &routes(&["/", "/contact"]),
            &[static_page("index.html"), static_page("reports/index.html")],
            DOMAIN,
        );

        assert_eq!(entries.len(), 4);
        let urls: Vec<_> = entries.iter().map(|(url, _)| url.to_owned()).collect();
        assert_eq!(
            urls,
            vec![
                "https://mapit-services.com/",
                "https://mapit-services.com/contact",
                "https://mapit-services.com/index.html",
                "https://mapit-services.com/reports/index.html",
            ]
        );
    }

    #[test]
    fn test_static_page_wins_route_collision() {
        let entries = aggregate(&routes(&["/contact"]), &[static_page("contact")], DOMAIN);

        assert_eq!(entries.len(), 1);
        let meta = entries.get("https://mapit-services.com/contact").unwrap();
        assert_eq!(meta.priority, Some(0.6));
    }

    #[test]
    fn test_routes_get_todays_date() {
        let entries = aggregate(&routes(&["/"]), &[], DOMAIN);
        let home = entries.get("https://mapit-services.com/").unwrap();
        assert_eq!(home.lastmod.as_deref(), Some(crate::utils::date::today_ymd().as_str()));
    }

    #[test]
    fn test_missing_mtime_omits_lastmod() {
        let page = StaticPage { path: "maps/index.html".into(), modified: None };
        let entries = aggregate(&[], &[page], DOMAIN);
        let meta = entries.get("https://mapit-services.com/maps/index.html").unwrap();
        assert_eq!(meta.lastmod, None);
    }

    #[test]
    fn test_domain_trailing_slash_trimmed() {
        let entries = aggregate(&routes(&["/"]), &[], "https://mapit-services.com/");
        assert!(entries.get("https://mapit-services.com/").is_some());
    }
}
