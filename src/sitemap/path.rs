//! Canonical URL paths and human-readable titles.
//!
//! Every path that leaves this module uses `/` as its only separator and
//! starts with `/`, regardless of the platform separator it arrived with.

use std::borrow::Cow;

/// Convert a platform file path to a canonical URL path.
///
/// Backslashes become forward slashes and the result always carries a
/// leading `/`. Normalizing an already-normalized path is a no-op.
pub fn normalize(path: &str) -> String {
    let path = path.replace('\\', "/");
    if path.starts_with('/') {
        path
    } else {
        format!("/{path}")
    }
}

/// Derive a readable title from a URL path or file name.
///
/// Percent-encoded input is decoded first so an encoded space renders as
/// a real space rather than an escape code. A trailing `/index.html`
/// (case-insensitive) and the leading slash are stripped; the empty
/// remainder is the home page. Each `/` segment has `-` and `_` turned
/// into spaces and every word capitalized, segments joined with `" - "`.
pub fn title_from_path(path: &str) -> String {
    let decoded = urlencoding::decode(path)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| path.to_owned());

    let name = strip_index_suffix(&decoded).trim_start_matches('/');
    if name.is_empty() {
        return "Home".to_owned();
    }

    name.split('/')
        .map(titlecase_segment)
        .collect::<Vec<_>>()
        .join(" - ")
}

/// Strip a trailing `/index.html` (one or more slashes, any case).
fn strip_index_suffix(path: &str) -> &str {
    let lower = path.to_ascii_lowercase();
    let Some(stem) = lower.strip_suffix("index.html") else {
        return path;
    };
    if !stem.ends_with('/') {
        return path;
    }
    path[..stem.len()].trim_end_matches('/')
}

fn titlecase_segment(segment: &str) -> String {
    segment
        .replace(['-', '_'], " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_backslashes() {
        assert_eq!(normalize("services\\gis-consulting"), "/services/gis-consulting");
    }

    #[test]
    fn test_normalize_adds_leading_slash() {
        assert_eq!(normalize("contact"), "/contact");
    }

    #[test]
    fn test_normalize_idempotent() {
        let once = normalize("reports\\2024");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_title_home_variants() {
        assert_eq!(title_from_path("/"), "Home");
        assert_eq!(title_from_path(""), "Home");
        assert_eq!(title_from_path("/index.html"), "Home");
        assert_eq!(title_from_path("/INDEX.HTML"), "Home");
    }

    #[test]
    fn test_title_strips_index_suffix() {
        assert_eq!(
            title_from_path("/arizona-glamping-sites/index.html"),
            "Arizona Glamping Sites"
        );
    }

    #[test]
    fn test_title_keeps_non_index_name() {
        assert_eq!(title_from_path("/overview.html"), "Overview.html");
    }

    #[test]
    fn test_title_joins_segments() {
        assert_eq!(
            title_from_path("/reports/land_use/index.html"),
            "Reports - Land Use"
        );
    }

    #[test]
    fn test_title_decodes_percent_escapes() {
        assert_eq!(
            title_from_path("/Coconino%20County%20Parcels/index.html"),
            "Coconino County Parcels"
        );
    }

    #[test]
    fn test_title_case_per_word() {
        assert_eq!(title_from_path("/all-projects"), "All Projects");
    }
}
