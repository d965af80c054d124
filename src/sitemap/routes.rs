//! Route discovery over the pages tree.
//!
//! A directory is a routable page iff it contains the configured page
//! marker file. The tree is walked iteratively; symlinks are not
//! followed, so cyclic link structures cannot loop the walk.

use super::{DiscoveryError, ensure_readable, path::normalize};
use std::path::Path;
use walkdir::WalkDir;

/// Routes substituted when the pages tree cannot be read at all.
pub const FALLBACK_ROUTES: [&str; 4] = ["/", "/solutions", "/services", "/contact"];

/// Walk the pages tree and collect every directory holding a page marker.
///
/// The root itself with a marker yields `/`. Descent continues below
/// marked directories: a marked child is independent of whether any
/// ancestor is marked. Unreadable subdirectories are skipped; only an
/// unreadable root is an error, which the caller turns into
/// [`FALLBACK_ROUTES`].
pub fn discover_routes(pages_root: &Path, marker: &str) -> Result<Vec<String>, DiscoveryError> {
    ensure_readable(pages_root)?;

    let mut routes = Vec::new();
    if pages_root.join(marker).is_file() {
        routes.push("/".to_owned());
    }

    let subdirs = WalkDir::new(pages_root)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_dir());

    for entry in subdirs {
        if !entry.path().join(marker).is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(pages_root) else {
            continue;
        };
        routes.push(normalize(&relative.to_string_lossy()));
    }

    Ok(routes)
}

/// The fixed minimal route set used when discovery fails.
pub fn fallback_routes() -> Vec<String> {
    FALLBACK_ROUTES.iter().map(|route| (*route).to_owned()).collect()
}
