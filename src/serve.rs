//! Site server with per-request sitemap computation.
//!
//! A lightweight HTTP server built on `tiny_http`:
//!
//! - `/sitemap.xml` and `/sitemap` recomputed from the filesystem on
//!   every request (no cross-request cache)
//! - Static file serving from the public directory
//! - Automatic `index.html` resolution for directories
//! - Graceful shutdown on Ctrl+C
//!
//! # Architecture
//!
//! ```text
//! request ──► sitemap endpoints ──► discovery + render (fresh per request)
//!        └──► public/ files     ──► exact file │ dir index.html │ 404
//! ```
//!
//! The model is synchronous and request-scoped by design: each request
//! walks the trees itself and builds its own data, so no locking or
//! shared state exists. Filesystem calls are assumed to complete
//! promptly (local or serverless file trees, not network mounts).

use crate::{config::SiteConfig, log, sitemap};
use anyhow::{Context, Result};
use std::{
    fs,
    io::Cursor,
    net::SocketAddr,
    path::Path,
    sync::Arc,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Sitemap stylesheet (embedded at compile time), referenced by the
/// XML document's processing instruction.
const SITEMAP_STYLESHEET: &str = include_str!("embed/sitemap.xsl");

/// Cache policy for the XML endpoint: a day fresh, an hour stale.
const SITEMAP_CACHE_CONTROL: &str = "s-maxage=86400, stale-while-revalidate=3600";

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

// ============================================================================
// Server Entry Point
// ============================================================================

/// Start the site server.
///
/// Binds to the configured interface and port (with auto-retry on port
/// conflict), sets up Ctrl+C for graceful shutdown, then handles
/// requests on the main thread until unblocked.
pub fn serve_site(config: &SiteConfig) -> Result<()> {
    let interface: std::net::IpAddr = config
        .serve
        .interface
        .parse()
        .with_context(|| format!("Invalid interface `{}`", config.serve.interface))?;

    let (server, addr) = try_bind_port(interface, config.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    // Set up Ctrl+C handler for graceful shutdown
    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{addr}");

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, config) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(
    interface: std::net::IpAddr,
    base_port: u16,
    max_retries: u16,
) -> Result<(Server, SocketAddr)> {
    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(_) if offset + 1 < max_retries => continue,
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Failed to bind after {} attempts (ports {}-{}): {}",
                    max_retries,
                    base_port,
                    port,
                    e
                ));
            }
        }
    }
    unreachable!()
}

// ============================================================================
// Request Handling
// ============================================================================

/// Handle a single HTTP request.
///
/// Resolution order:
/// 1. Sitemap endpoints (computed fresh per request)
/// 2. Exact file match under the public root → serve file
/// 3. Directory with index.html → serve index.html
/// 4. Nothing found → 404
fn handle_request(request: Request, config: &SiteConfig) -> Result<()> {
    // Decode URL-encoded characters (e.g., %20 → space)
    let url_path = urlencoding::decode(request.url())
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default();

    // Strip query string before resolving the path
    let path_without_query = url_path.split('?').next().unwrap_or(&url_path);
    let request_path = path_without_query.trim_matches('/');

    match request_path {
        "sitemap.xml" => return serve_sitemap_xml(request, config),
        "sitemap" => return serve_html(request, sitemap::build_sitemap_page(config)),
        "sitemap.xsl" => return serve_stylesheet(request),
        _ => {}
    }

    // Reject parent traversal before touching the filesystem
    if request_path.split('/').any(|segment| segment == "..") {
        return serve_not_found(request);
    }

    let local_path = config.build.public.join(request_path);
    if local_path.is_file() {
        return serve_file(request, &local_path);
    }

    if local_path.is_dir() {
        let index_path = local_path.join("index.html");
        if index_path.is_file() {
            return serve_file(request, &index_path);
        }
    }

    serve_not_found(request)
}

// ============================================================================
// Response Helpers
// ============================================================================

/// Serve the machine sitemap with its cache policy.
fn serve_sitemap_xml(request: Request, config: &SiteConfig) -> Result<()> {
    let sitemap = sitemap::build_sitemap_xml(config);
    let response = Response::from_string(sitemap)
        .with_header(Header::from_bytes("Content-Type", "application/xml").unwrap())
        .with_header(Header::from_bytes("Cache-Control", SITEMAP_CACHE_CONTROL).unwrap());
    request.respond(response)?;
    Ok(())
}

/// Serve the embedded sitemap stylesheet.
fn serve_stylesheet(request: Request) -> Result<()> {
    let response = Response::from_string(SITEMAP_STYLESHEET)
        .with_header(Header::from_bytes("Content-Type", "text/xsl; charset=utf-8").unwrap());
    request.respond(response)?;
    Ok(())
}

/// Serve HTML content.
fn serve_html(request: Request, content: String) -> Result<()> {
    let response = Response::from_string(content)
        .with_header(Header::from_bytes("Content-Type", "text/html; charset=utf-8").unwrap());
    request.respond(response)?;
    Ok(())
}

/// Serve a file with appropriate content type.
fn serve_file(request: Request, path: &Path) -> Result<()> {
    let content = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let content_type = guess_content_type(path);

    let response = Response::from_data(content)
        .with_header(Header::from_bytes("Content-Type", content_type).unwrap());

    request.respond(response)?;
    Ok(())
}

/// Serve 404 Not Found response.
fn serve_not_found(request: Request) -> Result<()> {
    let response = Response::new(
        StatusCode(404),
        vec![Header::from_bytes("Content-Type", "text/plain").unwrap()],
        Cursor::new("404 Not Found"),
        Some(13),
        None,
    );
    request.respond(response)?;
    Ok(())
}

// ============================================================================
// Content Type Detection
// ============================================================================

/// Guess MIME content type from file extension.
///
/// Covers what the static export actually ships; unknown extensions
/// fall back to `application/octet-stream`.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json" | "geojson") => "application/json; charset=utf-8",
        Some("xml") => "application/xml; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}
