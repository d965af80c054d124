//! Date formatting for sitemap timestamps.
//!
//! The sitemap protocol accepts plain `YYYY-MM-DD` dates, so everything
//! here collapses to that format.

use chrono::{DateTime, Utc};
use std::time::SystemTime;

/// Format a filesystem timestamp as `YYYY-MM-DD` (UTC).
pub fn format_ymd(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).format("%Y-%m-%d").to_string()
}

/// Today's date as `YYYY-MM-DD` (UTC).
pub fn today_ymd() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}
