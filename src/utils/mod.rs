//! Utility modules for the site server.

pub mod date;
