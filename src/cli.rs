//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// MapIt site server and sitemap generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: mapit.toml)
    #[arg(short = 'C', long, default_value = "mapit.toml")]
    pub config: PathBuf,

    /// Override base URL for absolute sitemap links.
    ///
    /// Useful when the production URL differs from local development,
    /// without touching mapit.toml.
    #[arg(long = "base-url")]
    pub base_url: Option<String>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Serve the site with live sitemap endpoints
    Serve {
        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// The port you should provide
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Compute the sitemap once and write it into the public directory
    Sitemap {
        /// Print the document to stdout instead of writing the file
        #[arg(long)]
        stdout: bool,
    },
}
