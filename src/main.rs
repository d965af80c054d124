//! MapIt Services - site server and sitemap generator.

mod cli;
mod config;
mod logger;
mod serve;
mod sitemap;
mod utils;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use serve::serve_site;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Serve { .. } => serve_site(&config),
        Commands::Sitemap { stdout } => sitemap::write_sitemap(&config, *stdout),
    }
}

/// Load and validate configuration from CLI arguments.
///
/// A missing config file is not an error: the defaults describe the
/// production site, so the binary works from a bare checkout.
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        SiteConfig::default()
    };
    config.update_with_cli(cli);
    config.validate()?;

    Ok(config)
}
