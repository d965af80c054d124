//! Site configuration management for `mapit.toml`.
//!
//! # Sections
//!
//! | Section   | Purpose                                        |
//! |-----------|------------------------------------------------|
//! | `[base]`  | Site metadata (title, description, url)        |
//! | `[build]` | Discovery roots (pages, public), page marker   |
//! | `[serve]` | Site server (port, interface)                  |
//! | `[extra]` | User-defined custom fields                     |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "MapIt Services"
//! description = "GIS consulting and web mapping"
//! url = "https://mapit-services.com"
//!
//! [build]
//! pages = "pages"
//! public = "public"
//!
//! [serve]
//! port = 5277
//! ```

mod base;
mod build;
pub mod defaults;
mod error;
mod serve;

use base::BaseConfig;
use build::BuildConfig;
use error::ConfigError;
use serve::ServeConfig;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing mapit.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Discovery roots and sitemap output
    #[serde(default)]
    pub build: BuildConfig,

    /// Site server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// User-defined extra fields
    #[serde(default)]
    pub extra: HashMap<String, toml::Value>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf());
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());

        self.update_path_with_root(&root, cli);

        if let Some(url) = &cli.base_url {
            self.base.url = url.clone();
        }

        if let Commands::Serve { interface, port } = &cli.command {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path, cli: &Cli) {
        let root = Self::normalize_path(root);

        self.config_path = Self::normalize_path(&root.join(&cli.config));
        self.build.pages = Self::normalize_path(&root.join(&self.build.pages));
        self.build.public = Self::normalize_path(&root.join(&self.build.public));

        self.set_root(&root);
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration invariants.
    ///
    /// Discovery roots are deliberately NOT required to exist: a missing
    /// tree degrades at request time instead of failing startup.
    pub fn validate(&self) -> Result<()> {
        let url = self.base.url.trim();
        if url.is_empty() {
            bail!(ConfigError::Validation("base.url must not be empty".into()));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            bail!(ConfigError::Validation(format!(
                "base.url must be an absolute http(s) URL, got `{url}`"
            )));
        }

        let marker = &self.build.page_marker;
        if marker.is_empty() || marker.contains('/') || marker.contains('\\') {
            bail!(ConfigError::Validation(format!(
                "build.page_marker must be a bare file name, got `{marker}`"
            )));
        }

        Ok(())
    }
}
