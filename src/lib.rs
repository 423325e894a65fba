//! folio-rs: a static portfolio and blog renderer
//!
//! Posts come from a JSON index and Markdown bodies. This crate loads the
//! index, filters and searches it, renders bodies into asset-rewritten HTML
//! with page metadata, and writes the whole site with embedded Tera
//! templates.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod fetch;
pub mod generator;
pub mod helpers;
pub mod meta;
pub mod page;
pub mod render;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::content::PostRepository;
use crate::error::LoadError;
use crate::fetch::{Fetcher, FsFetcher};
use crate::render::PostRenderer;

/// A site rooted at a directory
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: Arc<config::SiteConfig>,
    /// Site root; index and post paths resolve against it
    pub base_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Folio {
    /// Open a site directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config: Arc::new(config),
            base_dir,
            public_dir,
        })
    }

    pub fn config_path(&self) -> PathBuf {
        self.base_dir.join("_config.yml")
    }

    pub fn index_path(&self) -> PathBuf {
        self.base_dir.join(&self.config.index_path)
    }

    pub fn posts_dir(&self) -> PathBuf {
        self.base_dir.join(&self.config.posts_dir)
    }

    /// Resource reader rooted at the site directory
    pub fn fetcher(&self) -> Arc<dyn Fetcher> {
        Arc::new(FsFetcher::new(&self.base_dir))
    }

    pub fn renderer(&self) -> PostRenderer {
        PostRenderer::new(Arc::clone(&self.config), self.fetcher())
    }

    /// Load the post index
    pub async fn load_posts(&self) -> Result<PostRepository, LoadError> {
        PostRepository::load(self.fetcher().as_ref(), &self.config.index_path).await
    }

    /// Generate the static site
    pub async fn generate(&self) -> Result<()> {
        commands::generate::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
