//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    /// Site name, used in page titles and `og:site_name`
    pub title: String,
    pub subtitle: String,
    /// Fallback description for posts without excerpt or SEO override
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,
    /// Directory (under root) that holds one rendered page per post
    pub detail_dir: String,

    // Content
    /// Site-relative path of the JSON post index
    pub index_path: String,
    /// Base directory for posts that only give a `contentFile`
    pub posts_dir: String,
    pub public_dir: String,

    // Display
    pub date_format: String,
    /// Number of cards on the home page
    pub latest_posts: usize,
    /// Quiet window before a search input is applied
    pub search_debounce_ms: u64,

    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "0xos4ma".to_string(),
            subtitle: String::new(),
            description: "Cybersecurity insights".to_string(),
            author: String::new(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),
            detail_dir: "post".to_string(),

            index_path: "data/posts.json".to_string(),
            posts_dir: "posts".to_string(),
            public_dir: "public".to_string(),

            date_format: "MMM D, YYYY".to_string(),
            latest_posts: 3,
            search_debounce_ms: 300,

            highlight: HighlightConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Code block highlighting
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}
