//! Static resource access
//!
//! The post index and post bodies are plain files addressed by site-relative
//! paths such as `data/posts.json` or `posts/2024/intro.md`.

use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::FetchError;

/// Reads text resources by site-relative path
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError>;
}

/// Fetcher backed by a directory on disk
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Map a site path onto the filesystem (root-relative paths stay under the root)
    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        self.root.join(path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Fetcher for FsFetcher {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let full = self.resolve(path);
        tracing::debug!("Fetching {:?}", full);

        tokio::fs::read_to_string(&full)
            .await
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => FetchError::NotFound {
                    path: path.to_string(),
                },
                _ => FetchError::Io {
                    path: path.to_string(),
                    source,
                },
            })
    }
}

/// Fetcher serving resources from memory
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    resources: HashMap<String, String>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource, builder style
    pub fn with(mut self, path: &str, body: impl Into<String>) -> Self {
        self.insert(path, body);
        self
    }

    pub fn insert(&mut self, path: &str, body: impl Into<String>) {
        self.resources
            .insert(path.trim_start_matches('/').to_string(), body.into());
    }
}

#[async_trait]
impl Fetcher for MemoryFetcher {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        self.resources
            .get(path.trim_start_matches('/'))
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                path: path.to_string(),
            })
    }
}
