//! Post index loading

use std::collections::HashSet;
use std::sync::Arc;

use super::post::{Category, Post};
use crate::error::LoadError;
use crate::fetch::Fetcher;

/// The full post index, held read-only for the lifetime of a page view
#[derive(Debug, Clone, Default)]
pub struct PostRepository {
    posts: Arc<[Post]>,
}

impl PostRepository {
    /// Fetch and parse the index in a single attempt
    pub async fn load(fetcher: &dyn Fetcher, index_path: &str) -> Result<Self, LoadError> {
        let raw = fetcher.fetch_text(index_path).await?;
        let repo = Self::parse(&raw)?;
        tracing::info!("Loaded {} posts from {}", repo.len(), index_path);
        Ok(repo)
    }

    /// Parse an index document
    pub fn parse(raw: &str) -> Result<Self, LoadError> {
        let posts: Vec<Post> = serde_json::from_str(raw)?;
        Ok(Self::from_posts(posts))
    }

    pub fn from_posts(posts: Vec<Post>) -> Self {
        let mut seen = HashSet::new();
        for post in &posts {
            if !seen.insert(post.id.as_str()) {
                tracing::warn!("Duplicate post id {:?} in index, first entry wins", post.id);
            }
            if post.categories.is_empty() {
                tracing::debug!("Post {:?} has no categories", post.id);
            }
        }

        Self {
            posts: posts.into(),
        }
    }

    /// All posts in index order
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Shared handle on the collection for page controllers
    pub fn shared(&self) -> Arc<[Post]> {
        Arc::clone(&self.posts)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// The first `n` posts in index order
    pub fn latest(&self, n: usize) -> &[Post] {
        &self.posts[..n.min(self.posts.len())]
    }

    /// Unique category labels in first-seen order
    pub fn categories(&self) -> Vec<Category> {
        let mut seen = HashSet::new();
        let mut categories = Vec::new();
        for name in self.posts.iter().flat_map(|p| &p.categories) {
            if seen.insert(name.as_str()) {
                categories.push(Category::new(name));
            }
        }
        categories
    }
}
