//! From a post record to a rendered body fragment

use std::sync::Arc;

use super::assets::{base_dir, enable_lightbox, rewrite_image_sources};
use super::{MarkdownRenderer, Post};
use crate::error::ContentLoadError;
use crate::fetch::Fetcher;

/// A rendered post body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedContent {
    /// Site path the Markdown was read from
    pub source_path: String,
    /// Directory relative image references were resolved against
    pub base_dir: String,
    pub html: String,
}

/// Fetches, converts and post-processes post bodies
#[derive(Clone)]
pub struct MarkdownContentPipeline {
    fetcher: Arc<dyn Fetcher>,
    renderer: MarkdownRenderer,
    posts_dir: String,
}

impl MarkdownContentPipeline {
    pub fn new(fetcher: Arc<dyn Fetcher>, renderer: MarkdownRenderer, posts_dir: &str) -> Self {
        Self {
            fetcher,
            renderer,
            posts_dir: posts_dir.to_string(),
        }
    }

    /// Site path of the body resource for `post`
    pub fn resolve(&self, post: &Post) -> Result<String, ContentLoadError> {
        post.content_resource(&self.posts_dir)
            .ok_or_else(|| ContentLoadError::Unresolvable {
                id: post.id.clone(),
            })
    }

    pub async fn render(&self, post: &Post) -> Result<RenderedContent, ContentLoadError> {
        let source_path = self.resolve(post)?;

        let markdown = self
            .fetcher
            .fetch_text(&source_path)
            .await
            .map_err(|source| ContentLoadError::Fetch {
                id: post.id.clone(),
                source,
            })?;

        let base = base_dir(&source_path).to_string();
        let html = self.renderer.render(&markdown);
        let html = rewrite_image_sources(&html, &base);
        let html = enable_lightbox(&html);

        tracing::debug!("Rendered {} ({} bytes of HTML)", source_path, html.len());

        Ok(RenderedContent {
            source_path,
            base_dir: base,
            html,
        })
    }
}
