//! Post rendering: list cards and detail views

mod card;
mod detail;

use std::sync::Arc;

pub use card::{ListView, PostCard};
pub use detail::{DetailBody, DetailHeader, DetailRequest, DetailView};

use crate::config::SiteConfig;
use crate::content::{Category, MarkdownContentPipeline, MarkdownRenderer, Post, PostRepository};
use crate::error::{NotFoundError, NotFoundReason};
use crate::fetch::Fetcher;
use crate::helpers::{date_xml, format_display_date, full_url_for, post_path, share_links};
use crate::meta::{MetadataInjector, PageHead};

/// Renders posts into cards and detail views
#[derive(Clone)]
pub struct PostRenderer {
    config: Arc<SiteConfig>,
    pipeline: MarkdownContentPipeline,
    injector: MetadataInjector,
}

impl PostRenderer {
    pub fn new(config: Arc<SiteConfig>, fetcher: Arc<dyn Fetcher>) -> Self {
        let renderer = MarkdownRenderer::with_options(&config.highlight);
        let pipeline = MarkdownContentPipeline::new(fetcher, renderer, &config.posts_dir);
        let injector = MetadataInjector::from_config(&config);
        Self {
            config,
            pipeline,
            injector,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Render a list of posts into cards, keeping their order
    pub fn render<'a, I>(&self, posts: I) -> ListView
    where
        I: IntoIterator<Item = &'a Post>,
    {
        ListView {
            cards: posts
                .into_iter()
                .map(|p| PostCard::from_post(p, &self.config))
                .collect(),
        }
    }

    /// Absolute URL of a post's detail page
    pub fn canonical_url(&self, post: &Post) -> String {
        full_url_for(&self.config, &post_path(&self.config, &post.id))
    }

    /// Look up the requested post
    pub fn find<'r>(
        &self,
        repo: &'r PostRepository,
        request: &DetailRequest,
    ) -> Result<&'r Post, NotFoundError> {
        let Some(id) = request.id() else {
            return Err(NotFoundError::new(NotFoundReason::MissingId, None));
        };
        if repo.is_empty() {
            return Err(NotFoundError::new(NotFoundReason::EmptyIndex, Some(id)));
        }
        repo.find(id)
            .ok_or_else(|| NotFoundError::new(NotFoundReason::NoMatch, Some(id)))
    }

    /// Render the detail view for a request
    ///
    /// Writes the post's metadata into `head`. A body that fails to load
    /// leaves the header intact and marks the body unavailable.
    pub async fn render_detail(
        &self,
        repo: &PostRepository,
        request: &DetailRequest,
        head: &mut PageHead,
    ) -> Result<DetailView, NotFoundError> {
        let post = self.find(repo, request)?;
        let canonical_url = self.canonical_url(post);

        self.injector.apply(head, post, &canonical_url);

        let body = match self.pipeline.render(post).await {
            Ok(content) => DetailBody::Rendered(content),
            Err(e) => {
                tracing::error!("Error rendering post content: {}", e);
                DetailBody::Unavailable(e)
            }
        };

        Ok(DetailView {
            header: self.header(post),
            body,
            share_links: share_links(&post.title, &canonical_url),
            canonical_url,
        })
    }

    fn header(&self, post: &Post) -> DetailHeader {
        DetailHeader {
            id: post.id.clone(),
            title: post.title.clone(),
            date: format_display_date(&post.date, &self.config.date_format),
            date_xml: date_xml(&post.date),
            categories: post.categories.iter().map(|c| Category::new(c)).collect(),
            cover: post.cover().map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MemoryFetcher;
    use crate::meta::{OG_IMAGE, OG_TYPE};

    const INDEX: &str = r#"[
        {"id": "a1", "title": "SQL Injection 101", "excerpt": "...", "categories": ["Web Security"], "date": "2024-01-05", "contentPath": "posts/2024/sqli.md", "image": "images/sqli.png"},
        {"id": "a2", "title": "Firewalls", "excerpt": "...", "categories": ["Network"], "date": "2024-02-01", "contentFile": "missing.md"}
    ]"#;

    fn renderer() -> PostRenderer {
        let fetcher = MemoryFetcher::new().with(
            "posts/2024/sqli.md",
            "# SQLi\n\n<img src=\"./diagram.png\">\n",
        );
        PostRenderer::new(Arc::new(SiteConfig::default()), Arc::new(fetcher))
    }

    #[test]
    fn test_render_cards_in_order() {
        let repo = PostRepository::parse(INDEX).unwrap();
        let view = renderer().render(repo.posts());
        assert_eq!(view.ids(), vec!["a1", "a2"]);
        assert!(renderer().render(Vec::<&Post>::new()).is_empty());
    }

    #[tokio::test]
    async fn test_render_detail() {
        let repo = PostRepository::parse(INDEX).unwrap();
        let mut head = PageHead::default();
        let view = renderer()
            .render_detail(&repo, &DetailRequest::new("a1"), &mut head)
            .await
            .unwrap();

        assert_eq!(view.header.title, "SQL Injection 101");
        assert_eq!(view.header.date, "Jan 5, 2024");
        assert_eq!(view.header.cover.as_deref(), Some("images/sqli.png"));
        assert!(view
            .body
            .html()
            .unwrap()
            .contains(r#"src="posts/2024/diagram.png""#));
        assert_eq!(view.canonical_url, "http://example.com/post/a1/");
        assert_eq!(head.title(), "SQL Injection 101 | 0xos4ma");
        assert_eq!(head.get(&OG_TYPE), Some("article"));
        assert_eq!(head.get(&OG_IMAGE), Some("images/sqli.png"));
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let repo = PostRepository::parse(INDEX).unwrap();
        let mut head = PageHead::default();
        let err = renderer()
            .render_detail(&repo, &DetailRequest::from_query("?id=zzz"), &mut head)
            .await
            .unwrap_err();
        assert_eq!(err.reason, NotFoundReason::NoMatch);
        assert!(head.is_empty());
    }

    #[tokio::test]
    async fn test_missing_id_and_empty_index() {
        let repo = PostRepository::parse(INDEX).unwrap();
        let mut head = PageHead::default();
        let err = renderer()
            .render_detail(&repo, &DetailRequest::from_query(""), &mut head)
            .await
            .unwrap_err();
        assert_eq!(err.reason, NotFoundReason::MissingId);

        let empty = PostRepository::default();
        let err = renderer()
            .render_detail(&empty, &DetailRequest::new("a1"), &mut head)
            .await
            .unwrap_err();
        assert_eq!(err.reason, NotFoundReason::EmptyIndex);
    }

    #[tokio::test]
    async fn test_missing_body_keeps_header() {
        let repo = PostRepository::parse(INDEX).unwrap();
        let mut head = PageHead::default();
        let view = renderer()
            .render_detail(&repo, &DetailRequest::new("a2"), &mut head)
            .await
            .unwrap();
        assert_eq!(view.header.title, "Firewalls");
        assert!(view.body.html().is_none());
        assert_eq!(view.body.error_message(), Some("Unable to load post content"));
    }
}
