//! Post detail controller

use crate::content::PostRepository;
use crate::error::{LoadError, PageError};
use crate::meta::PageHead;
use crate::render::{DetailRequest, DetailView, PostRenderer};

use super::chrome::chrome_html;

/// State of one post detail page view
#[derive(Debug, Clone, Default)]
pub struct PostPage {
    head: PageHead,
    chrome_installed: bool,
}

impl PostPage {
    pub fn new(head: PageHead) -> Self {
        Self {
            head,
            chrome_installed: false,
        }
    }

    pub fn head(&self) -> &PageHead {
        &self.head
    }

    pub fn chrome_installed(&self) -> bool {
        self.chrome_installed
    }

    /// Stylesheet and overlay markup, returned only on the first call
    pub fn install_chrome(&mut self) -> Option<String> {
        if self.chrome_installed {
            return None;
        }
        self.chrome_installed = true;
        Some(chrome_html())
    }

    /// Show the post a request asks for
    ///
    /// An unknown id ends in an error carrying the reader-facing message.
    /// The error detail is logged here.
    pub async fn show(
        &mut self,
        renderer: &PostRenderer,
        repo: &PostRepository,
        request: &DetailRequest,
    ) -> Result<DetailView, PageError> {
        renderer
            .render_detail(repo, request, &mut self.head)
            .await
            .map_err(|e| {
                let err = PageError::from(e);
                err.log();
                err
            })
    }

    /// Show the page after the index failed to load
    pub fn fail(&self, error: LoadError) -> PageError {
        let err = PageError::from(error);
        err.log();
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::SiteConfig;
    use crate::error::FetchError;
    use crate::fetch::MemoryFetcher;
    use crate::meta::OG_IMAGE;

    fn renderer() -> PostRenderer {
        let fetcher = MemoryFetcher::new()
            .with("posts/one.md", "# One")
            .with("posts/two.md", "# Two");
        PostRenderer::new(Arc::new(SiteConfig::default()), Arc::new(fetcher))
    }

    fn repo() -> PostRepository {
        PostRepository::parse(
            r#"[
                {"id": "a1", "title": "One", "date": "2024-01-05", "contentFile": "one.md", "image": "images/one.png"},
                {"id": "a2", "title": "Two", "date": "2024-01-06", "contentFile": "two.md"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_chrome_installed_once() {
        let mut page = PostPage::default();
        assert!(!page.chrome_installed());
        assert!(page.install_chrome().is_some());
        assert!(page.install_chrome().is_none());
        assert!(page.chrome_installed());
    }

    #[tokio::test]
    async fn test_show_twice_reuses_head() {
        let renderer = renderer();
        let repo = repo();
        let mut page = PostPage::default();

        page.show(&renderer, &repo, &DetailRequest::new("a1"))
            .await
            .unwrap();
        assert_eq!(page.head().get(&OG_IMAGE), Some("images/one.png"));

        let view = page
            .show(&renderer, &repo, &DetailRequest::new("a2"))
            .await
            .unwrap();
        assert_eq!(view.header.title, "Two");
        assert_eq!(page.head().get(&OG_IMAGE), None);
    }

    #[tokio::test]
    async fn test_show_reports_reader_messages() {
        let renderer = renderer();
        let repo = repo();
        let mut page = PostPage::default();

        let err = page
            .show(&renderer, &repo, &DetailRequest::new("zzz"))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Post not found");

        let failed = LoadError::from(FetchError::NotFound {
            path: "data/posts.json".to_string(),
        });
        let err = page.fail(failed);
        assert_eq!(err.user_message(), "Unable to load posts at this time.");
    }
}
