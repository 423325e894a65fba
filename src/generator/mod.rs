//! Generator module - writes the static site using the built-in Tera templates

use anyhow::{Context as _, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

use tera::Context;
use walkdir::WalkDir;

use crate::content::{filter, Category, PostRepository, ALL_CATEGORIES};
use crate::error::PageError;
use crate::helpers::{category_path, full_url_for, url_for};
use crate::meta::{MetaKey, PageHead, DESCRIPTION, OG_SITE_NAME, OG_TYPE};
use crate::page::PostPage;
use crate::render::{DetailRequest, ListView, PostRenderer};
use crate::templates::{DetailData, FilterButton, SiteData, TemplateRenderer};
use crate::Folio;

/// Static site generator using Tera templates
pub struct Generator {
    folio: Folio,
    templates: TemplateRenderer,
    renderer: PostRenderer,
    site: SiteData,
}

/// What a generation run wrote
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    pub posts: usize,
    pub categories: usize,
    pub assets: usize,
    /// Posts whose body failed to render
    pub content_errors: usize,
    pub index_failed: bool,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Result<Self> {
        Ok(Self {
            folio: folio.clone(),
            templates: TemplateRenderer::new()?,
            renderer: folio.renderer(),
            site: SiteData::from_config(&folio.config),
        })
    }

    /// Generate the entire site
    pub async fn generate(&self) -> Result<GenerateSummary> {
        fs::create_dir_all(&self.folio.public_dir)?;

        let mut summary = GenerateSummary {
            assets: self.copy_assets()?,
            ..Default::default()
        };

        let repo = match self.folio.load_posts().await {
            Ok(repo) => repo,
            Err(e) => {
                let err = PageError::from(e);
                err.log();
                summary.index_failed = true;
                self.generate_failed_pages(err.user_message())?;
                return Ok(summary);
            }
        };

        self.generate_index_page(&repo)?;
        self.generate_blog_page(
            &repo,
            &Category::new("All"),
            &self.folio.public_dir.join("blog.html"),
        )?;
        summary.categories = self.generate_category_pages(&repo)?;
        summary.content_errors = self.generate_post_pages(&repo).await?;
        summary.posts = repo.len();
        self.generate_query_page(&repo).await?;

        Ok(summary)
    }

    /// Create a base context with common variables
    fn create_base_context(&self, head: &PageHead) -> Context {
        let mut context = Context::new();
        context.insert("site", &self.site);
        context.insert("head", &head.to_html());
        context.insert("current_year", &chrono::Local::now().format("%Y").to_string());
        context
    }

    /// Head for list pages
    fn site_head(&self, title: &str, path: &str) -> PageHead {
        let config = &self.folio.config;
        let mut head = PageHead::new(title);
        head.upsert(DESCRIPTION, &config.description);
        head.upsert(OG_TYPE, "website");
        head.upsert(OG_SITE_NAME, &config.title);
        if !config.author.is_empty() {
            head.upsert(MetaKey::Name("author"), &config.author);
        }
        head.set_canonical(&full_url_for(config, path));
        head
    }

    fn filter_buttons(&self, repo: &PostRepository, active: &str) -> Vec<FilterButton> {
        let config = &self.folio.config;
        let mut buttons = vec![FilterButton {
            label: "All".to_string(),
            key: ALL_CATEGORIES.to_string(),
            href: url_for(config, "blog.html"),
            active: active == ALL_CATEGORIES,
        }];
        buttons.extend(repo.categories().into_iter().map(|c| FilterButton {
            href: url_for(config, &category_path(&c.key)),
            active: c.key == active,
            label: c.name,
            key: c.key,
        }));
        buttons
    }

    /// Home page with the latest posts
    fn generate_index_page(&self, repo: &PostRepository) -> Result<()> {
        let head = self.site_head(&self.folio.config.title, "");
        let list = self
            .renderer
            .render(repo.latest(self.folio.config.latest_posts));

        let mut context = self.create_base_context(&head);
        context.insert("list", &list);

        let html = self.templates.render("index.html", &context)?;
        write_page(&self.folio.public_dir.join("index.html"), &html)
    }

    /// Blog listing, filtered to one category
    fn generate_blog_page(
        &self,
        repo: &PostRepository,
        category: &Category,
        output: &Path,
    ) -> Result<()> {
        let config = &self.folio.config;
        let (title, path) = if category.key == ALL_CATEGORIES {
            (format!("Blog | {}", config.title), "blog.html".to_string())
        } else {
            (
                format!("{} | {}", category.name, config.title),
                category_path(&category.key),
            )
        };

        let head = self.site_head(&title, &path);
        let list = self
            .renderer
            .render(filter(repo.posts(), &category.key, ""));

        let mut context = self.create_base_context(&head);
        context.insert("list", &list);
        context.insert("filters", &self.filter_buttons(repo, &category.key));

        let html = self.templates.render("blog.html", &context)?;
        write_page(output, &html)
    }

    /// One pre-filtered listing per category
    fn generate_category_pages(&self, repo: &PostRepository) -> Result<usize> {
        let categories: Vec<Category> = repo
            .categories()
            .into_iter()
            .filter(|c| {
                let keep = is_single_segment(&c.key);
                if !keep {
                    tracing::warn!("Skipping category page {:?}: key is not a plain file name", c.key);
                }
                keep
            })
            .collect();
        for category in &categories {
            let output = self
                .folio
                .public_dir
                .join("blog")
                .join(&category.key)
                .join("index.html");
            self.generate_blog_page(repo, category, &output)?;
        }
        Ok(categories.len())
    }

    /// One detail page per post, returning how many bodies failed
    async fn generate_post_pages(&self, repo: &PostRepository) -> Result<usize> {
        let mut content_errors = 0;

        for post in repo.posts() {
            if !is_single_segment(&post.id) {
                tracing::warn!("Skipping post {:?}: id is not a plain file name", post.id);
                continue;
            }
            let mut page = PostPage::new(PageHead::new(&self.folio.config.title));
            let view = match page
                .show(&self.renderer, repo, &DetailRequest::new(&post.id))
                .await
            {
                Ok(view) => view,
                Err(_) => continue,
            };
            if view.body.html().is_none() {
                content_errors += 1;
            }

            let mut context = self.create_base_context(page.head());
            context.insert("detail", &DetailData::from_view(&view));
            if let Some(chrome) = page.install_chrome() {
                context.insert("chrome", &chrome);
            }

            let html = self.templates.render("post.html", &context)?;
            let output = self
                .folio
                .public_dir
                .join(self.folio.config.detail_dir.trim_matches('/'))
                .join(&post.id)
                .join("index.html");
            write_page(&output, &html)?;
        }

        Ok(content_errors)
    }

    /// `post.html`, addressed with `?id=`; forwards to the detail page
    /// and otherwise shows the not-found state
    async fn generate_query_page(&self, repo: &PostRepository) -> Result<()> {
        let mut page = PostPage::new(PageHead::new(&self.folio.config.title));
        let message = match page
            .show(&self.renderer, repo, &DetailRequest::default())
            .await
        {
            Ok(_) => return Ok(()),
            Err(e) => e.user_message(),
        };
        self.write_error_post_page(&mut page, message)
    }

    fn write_error_post_page(&self, page: &mut PostPage, message: &str) -> Result<()> {
        let mut context = self.create_base_context(page.head());
        context.insert("error_message", message);
        context.insert(
            "query_redirect",
            self.folio.config.detail_dir.trim_matches('/'),
        );
        if let Some(chrome) = page.install_chrome() {
            context.insert("chrome", &chrome);
        }

        let html = self.templates.render("post.html", &context)?;
        write_page(&self.folio.public_dir.join("post.html"), &html)
    }

    /// Pages shown when the post index could not be loaded
    fn generate_failed_pages(&self, message: &str) -> Result<()> {
        let config = &self.folio.config;

        let mut context = self.create_base_context(&self.site_head(&config.title, ""));
        context.insert("list", &ListView::default());
        context.insert("load_error", message);
        let html = self.templates.render("index.html", &context)?;
        write_page(&self.folio.public_dir.join("index.html"), &html)?;

        let head = self.site_head(&format!("Blog | {}", config.title), "blog.html");
        let mut context = self.create_base_context(&head);
        context.insert("list", &ListView::default());
        context.insert("filters", &Vec::<FilterButton>::new());
        context.insert("load_error", message);
        let html = self.templates.render("blog.html", &context)?;
        write_page(&self.folio.public_dir.join("blog.html"), &html)?;

        let mut page = PostPage::new(PageHead::new(&config.title));
        self.write_error_post_page(&mut page, message)
    }

    /// Copy the post index and every non-Markdown file under the posts
    /// directory, keeping site-relative paths
    fn copy_assets(&self) -> Result<usize> {
        let mut copied = 0;
        let mut sources: Vec<PathBuf> = vec![self.folio.posts_dir()];
        if let Some(data_dir) = self.folio.index_path().parent() {
            if data_dir != self.folio.base_dir {
                sources.push(data_dir.to_path_buf());
            }
        }

        for source_dir in sources.iter().filter(|d| d.exists()) {
            for entry in WalkDir::new(source_dir)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let path = entry.path();
                if !path.is_file() {
                    continue;
                }

                let ext = path.extension().and_then(|e| e.to_str());
                if matches!(ext, Some("md") | Some("markdown")) {
                    continue;
                }

                let relative = path.strip_prefix(&self.folio.base_dir)?;
                let dest = self.folio.public_dir.join(relative);
                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(path, &dest)?;
                copied += 1;
            }
        }

        tracing::debug!("Copied {} assets", copied);
        Ok(copied)
    }
}

/// Whether a value names exactly one directory entry, so it can be
/// joined onto an output path without leaving it
fn is_single_segment(value: &str) -> bool {
    let mut components = Path::new(value).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !value.contains(&['/', '\\'][..])
}

fn write_page(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create dir {:?}", parent))?;
    }
    fs::write(path, html).with_context(|| format!("Failed to write {:?}", path))?;
    tracing::debug!("Generated: {:?}", path);
    Ok(())
}
