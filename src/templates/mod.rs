//! Built-in site templates using the Tera template engine
//!
//! All templates are embedded in the binary. Autoescaping is off: values
//! that come from the post index are escaped explicitly in the templates,
//! while rendered bodies and head markup are inserted as-is.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::helpers::{meta_generator, url_for, ShareLink};
use crate::render::{DetailHeader, DetailView};

/// Template renderer with the embedded folio theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("folio/layout.html")),
            ("index.html", include_str!("folio/index.html")),
            ("blog.html", include_str!("folio/blog.html")),
            ("post.html", include_str!("folio/post.html")),
            // Partials
            ("partials/card.html", include_str!("folio/partials/card.html")),
            (
                "partials/filters.html",
                include_str!("folio/partials/filters.html"),
            ),
            ("partials/share.html", include_str!("folio/partials/share.html")),
        ])?;

        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 160,
    };

    if s.chars().count() <= length {
        return Ok(tera::Value::String(s));
    }
    let truncated: String = s.chars().take(length).collect();
    Ok(tera::Value::String(format!("{}...", truncated.trim_end())))
}

/// Site-wide values every template sees as `site`
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub url: String,
    pub root: String,
    pub home_href: String,
    pub blog_href: String,
    pub generator: String,
    pub search_debounce_ms: u64,
}

impl SiteData {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            subtitle: config.subtitle.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            language: config.language.clone(),
            url: config.url.clone(),
            root: url_for(config, ""),
            home_href: url_for(config, ""),
            blog_href: url_for(config, "blog.html"),
            generator: meta_generator(),
            search_debounce_ms: config.search_debounce_ms,
        }
    }
}

/// One category filter button
#[derive(Debug, Clone, Serialize)]
pub struct FilterButton {
    pub label: String,
    /// Value of `data-category`
    pub key: String,
    pub href: String,
    pub active: bool,
}

/// A detail view flattened for `post.html`
#[derive(Debug, Clone, Serialize)]
pub struct DetailData<'a> {
    pub header: &'a DetailHeader,
    /// False when the body failed to load
    pub available: bool,
    pub html: &'a str,
    pub error_message: &'a str,
    pub canonical_url: &'a str,
    pub share_links: &'a [ShareLink],
}

impl<'a> DetailData<'a> {
    pub fn from_view(view: &'a DetailView) -> Self {
        Self {
            header: &view.header,
            available: view.body.html().is_some(),
            html: view.body.html().unwrap_or_default(),
            error_message: view.body.error_message().unwrap_or_default(),
            canonical_url: &view.canonical_url,
            share_links: &view.share_links,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{ListView, PostCard};

    fn card(id: &str, title: &str) -> PostCard {
        PostCard {
            id: id.to_string(),
            title: title.to_string(),
            date: "Jan 5, 2024".to_string(),
            categories: vec![crate::content::Category::new("Web Security")],
            excerpt: "An <intro>".to_string(),
            image: None,
            href: format!("/post/{}/", id),
            search_text: title.to_lowercase(),
        }
    }

    fn base_context() -> Context {
        let config = SiteConfig::default();
        let mut context = Context::new();
        context.insert("site", &SiteData::from_config(&config));
        context.insert("head", "<title>Blog</title>");
        context.insert("current_year", "2024");
        context
    }

    #[test]
    fn test_blog_renders_cards_and_placeholder() {
        let renderer = TemplateRenderer::new().unwrap();

        let mut context = base_context();
        context.insert(
            "list",
            &ListView {
                cards: vec![card("a1", "SQL Injection 101")],
            },
        );
        context.insert("filters", &Vec::<FilterButton>::new());
        let html = renderer.render("blog.html", &context).unwrap();
        assert!(html.contains(r#"id="blog-posts""#));
        assert!(html.contains(r#"data-id="a1""#));
        assert!(html.contains("An &lt;intro&gt;"));
        assert!(html.contains(r#"id="no-posts" hidden"#));

        let mut context = base_context();
        context.insert("list", &ListView::default());
        context.insert("filters", &Vec::<FilterButton>::new());
        let html = renderer.render("blog.html", &context).unwrap();
        assert!(!html.contains(r#"data-id=""#));
        assert!(html.contains(r#"<div id="no-posts">"#));
    }

    #[test]
    fn test_truncate_chars_filter() {
        let mut args = HashMap::new();
        args.insert("length".to_string(), tera::Value::from(5));
        let value = tera::Value::String("abcdefgh".to_string());
        let out = truncate_chars_filter(&value, &args).unwrap();
        assert_eq!(out, tera::Value::String("abcde...".to_string()));
    }
}
