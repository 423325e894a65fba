//! Page-level descriptive metadata
//!
//! A [`PageHead`] stands in for the document head: a title, a canonical
//! link and a set of named/property-keyed `<meta>` slots. The
//! [`MetadataInjector`] upserts the slots it owns from a post record.

use indexmap::IndexMap;
use std::fmt;

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{html_escape, meta_tag};

/// Key of a `<meta>` slot
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MetaKey {
    /// `<meta name="...">`
    Name(&'static str),
    /// `<meta property="...">`
    Property(&'static str),
}

impl MetaKey {
    fn attr(&self) -> (&'static str, &'static str) {
        match self {
            Self::Name(key) => ("name", key),
            Self::Property(key) => ("property", key),
        }
    }
}

impl fmt::Display for MetaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (attr, key) = self.attr();
        write!(f, "{}={}", attr, key)
    }
}

pub const DESCRIPTION: MetaKey = MetaKey::Name("description");
pub const OG_TITLE: MetaKey = MetaKey::Property("og:title");
pub const OG_DESCRIPTION: MetaKey = MetaKey::Property("og:description");
pub const OG_TYPE: MetaKey = MetaKey::Property("og:type");
pub const OG_URL: MetaKey = MetaKey::Property("og:url");
pub const OG_SITE_NAME: MetaKey = MetaKey::Property("og:site_name");
pub const OG_IMAGE: MetaKey = MetaKey::Property("og:image");
pub const TWITTER_CARD: MetaKey = MetaKey::Name("twitter:card");
pub const TWITTER_TITLE: MetaKey = MetaKey::Name("twitter:title");
pub const TWITTER_DESCRIPTION: MetaKey = MetaKey::Name("twitter:description");
pub const TWITTER_IMAGE: MetaKey = MetaKey::Name("twitter:image");

/// Document head state for one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageHead {
    title: String,
    canonical: Option<String>,
    slots: IndexMap<MetaKey, String>,
}

impl PageHead {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn canonical(&self) -> Option<&str> {
        self.canonical.as_deref()
    }

    pub fn set_canonical(&mut self, href: &str) {
        self.canonical = Some(href.to_string());
    }

    pub fn get(&self, key: &MetaKey) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }

    /// Update a slot in place, or append it if absent
    pub fn upsert(&mut self, key: MetaKey, content: &str) {
        match self.slots.get_mut(&key) {
            Some(existing) => {
                existing.clear();
                existing.push_str(content);
            }
            None => {
                self.slots.insert(key, content.to_string());
            }
        }
    }

    /// Drop a slot, keeping the order of the others
    pub fn remove(&mut self, key: &MetaKey) -> Option<String> {
        self.slots.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MetaKey, &str)> {
        self.slots.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Render as head markup
    pub fn to_html(&self) -> String {
        let mut lines = vec![format!("<title>{}</title>", html_escape(&self.title))];
        lines.extend(self.slots.iter().map(|(key, content)| {
            let (attr, name) = key.attr();
            meta_tag(attr, name, content)
        }));
        if let Some(href) = &self.canonical {
            lines.push(format!(
                r#"<link rel="canonical" id="canonical-link" href="{}">"#,
                html_escape(href)
            ));
        }
        lines.join("\n")
    }
}

/// Derives page metadata from a post record
#[derive(Debug, Clone)]
pub struct MetadataInjector {
    site_name: String,
    fallback_description: String,
}

impl MetadataInjector {
    pub fn new(site_name: &str, fallback_description: &str) -> Self {
        Self {
            site_name: site_name.to_string(),
            fallback_description: fallback_description.to_string(),
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(&config.title, &config.description)
    }

    /// Page title for a post
    pub fn title_for(&self, post: &Post) -> String {
        match post.seo_title.as_deref().filter(|t| !t.trim().is_empty()) {
            Some(title) => title.to_string(),
            None => format!("{} | {}", post.title, self.site_name),
        }
    }

    /// Description for a post
    pub fn description_for<'a>(&'a self, post: &'a Post) -> &'a str {
        post.seo_description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .or_else(|| Some(post.excerpt.as_str()).filter(|e| !e.trim().is_empty()))
            .unwrap_or(&self.fallback_description)
    }

    /// Write every field this injector owns into `head`
    ///
    /// Image slots are removed when the post has no cover, so a head reused
    /// across posts never keeps a previous post's image.
    pub fn apply(&self, head: &mut PageHead, post: &Post, canonical_url: &str) {
        let title = self.title_for(post);
        let description = self.description_for(post);

        head.set_title(&title);
        head.set_canonical(canonical_url);

        head.upsert(DESCRIPTION, description);
        head.upsert(OG_TITLE, &title);
        head.upsert(OG_DESCRIPTION, description);
        head.upsert(OG_TYPE, "article");
        head.upsert(OG_URL, canonical_url);
        head.upsert(OG_SITE_NAME, &self.site_name);
        head.upsert(TWITTER_CARD, "summary_large_image");
        head.upsert(TWITTER_TITLE, &title);
        head.upsert(TWITTER_DESCRIPTION, description);

        match post.cover() {
            Some(image) => {
                head.upsert(OG_IMAGE, image);
                head.upsert(TWITTER_IMAGE, image);
            }
            None => {
                head.remove(&OG_IMAGE);
                head.remove(&TWITTER_IMAGE);
            }
        }

        tracing::debug!("Applied metadata for post {:?}", post.id);
    }
}
