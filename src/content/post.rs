//! Post model and category keys

use serde::{Deserialize, Serialize};

/// A post index record
///
/// Deserialized from the camelCase JSON index. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Unique, stable identifier used for lookup and URL addressing
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub excerpt: String,

    /// Publication date as written in the index (`YYYY-MM-DD` or RFC 3339)
    pub date: String,

    #[serde(default)]
    pub categories: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Cover asset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Full path of the Markdown body, preferred over `content_file`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_path: Option<String>,

    /// Markdown file name under the posts directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_file: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
}

impl Post {
    /// Create a post with the required fields
    pub fn new(id: &str, title: &str, date: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            excerpt: String::new(),
            date: date.to_string(),
            categories: Vec::new(),
            tags: Vec::new(),
            image: None,
            content_path: None,
            content_file: None,
            seo_title: None,
            seo_description: None,
        }
    }

    /// Resolve the site path of the Markdown body
    ///
    /// `contentPath` wins; otherwise `contentFile` is joined onto `posts_dir`.
    pub fn content_resource(&self, posts_dir: &str) -> Option<String> {
        if let Some(path) = non_empty(&self.content_path) {
            return Some(path.to_string());
        }

        non_empty(&self.content_file).map(|file| {
            let dir = posts_dir.trim_end_matches('/');
            if dir.is_empty() {
                file.to_string()
            } else {
                format!("{}/{}", dir, file.trim_start_matches('/'))
            }
        })
    }

    /// Cover image, ignoring empty strings
    pub fn cover(&self) -> Option<&str> {
        non_empty(&self.image)
    }

    /// Category keys of this post, in declaration order
    pub fn category_keys(&self) -> impl Iterator<Item = String> + '_ {
        self.categories.iter().map(|c| category_key(c))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Normalize a category label into its key
///
/// Lowercases and collapses every whitespace run into a single `-`. Used by
/// the filter engine and by everything that generates filter keys.
pub fn category_key(label: &str) -> String {
    let mut key = String::with_capacity(label.len());
    let mut in_space = false;

    for c in label.chars() {
        if c.is_whitespace() {
            if !in_space {
                key.push('-');
            }
            in_space = true;
        } else {
            key.extend(c.to_lowercase());
            in_space = false;
        }
    }

    key
}

/// A category label with its key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,
    pub key: String,
}

impl Category {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            key: category_key(name),
        }
    }
}
