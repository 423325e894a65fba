//! Summary cards for list views

use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::{search_text, Category, Post};
use crate::helpers::{format_display_date, post_path, url_for};

/// One post in a list view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostCard {
    /// Post id the click-through is keyed on
    pub id: String,
    pub title: String,
    pub date: String,
    pub categories: Vec<Category>,
    pub excerpt: String,
    pub image: Option<String>,
    /// Link to the detail page
    pub href: String,
    /// Lowercased text the client-side search box matches against
    pub search_text: String,
}

impl PostCard {
    pub fn from_post(post: &Post, config: &SiteConfig) -> Self {
        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            date: format_display_date(&post.date, &config.date_format),
            categories: post.categories.iter().map(|c| Category::new(c)).collect(),
            excerpt: post.excerpt.clone(),
            image: post.cover().map(str::to_string),
            href: url_for(config, &post_path(config, &post.id)),
            search_text: search_text(post),
        }
    }
}

/// A rendered list of cards
///
/// An empty list is a valid state; templates show the "no posts"
/// placeholder instead of the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListView {
    pub cards: Vec<PostCard>,
}

impl ListView {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.cards.iter().map(|c| c.id.as_str()).collect()
    }
}
