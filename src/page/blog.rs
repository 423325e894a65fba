//! Blog listing controller

use std::sync::Arc;

use crate::content::{filter, Post, ALL_CATEGORIES};

/// Input events a blog listing reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlogEvent {
    /// A filter button was clicked
    SelectCategory(String),
    /// The search box settled on a new value
    Search(String),
}

/// State of the blog listing page
///
/// Holds the full collection read-only. Every change recomputes the
/// filtered view from scratch, so the order of events never matters.
#[derive(Debug, Clone)]
pub struct BlogPage {
    posts: Arc<[Post]>,
    category: String,
    search: String,
}

impl BlogPage {
    pub fn new(posts: Arc<[Post]>) -> Self {
        Self {
            posts,
            category: ALL_CATEGORIES.to_string(),
            search: String::new(),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn select_category(&mut self, key: &str) -> Vec<&Post> {
        tracing::debug!("Category filter: {}", key);
        self.category = key.to_string();
        self.view()
    }

    pub fn set_search(&mut self, term: &str) -> Vec<&Post> {
        tracing::debug!("Search term: {:?}", term);
        self.search = term.to_string();
        self.view()
    }

    pub fn handle(&mut self, event: BlogEvent) -> Vec<&Post> {
        match event {
            BlogEvent::SelectCategory(key) => self.select_category(&key),
            BlogEvent::Search(term) => self.set_search(&term),
        }
    }

    /// Posts visible under the current category and search term
    pub fn view(&self) -> Vec<&Post> {
        filter(&self.posts, &self.category, &self.search)
    }
}
