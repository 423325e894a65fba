//! Category and search filtering over the post index

use super::post::{category_key, Post};

/// Category key that matches every post
pub const ALL_CATEGORIES: &str = "all";

/// A category key combined with a search term
///
/// Both predicates are evaluated together against the full collection.
/// Filtering keeps index order and never mutates its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFilter {
    category: String,
    term: String,
}

impl Default for PostFilter {
    fn default() -> Self {
        Self::new(ALL_CATEGORIES, "")
    }
}

impl PostFilter {
    pub fn new(category: &str, search_term: &str) -> Self {
        Self {
            category: category_key(category.trim()),
            term: search_term.trim().to_lowercase(),
        }
    }

    /// The normalized category key
    pub fn category(&self) -> &str {
        &self.category
    }

    /// The trimmed, lowercased search term
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn matches_category(&self, post: &Post) -> bool {
        self.category == ALL_CATEGORIES || post.category_keys().any(|k| k == self.category)
    }

    pub fn matches_search(&self, post: &Post) -> bool {
        if self.term.is_empty() {
            return true;
        }

        let term = self.term.as_str();
        contains(&post.title, term)
            || contains(&post.excerpt, term)
            || post.categories.iter().any(|c| contains(c, term))
            || post.tags.iter().any(|t| contains(t, term))
    }

    pub fn matches(&self, post: &Post) -> bool {
        self.matches_category(post) && self.matches_search(post)
    }

    /// Derive the filtered view
    pub fn apply<'a>(&self, posts: &'a [Post]) -> Vec<&'a Post> {
        posts.iter().filter(|p| self.matches(p)).collect()
    }
}

fn contains(haystack: &str, term: &str) -> bool {
    haystack.to_lowercase().contains(term)
}

/// Filter `posts` by category key and free-text search term
pub fn filter<'a>(posts: &'a [Post], category: &str, search_term: &str) -> Vec<&'a Post> {
    PostFilter::new(category, search_term).apply(posts)
}

/// Lowercased text a search term is matched against, one field per line
pub fn search_text(post: &Post) -> String {
    let mut fields = vec![post.title.to_lowercase(), post.excerpt.to_lowercase()];
    fields.extend(post.categories.iter().map(|c| c.to_lowercase()));
    fields.extend(post.tags.iter().map(|t| t.to_lowercase()));
    fields.join("\n")
}
