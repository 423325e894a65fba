//! Page controllers
//!
//! Each controller owns the state of one page view: the blog listing with
//! its category and search term, or a post detail page with its head and
//! chrome.

mod blog;
mod chrome;
mod debounce;
mod post;

pub use blog::{BlogEvent, BlogPage};
pub use chrome::{chrome_html, LIGHTBOX_OVERLAY, LIGHTBOX_SCRIPT, MARKDOWN_STYLES};
pub use debounce::SearchDebouncer;
pub use post::PostPage;
