//! Content module - post index, filtering and body rendering

mod assets;
mod filter;
mod markdown;
mod pipeline;
mod post;
mod repository;

pub use assets::{
    base_dir, enable_lightbox, image_sources, is_absolute_url, rewrite_asset_path,
    rewrite_image_sources,
};
pub use filter::{filter, search_text, PostFilter, ALL_CATEGORIES};
pub use markdown::MarkdownRenderer;
pub use pipeline::{MarkdownContentPipeline, RenderedContent};
pub use post::{category_key, Category, Post};
pub use repository::PostRepository;
