//! List site content

use anyhow::Result;

use crate::config::SiteConfig;
use crate::content::{filter, Post, PostRepository, ALL_CATEGORIES};
use crate::helpers::format_display_date;
use crate::Folio;

/// List posts, optionally filtered, or the category set
pub async fn run(
    folio: &Folio,
    content_type: &str,
    category: Option<&str>,
    search: Option<&str>,
) -> Result<()> {
    let repo = folio.load_posts().await?;

    match content_type {
        "post" | "posts" => {
            let category = category.unwrap_or(ALL_CATEGORIES);
            let search = search.unwrap_or_default();
            for line in post_lines(&repo, &folio.config, category, search) {
                println!("{}", line);
            }
        }
        "category" | "categories" => {
            for line in category_lines(&repo) {
                println!("{}", line);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, category",
                content_type
            );
        }
    }

    Ok(())
}

fn post_line(post: &Post, config: &SiteConfig) -> String {
    format!(
        "  {} - {} [{}] ({})",
        format_display_date(&post.date, &config.date_format),
        post.title,
        post.id,
        post.categories.join(", ")
    )
}

pub fn post_lines(
    repo: &PostRepository,
    config: &SiteConfig,
    category: &str,
    search: &str,
) -> Vec<String> {
    let posts = filter(repo.posts(), category, search);
    let mut lines = vec![format!("Posts ({}):", posts.len())];
    lines.extend(posts.into_iter().map(|p| post_line(p, config)));
    lines
}

pub fn category_lines(repo: &PostRepository) -> Vec<String> {
    let categories = repo.categories();
    let mut lines = vec![format!("Categories ({}):", categories.len())];
    for category in categories {
        let count = filter(repo.posts(), &category.key, "").len();
        lines.push(format!("  {} [{}] ({})", category.name, category.key, count));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> PostRepository {
        PostRepository::parse(
            r#"[
                {"id": "a1", "title": "SQL Injection 101", "categories": ["Web Security"], "date": "2024-01-05"},
                {"id": "a2", "title": "Firewalls", "categories": ["Network"], "date": "2024-02-01"},
                {"id": "a3", "title": "XSS", "categories": ["Web Security"], "date": "2024-03-01"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_post_lines_filtered() {
        let lines = post_lines(&repo(), &SiteConfig::default(), "web-security", "sql");
        assert_eq!(lines[0], "Posts (1):");
        assert_eq!(lines[1], "  Jan 5, 2024 - SQL Injection 101 [a1] (Web Security)");
    }

    #[test]
    fn test_category_lines() {
        let lines = category_lines(&repo());
        assert_eq!(
            lines,
            vec![
                "Categories (2):",
                "  Web Security [web-security] (2)",
                "  Network [network] (1)",
            ]
        );
    }
}
