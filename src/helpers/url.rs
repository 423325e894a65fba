//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::SiteConfig;

/// Characters escaped in a single path segment
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/blog.html") // -> "/portfolio/blog.html"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Percent-encode a value for use as one path segment
pub fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}

/// Percent-encode a value for use inside a query string
pub fn encode_query(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

/// Site path of the rendered detail page for a post id
pub fn post_path(config: &SiteConfig, id: &str) -> String {
    format!(
        "{}/{}/",
        config.detail_dir.trim_matches('/'),
        encode_segment(id)
    )
}

/// Site path of a category listing page
pub fn category_path(key: &str) -> String {
    format!("blog/{}/", encode_segment(key))
}

/// A share target for a post
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ShareLink {
    /// Element id the link is mounted on
    pub id: &'static str,
    pub label: &'static str,
    pub href: String,
}

/// Share links for a post page
pub fn share_links(title: &str, page_url: &str) -> Vec<ShareLink> {
    let url = encode_query(page_url);
    let title = encode_query(title);

    vec![
        ShareLink {
            id: "share-post-twitter",
            label: "Twitter",
            href: format!("https://twitter.com/intent/tweet?text={}%20{}", title, url),
        },
        ShareLink {
            id: "share-post-linkedin",
            label: "LinkedIn",
            href: format!(
                "https://www.linkedin.com/sharing/share-offsite/?url={}%20{}",
                title, url
            ),
        },
        ShareLink {
            id: "share-post-email",
            label: "Email",
            href: format!(
                "mailto:?subject={}&body={}",
                title,
                encode_query(&format!("Check out this post: {}", page_url))
            ),
        },
        ShareLink {
            id: "share-post-facebook",
            label: "Facebook",
            href: format!("https://www.facebook.com/sharer/sharer.php?u={}", url),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.url = "https://example.com".to_string();
        config.root = "/blog/".to_string();
        config
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/css/style.css"), "/blog/css/style.css");
        assert_eq!(url_for(&config, ""), "/blog/");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "post/a1/"),
            "https://example.com/blog/post/a1/"
        );
    }

    #[test]
    fn test_post_path_encodes_id() {
        let config = test_config();
        assert_eq!(post_path(&config, "a1"), "post/a1/");
        assert_eq!(post_path(&config, "x y/z"), "post/x%20y%2Fz/");
    }

    #[test]
    fn test_share_links() {
        let links = share_links("Firewalls 101", "https://example.com/post/a2/");
        assert_eq!(links.len(), 4);
        let facebook = links.iter().find(|l| l.id == "share-post-facebook").unwrap();
        assert_eq!(
            facebook.href,
            "https://www.facebook.com/sharer/sharer.php?u=https%3A%2F%2Fexample%2Ecom%2Fpost%2Fa2%2F"
        );
    }
}
