//! Image reference rewriting for rendered post bodies

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::borrow::Cow;

lazy_static! {
    static ref IMG_TAG: Regex = Regex::new(r"(?i)<img\b[^>]*>").expect("valid img regex");
    static ref SRC_ATTR: Regex =
        Regex::new(r#"(?i)(\ssrc\s*=\s*)(?:"([^"]*)"|'([^']*)')"#).expect("valid src regex");
    static ref LOADING_ATTR: Regex = Regex::new(r"(?i)\sloading\s*=").expect("valid regex");
    static ref LIGHTBOX_ATTR: Regex = Regex::new(r"(?i)\bdata-lightbox\b").expect("valid regex");
    static ref SCHEME: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("valid regex");
}

/// Directory part of a site path (`posts/2024/a.md` -> `posts/2024`)
pub fn base_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(pos) => &path[..pos],
        None => "",
    }
}

/// Whether a reference is scheme-qualified (`https:`, `data:`) or protocol-relative (`//`)
pub fn is_absolute_url(src: &str) -> bool {
    src.starts_with("//") || SCHEME.is_match(src)
}

/// Rewrite a single asset reference relative to `base`
///
/// Absolute and root-relative references are returned untouched. A leading
/// `./` is dropped and the rest is placed under `base`. References already
/// under `base` are left alone so the rewrite can be applied repeatedly.
pub fn rewrite_asset_path<'a>(src: &'a str, base: &str) -> Cow<'a, str> {
    if src.is_empty() || is_absolute_url(src) || src.starts_with('/') || src.starts_with('#') {
        return Cow::Borrowed(src);
    }

    let normalized = src.strip_prefix("./").unwrap_or(src);
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        return Cow::Borrowed(normalized);
    }

    let under_base = normalized
        .strip_prefix(base)
        .is_some_and(|rest| rest.starts_with('/'));
    if under_base {
        Cow::Borrowed(normalized)
    } else {
        Cow::Owned(format!("{}/{}", base, normalized))
    }
}

/// Rewrite the `src` of every `<img>` in an HTML fragment
pub fn rewrite_image_sources(html: &str, base: &str) -> String {
    IMG_TAG
        .replace_all(html, |tag: &Captures| {
            SRC_ATTR
                .replace(&tag[0], |attr: &Captures| {
                    let (src, quote) = match (attr.get(2), attr.get(3)) {
                        (Some(m), _) => (m.as_str(), '"'),
                        (None, Some(m)) => (m.as_str(), '\''),
                        (None, None) => ("", '"'),
                    };
                    format!(
                        "{}{}{}{}",
                        &attr[1],
                        quote,
                        rewrite_asset_path(src, base),
                        quote
                    )
                })
                .into_owned()
        })
        .into_owned()
}

/// Mark every `<img>` for lazy loading and click-to-enlarge
pub fn enable_lightbox(html: &str) -> String {
    IMG_TAG
        .replace_all(html, |tag: &Captures| {
            let tag = &tag[0];
            let mut extra = String::new();
            if !LOADING_ATTR.is_match(tag) {
                extra.push_str(r#" loading="lazy""#);
            }
            if !LIGHTBOX_ATTR.is_match(tag) {
                extra.push_str(" data-lightbox");
            }
            if extra.is_empty() {
                return tag.to_string();
            }

            // Insert right after the tag name
            format!("<img{}{}", extra, &tag[4..])
        })
        .into_owned()
}

/// Image sources of an HTML fragment, in document order
pub fn image_sources(html: &str) -> Vec<String> {
    IMG_TAG
        .find_iter(html)
        .filter_map(|tag| SRC_ATTR.captures(tag.as_str()))
        .filter_map(|c| c.get(2).or_else(|| c.get(3)))
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_dir() {
        assert_eq!(base_dir("posts/2024/a.md"), "posts/2024");
        assert_eq!(base_dir("a.md"), "");
        assert_eq!(base_dir("/a.md"), "");
    }

    #[test]
    fn test_rewrite_relative_paths() {
        assert_eq!(rewrite_asset_path("./diagram.png", "posts/2024"), "posts/2024/diagram.png");
        assert_eq!(rewrite_asset_path("img/a.png", "posts/2024"), "posts/2024/img/a.png");
        assert_eq!(rewrite_asset_path("../a.png", "posts/2024"), "posts/2024/../a.png");
    }

    #[test]
    fn test_rewrite_leaves_absolute_and_root_relative() {
        for src in [
            "http://ex.com/x.png",
            "https://ex.com/x.png",
            "//cdn.ex.com/x.png",
            "/images/x.png",
            "data:image/png;base64,AAAA",
        ] {
            assert_eq!(rewrite_asset_path(src, "posts/2024"), src);
        }
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        for src in ["./diagram.png", "img/a.png", "diagram.png", "https://ex.com/x.png", "/x.png"] {
            let once = rewrite_asset_path(src, "posts/2024").into_owned();
            let twice = rewrite_asset_path(&once, "posts/2024").into_owned();
            assert_eq!(once, twice, "rewrite of {} is not idempotent", src);
        }
    }

    #[test]
    fn test_rewrite_without_base() {
        assert_eq!(rewrite_asset_path("./a.png", ""), "a.png");
    }

    #[test]
    fn test_rewrite_image_sources_in_html() {
        let html = r#"<p><img src="./diagram.png" alt="d"> <IMG alt='x' SRC='https://ex.com/x.png'></p>"#;
        let out = rewrite_image_sources(html, "posts/2024");
        assert_eq!(
            image_sources(&out),
            vec!["posts/2024/diagram.png", "https://ex.com/x.png"]
        );
        assert_eq!(rewrite_image_sources(&out, "posts/2024"), out);
    }

    #[test]
    fn test_rewrite_skips_data_src() {
        let html = r#"<img data-src="./lazy.png" src="./diagram.png">"#;
        let out = rewrite_image_sources(html, "posts/2024");
        assert_eq!(
            out,
            r#"<img data-src="./lazy.png" src="posts/2024/diagram.png">"#
        );
        assert_eq!(image_sources(&out), vec!["posts/2024/diagram.png"]);
        assert_eq!(image_sources(r#"<img data-src="a.png">"#), Vec::<String>::new());
    }

    #[test]
    fn test_rewrite_ignores_escaped_code() {
        let html = r#"<pre><code>&lt;img src="./a.png"&gt;</code></pre>"#;
        assert_eq!(rewrite_image_sources(html, "posts"), html);
    }

    #[test]
    fn test_enable_lightbox() {
        let out = enable_lightbox(r#"<img src="a.png" alt="a" />"#);
        assert_eq!(out, r#"<img loading="lazy" data-lightbox src="a.png" alt="a" />"#);
        assert_eq!(enable_lightbox(&out), out);

        let eager = enable_lightbox(r#"<img loading="eager" src="a.png">"#);
        assert!(eager.contains(r#"loading="eager""#));
        assert!(!eager.contains("lazy"));
    }
}
