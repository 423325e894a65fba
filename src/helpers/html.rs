//! HTML helper functions

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render a `<meta>` tag keyed by `name` or `property`
pub fn meta_tag(attr: &str, key: &str, content: &str) -> String {
    format!(
        r#"<meta {}="{}" content="{}">"#,
        attr,
        html_escape(key),
        html_escape(content)
    )
}

/// Meta generator tag
pub fn meta_generator() -> String {
    format!(
        r#"<meta name="generator" content="folio-rs {}">"#,
        env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_meta_tag() {
        assert_eq!(
            meta_tag("property", "og:title", "A \"quoted\" title"),
            r#"<meta property="og:title" content="A &quot;quoted&quot; title">"#
        );
    }
}
