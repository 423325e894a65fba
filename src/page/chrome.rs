//! Per-page chrome for rendered post bodies: markdown styles and the
//! image enlargement overlay

/// Presentational rules scoped to the post content area
pub const MARKDOWN_STYLES: &str = r#"<style id="markdown-styles">
#post-content h1, #post-content h2, #post-content h3 { margin: 1.6em 0 0.6em; line-height: 1.3; }
#post-content p { margin: 0 0 1em; line-height: 1.7; }
#post-content a { color: #00d9ff; text-decoration: underline; }
#post-content ul, #post-content ol { margin: 0 0 1em 1.5em; }
#post-content blockquote { margin: 1em 0; padding: 0.5em 1em; border-left: 4px solid #00d9ff; background: rgba(0, 217, 255, 0.06); }
#post-content code { font-family: "Fira Code", monospace; background: rgba(255, 255, 255, 0.08); padding: 0.1em 0.3em; border-radius: 3px; }
#post-content pre { overflow-x: auto; padding: 1em; border-radius: 6px; background: #1e1e2e; }
#post-content pre code { background: none; padding: 0; }
#post-content figure.highlight { margin: 1em 0; }
#post-content table { border-collapse: collapse; width: 100%; margin: 1em 0; }
#post-content th, #post-content td { border: 1px solid #333; padding: 0.4em 0.8em; }
#post-content img { max-width: 100%; height: auto; cursor: zoom-in; border-radius: 6px; }
#post-content hr { border: 0; border-top: 1px solid #333; margin: 2em 0; }
#img-lightbox { display: none; position: fixed; inset: 0; z-index: 1000; background: rgba(0, 0, 0, 0.85); align-items: center; justify-content: center; cursor: zoom-out; }
#img-lightbox.open { display: flex; }
#img-lightbox img { max-width: 90vw; max-height: 90vh; box-shadow: 0 0 24px rgba(0, 0, 0, 0.6); }
</style>"#;

/// Shared overlay element, one per page
pub const LIGHTBOX_OVERLAY: &str =
    r#"<div id="img-lightbox" role="dialog" aria-hidden="true"><img alt=""></div>"#;

/// Opens the overlay on content image clicks, closes on click or Escape
pub const LIGHTBOX_SCRIPT: &str = r#"<script>
(function() {
    var overlay = document.getElementById('img-lightbox');
    if (!overlay) return;
    var full = overlay.querySelector('img');
    function close() {
        overlay.classList.remove('open');
        overlay.setAttribute('aria-hidden', 'true');
        full.removeAttribute('src');
    }
    document.addEventListener('click', function(e) {
        var img = e.target.closest('#post-content img[data-lightbox]');
        if (img) {
            full.src = img.currentSrc || img.src;
            full.alt = img.alt || '';
            overlay.classList.add('open');
            overlay.setAttribute('aria-hidden', 'false');
        }
    });
    overlay.addEventListener('click', close);
    document.addEventListener('keydown', function(e) {
        if (e.key === 'Escape') close();
    });
})();
</script>"#;

/// Styles, overlay and script as one block
pub fn chrome_html() -> String {
    [MARKDOWN_STYLES, LIGHTBOX_OVERLAY, LIGHTBOX_SCRIPT].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chrome_has_single_overlay() {
        let html = chrome_html();
        assert_eq!(html.matches(r#"id="img-lightbox""#).count(), 1);
        assert!(html.contains("90vw"));
        assert!(html.contains("Escape"));
    }
}
