//! Render one detail page to stdout

use anyhow::Result;

use crate::meta::PageHead;
use crate::page::PostPage;
use crate::render::{DetailRequest, DetailView};
use crate::Folio;

/// Render the post a query string addresses, e.g. `?id=a1`
///
/// Prints the head markup followed by the body. Errors print the
/// reader-facing message instead.
pub async fn run(folio: &Folio, query: &str) -> Result<()> {
    println!("{}", render_query(folio, query).await);
    Ok(())
}

pub async fn render_query(folio: &Folio, query: &str) -> String {
    let request = DetailRequest::from_query(query);
    let mut page = PostPage::new(PageHead::new(&folio.config.title));

    let repo = match folio.load_posts().await {
        Ok(repo) => repo,
        Err(e) => return page.fail(e).user_message().to_string(),
    };

    match page.show(&folio.renderer(), &repo, &request).await {
        Ok(view) => format!("{}\n\n{}", page.head().to_html(), body_text(&view)),
        Err(e) => e.user_message().to_string(),
    }
}

fn body_text(view: &DetailView) -> String {
    let mut out = format!("{}\n{}\n", view.header.title, view.header.date);
    match (view.body.html(), view.body.error_message()) {
        (Some(html), _) => out.push_str(html),
        (None, Some(message)) => out.push_str(message),
        (None, None) => {}
    }
    out
}
