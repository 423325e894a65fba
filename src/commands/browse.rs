//! Interactive search over the post index
//!
//! Each stdin line is treated as the current contents of the search box.
//! Lines go through the search debouncer, so only settled input filters the
//! list. `:cat <key>` switches the category filter immediately.

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_stream::wrappers::LinesStream;
use tokio_stream::StreamExt;

use crate::content::{Post, ALL_CATEGORIES};
use crate::page::{BlogEvent, BlogPage, SearchDebouncer};
use crate::Folio;

const CATEGORY_COMMAND: &str = ":cat";

/// Run an interactive session on stdin
pub async fn run(folio: &Folio) -> Result<()> {
    let repo = folio.load_posts().await?;
    let page = BlogPage::new(repo.shared());
    let debouncer = SearchDebouncer::from_millis(folio.config.search_debounce_ms);

    println!(
        "{} posts loaded. Type to search, `{} <key>` to filter by category.",
        repo.len(),
        CATEGORY_COMMAND
    );

    let stdin = BufReader::new(tokio::io::stdin());
    session(page, stdin, debouncer, |event, view| {
        println!("{}", describe(event, view));
        for post in view {
            println!("  {} [{}]", post.title, post.id);
        }
    })
    .await;

    Ok(())
}

/// Parse one input line into a page event
pub fn parse_line(line: &str) -> BlogEvent {
    match line.trim().strip_prefix(CATEGORY_COMMAND) {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => {
            let key = match rest.trim() {
                "" => ALL_CATEGORIES,
                key => key,
            };
            BlogEvent::SelectCategory(key.to_string())
        }
        _ => BlogEvent::Search(line.to_string()),
    }
}

fn describe(event: &BlogEvent, view: &[&Post]) -> String {
    match event {
        BlogEvent::SelectCategory(key) => format!("category {:?}: {} posts", key, view.len()),
        BlogEvent::Search(term) => format!("search {:?}: {} posts", term.trim(), view.len()),
    }
}

/// Drive a blog page from line input until the input closes
///
/// Returns the page in its final state.
pub async fn session<R, F>(
    mut page: BlogPage,
    input: R,
    debouncer: SearchDebouncer,
    mut on_view: F,
) -> BlogPage
where
    R: AsyncBufRead + Unpin + Send + 'static,
    F: FnMut(&BlogEvent, &[&Post]),
{
    let (event_tx, mut event_rx) = mpsc::channel::<BlogEvent>(16);
    let (search_tx, search_rx) = mpsc::channel::<String>(16);
    let mut settled = debouncer.spawn(search_rx);

    let category_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut lines = LinesStream::new(input.lines());
        while let Some(line) = lines.next().await {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::error!("Failed to read input: {}", e);
                    break;
                }
            };
            let sent = match parse_line(&line) {
                BlogEvent::SelectCategory(key) => {
                    category_tx.send(BlogEvent::SelectCategory(key)).await.is_ok()
                }
                BlogEvent::Search(term) => search_tx.send(term).await.is_ok(),
            };
            if !sent {
                break;
            }
        }
    });

    tokio::spawn(async move {
        while let Some(term) = settled.recv().await {
            if event_tx.send(BlogEvent::Search(term)).await.is_err() {
                break;
            }
        }
    });

    while let Some(event) = event_rx.recv().await {
        let view = page.handle(event.clone());
        on_view(&event, &view);
    }

    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn page() -> BlogPage {
        let mut a1 = Post::new("a1", "SQL Injection 101", "2024-01-05");
        a1.categories = vec!["Web Security".to_string()];
        let mut a2 = Post::new("a2", "Firewalls", "2024-02-01");
        a2.categories = vec!["Network".to_string()];
        BlogPage::new(Arc::from(vec![a1, a2]))
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(
            parse_line(":cat web-security"),
            BlogEvent::SelectCategory("web-security".to_string())
        );
        assert_eq!(parse_line(":cat"), BlogEvent::SelectCategory("all".to_string()));
        assert_eq!(parse_line("sql"), BlogEvent::Search("sql".to_string()));
        assert_eq!(parse_line(":category"), BlogEvent::Search(":category".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_applies_settled_input() {
        let input: &'static [u8] = b"s\nsq\nsql\n:cat web-security\n";
        let mut searches = Vec::new();

        let page = session(page(), input, SearchDebouncer::default(), |event, _| {
            if let BlogEvent::Search(term) = event {
                searches.push(term.clone());
            }
        })
        .await;

        assert_eq!(searches.last().map(String::as_str), Some("sql"));
        assert_eq!(page.category(), "web-security");
        let ids: Vec<_> = page.view().into_iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a1"]);
    }
}
