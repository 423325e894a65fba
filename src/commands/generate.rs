//! Generate static files

use anyhow::Result;
use notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::{new_debouncer, DebounceEventResult};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::generator::{GenerateSummary, Generator};
use crate::Folio;

/// Generate the static site
pub async fn run(folio: &Folio) -> Result<()> {
    let start = std::time::Instant::now();

    let summary = Generator::new(folio)?.generate().await?;
    report(&summary);

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

fn report(summary: &GenerateSummary) {
    if summary.index_failed {
        tracing::warn!("Post index could not be loaded; wrote error pages only");
        return;
    }
    tracing::info!(
        "Wrote {} posts, {} category pages, {} assets",
        summary.posts,
        summary.categories,
        summary.assets
    );
    if summary.content_errors > 0 {
        tracing::warn!("{} posts have no renderable body", summary.content_errors);
    }
}

/// Paths whose changes trigger a rebuild
///
/// An index at the site root is watched on its own, since watching the
/// root recursively would also watch the output directory.
pub fn watch_paths(folio: &Folio) -> Vec<(PathBuf, RecursiveMode)> {
    let mut paths = vec![(folio.posts_dir(), RecursiveMode::Recursive)];
    let index_path = folio.index_path();
    match index_path.parent() {
        Some(data_dir) if data_dir != folio.base_dir && !folio.public_dir.starts_with(data_dir) => {
            paths.push((data_dir.to_path_buf(), RecursiveMode::Recursive));
        }
        _ => paths.push((index_path.clone(), RecursiveMode::NonRecursive)),
    }
    paths.push((folio.config_path(), RecursiveMode::NonRecursive));
    paths
        .into_iter()
        .filter(|(path, _)| path.exists())
        .collect()
}

/// Watch for file changes and regenerate
pub async fn watch(folio: &Folio) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut debouncer = new_debouncer(
        Duration::from_millis(500),
        move |res: DebounceEventResult| {
            let _ = tx.send(res);
        },
    )?;

    for (path, mode) in watch_paths(folio) {
        debouncer.watcher().watch(&path, mode)?;
        tracing::debug!("Watching: {:?}", path);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    while let Some(res) = rx.recv().await {
        match res {
            Ok(events) if events.iter().any(|e| is_relevant(folio, &e.path)) => {
                tracing::info!("File changed, regenerating...");
                if let Err(e) = run(folio).await {
                    tracing::error!("Generation failed: {}", e);
                }
            }
            Ok(_) => {}
            Err(e) => tracing::error!("Watch error: {:?}", e),
        }
    }

    Ok(())
}

/// Skip generated output, editor droppings and VCS metadata
pub fn is_relevant(folio: &Folio, path: &Path) -> bool {
    if path.starts_with(&folio.public_dir) {
        return false;
    }
    let path_str = path.to_string_lossy();
    !path_str.contains(".git")
        && !path_str.contains(".DS_Store")
        && !path_str.ends_with('~')
        && !path_str.ends_with(".swp")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_is_relevant() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        let root = dir.path();

        assert!(is_relevant(&folio, &root.join("posts/2024/sqli.md")));
        assert!(is_relevant(&folio, &root.join("data/posts.json")));
        assert!(!is_relevant(&folio, &root.join("posts/.git/index")));
        assert!(!is_relevant(&folio, &root.join("posts/sqli.md~")));
        assert!(!is_relevant(&folio, &root.join("posts/.sqli.md.swp")));
        assert!(!is_relevant(&folio, &root.join("public/post/a1/index.html")));
    }

    #[test]
    fn test_watch_paths_skip_missing() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("posts")).unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        let paths = watch_paths(&folio);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].0, dir.path().join("posts"));
    }

    #[test]
    fn test_watch_paths_root_index_stays_out_of_output() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("posts")).unwrap();
        fs::create_dir_all(root.join("public")).unwrap();
        fs::write(root.join("_config.yml"), "index_path: posts.json\n").unwrap();
        fs::write(root.join("posts.json"), "[]").unwrap();
        let folio = Folio::new(root).unwrap();

        let paths = watch_paths(&folio);
        assert!(paths
            .iter()
            .all(|(path, mode)| path != root || *mode == RecursiveMode::NonRecursive));
        assert!(paths.contains(&(root.join("posts.json"), RecursiveMode::NonRecursive)));
        assert!(paths
            .iter()
            .filter(|(_, mode)| *mode == RecursiveMode::Recursive)
            .all(|(path, _)| !folio.public_dir.starts_with(path)));
    }
}
