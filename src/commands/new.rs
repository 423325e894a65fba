//! Create a new post

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;

use crate::content::Post;
use crate::Folio;

/// Options for a new post
#[derive(Debug, Clone, Default)]
pub struct NewPost<'a> {
    pub title: &'a str,
    /// Explicit id; derived from the title when absent
    pub id: Option<&'a str>,
    pub categories: Vec<String>,
    pub excerpt: Option<&'a str>,
}

/// Scaffold a Markdown body and append its record to the post index
///
/// Returns the new post's id.
pub fn create_post(folio: &Folio, options: &NewPost<'_>) -> Result<String> {
    let id = match options.id {
        Some(id) => id.to_string(),
        None => slug::slugify(options.title),
    };
    if id.is_empty() {
        anyhow::bail!("Cannot derive a post id from title {:?}", options.title);
    }

    let index_path = folio.index_path();
    let mut records: Vec<Value> = if index_path.exists() {
        let raw = fs::read_to_string(&index_path)?;
        serde_json::from_str(&raw).with_context(|| format!("Malformed index {:?}", index_path))?
    } else {
        Vec::new()
    };

    if records
        .iter()
        .any(|r| r.get("id").and_then(Value::as_str) == Some(id.as_str()))
    {
        anyhow::bail!("A post with id {:?} already exists", id);
    }

    let file_name = format!("{}.md", id);
    let body_path = folio.posts_dir().join(&file_name);
    if body_path.exists() {
        anyhow::bail!("File already exists: {:?}", body_path);
    }

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let mut post = Post::new(&id, options.title, &today);
    post.categories = options.categories.clone();
    post.excerpt = options.excerpt.unwrap_or_default().to_string();
    post.content_file = Some(file_name);
    records.push(serde_json::to_value(&post)?);

    fs::create_dir_all(folio.posts_dir())?;
    fs::write(&body_path, format!("# {}\n\n", options.title))?;

    if let Some(parent) = index_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&index_path, serde_json::to_string_pretty(&records)?)?;

    println!("Created: {:?}", body_path);
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PostRepository;
    use tempfile::TempDir;

    #[test]
    fn test_create_post_appends_record() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        let id = create_post(
            &folio,
            &NewPost {
                title: "SQL Injection 101",
                categories: vec!["Web Security".to_string()],
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(id, "sql-injection-101");
        assert!(folio.posts_dir().join("sql-injection-101.md").exists());

        let raw = fs::read_to_string(folio.index_path()).unwrap();
        let repo = PostRepository::parse(&raw).unwrap();
        let post = repo.find("sql-injection-101").unwrap();
        assert_eq!(post.categories, vec!["Web Security"]);
        assert_eq!(post.content_file.as_deref(), Some("sql-injection-101.md"));
    }

    #[test]
    fn test_create_post_keeps_unknown_fields() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(
            folio.index_path(),
            r#"[{"id": "a1", "title": "One", "date": "2024-01-05", "featured": true}]"#,
        )
        .unwrap();

        create_post(
            &folio,
            &NewPost {
                title: "Two",
                id: Some("a2"),
                ..Default::default()
            },
        )
        .unwrap();

        let raw = fs::read_to_string(folio.index_path()).unwrap();
        assert!(raw.contains(r#""featured": true"#));

        let duplicate = create_post(
            &folio,
            &NewPost {
                title: "Again",
                id: Some("a1"),
                ..Default::default()
            },
        );
        assert!(duplicate.is_err());
    }
}
