//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::Folio;

const CONFIG: &str = r#"# Site
title: 0xos4ma
subtitle: ''
description: Cybersecurity insights
author: ''
language: en

# URL
url: http://example.com
root: /
detail_dir: post

# Content
index_path: data/posts.json
posts_dir: posts
public_dir: public

# Display
date_format: MMM D, YYYY
latest_posts: 3
search_debounce_ms: 300

highlight:
  enable: true
  theme: base16-ocean.dark
  line_number: false
"#;

const SAMPLE_POST: &str = r#"# Hello World

Welcome to your new site. Every post is a Markdown file under `posts/`
with a record in `data/posts.json`.

## Writing a post

```bash
$ folio new "My New Post" --category "Web Security"
```

Images next to a post can be referenced relatively:

![Example](./images/example.png)

## Previewing

```bash
$ folio server
```
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir.join("data"))?;
    fs::create_dir_all(target_dir.join("posts/images"))?;

    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("Site already initialized: {:?}", config_path);
    }
    fs::write(&config_path, CONFIG)?;

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let index = serde_json::json!([{
        "id": "hello-world",
        "title": "Hello World",
        "excerpt": "A first post to show how the site fits together.",
        "date": today,
        "categories": ["General"],
        "tags": ["welcome"],
        "contentFile": "hello-world.md",
    }]);
    fs::write(
        target_dir.join("data/posts.json"),
        serde_json::to_string_pretty(&index)?,
    )?;

    fs::write(target_dir.join("posts/hello-world.md"), SAMPLE_POST)?;

    Ok(())
}

/// Run the init command with an existing site
pub fn run(folio: &Folio) -> Result<()> {
    init_site(&folio.base_dir)
}
