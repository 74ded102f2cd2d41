use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use fleet_shared::{blog::reading_time_label, BlogCategory, BlogPost, Car, FleetDataStore};
use gray_matter::{engine::YAML, Matter};
use pulldown_cmark::{html, Options, Parser};
use serde::Deserialize;
use tokio::fs;

pub const CARS_FILE: &str = "cars.json";
pub const BLOG_DIR: &str = "blog";

#[derive(Debug, Deserialize)]
struct Frontmatter {
    pub title: String,
    pub excerpt: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default = "uncategorized")]
    pub category: BlogCategory,
    #[serde(default)]
    pub tags: Vec<String>,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub modified_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub featured_image: String,
    #[serde(default)]
    pub author: Option<String>,
}

fn uncategorized() -> BlogCategory {
    BlogCategory::Uncategorized
}

/// Load the fleet and the blog from a content directory
pub async fn load_content_dir(content_dir: &Path) -> Result<FleetDataStore> {
    if !content_dir.exists() {
        anyhow::bail!("Content directory does not exist: {}", content_dir.display());
    }

    let cars_path = content_dir.join(CARS_FILE);
    let raw = fs::read_to_string(&cars_path)
        .await
        .with_context(|| format!("Failed to read {}", cars_path.display()))?;
    let cars: Vec<Car> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {}", cars_path.display()))?;

    let posts = scan_posts(&content_dir.join(BLOG_DIR)).await?;
    Ok(FleetDataStore::from_parts(cars, posts))
}

/// Scan `blog/*.md`; files that fail to parse are skipped with a warning.
pub async fn scan_posts(blog_dir: &Path) -> Result<Vec<BlogPost>> {
    if !blog_dir.exists() {
        tracing::warn!("No blog directory at {}", blog_dir.display());
        return Ok(Vec::new());
    }

    let mut posts = Vec::new();
    let mut entries = fs::read_dir(blog_dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        let file_path = entry.path();

        // Only process .md files
        if file_path.extension().and_then(|s| s.to_str()) != Some("md") {
            continue;
        }

        // "best-roads.md" -> "best-roads"
        let Some(id) = file_path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
            continue;
        };

        match parse_post(&file_path, &id).await {
            Ok(post) => posts.push(post),
            Err(e) => {
                tracing::warn!("Failed to parse {}: {:#}", file_path.display(), e);
            },
        }
    }

    // Newest first
    posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));

    Ok(posts)
}

async fn parse_post(file_path: &Path, id: &str) -> Result<BlogPost> {
    let content = fs::read_to_string(file_path)
        .await
        .context("Failed to read file")?;

    let matter = Matter::<YAML>::new();
    let parsed = matter.parse(&content);

    let frontmatter: Frontmatter = parsed
        .data
        .ok_or_else(|| anyhow::anyhow!("No frontmatter found"))?
        .deserialize()
        .context("Failed to deserialize frontmatter")?;

    Ok(BlogPost {
        id: id.to_string(),
        slug: frontmatter.slug.unwrap_or_else(|| id.to_string()),
        title: frontmatter.title,
        excerpt: frontmatter.excerpt,
        reading_time: reading_time_label(&parsed.content),
        content: parsed.content,
        featured_image: frontmatter.featured_image,
        published_at: frontmatter.published_at,
        modified_at: frontmatter.modified_at,
        category: frontmatter.category,
        tags: frontmatter.tags,
        author: frontmatter.author,
    })
}

/// Render a post body to HTML
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use std::fs as std_fs;

    use tempfile::TempDir;

    use super::*;

    const POST: &str = "---\n\
title: Night Drives\n\
excerpt: Sheikh Zayed Road after dark\n\
category: dubai-guide\n\
tags: [Dubai, Night]\n\
published_at: \"2024-05-01T20:00:00Z\"\n\
---\n\
## Route\n\nStart at the Marina.\n";

    fn write_content(dir: &Path) {
        let cars = fleet_shared::FleetDataStore::bundled()
            .expect("bundled data")
            .cars()
            .iter()
            .take(3)
            .cloned()
            .collect::<Vec<_>>();
        std_fs::write(dir.join(CARS_FILE), serde_json::to_string(&cars).expect("json"))
            .expect("write cars");
        std_fs::create_dir(dir.join(BLOG_DIR)).expect("blog dir");
        std_fs::write(dir.join(BLOG_DIR).join("night-drives.md"), POST).expect("write post");
        std_fs::write(dir.join(BLOG_DIR).join("broken.md"), "no front matter").expect("write");
        std_fs::write(dir.join(BLOG_DIR).join("notes.txt"), "ignored").expect("write");
    }

    #[tokio::test]
    async fn loads_cars_and_front_matter_posts() {
        let dir = TempDir::new().expect("temp dir");
        write_content(dir.path());

        let store = load_content_dir(dir.path()).await.expect("load content");
        assert_eq!(store.cars().len(), 3);
        assert_eq!(store.posts().len(), 1);

        let post = &store.posts()[0];
        assert_eq!(post.slug, "night-drives");
        assert_eq!(post.category, BlogCategory::DubaiGuide);
        assert_eq!(post.tags, vec!["Dubai", "Night"]);
        assert_eq!(post.reading_time, "1 min read");
        assert!(post.content.contains("Start at the Marina."));
    }

    #[tokio::test]
    async fn missing_content_dir_is_an_error() {
        let dir = TempDir::new().expect("temp dir");
        let err = load_content_dir(&dir.path().join("absent")).await.unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn renders_headings_and_tables() {
        let html = render_markdown("## Hi\n\n| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<h2>Hi</h2>"));
        assert!(html.contains("<table>"));
    }
}
