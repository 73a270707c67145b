//! Content collection: discovery and validation of blog posts.
//!
//! The content directory is walked once; Markdown/MDX files become posts and
//! everything else is carried through as an asset. Every post's frontmatter
//! is extracted and normalized up front, so a build never starts with invalid
//! metadata. Validation is all-or-nothing per file: one bad field rejects the
//! post, one bad post fails the load.

pub mod date;
pub mod frontmatter;
pub mod schema;

use crate::{
    compiler::page::{self, PagePaths},
    config::SiteConfig,
};
use anyhow::{Context, Result, anyhow};
use rayon::prelude::*;
use schema::PostMeta;
use std::{cmp::Reverse, fs, path::PathBuf};
use walkdir::WalkDir;

/// A validated blog post.
#[derive(Debug, Clone)]
pub struct Post {
    /// Normalized frontmatter.
    pub meta: PostMeta,
    /// Output path and URL information.
    pub paths: PagePaths,
    /// Markdown body with frontmatter stripped.
    pub body: String,
}

/// All validated content, ordered newest-first.
#[derive(Debug, Default)]
pub struct Collection {
    pub posts: Vec<Post>,
    /// Non-markdown files found in the content tree, copied through verbatim.
    pub assets: Vec<PathBuf>,
}

impl Collection {
    /// Walk the content directory and validate every post.
    ///
    /// Fails on the first invalid post, naming the offending file.
    pub fn load(config: &SiteConfig) -> Result<Self> {
        let content_dir = &config.build.content;
        if !content_dir.exists() {
            return Err(anyhow!(
                "Content directory not found: {}",
                content_dir.display()
            ));
        }

        let mut sources = Vec::new();
        let mut assets = Vec::new();
        for entry in WalkDir::new(content_dir)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.into_path();
            if page::is_content_file(&path) {
                sources.push(path);
            } else {
                assets.push(path);
            }
        }

        let mut posts = sources
            .into_par_iter()
            .map(|path| load_post(path, config))
            .collect::<Result<Vec<_>>>()?;

        // Newest first; path as tiebreak keeps ordering deterministic
        posts.sort_by(|a, b| {
            (Reverse(a.meta.publish_date), &a.paths.relative)
                .cmp(&(Reverse(b.meta.publish_date), &b.paths.relative))
        });
        assets.sort();

        Ok(Self { posts, assets })
    }
}

/// Read, extract and normalize a single post.
fn load_post(source: PathBuf, config: &SiteConfig) -> Result<Post> {
    let text = fs::read_to_string(&source)
        .with_context(|| format!("Failed to read {}", source.display()))?;

    let (raw, body) =
        frontmatter::extract(&text).with_context(|| format!("{}", source.display()))?;
    let raw = raw.ok_or_else(|| anyhow!("{}: missing frontmatter block", source.display()))?;

    let meta =
        PostMeta::from_raw(raw).with_context(|| format!("{}: invalid metadata", source.display()))?;
    let paths = PagePaths::from_source(source, config)?;

    Ok(Post {
        meta,
        paths,
        body: body.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn config_for(root: &Path) -> SiteConfig {
        let mut config: SiteConfig = toml::from_str(
            r#"
            [base]
            title = "Test"
            description = "Test"
            url = "https://example.com"
        "#,
        )
        .unwrap();
        config.build.content = root.join("content");
        config.build.output = root.join("public");
        config.build.assets = root.join("assets");
        config
    }

    const POST_A: &str = "---\ntitle: Older\npublish_date: 01-01-2024\n---\nbody a\n";
    const POST_B: &str = "---\ntitle: Newer\npublish_date: 15-06-2024\n---\nbody b\n";

    #[test]
    fn test_load_orders_newest_first() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "content/posts/a.md", POST_A);
        write(tmp.path(), "content/posts/b.md", POST_B);

        let config = config_for(tmp.path());
        let collection = Collection::load(&config).unwrap();

        let titles: Vec<_> = collection
            .posts
            .iter()
            .map(|p| p.meta.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Newer", "Older"]);
    }

    #[test]
    fn test_load_same_date_orders_by_path() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "content/posts/b.md", POST_A);
        let a = POST_A.replace("Older", "Other");
        write(tmp.path(), "content/posts/a.md", &a);

        let config = config_for(tmp.path());
        let collection = Collection::load(&config).unwrap();

        let rel: Vec<_> = collection
            .posts
            .iter()
            .map(|p| p.paths.relative.as_str())
            .collect();
        assert_eq!(rel, vec!["posts/a", "posts/b"]);
    }

    #[test]
    fn test_load_partitions_assets() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "content/posts/a.md", POST_A);
        write(tmp.path(), "content/posts/diagram.png", "not really a png");

        let config = config_for(tmp.path());
        let collection = Collection::load(&config).unwrap();

        assert_eq!(collection.posts.len(), 1);
        assert_eq!(collection.assets.len(), 1);
        assert!(collection.assets[0].ends_with("posts/diagram.png"));
    }

    #[test]
    fn test_load_strips_frontmatter_from_body() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "content/posts/a.md", POST_A);

        let config = config_for(tmp.path());
        let collection = Collection::load(&config).unwrap();

        assert_eq!(collection.posts[0].body, "body a\n");
    }

    #[test]
    fn test_load_fails_on_invalid_date() {
        let tmp = tempfile::tempdir().unwrap();
        write(
            tmp.path(),
            "content/posts/bad.md",
            "---\ntitle: Bad\npublish_date: 2024-06-15\n---\nbody\n",
        );

        let config = config_for(tmp.path());
        let err = Collection::load(&config).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("bad.md"));
        assert!(message.contains("invalid date format"));
    }

    #[test]
    fn test_load_fails_on_missing_title() {
        let tmp = tempfile::tempdir().unwrap();
        write(
            tmp.path(),
            "content/posts/untitled.md",
            "---\npublish_date: 15-06-2024\n---\nbody\n",
        );

        let config = config_for(tmp.path());
        let err = Collection::load(&config).unwrap_err();
        assert!(format!("{err:#}").contains("title"));
    }

    #[test]
    fn test_load_fails_on_missing_frontmatter() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "content/posts/plain.md", "# no frontmatter\n");

        let config = config_for(tmp.path());
        let err = Collection::load(&config).unwrap_err();
        assert!(format!("{err:#}").contains("missing frontmatter"));
    }

    #[test]
    fn test_load_missing_content_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_for(tmp.path());
        assert!(Collection::load(&config).is_err());
    }

    #[test]
    fn test_load_empty_content_dir() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("content")).unwrap();

        let config = config_for(tmp.path());
        let collection = Collection::load(&config).unwrap();
        assert!(collection.posts.is_empty());
        assert!(collection.assets.is_empty());
    }
}
