//! Site building orchestration.
//!
//! Coordinates content compilation and asset processing.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── Collection::load() ──► validate every post's frontmatter
//!     │
//!     ├── rayon::join
//!     │       ├── compile each post ──► public/…/index.html
//!     │       └── copy assets (content tree + assets dir)
//!     │
//!     └── build_sitemap()
//! ```

use crate::{
    compiler::compile_post,
    config::SiteConfig,
    content::Collection,
    generator::sitemap::build_sitemap,
    log,
};
use anyhow::{Context, Result, anyhow};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
};
use walkdir::WalkDir;

/// Build the entire site, processing content and assets in parallel.
///
/// If `config.build.clean` is true, clears the entire output directory first.
pub fn build_site(config: &SiteConfig) -> Result<()> {
    let output = &config.build.output;

    prepare_output_dir(output, config.build.clean)?;

    let collection = Collection::load(config)?;
    log!("content"; "{} posts", collection.posts.len());

    let asset_files = collect_asset_files(config);
    let has_error = AtomicBool::new(false);

    let (posts_result, assets_result) = rayon::join(
        || {
            collection.posts.par_iter().try_for_each(|post| {
                if has_error.load(Ordering::Relaxed) {
                    return Err(anyhow!("Aborted"));
                }
                if let Err(e) = compile_post(post, config) {
                    if !has_error.swap(true, Ordering::Relaxed) {
                        log!("error"; "{}: {:#}", post.paths.relative, e);
                    }
                    return Err(anyhow!("Build failed"));
                }
                Ok(())
            })
        },
        || {
            asset_files.par_iter().try_for_each(|(source, dest)| {
                if has_error.load(Ordering::Relaxed) {
                    return Err(anyhow!("Aborted"));
                }
                if let Err(e) = copy_asset(source, dest) {
                    if !has_error.swap(true, Ordering::Relaxed) {
                        log!("error"; "{}: {:#}", source.display(), e);
                    }
                    return Err(anyhow!("Build failed"));
                }
                Ok(())
            })
        },
    );

    posts_result?;
    assets_result?;

    build_sitemap(config, &collection.posts)?;
    log_build_result(output)?;

    Ok(())
}

/// Ensure the output directory exists, clearing it first when `clean` is set.
fn prepare_output_dir(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))?;
    Ok(())
}

/// Collect (source, dest) pairs for every asset to copy.
///
/// Non-markdown files in the content tree keep their relative location; the
/// assets directory is mirrored under the output root.
fn collect_asset_files(config: &SiteConfig) -> Vec<(PathBuf, PathBuf)> {
    let output = &config.build.output;
    let mut files = Vec::new();

    for dir in [&config.build.content, &config.build.assets] {
        if !dir.exists() {
            continue;
        }
        for entry in WalkDir::new(dir)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
        {
            let source = entry.into_path();
            if crate::compiler::page::is_content_file(&source) {
                continue;
            }
            if let Ok(relative) = source.strip_prefix(dir) {
                files.push((source.clone(), output.join(relative)));
            }
        }
    }

    files
}

/// Copy a single asset file, creating parent directories as needed.
fn copy_asset(source: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::copy(source, dest)
        .with_context(|| format!("Failed to copy to {}", dest.display()))?;
    Ok(())
}

/// Log build result based on output directory contents
fn log_build_result(output: &Path) -> Result<()> {
    let file_count = fs::read_dir(output)?.filter_map(Result::ok).count();

    if file_count == 0 {
        log!("warn"; "output is empty, check if content has markdown files");
    } else {
        log!("build"; "done");
    }

    Ok(())
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
        config.build.sitemap.path = root.join("public/sitemap.xml");
        config
    }

    const POST: &str = "---\ntitle: Hello\npublish_date: 15-06-2024\n---\n# Hello\n";

    #[test]
    fn test_build_site_end_to_end() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "content/index.md", POST);
        write(tmp.path(), "content/posts/first.md", POST);
        write(tmp.path(), "content/posts/pic.png", "png bytes");
        write(tmp.path(), "assets/styles/main.css", "body {}");

        let config = config_for(tmp.path());
        build_site(&config).unwrap();

        let out = tmp.path().join("public");
        assert!(out.join("index.html").exists());
        assert!(out.join("posts/first/index.html").exists());
        assert!(out.join("posts/pic.png").exists());
        assert!(out.join("styles/main.css").exists());
        assert!(out.join("sitemap.xml").exists());

        let html = fs::read_to_string(out.join("posts/first/index.html")).unwrap();
        assert!(html.contains("Hello"));
    }

    #[test]
    fn test_build_site_fails_on_invalid_post() {
        let tmp = tempfile::tempdir().unwrap();
        write(
            tmp.path(),
            "content/bad.md",
            "---\ntitle: Bad\npublish_date: nope\n---\n",
        );

        let config = config_for(tmp.path());
        assert!(build_site(&config).is_err());
    }

    #[test]
    fn test_clean_removes_stale_output() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "content/index.md", POST);
        write(tmp.path(), "public/stale.html", "old");

        let mut config = config_for(tmp.path());
        config.build.clean = true;
        build_site(&config).unwrap();

        assert!(!tmp.path().join("public/stale.html").exists());
        assert!(tmp.path().join("public/index.html").exists());
    }

    #[test]
    fn test_sitemap_disabled_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "content/index.md", POST);

        let mut config = config_for(tmp.path());
        config.build.sitemap.enable = false;
        build_site(&config).unwrap();

        assert!(!tmp.path().join("public/sitemap.xml").exists());
    }

    #[test]
    fn test_collect_asset_files_skips_markdown() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "content/a.md", POST);
        write(tmp.path(), "content/b.png", "x");

        let config = config_for(tmp.path());
        let files = collect_asset_files(&config);

        assert_eq!(files.len(), 1);
        assert!(files[0].0.ends_with("b.png"));
        assert!(files[0].1.ends_with("public/b.png"));
    }
}
