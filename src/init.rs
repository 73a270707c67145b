//! Site initialization module.
//!
//! Creates new site structure with default configuration.

use crate::config::SiteConfig;
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

/// Default config filename
const CONFIG_FILE: &str = "inka.toml";

/// Default site directory structure
const SITE_DIRS: &[&str] = &[
    "content/posts",
    "assets/images",
    "assets/styles",
    "assets/scripts",
];

/// A starter post demonstrating the frontmatter schema
const SAMPLE_POST: &str = r#"---
title: Hello, world
description: The first post on this blog.
publish_date: 01-01-2026
---

Write your post here. Dates in frontmatter use the `DD-MM-YYYY` format.
"#;

/// Create a new site with default structure
pub fn new_site(config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();

    // Safety check: if no name was provided (init in current dir),
    // the directory must be completely empty
    if !has_name && !is_dir_empty(root)? {
        bail!(
            "Current directory is not empty. Use `inka init <SITE_NAME>` to create in a subdirectory."
        );
    }

    init_site_structure(root)?;
    init_default_config(root)?;
    init_sample_post(root)?;
    init_ignored_files(root, &["/public"])?;

    crate::log!("init"; "created site at {}", root.display());
    Ok(())
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Write default configuration file
fn init_default_config(root: &Path) -> Result<()> {
    let content = toml::to_string_pretty(&SiteConfig::default())?;
    fs::write(root.join(CONFIG_FILE), content)?;
    Ok(())
}

/// Create site directory structure
fn init_site_structure(root: &Path) -> Result<()> {
    for dir in SITE_DIRS {
        let path = root.join(dir);
        if path.exists() {
            bail!(
                "Path `{}` already exists. Try `inka init <SITE_NAME>` instead.",
                path.display()
            );
        }
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
    }
    Ok(())
}

/// Write the starter post
fn init_sample_post(root: &Path) -> Result<()> {
    fs::write(root.join("content/posts/hello-world.md"), SAMPLE_POST)?;
    Ok(())
}

/// Initialize .gitignore and .ignore files with specified patterns
fn init_ignored_files(root: &Path, patterns: &[&str]) -> Result<()> {
    let content = patterns.join("\n");

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        if !path.exists() {
            fs::write(&path, &content)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::frontmatter;
    use crate::content::schema::PostMeta;

    #[test]
    fn test_sample_post_passes_validation() {
        let (raw, _) = frontmatter::extract(SAMPLE_POST).unwrap();
        let meta = PostMeta::from_raw(raw.unwrap()).unwrap();
        assert_eq!(meta.title, "Hello, world");
        assert_eq!(meta.updated_date, None);
    }

    #[test]
    fn test_default_config_serializes() {
        let content = toml::to_string_pretty(&SiteConfig::default()).unwrap();
        // Round-trips through the strict deserializer
        let config = SiteConfig::from_str(&content).unwrap();
        assert!(config.build.minify);
    }

    #[test]
    fn test_init_site_structure() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("site");
        fs::create_dir_all(&root).unwrap();

        init_site_structure(&root).unwrap();
        init_default_config(&root).unwrap();
        init_sample_post(&root).unwrap();
        init_ignored_files(&root, &["/public"]).unwrap();

        assert!(root.join("content/posts/hello-world.md").exists());
        assert!(root.join("assets/images").is_dir());
        assert!(root.join("inka.toml").exists());
        assert_eq!(
            fs::read_to_string(root.join(".gitignore")).unwrap(),
            "/public"
        );
    }

    #[test]
    fn test_init_refuses_existing_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("site");
        fs::create_dir_all(root.join("content/posts")).unwrap();

        assert!(init_site_structure(&root).is_err());
    }

    #[test]
    fn test_is_dir_empty() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(is_dir_empty(tmp.path()).unwrap());
        assert!(is_dir_empty(&tmp.path().join("missing")).unwrap());

        fs::write(tmp.path().join("f"), "x").unwrap();
        assert!(!is_dir_empty(tmp.path()).unwrap());
    }
}
