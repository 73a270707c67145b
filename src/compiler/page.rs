//! Output path and URL mapping for content pages.
//!
//! `PagePaths` is the single source of truth for where a post's HTML lands
//! and which URL it is served from.
//!
//! # Path Mapping Examples
//!
//! | Source | relative | html |
//! |--------|----------|------|
//! | `content/posts/hello.md` | `posts/hello` | `public/posts/hello/index.html` |
//! | `content/index.md` | `index` | `public/index.html` |

use crate::{config::SiteConfig, utils::slug::slugify_path};
use anyhow::{Result, anyhow};
use std::path::{Path, PathBuf};

/// File extensions treated as content pages.
pub const CONTENT_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Path information for a page.
#[derive(Debug, Clone)]
pub struct PagePaths {
    /// Source .md/.mdx file path
    pub source: PathBuf,
    /// Generated HTML file path
    pub html: PathBuf,
    /// Relative path without extension (for logging)
    pub relative: String,
    /// URL path component (e.g., `/posts/hello/`)
    pub url_path: String,
    /// Full URL including base (e.g., `https://example.com/posts/hello/`)
    pub full_url: String,
}

impl PagePaths {
    /// Compute output paths for a content file.
    ///
    /// # Errors
    ///
    /// Returns error if the file is not in the content directory or is not a
    /// Markdown/MDX file.
    pub fn from_source(source: PathBuf, config: &SiteConfig) -> Result<Self> {
        let content_dir = &config.build.content;
        let output_dir = &config.build.output;
        let base_url = config
            .base
            .url
            .as_deref()
            .unwrap_or_default()
            .trim_end_matches('/');

        // Strip content dir and markdown extension
        let stripped = source
            .strip_prefix(content_dir)
            .map_err(|_| anyhow!("File is not in content directory: {}", source.display()))?
            .to_str()
            .ok_or_else(|| anyhow!("Invalid path encoding"))?;

        let relative = CONTENT_EXTENSIONS
            .iter()
            .find_map(|ext| stripped.strip_suffix(&format!(".{ext}")))
            .ok_or_else(|| anyhow!("Not a markdown file: {}", source.display()))?
            .to_owned();

        // Special case: root index.md → public/index.html, not public/index/index.html
        let is_root_index = relative == "index";

        let html = if is_root_index {
            output_dir.clone()
        } else {
            output_dir.join(slugify_path(Path::new(&relative), config))
        };
        let html = html.join("index.html");

        // Compute URL path from the final HTML path to ensure consistency
        let full_path_url = url_from_output_path(&html, config)?;

        // Remove "index.html" for pretty URLs
        let url_path = if full_path_url.ends_with("/index.html") {
            full_path_url.trim_end_matches("index.html").to_string()
        } else {
            full_path_url
        };

        let full_url = format!("{base_url}{url_path}");

        Ok(Self {
            source,
            html,
            relative,
            url_path,
            full_url,
        })
    }
}

/// Generate a URL path from an output file path.
///
/// Handles path prefix stripping and cross-platform separators.
pub fn url_from_output_path(path: &Path, config: &SiteConfig) -> Result<String> {
    let output_root = &config.build.output;

    // Strip output root
    let rel_to_output = path
        .strip_prefix(output_root)
        .map_err(|_| anyhow!("Path is not in output directory: {}", path.display()))?;

    // Convert to string and ensure forward slashes
    let path_str = rel_to_output.to_string_lossy().replace('\\', "/");

    // Ensure it starts with /
    let url = if path_str.starts_with('/') {
        path_str
    } else {
        format!("/{path_str}")
    };

    Ok(url)
}

/// Whether a path looks like a content page rather than an asset.
pub fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| CONTENT_EXTENSIONS.contains(&ext))
}
