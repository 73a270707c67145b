//! `[build]` section configuration.
//!
//! Build paths, HTML minification, markdown options and sitemap settings.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Enums
// ============================================================================

/// URL slug generation mode for output paths.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlugMode {
    /// Always convert to ASCII slug (e.g., "你好" → "ni-hao").
    On,
    /// Only strip forbidden characters; keep the rest as-is (default).
    #[default]
    Safe,
    /// No slugification; preserve original text.
    No,
}

// ============================================================================
// Main BuildConfig
// ============================================================================

/// `[build]` section in inka.toml - build pipeline configuration.
///
/// # Example
/// ```toml
/// [build]
/// content = "content"      # Source directory
/// output = "public"        # Output directory
/// minify = true            # Minify HTML
///
/// [build.markdown]
/// math = true
///
/// [build.sitemap]
/// enable = true
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Content source directory (Markdown/MDX files).
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Build output directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Static assets directory (images, CSS, JS).
    #[serde(default = "defaults::build::assets")]
    #[educe(Default = defaults::build::assets())]
    pub assets: PathBuf,

    /// Minify HTML output (removes whitespace).
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub minify: bool,

    /// Clear output directory before each build.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub clean: bool,

    /// Markdown rendering options.
    #[serde(default)]
    pub markdown: MarkdownConfig,

    /// Sitemap generation settings.
    #[serde(default)]
    pub sitemap: SitemapConfig,

    /// URL slugification settings.
    #[serde(default)]
    pub slug: SlugConfig,
}

// ============================================================================
// Sub-configurations
// ============================================================================

/// `[build.markdown]` - which markdown extensions are enabled.
///
/// These map one-to-one onto pulldown-cmark parser options.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct MarkdownConfig {
    /// Parse `$…$` / `$$…$$` as math for client-side rendering.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub math: bool,

    /// Footnote references and definitions.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub footnotes: bool,

    /// Smart punctuation (curly quotes, dashes, ellipses).
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub smart_punctuation: bool,

    /// GitHub-style tables.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub tables: bool,
}

/// `[build.sitemap]` - sitemap.xml generation.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct SitemapConfig {
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Output path, relative to the output directory.
    #[serde(default = "defaults::build::sitemap::path")]
    #[educe(Default = defaults::build::sitemap::path())]
    pub path: PathBuf,
}

/// `[build.slug]` - output path slugification.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct SlugConfig {
    #[serde(default = "defaults::build::slug::mode")]
    #[educe(Default = defaults::build::slug::mode())]
    pub mode: SlugMode,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use super::*;

    #[test]
    fn test_build_config_defaults() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.build.content, PathBuf::from("content"));
        assert_eq!(config.build.output, PathBuf::from("public"));
        assert_eq!(config.build.assets, PathBuf::from("assets"));
        assert!(config.build.minify);
        assert!(!config.build.clean);
        assert!(config.build.sitemap.enable);
        assert_eq!(config.build.sitemap.path, PathBuf::from("sitemap.xml"));
    }

    #[test]
    fn test_markdown_defaults_all_enabled() {
        let config: SiteConfig = toml::from_str(
            r#"
            [base]
            title = "Test"
            description = "Test"
        "#,
        )
        .unwrap();

        let md = &config.build.markdown;
        assert!(md.math);
        assert!(md.footnotes);
        assert!(md.smart_punctuation);
        assert!(md.tables);
    }

    #[test]
    fn test_markdown_overrides() {
        let config: SiteConfig = toml::from_str(
            r#"
            [base]
            title = "Test"
            description = "Test"

            [build.markdown]
            math = false
            smart_punctuation = false
        "#,
        )
        .unwrap();

        let md = &config.build.markdown;
        assert!(!md.math);
        assert!(!md.smart_punctuation);
        assert!(md.footnotes);
        assert!(md.tables);
    }

    #[test]
    fn test_custom_paths() {
        let config: SiteConfig = toml::from_str(
            r#"
            [base]
            title = "Test"
            description = "Test"

            [build]
            content = "posts"
            output = "dist"
        "#,
        )
        .unwrap();

        assert_eq!(config.build.content, PathBuf::from("posts"));
        assert_eq!(config.build.output, PathBuf::from("dist"));
    }

    #[test]
    fn test_slug_mode_parsing() {
        let config: SiteConfig = toml::from_str(
            r#"
            [base]
            title = "Test"
            description = "Test"

            [build.slug]
            mode = "on"
        "#,
        )
        .unwrap();

        assert!(matches!(config.build.slug.mode, SlugMode::On));
    }

    #[test]
    fn test_sitemap_disabled() {
        let config: SiteConfig = toml::from_str(
            r#"
            [base]
            title = "Test"
            description = "Test"

            [build.sitemap]
            enable = false
        "#,
        )
        .unwrap();

        assert!(!config.build.sitemap.enable);
    }

    #[test]
    fn test_unknown_build_field_rejection() {
        let result: Result<SiteConfig, _> = toml::from_str(
            r#"
            [base]
            title = "Test"
            description = "Test"

            [build]
            typo_field = true
        "#,
        );
        assert!(result.is_err());
    }
}
