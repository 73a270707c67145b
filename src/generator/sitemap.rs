//! Sitemap generation.
//!
//! Generates a sitemap.xml file listing all pages for search engine indexing.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/posts/hello/</loc>
//!     <lastmod>2024-06-15</lastmod>
//!   </url>
//! </urlset>
//! ```

use crate::{config::SiteConfig, content::Post, log, utils::minify::minify_xml};
use anyhow::{Context, Result};
use std::fs;

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Build sitemap if enabled in config.
pub fn build_sitemap(config: &SiteConfig, posts: &[Post]) -> Result<()> {
    if config.build.sitemap.enable {
        let sitemap = Sitemap::from_posts(posts);
        sitemap.write(config)?;
    }
    Ok(())
}

/// Sitemap data structure
struct Sitemap {
    /// List of URL entries
    urls: Vec<UrlEntry>,
}

/// Single URL entry in the sitemap
struct UrlEntry {
    /// Full URL location
    loc: String,
    /// Last modification date (YYYY-MM-DD): updated date, or publish date
    lastmod: String,
}

impl Sitemap {
    /// Build sitemap from validated posts.
    fn from_posts(posts: &[Post]) -> Self {
        let urls = posts
            .iter()
            .map(|post| UrlEntry {
                loc: post.paths.full_url.clone(),
                lastmod: post
                    .meta
                    .updated_date
                    .unwrap_or(post.meta.publish_date)
                    .to_ymd(),
            })
            .collect();

        Self { urls }
    }

    /// Generate sitemap XML string.
    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');

        for entry in self.urls {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", entry.lastmod));
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Write the sitemap to its configured output path.
    fn write(self, config: &SiteConfig) -> Result<()> {
        let path = &config.build.sitemap.path;
        let count = self.urls.len();
        let xml = self.into_xml();
        let xml = minify_xml(&xml, config);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, xml.as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))?;

        log!("sitemap"; "{count} urls");
        Ok(())
    }
}

/// Escape XML special characters.
fn escape_xml(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '\'' => result.push_str("&apos;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::page::PagePaths;
    use crate::content::date::Date;
    use crate::content::schema::PostMeta;
    use std::path::PathBuf;

    fn post(url: &str, publish: Date, updated: Option<Date>) -> Post {
        Post {
            meta: PostMeta {
                title: "Test".into(),
                description: None,
                publish_date: publish,
                updated_date: updated,
                hero_image: None,
            },
            paths: PagePaths {
                source: PathBuf::from("content/test.md"),
                html: PathBuf::from("public/test/index.html"),
                relative: "test".into(),
                url_path: "/test/".into(),
                full_url: url.into(),
            },
            body: String::new(),
        }
    }

    #[test]
    fn test_sitemap_xml_shape() {
        let posts = vec![post(
            "https://example.com/test/",
            Date::new(2024, 6, 15),
            None,
        )];
        let xml = Sitemap::from_posts(&posts).into_xml();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#));
        assert!(xml.contains("<loc>https://example.com/test/</loc>"));
        assert!(xml.contains("<lastmod>2024-06-15</lastmod>"));
        assert!(xml.ends_with("</urlset>\n"));
    }

    #[test]
    fn test_lastmod_prefers_updated_date() {
        let posts = vec![post(
            "https://example.com/test/",
            Date::new(2024, 6, 15),
            Some(Date::new(2024, 7, 1)),
        )];
        let xml = Sitemap::from_posts(&posts).into_xml();

        assert!(xml.contains("<lastmod>2024-07-01</lastmod>"));
        assert!(!xml.contains("2024-06-15"));
    }

    #[test]
    fn test_sitemap_empty() {
        let xml = Sitemap::from_posts(&[]).into_xml();
        assert!(xml.contains("<urlset"));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(
            escape_xml("https://example.com/?a=1&b=2"),
            "https://example.com/?a=1&amp;b=2"
        );
        assert_eq!(escape_xml("<&>'\""), "&lt;&amp;&gt;&apos;&quot;");
    }
}
