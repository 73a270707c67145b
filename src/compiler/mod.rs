//! Markdown page compilation.
//!
//! Renders a validated post into a standalone HTML page: markdown body via
//! pulldown-cmark with the extensions enabled in `[build.markdown]`, wrapped
//! in a minimal template carrying the normalized metadata, the site title and
//! the navigation tree.

pub mod page;

use crate::{
    config::{MarkdownConfig, NavEntry, SiteConfig},
    content::Post,
    utils::minify::minify_html,
};
use anyhow::{Context, Result};
use pulldown_cmark::{Options, Parser, html};
use std::fs;

/// KaTeX stylesheet injected when `[build.markdown].math` is enabled.
const KATEX_CSS: &str =
    r#"<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/katex@0.16/dist/katex.min.css">"#;

/// Compile a post to its output HTML file.
pub fn compile_post(post: &Post, config: &SiteConfig) -> Result<()> {
    let body = render_markdown(&post.body, &config.build.markdown);
    let page = render_page(post, &body, config);
    let minified = minify_html(page.as_bytes(), config);

    if let Some(parent) = post.paths.html.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&post.paths.html, minified)
        .with_context(|| format!("Failed to write {}", post.paths.html.display()))?;

    Ok(())
}

/// Render a markdown body to an HTML fragment.
pub fn render_markdown(body: &str, config: &MarkdownConfig) -> String {
    let mut options = Options::empty();
    if config.math {
        options.insert(Options::ENABLE_MATH);
    }
    if config.footnotes {
        options.insert(Options::ENABLE_FOOTNOTES);
    }
    if config.smart_punctuation {
        options.insert(Options::ENABLE_SMART_PUNCTUATION);
    }
    if config.tables {
        options.insert(Options::ENABLE_TABLES);
    }

    let parser = Parser::new_ext(body, options);
    let mut out = String::with_capacity(body.len() * 2);
    html::push_html(&mut out, parser);
    out
}

/// Assemble the full HTML page around a rendered body.
fn render_page(post: &Post, body: &str, config: &SiteConfig) -> String {
    let meta = &post.meta;
    let mut page = String::with_capacity(body.len() + 1024);

    page.push_str("<!DOCTYPE html>\n");
    page.push_str(&format!(
        "<html lang=\"{}\">\n<head>\n<meta charset=\"utf-8\">\n",
        escape_html(&config.base.language)
    ));
    page.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    page.push_str(&format!(
        "<title>{} · {}</title>\n",
        escape_html(&meta.title),
        escape_html(&config.base.title)
    ));

    let description = meta
        .description
        .as_deref()
        .unwrap_or(config.base.description.as_str());
    if !description.is_empty() {
        page.push_str(&format!(
            "<meta name=\"description\" content=\"{}\">\n",
            escape_html(description)
        ));
    }
    if config.build.markdown.math {
        page.push_str(KATEX_CSS);
        page.push('\n');
    }
    page.push_str("</head>\n<body>\n");

    if !config.nav.is_empty() {
        page.push_str("<nav>\n");
        render_nav(&config.nav, &mut page);
        page.push_str("</nav>\n");
    }

    page.push_str("<main>\n<article>\n");
    page.push_str(&format!("<h1>{}</h1>\n", escape_html(&meta.title)));
    page.push_str(&format!(
        "<p><time datetime=\"{}\">{}</time>",
        meta.publish_date.to_ymd(),
        meta.publish_date
    ));
    if let Some(updated) = meta.updated_date {
        page.push_str(&format!(
            " (updated <time datetime=\"{}\">{updated}</time>)",
            updated.to_ymd()
        ));
    }
    page.push_str("</p>\n");

    if let Some(hero) = &meta.hero_image {
        page.push_str(&format!(
            "<img class=\"hero\" src=\"{}\" alt=\"{}\">\n",
            escape_html(&hero.to_string_lossy()),
            escape_html(&meta.title)
        ));
    }

    page.push_str(body);
    page.push_str("\n</article>\n</main>\n</body>\n</html>\n");
    page
}

/// Render the navigation tree as nested lists.
fn render_nav(entries: &[NavEntry], out: &mut String) {
    out.push_str("<ul>\n");
    for entry in entries {
        out.push_str(&format!(
            "<li><a href=\"{}\">{}</a>",
            escape_html(&entry.path),
            escape_html(&entry.title)
        ));
        if !entry.children.is_empty() {
            out.push('\n');
            render_nav(&entry.children, out);
        }
        out.push_str("</li>\n");
    }
    out.push_str("</ul>\n");
}

/// Escape HTML special characters.
fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}
