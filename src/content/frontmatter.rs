//! YAML frontmatter extraction.
//!
//! A frontmatter block is a `---` line at the very start of the file,
//! YAML until the next `---` line, then the Markdown body. A file that
//! opens a block and never closes it is an error rather than body text,
//! since a half-written block would otherwise slip past validation.

use super::schema::RawPostMeta;
use thiserror::Error;

const FENCE: &str = "---";

#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("frontmatter block is never closed")]
    UnclosedFence,
    #[error("invalid frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Split a source file into raw frontmatter and body.
///
/// Returns `None` metadata when the file has no frontmatter block at all,
/// leaving the full source as the body.
pub fn extract(source: &str) -> Result<(Option<RawPostMeta>, &str), FrontmatterError> {
    let Some(rest) = strip_opening_fence(source) else {
        return Ok((None, source));
    };
    let (block, body) = find_closing_fence(rest).ok_or(FrontmatterError::UnclosedFence)?;

    let raw = if block.trim().is_empty() {
        RawPostMeta::default()
    } else {
        serde_yaml::from_str(block)?
    };
    Ok((Some(raw), body))
}

/// Returns the content after the opening fence, or `None` when the first
/// line is not a fence. Fence matching tolerates trailing whitespace and
/// CRLF line endings, but `----` is a thematic break, not a fence.
fn strip_opening_fence(source: &str) -> Option<&str> {
    let first = source.split_inclusive('\n').next().unwrap_or_default();
    if first.trim_end() != FENCE {
        return None;
    }
    Some(&source[first.len()..])
}

fn find_closing_fence(rest: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}
