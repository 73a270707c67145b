//! URL slugification and path utilities.
//!
//! Converts output paths to URL-safe formats.

use crate::config::{SiteConfig, SlugMode};
use std::path::{Path, PathBuf};

/// Characters forbidden in file paths and fragments
const FORBIDDEN_CHARS: &[char] = &[
    '<', '>', ':', '|', '?', '*', '#', '\\', '(', ')', '[', ']', '\t', '\r', '\n',
];

/// Convert path to URL-safe format based on config
pub fn slugify_path(path: impl AsRef<Path>, config: &SiteConfig) -> PathBuf {
    match config.build.slug.mode {
        SlugMode::Safe => sanitize_path(path.as_ref()),
        SlugMode::On => path
            .as_ref()
            .components()
            .map(|c| slug::slugify(c.as_os_str().to_string_lossy()))
            .collect(),
        SlugMode::No => path.as_ref().to_path_buf(),
    }
}

/// Remove forbidden characters and replace whitespace with underscores
fn sanitize_text(text: &str) -> String {
    text.trim()
        .chars()
        .filter(|c| !FORBIDDEN_CHARS.contains(c))
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Sanitize each component of a path
fn sanitize_path(path: &Path) -> PathBuf {
    path.components()
        .map(|c| sanitize_text(&c.as_os_str().to_string_lossy()))
        .collect()
}
