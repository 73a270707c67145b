//! `[base]` section configuration.
//!
//! Basic site metadata: title, description, canonical URL, source repository.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in inka.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "Kevin's Blog"
/// description = "I write about random projects I work on here."
/// url = "https://blog.example.com"
/// repo = "kevin-pek/blog"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title displayed in browser tab and headers.
    pub title: String,

    /// Site description for SEO meta tags.
    pub description: String,

    /// Canonical base URL for absolute links in the sitemap.
    /// Required when `[build.sitemap].enable = true`.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,

    /// Source repository as "owner/name", for edit links.
    #[serde(default = "defaults::base::repo")]
    #[educe(Default = defaults::base::repo())]
    pub repo: Option<String>,

    /// Branch edit links point at.
    #[serde(default = "defaults::base::default_branch")]
    #[educe(Default = defaults::base::default_branch())]
    pub default_branch: String,

    /// Author name for meta tags.
    #[serde(default = "defaults::base::author")]
    #[educe(Default = defaults::base::author())]
    pub author: String,

    /// BCP 47 language code (e.g., "en-US").
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,
}

impl BaseConfig {
    /// URL of the source repository on GitHub, when `repo` is set.
    pub fn repo_url(&self) -> Option<String> {
        self.repo
            .as_deref()
            .map(|repo| format!("https://github.com/{repo}/tree/{}", self.default_branch))
    }
}
