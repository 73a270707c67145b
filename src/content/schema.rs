//! Frontmatter schema: raw YAML fields and their normalized form.

use super::date::{Date, DateError};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("missing required field \"{0}\"")]
    MissingField(&'static str),
    #[error("{field}: {source}")]
    InvalidDate {
        field: &'static str,
        source: DateError,
    },
}

/// Frontmatter exactly as written, before validation. All fields optional
/// here so that a missing required field is reported by the schema, not as
/// a YAML deserialization error. Unknown keys are rejected. CamelCase
/// aliases keep content written for the previous site validating unchanged.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawPostMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "publishDate")]
    pub publish_date: Option<String>,
    #[serde(alias = "updatedDate")]
    pub updated_date: Option<String>,
    #[serde(alias = "heroImage")]
    pub hero_image: Option<PathBuf>,
}

/// Validated post metadata.
#[derive(Debug, Clone)]
pub struct PostMeta {
    pub title: String,
    pub description: Option<String>,
    pub publish_date: Date,
    pub updated_date: Option<Date>,
    pub hero_image: Option<PathBuf>,
}

impl PostMeta {
    /// Normalize raw frontmatter. Validation is all-or-nothing: the first
    /// failing field rejects the whole record.
    pub fn from_raw(raw: RawPostMeta) -> Result<Self, SchemaError> {
        let title = raw
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or(SchemaError::MissingField("title"))?;

        let publish_date = raw
            .publish_date
            .ok_or(SchemaError::MissingField("publish_date"))?;
        let publish_date = Date::parse(&publish_date).map_err(|source| {
            SchemaError::InvalidDate {
                field: "publish_date",
                source,
            }
        })?;

        let updated_date =
            Date::parse_optional(raw.updated_date.as_deref()).map_err(|source| {
                SchemaError::InvalidDate {
                    field: "updated_date",
                    source,
                }
            })?;

        Ok(Self {
            title,
            description: raw.description,
            publish_date,
            updated_date,
            hero_image: raw.hero_image,
        })
    }
}
