//! Auxiliary output generators.

pub mod sitemap;
