//! Utility modules for the static site generator.

pub mod log;
pub mod minify;
pub mod slug;
