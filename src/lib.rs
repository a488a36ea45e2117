//! windingroad - browse curated driving courses and recommendation bundles

pub mod api;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod geometry;
