//! Core business logic layer
//!
//! Data structures, loading, the statistical test and the analysis that
//! combines them.

pub mod analysis;
pub mod data;
pub mod loader;
pub mod operations;
pub mod traits;
pub mod ztest;
