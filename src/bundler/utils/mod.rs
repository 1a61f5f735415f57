//! Shared helpers for the pipelines.

pub mod fs;
