//! Bookmark Module
//!
//! Per-video bookmark collections: the data model, display ordering, and the
//! repository that keeps the in-memory store and its persisted copy in step.

mod models;
mod repository;

pub use models::*;
pub use repository::*;
