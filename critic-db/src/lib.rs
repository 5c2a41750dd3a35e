//! Database layer for Critic
//!
//! Provides persistence for review history: one table of immutable
//! review records behind a single shared connection pool.

pub mod db;
pub mod error;
pub mod models;
pub mod repos;

pub use db::{Database, DatabaseConfig};
pub use error::{Error, Result};
pub use models::{parse_review_id, NewReview, ReviewRecord};
pub use repos::{ReviewRepository, HISTORY_LIMIT};
