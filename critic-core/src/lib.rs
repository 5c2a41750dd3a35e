//! Critic Core - Core library for the Critic AI code review service
//!
//! This crate provides configuration, the AI review client, and the
//! presentation state shared by the web and terminal front ends.

pub mod config;
pub mod error;
pub mod review;
pub mod secrets;
pub mod session;
pub mod view;

pub use config::{AiConfig, CliOverrides, Config, GitHubConfig, ServerConfig};
pub use error::{Error, Result};
pub use review::{GeminiClient, ReviewModel};
pub use secrets::Secrets;
pub use session::{ChatMessage, ChatSession, Role, SessionState};
pub use view::SortOrder;
