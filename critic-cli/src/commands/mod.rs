//! CLI command implementations

pub mod chat;
pub mod client;
pub mod delete;
pub mod history;
pub mod review;
pub mod serve;

pub use chat::ChatArgs;
pub use client::CriticClient;
pub use delete::DeleteArgs;
pub use history::HistoryArgs;
pub use review::ReviewArgs;
pub use serve::ServeArgs;
