//! AI review client
//!
//! The request router only knows about [`ReviewModel`]; [`GeminiClient`] is
//! the production implementation backed by Google's `generateContent` API.

pub mod gemini;
pub mod prompt;

use async_trait::async_trait;

use crate::Result;

pub use gemini::GeminiClient;
pub use prompt::{render_review_prompt, REVIEW_PROMPT};

/// A generative model that turns submitted code into free-form review text
#[async_trait]
pub trait ReviewModel: Send + Sync {
    /// Review `code` and return the model's feedback verbatim
    async fn review(&self, code: &str) -> Result<String>;
}
