//! Prompt template for code reviews

/// Instruction placed in front of every submission
pub const REVIEW_PROMPT: &str = "Review this code and provide line-by-line suggestions:";

/// Build the full prompt sent to the model for `code`
///
/// The code is appended verbatim after a blank line.
pub fn render_review_prompt(code: &str) -> String {
    format!("{}\n\n{}", REVIEW_PROMPT, code)
}
