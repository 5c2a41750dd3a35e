//! Chat session state
//!
//! A session holds the visible conversation and whether a review is in
//! flight. It moves `Idle -> AwaitingResponse -> Idle`; while awaiting, new
//! submissions are refused and there is no way to cancel.

use chrono::{DateTime, Utc};
use critic_db::ReviewRecord;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Shown in place of a response when the review request fails
pub const AI_ERROR_MESSAGE: &str =
    "Sorry, something went wrong while analyzing your code. Please try again.";

/// Who authored a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Ai,
}

/// One entry in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    #[serde(rename = "type")]
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Whether the session can accept input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    AwaitingResponse,
}

/// Conversation state for one user session
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    state: SessionState,
    next_seq: u64,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// True while a review is in flight and input must stay disabled
    pub fn is_busy(&self) -> bool {
        self.state == SessionState::AwaitingResponse
    }

    /// Show the user's code and start waiting for the review
    pub fn begin_submit(&mut self, code: impl Into<String>) -> Result<&ChatMessage> {
        if self.is_busy() {
            return Err(Error::Session("a review is already in progress".to_string()));
        }

        let code = code.into();
        if code.trim().is_empty() {
            return Err(Error::Session("nothing to review".to_string()));
        }

        self.state = SessionState::AwaitingResponse;
        Ok(self.push(Role::User, code))
    }

    /// Append the model's response and return to idle
    pub fn complete(&mut self, response: impl Into<String>) -> Result<&ChatMessage> {
        if !self.is_busy() {
            return Err(Error::Session("no review is in progress".to_string()));
        }

        self.state = SessionState::Idle;
        Ok(self.push(Role::Ai, response.into()))
    }

    /// Substitute the generic error message for the response and return to idle
    pub fn fail(&mut self) -> Result<&ChatMessage> {
        self.complete(AI_ERROR_MESSAGE)
    }

    /// Replace the conversation with a stored review
    pub fn open_review(&mut self, record: &ReviewRecord) -> Result<()> {
        if self.is_busy() {
            return Err(Error::Session("a review is already in progress".to_string()));
        }

        self.messages = vec![
            ChatMessage {
                id: format!("{}-user", record.id),
                role: Role::User,
                content: record.code.clone(),
                timestamp: record.created_at,
            },
            ChatMessage {
                id: format!("{}-ai", record.id),
                role: Role::Ai,
                content: record.response.clone(),
                timestamp: record.created_at,
            },
        ];
        Ok(())
    }

    /// Whether the conversation is exactly one review taken from `history`
    pub fn is_single_review(&self, history: &[ReviewRecord]) -> bool {
        match self.messages.as_slice() {
            [user, ai] => history
                .iter()
                .any(|h| user.content == h.code && ai.content == h.response),
            _ => false,
        }
    }

    /// Drop all messages; an in-flight review still completes into the empty view
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    fn push(&mut self, role: Role, content: String) -> &ChatMessage {
        self.next_seq += 1;
        self.messages.push(ChatMessage {
            id: format!("msg-{}", self.next_seq),
            role,
            content,
            timestamp: Utc::now(),
        });
        &self.messages[self.messages.len() - 1]
    }
}
