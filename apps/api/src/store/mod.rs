//! Persistence seam for the assessment pipeline. The orchestrator only talks
//! to [`AssessmentStore`], so tests can swap Postgres for an in-memory
//! implementation.

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::assessment::AssessmentRow;
use crate::models::conversation::{ConversationThreadRow, MessageRow, MessageRole};
use crate::models::prompt::PromptRow;

pub mod postgres;

#[cfg(test)]
pub mod memory;

pub use postgres::PgStore;

/// Input for the write that backs a new generation.
#[derive(Debug, Clone)]
pub struct NewGeneration {
    pub prompt_id: Uuid,
    pub assessment_title: String,
    pub thread_title: String,
    /// Rendered prompt text, persisted as the thread's opening user message.
    pub rendered_prompt: String,
    /// Assistant text extracted from the generation response.
    pub content: String,
    pub raw_response: Value,
}

/// Rows created by a successful generation write.
#[derive(Debug, Clone)]
pub struct StoredGeneration {
    pub assessment: AssessmentRow,
    pub thread: ConversationThreadRow,
}

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub conversation_id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub raw_response: Option<Value>,
}

#[async_trait]
pub trait AssessmentStore: Send + Sync {
    async fn prompt_by_id(&self, id: Uuid) -> Result<Option<PromptRow>, AppError>;

    /// Display name of the company referenced by a prompt.
    async fn company_display_name(&self, id: Uuid) -> Result<Option<String>, AppError>;

    /// Persists the assessment, its conversation thread, and the two opening
    /// messages in one transaction. Nothing is written on failure.
    async fn insert_generation(&self, new: NewGeneration) -> Result<StoredGeneration, AppError>;

    async fn thread_by_id(&self, id: Uuid) -> Result<Option<ConversationThreadRow>, AppError>;

    /// Appends one message with an app-assigned timestamp.
    async fn append_message(&self, new: NewMessage) -> Result<MessageRow, AppError>;

    /// Full message history of a thread, oldest first.
    async fn thread_history(&self, conversation_id: Uuid) -> Result<Vec<MessageRow>, AppError>;

    /// Bumps the thread's `updated_at` to now.
    async fn touch_thread(&self, conversation_id: Uuid) -> Result<(), AppError>;
}
