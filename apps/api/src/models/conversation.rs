use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A follow-up discussion anchored to exactly one assessment.
/// `updated_at` is bumped on every successfully appended assistant turn.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConversationThreadRow {
    pub id: Uuid,
    pub assessment_id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One turn in a conversation thread. Never mutated or deleted by the core.
///
/// Replay order is `(time_stamp, seq)` ascending; `seq` only breaks
/// equal-timestamp ties.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MessageRow {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub seq: i64,
    /// "user" | "assistant" (DB CHECK enforced).
    pub message_type: String,
    pub content: String,
    /// Present on assistant turns only: the raw endpoint response.
    pub raw_response: Option<Value>,
    pub time_stamp: DateTime<Utc>,
}

/// Role of a message author, used when appending turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl MessageRow {
    /// Wire role for conversation replay: "user" stays "user", anything
    /// else is sent as "assistant".
    pub fn wire_role(&self) -> &'static str {
        if self.message_type == "user" {
            "user"
        } else {
            "assistant"
        }
    }
}
