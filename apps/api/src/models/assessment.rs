use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One generation result. `content` is the extracted plain text;
/// `raw_response` is the endpoint's response stored verbatim for audit.
/// Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AssessmentRow {
    pub id: Uuid,
    pub prompt_id: Uuid,
    pub title: String,
    pub content: String,
    pub raw_response: Value,
    pub created_at: DateTime<Utc>,
}
