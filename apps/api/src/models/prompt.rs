use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An assessment specification as stored. One prompt may be generated from
/// many times; each run produces a new assessment row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PromptRow {
    pub id: Uuid,
    pub prompt_text: String,
    pub time_limit: i32,
    pub performance_weight: i32,
    pub behavioral_weight: i32,
    pub cultural_fit_weight: i32,
    /// Stored lowercase: "easy" | "medium" | "hard" (DB CHECK enforced).
    pub difficulty: String,
    pub question_types: Vec<String>,
    pub skills: Vec<String>,
    pub company_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
