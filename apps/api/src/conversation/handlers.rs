use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::assessment::service;
use crate::errors::AppError;
use crate::models::conversation::{ConversationThreadRow, MessageRow};
use crate::state::AppState;

/// A thread plus the two computed fields the conversation list shows:
/// how many turns it holds and the most recent one.
#[derive(Debug, Serialize)]
pub struct ConversationSummary {
    pub id: Uuid,
    pub assessment_id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub message_count: i64,
    pub last_message: Option<MessageRow>,
}

#[derive(Debug, Deserialize)]
pub struct AddMessageRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct AddMessageResponse {
    pub message_id: Uuid,
    pub content: String,
}

/// GET /api/v1/conversations
///
/// All threads, most recently active first.
pub async fn handle_list_conversations(
    State(state): State<AppState>,
) -> Result<Json<Vec<ConversationSummary>>, AppError> {
    let threads: Vec<ConversationThreadRow> =
        sqlx::query_as("SELECT * FROM conversation_threads ORDER BY updated_at DESC")
            .fetch_all(&state.db)
            .await?;

    let mut summaries = Vec::with_capacity(threads.len());
    for thread in threads {
        summaries.push(summarize(&state.db, thread).await?);
    }
    Ok(Json(summaries))
}

/// GET /api/v1/conversations/:id
pub async fn handle_get_conversation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ConversationSummary>, AppError> {
    let thread: Option<ConversationThreadRow> =
        sqlx::query_as("SELECT * FROM conversation_threads WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.db)
            .await?;
    let thread = thread.ok_or_else(|| AppError::NotFound("Conversation not found".to_string()))?;
    Ok(Json(summarize(&state.db, thread).await?))
}

/// GET /api/v1/conversations/:id/messages
///
/// Full message history in replay order, oldest first.
pub async fn handle_list_messages(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<MessageRow>>, AppError> {
    let exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM conversation_threads WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?;
    if exists.is_none() {
        return Err(AppError::NotFound("Conversation not found".to_string()));
    }

    let messages: Vec<MessageRow> = sqlx::query_as(
        "SELECT * FROM messages WHERE conversation_id = $1 ORDER BY time_stamp ASC, seq ASC",
    )
    .bind(id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(messages))
}

/// POST /api/v1/conversations/:id/messages
///
/// Appends the user's follow-up and returns the generated assistant reply.
pub async fn handle_add_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AddMessageRequest>,
) -> Result<Json<AddMessageResponse>, AppError> {
    let assistant =
        service::continue_conversation(state.store.as_ref(), &state.llm, id, &req.message).await?;
    Ok(Json(AddMessageResponse {
        message_id: assistant.id,
        content: assistant.content,
    }))
}

async fn summarize(
    db: &PgPool,
    thread: ConversationThreadRow,
) -> Result<ConversationSummary, AppError> {
    let message_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM messages WHERE conversation_id = $1")
            .bind(thread.id)
            .fetch_one(db)
            .await?;

    let last_message: Option<MessageRow> = sqlx::query_as(
        "SELECT * FROM messages WHERE conversation_id = $1 ORDER BY time_stamp DESC, seq DESC LIMIT 1",
    )
    .bind(thread.id)
    .fetch_optional(db)
    .await?;

    Ok(ConversationSummary {
        id: thread.id,
        assessment_id: thread.assessment_id,
        title: thread.title,
        created_at: thread.created_at,
        updated_at: thread.updated_at,
        message_count,
        last_message,
    })
}
