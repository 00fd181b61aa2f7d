//! Postgres-backed [`AssessmentStore`].

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::assessment::AssessmentRow;
use crate::models::conversation::{ConversationThreadRow, MessageRow};
use crate::models::prompt::PromptRow;
use crate::store::{AssessmentStore, NewGeneration, NewMessage, StoredGeneration};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssessmentStore for PgStore {
    async fn prompt_by_id(&self, id: Uuid) -> Result<Option<PromptRow>, AppError> {
        let prompt = sqlx::query_as("SELECT * FROM prompts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(prompt)
    }

    async fn company_display_name(&self, id: Uuid) -> Result<Option<String>, AppError> {
        let name: Option<(String,)> =
            sqlx::query_as("SELECT company_name FROM companies WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(name.map(|(n,)| n))
    }

    async fn insert_generation(&self, new: NewGeneration) -> Result<StoredGeneration, AppError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let assessment: AssessmentRow = sqlx::query_as(
            r#"
            INSERT INTO assessments (id, prompt_id, title, content, raw_response, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.prompt_id)
        .bind(&new.assessment_title)
        .bind(&new.content)
        .bind(&new.raw_response)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        let thread: ConversationThreadRow = sqlx::query_as(
            r#"
            INSERT INTO conversation_threads (id, assessment_id, title, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(assessment.id)
        .bind(&new.thread_title)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        // Both opening messages share one timestamp; seq keeps the user
        // message first on replay.
        sqlx::query(
            r#"
            INSERT INTO messages (id, conversation_id, message_type, content, raw_response, time_stamp)
            VALUES ($1, $2, 'user', $3, NULL, $4)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(thread.id)
        .bind(&new.rendered_prompt)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO messages (id, conversation_id, message_type, content, raw_response, time_stamp)
            VALUES ($1, $2, 'assistant', $3, $4, $5)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(thread.id)
        .bind(&new.content)
        .bind(&new.raw_response)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(StoredGeneration { assessment, thread })
    }

    async fn thread_by_id(&self, id: Uuid) -> Result<Option<ConversationThreadRow>, AppError> {
        let thread = sqlx::query_as("SELECT * FROM conversation_threads WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(thread)
    }

    async fn append_message(&self, new: NewMessage) -> Result<MessageRow, AppError> {
        let message = sqlx::query_as(
            r#"
            INSERT INTO messages (id, conversation_id, message_type, content, raw_response, time_stamp)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.conversation_id)
        .bind(new.role.as_str())
        .bind(&new.content)
        .bind(&new.raw_response)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(message)
    }

    async fn thread_history(&self, conversation_id: Uuid) -> Result<Vec<MessageRow>, AppError> {
        let messages = sqlx::query_as(
            "SELECT * FROM messages WHERE conversation_id = $1 ORDER BY time_stamp ASC, seq ASC",
        )
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(messages)
    }

    async fn touch_thread(&self, conversation_id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE conversation_threads SET updated_at = $1 WHERE id = $2")
            .bind(Utc::now())
            .bind(conversation_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
