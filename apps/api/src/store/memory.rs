//! In-memory [`AssessmentStore`] for orchestrator tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::assessment::AssessmentRow;
use crate::models::conversation::{ConversationThreadRow, MessageRow, MessageRole};
use crate::models::prompt::PromptRow;
use crate::store::{AssessmentStore, NewGeneration, NewMessage, StoredGeneration};

#[derive(Default)]
struct Tables {
    prompts: Vec<PromptRow>,
    companies: Vec<(Uuid, String)>,
    assessments: Vec<AssessmentRow>,
    threads: Vec<ConversationThreadRow>,
    messages: Vec<MessageRow>,
    next_seq: i64,
}

/// Test double with the same write discipline as the Postgres store:
/// `insert_generation` writes all four rows or none, and history replays
/// in `(time_stamp, seq)` order.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    fail_generation_write: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_prompt(&self, prompt: PromptRow) {
        self.tables.lock().unwrap().prompts.push(prompt);
    }

    pub fn add_company(&self, id: Uuid, name: &str) {
        self.tables
            .lock()
            .unwrap()
            .companies
            .push((id, name.to_string()));
    }

    /// Makes every subsequent `insert_generation` fail before writing.
    pub fn fail_generation_writes(&self) {
        self.fail_generation_write.store(true, Ordering::SeqCst);
    }

    pub fn assessment_count(&self) -> usize {
        self.tables.lock().unwrap().assessments.len()
    }

    pub fn thread_count(&self) -> usize {
        self.tables.lock().unwrap().threads.len()
    }

    pub fn message_count(&self) -> usize {
        self.tables.lock().unwrap().messages.len()
    }

    /// Messages of one thread in raw insertion order.
    pub fn messages_for(&self, conversation_id: Uuid) -> Vec<MessageRow> {
        self.tables
            .lock()
            .unwrap()
            .messages
            .iter()
            .filter(|m| m.conversation_id == conversation_id)
            .cloned()
            .collect()
    }

    pub fn thread_snapshot(&self, id: Uuid) -> Option<ConversationThreadRow> {
        self.tables
            .lock()
            .unwrap()
            .threads
            .iter()
            .find(|t| t.id == id)
            .cloned()
    }

    /// Inserts a message with an explicit timestamp, bypassing the trait.
    pub fn push_message_at(
        &self,
        conversation_id: Uuid,
        role: MessageRole,
        content: &str,
        time_stamp: DateTime<Utc>,
    ) -> MessageRow {
        let mut tables = self.tables.lock().unwrap();
        tables.next_seq += 1;
        let message = MessageRow {
            id: Uuid::new_v4(),
            conversation_id,
            seq: tables.next_seq,
            message_type: role.as_str().to_string(),
            content: content.to_string(),
            raw_response: None,
            time_stamp,
        };
        tables.messages.push(message.clone());
        message
    }
}

#[async_trait]
impl AssessmentStore for MemoryStore {
    async fn prompt_by_id(&self, id: Uuid) -> Result<Option<PromptRow>, AppError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .prompts
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn company_display_name(&self, id: Uuid) -> Result<Option<String>, AppError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .companies
            .iter()
            .find(|(cid, _)| *cid == id)
            .map(|(_, name)| name.clone()))
    }

    async fn insert_generation(&self, new: NewGeneration) -> Result<StoredGeneration, AppError> {
        if self.fail_generation_write.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolClosed));
        }

        let now = Utc::now();
        let mut tables = self.tables.lock().unwrap();

        let assessment = AssessmentRow {
            id: Uuid::new_v4(),
            prompt_id: new.prompt_id,
            title: new.assessment_title,
            content: new.content.clone(),
            raw_response: new.raw_response.clone(),
            created_at: now,
        };
        let thread = ConversationThreadRow {
            id: Uuid::new_v4(),
            assessment_id: assessment.id,
            title: new.thread_title,
            created_at: now,
            updated_at: now,
        };

        tables.assessments.push(assessment.clone());
        tables.threads.push(thread.clone());

        tables.next_seq += 1;
        let user_seq = tables.next_seq;
        tables.messages.push(MessageRow {
            id: Uuid::new_v4(),
            conversation_id: thread.id,
            seq: user_seq,
            message_type: MessageRole::User.as_str().to_string(),
            content: new.rendered_prompt,
            raw_response: None,
            time_stamp: now,
        });

        tables.next_seq += 1;
        let assistant_seq = tables.next_seq;
        tables.messages.push(MessageRow {
            id: Uuid::new_v4(),
            conversation_id: thread.id,
            seq: assistant_seq,
            message_type: MessageRole::Assistant.as_str().to_string(),
            content: new.content,
            raw_response: Some(new.raw_response),
            time_stamp: now,
        });

        Ok(StoredGeneration { assessment, thread })
    }

    async fn thread_by_id(&self, id: Uuid) -> Result<Option<ConversationThreadRow>, AppError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .threads
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn append_message(&self, new: NewMessage) -> Result<MessageRow, AppError> {
        let mut tables = self.tables.lock().unwrap();
        tables.next_seq += 1;
        let message = MessageRow {
            id: Uuid::new_v4(),
            conversation_id: new.conversation_id,
            seq: tables.next_seq,
            message_type: new.role.as_str().to_string(),
            content: new.content,
            raw_response: new.raw_response,
            time_stamp: Utc::now(),
        };
        tables.messages.push(message.clone());
        Ok(message)
    }

    async fn thread_history(&self, conversation_id: Uuid) -> Result<Vec<MessageRow>, AppError> {
        let mut messages: Vec<MessageRow> = self
            .tables
            .lock()
            .unwrap()
            .messages
            .iter()
            .filter(|m| m.conversation_id == conversation_id)
            .cloned()
            .collect();
        messages.sort_by_key(|m| (m.time_stamp, m.seq));
        Ok(messages)
    }

    async fn touch_thread(&self, conversation_id: Uuid) -> Result<(), AppError> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(thread) = tables.threads.iter_mut().find(|t| t.id == conversation_id) {
            thread.updated_at = Utc::now();
        }
        Ok(())
    }
}
