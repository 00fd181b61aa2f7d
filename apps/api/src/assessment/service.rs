//! Assessment orchestration: ties prompt records, the prompt renderer, the
//! generation client, and the store together.
//!
//! Write discipline, in both flows:
//! - Start persists the assessment, thread, and both opening messages in one
//!   transactional store call; a generation failure persists nothing.
//! - Continue persists the user message before the generation call, so it
//!   survives a generation failure. The assistant message and the thread
//!   `updated_at` bump land only on success.

use tracing::info;
use uuid::Uuid;

use crate::assessment::params::{AssessmentParams, DEFAULT_SINGLE_QUESTION_TIME_LIMIT};
use crate::assessment::renderer::{render_full_prompt, render_single_question_prompt};
use crate::errors::AppError;
use crate::llm_client::{ChatMessage, GenerationClient, SamplingParams};
use crate::models::conversation::{MessageRole, MessageRow};
use crate::models::prompt::PromptRow;
use crate::store::{AssessmentStore, NewGeneration, NewMessage, StoredGeneration};

/// Generates a full assessment for a stored prompt and persists the result.
pub async fn generate_and_store(
    store: &dyn AssessmentStore,
    client: &GenerationClient,
    prompt_id: Uuid,
) -> Result<StoredGeneration, AppError> {
    let prompt = store
        .prompt_by_id(prompt_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Prompt not found".to_string()))?;

    let params = load_params(store, &prompt).await?;
    let rendered = render_full_prompt(&prompt.prompt_text, &params);

    let generation = client
        .generate(&rendered, SamplingParams::FULL_ASSESSMENT)
        .await?;

    let stored = store
        .insert_generation(NewGeneration {
            prompt_id: prompt.id,
            assessment_title: format!("Assessment for {}", prompt.prompt_text),
            thread_title: format!("Assessment Conversation for {}", prompt.prompt_text),
            rendered_prompt: rendered,
            content: generation.text,
            raw_response: generation.raw,
        })
        .await?;

    info!(
        "generated assessment {} with conversation thread {}",
        stored.assessment.id, stored.thread.id
    );

    Ok(stored)
}

/// Appends a user message to a thread, replays the full history, and
/// persists the assistant reply.
pub async fn continue_conversation(
    store: &dyn AssessmentStore,
    client: &GenerationClient,
    conversation_id: Uuid,
    user_text: &str,
) -> Result<MessageRow, AppError> {
    if user_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Message content is required".to_string(),
        ));
    }

    let thread = store
        .thread_by_id(conversation_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Conversation not found".to_string()))?;

    store
        .append_message(NewMessage {
            conversation_id: thread.id,
            role: MessageRole::User,
            content: user_text.to_string(),
            raw_response: None,
        })
        .await?;

    // The history already ends with the new user message; send it once.
    let history = store.thread_history(thread.id).await?;
    let wire: Vec<ChatMessage> = history
        .iter()
        .map(|m| match m.wire_role() {
            "user" => ChatMessage::user(m.content.clone()),
            _ => ChatMessage::assistant(m.content.clone()),
        })
        .collect();

    let generation = client.chat(&wire, SamplingParams::CONVERSATION).await?;

    let assistant = store
        .append_message(NewMessage {
            conversation_id: thread.id,
            role: MessageRole::Assistant,
            content: generation.text,
            raw_response: Some(generation.raw),
        })
        .await?;
    store.touch_thread(thread.id).await?;

    info!(
        "appended assistant reply {} to conversation {}",
        assistant.id, thread.id
    );

    Ok(assistant)
}

/// Generates one question scoped to a topic, using the stored prompt's
/// parameters. Nothing is persisted; the caller gets the text back.
pub async fn generate_single_question(
    store: &dyn AssessmentStore,
    client: &GenerationClient,
    prompt_id: Uuid,
    topic: &str,
    time_limit: Option<i32>,
) -> Result<String, AppError> {
    if topic.trim().is_empty() {
        return Err(AppError::Validation("Topic is required".to_string()));
    }
    if matches!(time_limit, Some(limit) if limit <= 0) {
        return Err(AppError::Validation(
            "time_limit must be greater than zero".to_string(),
        ));
    }

    let prompt = store
        .prompt_by_id(prompt_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Prompt not found".to_string()))?;

    let mut params = load_params(store, &prompt).await?;
    params.time_limit = time_limit.unwrap_or(DEFAULT_SINGLE_QUESTION_TIME_LIMIT);

    let rendered = render_single_question_prompt(&prompt.prompt_text, topic, &params);
    let generation = client
        .generate(&rendered, SamplingParams::SINGLE_QUESTION)
        .await?;

    Ok(generation.text)
}

async fn load_params(
    store: &dyn AssessmentStore,
    prompt: &PromptRow,
) -> Result<AssessmentParams, AppError> {
    let company_name = match prompt.company_id {
        Some(company_id) => store.company_display_name(company_id).await?,
        None => None,
    };
    Ok(AssessmentParams::from_prompt(prompt, company_name))
}
