use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assessment::params::{Difficulty, DifficultyInput, Weights, DEFAULT_FULL_TIME_LIMIT};
use crate::assessment::service;
use crate::errors::AppError;
use crate::models::assessment::AssessmentRow;
use crate::models::prompt::PromptRow;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreatePromptRequest {
    pub prompt_text: String,
    #[serde(default = "default_time_limit")]
    pub time_limit: i32,
    /// Bare label or list of labels; the first list element wins.
    pub difficulty: Option<DifficultyInput>,
    #[serde(default)]
    pub question_types: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub weights: Weights,
    pub company_id: Option<Uuid>,
}

fn default_time_limit() -> i32 {
    DEFAULT_FULL_TIME_LIMIT
}

/// Checks the request fields and normalizes the difficulty label.
fn validate(req: &CreatePromptRequest) -> Result<Difficulty, AppError> {
    if req.prompt_text.trim().is_empty() {
        return Err(AppError::Validation("prompt_text is required".to_string()));
    }
    if req.time_limit <= 0 {
        return Err(AppError::Validation(
            "time_limit must be greater than zero".to_string(),
        ));
    }
    match &req.difficulty {
        Some(input) => input.normalize().ok_or_else(|| {
            AppError::Validation("difficulty must be one of Easy, Medium, or Hard".to_string())
        }),
        None => Ok(Difficulty::default()),
    }
}

/// POST /api/v1/prompts
pub async fn handle_create_prompt(
    State(state): State<AppState>,
    Json(req): Json<CreatePromptRequest>,
) -> Result<(StatusCode, Json<PromptRow>), AppError> {
    let difficulty = validate(&req)?;

    if let Some(company_id) = req.company_id {
        let exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM companies WHERE id = $1")
            .bind(company_id)
            .fetch_optional(&state.db)
            .await?;
        if exists.is_none() {
            return Err(AppError::Validation(
                "company_id does not reference a known company".to_string(),
            ));
        }
    }

    let prompt: PromptRow = sqlx::query_as(
        r#"
        INSERT INTO prompts (id, prompt_text, time_limit, performance_weight, behavioral_weight,
                             cultural_fit_weight, difficulty, question_types, skills, company_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&req.prompt_text)
    .bind(req.time_limit)
    .bind(req.weights.performance)
    .bind(req.weights.behavioral)
    .bind(req.weights.cultural_fit)
    .bind(difficulty.storage_key())
    .bind(&req.question_types)
    .bind(&req.skills)
    .bind(req.company_id)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(prompt)))
}

/// GET /api/v1/prompts
pub async fn handle_list_prompts(
    State(state): State<AppState>,
) -> Result<Json<Vec<PromptRow>>, AppError> {
    let prompts = sqlx::query_as("SELECT * FROM prompts ORDER BY created_at DESC")
        .fetch_all(&state.db)
        .await?;
    Ok(Json(prompts))
}

/// GET /api/v1/prompts/:id
pub async fn handle_get_prompt(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PromptRow>, AppError> {
    let prompt: Option<PromptRow> = sqlx::query_as("SELECT * FROM prompts WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?;
    prompt
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Prompt not found".to_string()))
}

/// DELETE /api/v1/prompts/:id
/// Deleting a prompt cascades to its assessments, threads, and messages.
pub async fn handle_delete_prompt(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM prompts WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Prompt not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
pub struct GenerateAssessmentResponse {
    pub assessment_id: Uuid,
    pub conversation_id: Uuid,
    pub content: String,
}

/// POST /api/v1/prompts/:id/generate
pub async fn handle_generate_assessment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<GenerateAssessmentResponse>), AppError> {
    let stored = service::generate_and_store(state.store.as_ref(), &state.llm, id).await?;
    Ok((
        StatusCode::CREATED,
        Json(GenerateAssessmentResponse {
            assessment_id: stored.assessment.id,
            conversation_id: stored.thread.id,
            content: stored.assessment.content,
        }),
    ))
}

#[derive(Deserialize)]
pub struct SingleQuestionRequest {
    pub topic: String,
    pub time_limit: Option<i32>,
}

#[derive(Serialize)]
pub struct SingleQuestionResponse {
    pub content: String,
}

/// POST /api/v1/prompts/:id/questions
/// Generates one question scoped to a topic; nothing is persisted.
pub async fn handle_generate_single_question(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SingleQuestionRequest>,
) -> Result<Json<SingleQuestionResponse>, AppError> {
    let content = service::generate_single_question(
        state.store.as_ref(),
        &state.llm,
        id,
        &req.topic,
        req.time_limit,
    )
    .await?;
    Ok(Json(SingleQuestionResponse { content }))
}

/// GET /api/v1/assessments
pub async fn handle_list_assessments(
    State(state): State<AppState>,
) -> Result<Json<Vec<AssessmentRow>>, AppError> {
    let assessments = sqlx::query_as("SELECT * FROM assessments ORDER BY created_at DESC")
        .fetch_all(&state.db)
        .await?;
    Ok(Json(assessments))
}

/// GET /api/v1/assessments/:id
pub async fn handle_get_assessment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AssessmentRow>, AppError> {
    let assessment: Option<AssessmentRow> =
        sqlx::query_as("SELECT * FROM assessments WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.db)
            .await?;
    assessment
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Assessment not found".to_string()))
}
