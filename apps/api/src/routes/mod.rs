pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assessment::handlers as assessment;
use crate::company::handlers as company;
use crate::conversation::handlers as conversation;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Company profiles
        .route(
            "/api/v1/companies",
            post(company::handle_create_company).get(company::handle_list_companies),
        )
        .route("/api/v1/companies/:id", get(company::handle_get_company))
        // Assessment prompts and generation
        .route(
            "/api/v1/prompts",
            post(assessment::handle_create_prompt).get(assessment::handle_list_prompts),
        )
        .route(
            "/api/v1/prompts/:id",
            get(assessment::handle_get_prompt).delete(assessment::handle_delete_prompt),
        )
        .route(
            "/api/v1/prompts/:id/generate",
            post(assessment::handle_generate_assessment),
        )
        .route(
            "/api/v1/prompts/:id/questions",
            post(assessment::handle_generate_single_question),
        )
        .route(
            "/api/v1/assessments",
            get(assessment::handle_list_assessments),
        )
        .route(
            "/api/v1/assessments/:id",
            get(assessment::handle_get_assessment),
        )
        // Conversation threads
        .route(
            "/api/v1/conversations",
            get(conversation::handle_list_conversations),
        )
        .route(
            "/api/v1/conversations/:id",
            get(conversation::handle_get_conversation),
        )
        .route(
            "/api/v1/conversations/:id/messages",
            get(conversation::handle_list_messages).post(conversation::handle_add_message),
        )
        .with_state(state)
}
