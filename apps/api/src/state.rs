use std::sync::Arc;

use sqlx::PgPool;

use crate::llm_client::GenerationClient;
use crate::store::AssessmentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Persistence seam for the generation flows. Production wires `PgStore`
    /// over the same pool as `db`.
    pub store: Arc<dyn AssessmentStore>,
    pub llm: GenerationClient,
}
