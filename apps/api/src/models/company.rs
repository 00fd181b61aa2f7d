use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A company profile. Only `company_name` feeds the generation pipeline
/// (rendered as company context); the rest is profile data for the UI.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CompanyRow {
    pub id: Uuid,
    pub company_name: String,
    pub company_size: String,
    pub headquarters: String,
    pub year_founded: Option<i32>,
    pub company_structure: String,
    pub work_environment: String,
    pub communication_style: String,
    pub team_structure_overview: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
