use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::company::CompanyRow;
use crate::state::AppState;

const COMPANY_SIZES: [&str; 5] = ["1-5", "6-10", "11-50", "51-100", "100+"];
const COMPANY_STRUCTURES: [&str; 4] = ["startup", "small_business", "enterprise", "nonprofit"];
const WORK_ENVIRONMENTS: [&str; 3] = ["remote", "hybrid", "office_based"];
const COMMUNICATION_STYLES: [&str; 3] = ["async_first", "real_time", "hybrid"];

#[derive(Debug, Deserialize)]
pub struct CreateCompanyRequest {
    pub company_name: String,
    #[serde(default = "default_company_size")]
    pub company_size: String,
    #[serde(default)]
    pub headquarters: String,
    pub year_founded: Option<i32>,
    #[serde(default = "default_company_structure")]
    pub company_structure: String,
    #[serde(default = "default_work_environment")]
    pub work_environment: String,
    #[serde(default = "default_communication_style")]
    pub communication_style: String,
    #[serde(default)]
    pub team_structure_overview: String,
}

fn default_company_size() -> String {
    "1-5".to_string()
}

fn default_company_structure() -> String {
    "startup".to_string()
}

fn default_work_environment() -> String {
    "remote".to_string()
}

fn default_communication_style() -> String {
    "async_first".to_string()
}

fn ensure_choice(field: &str, value: &str, allowed: &[&str]) -> Result<(), AppError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "{field} must be one of: {}",
            allowed.join(", ")
        )))
    }
}

fn validate(req: &CreateCompanyRequest) -> Result<(), AppError> {
    if req.company_name.trim().is_empty() {
        return Err(AppError::Validation("company_name is required".to_string()));
    }
    ensure_choice("company_size", &req.company_size, &COMPANY_SIZES)?;
    ensure_choice("company_structure", &req.company_structure, &COMPANY_STRUCTURES)?;
    ensure_choice("work_environment", &req.work_environment, &WORK_ENVIRONMENTS)?;
    ensure_choice(
        "communication_style",
        &req.communication_style,
        &COMMUNICATION_STYLES,
    )?;
    Ok(())
}

/// POST /api/v1/companies
pub async fn handle_create_company(
    State(state): State<AppState>,
    Json(req): Json<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<CompanyRow>), AppError> {
    validate(&req)?;

    let taken: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM companies WHERE company_name = $1")
        .bind(&req.company_name)
        .fetch_optional(&state.db)
        .await?;
    if taken.is_some() {
        return Err(AppError::Validation(
            "A company with this name already exists".to_string(),
        ));
    }

    let company: CompanyRow = sqlx::query_as(
        r#"
        INSERT INTO companies (id, company_name, company_size, headquarters, year_founded,
                               company_structure, work_environment, communication_style,
                               team_structure_overview)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&req.company_name)
    .bind(&req.company_size)
    .bind(&req.headquarters)
    .bind(req.year_founded)
    .bind(&req.company_structure)
    .bind(&req.work_environment)
    .bind(&req.communication_style)
    .bind(&req.team_structure_overview)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(company)))
}

/// GET /api/v1/companies
pub async fn handle_list_companies(
    State(state): State<AppState>,
) -> Result<Json<Vec<CompanyRow>>, AppError> {
    let companies = sqlx::query_as("SELECT * FROM companies ORDER BY created_at DESC")
        .fetch_all(&state.db)
        .await?;
    Ok(Json(companies))
}

/// GET /api/v1/companies/:id
pub async fn handle_get_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CompanyRow>, AppError> {
    let company: Option<CompanyRow> = sqlx::query_as("SELECT * FROM companies WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?;
    company
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Company not found".to_string()))
}
