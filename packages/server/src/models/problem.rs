use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::validate_non_empty;
use crate::entity::problem_statement;
use crate::error::AppError;

/// Accepted problem-statement categories.
pub const CATEGORIES: &[&str] = &["Software", "Hardware"];

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateProblemStatementRequest {
    /// Serial number used for catalogue ordering; unique.
    #[schema(example = 12)]
    pub s_no: i32,
    #[schema(example = "Dept. of Energy")]
    pub organization: String,
    #[schema(example = "Smart grid load forecasting")]
    pub title: String,
    pub description: String,
    /// One of `Software`, `Hardware`.
    #[schema(example = "Software")]
    pub category: String,
    /// External problem-statement identifier; unique.
    #[schema(example = "PS-1207")]
    pub ps_number: String,
    #[schema(example = "Sustainability")]
    pub theme: String,
    /// Defaults to true.
    pub is_active: Option<bool>,
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UpdateProblemStatementRequest {
    pub organization: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub theme: Option<String>,
    pub ideas: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ProblemStatementResponse {
    pub id: i32,
    pub s_no: i32,
    pub organization: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub ps_number: String,
    pub theme: String,
    pub ideas: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<problem_statement::Model> for ProblemStatementResponse {
    fn from(m: problem_statement::Model) -> Self {
        Self {
            id: m.id,
            s_no: m.s_no,
            organization: m.organization,
            title: m.title,
            description: m.description,
            category: m.category,
            ps_number: m.ps_number,
            theme: m.theme,
            ideas: m.ideas,
            is_active: m.is_active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

fn validate_category(category: &str) -> Result<(), AppError> {
    if CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "category must be one of: {}",
            CATEGORIES.join(", ")
        )))
    }
}

pub fn validate_create_problem_statement(
    req: &CreateProblemStatementRequest,
) -> Result<(), AppError> {
    if req.s_no < 1 {
        return Err(AppError::Validation("s_no must be a positive integer".into()));
    }
    validate_non_empty(&req.organization, 256, "Organization")?;
    validate_non_empty(&req.title, 256, "Title")?;
    if req.description.trim().is_empty() {
        return Err(AppError::Validation("Description must not be empty".into()));
    }
    validate_category(&req.category)?;
    validate_non_empty(&req.ps_number, 64, "ps_number")?;
    validate_non_empty(&req.theme, 128, "Theme")?;
    Ok(())
}

pub fn validate_update_problem_statement(
    req: &UpdateProblemStatementRequest,
) -> Result<(), AppError> {
    if let Some(ref organization) = req.organization {
        validate_non_empty(organization, 256, "Organization")?;
    }
    if let Some(ref title) = req.title {
        validate_non_empty(title, 256, "Title")?;
    }
    if let Some(ref description) = req.description
        && description.trim().is_empty()
    {
        return Err(AppError::Validation("Description must not be empty".into()));
    }
    if let Some(ref category) = req.category {
        validate_category(category)?;
    }
    if let Some(ref theme) = req.theme {
        validate_non_empty(theme, 128, "Theme")?;
    }
    if let Some(ideas) = req.ideas
        && ideas < 0
    {
        return Err(AppError::Validation("ideas must be >= 0".into()));
    }
    Ok(())
}
