use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::validate_non_empty;
use crate::entity::criterion;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateCriterionRequest {
    /// Unique stable key (lowercase letters, digits, underscores).
    #[schema(example = "innovation")]
    pub key: String,
    #[schema(example = "Innovation")]
    pub name: String,
    #[schema(example = 10)]
    pub max_score: i32,
    #[schema(example = 1.0)]
    pub weight: f64,
    /// Restrict to one round; applies to all rounds when absent.
    pub round: Option<i32>,
    /// Defaults to true.
    pub is_active: Option<bool>,
    /// Defaults to 0.
    pub display_order: Option<i32>,
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UpdateCriterionRequest {
    pub name: Option<String>,
    pub max_score: Option<i32>,
    pub weight: Option<f64>,
    pub round: Option<i32>,
    pub is_active: Option<bool>,
    pub display_order: Option<i32>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CriterionResponse {
    pub id: i32,
    #[schema(example = "innovation")]
    pub key: String,
    #[schema(example = "Innovation")]
    pub name: String,
    #[schema(example = 10)]
    pub max_score: i32,
    #[schema(example = 1.0)]
    pub weight: f64,
    pub round: Option<i32>,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<criterion::Model> for CriterionResponse {
    fn from(m: criterion::Model) -> Self {
        Self {
            id: m.id,
            key: m.key,
            name: m.name,
            max_score: m.max_score,
            weight: m.weight,
            round: m.round,
            is_active: m.is_active,
            display_order: m.display_order,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

fn validate_common(
    max_score: Option<i32>,
    weight: Option<f64>,
    round: Option<i32>,
    display_order: Option<i32>,
) -> Result<(), AppError> {
    if let Some(max_score) = max_score
        && max_score < 1
    {
        return Err(AppError::Validation("max_score must be at least 1".into()));
    }
    if let Some(weight) = weight
        && (!weight.is_finite() || weight < 0.0)
    {
        return Err(AppError::Validation("weight must be non-negative".into()));
    }
    if let Some(round) = round
        && round < 1
    {
        return Err(AppError::Validation(
            "round must be a positive integer".into(),
        ));
    }
    if let Some(display_order) = display_order
        && display_order < 0
    {
        return Err(AppError::Validation("display_order must be >= 0".into()));
    }
    Ok(())
}

pub fn validate_create_criterion(req: &CreateCriterionRequest) -> Result<(), AppError> {
    let key = req.key.trim();
    if key.is_empty()
        || key.chars().count() > 64
        || !key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(AppError::Validation(
            "key must be 1-64 lowercase letters, digits, or underscores".into(),
        ));
    }
    validate_non_empty(&req.name, 256, "Criterion name")?;
    validate_common(
        Some(req.max_score),
        Some(req.weight),
        req.round,
        req.display_order,
    )
}

pub fn validate_update_criterion(req: &UpdateCriterionRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_non_empty(name, 256, "Criterion name")?;
    }
    validate_common(req.max_score, req.weight, req.round, req.display_order)
}
