use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::validate_non_empty;
use crate::entity::round;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateRoundRequest {
    /// Round number (1, 2, 3 ...), unique across rounds.
    #[schema(example = 1)]
    pub round: i32,
    #[schema(example = "Ideation")]
    pub name: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    /// Defaults to true.
    pub is_active: Option<bool>,
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UpdateRoundRequest {
    pub name: Option<String>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RoundResponse {
    pub id: i32,
    #[schema(example = 1)]
    pub round: i32,
    #[schema(example = "Ideation")]
    pub name: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<round::Model> for RoundResponse {
    fn from(m: round::Model) -> Self {
        Self {
            id: m.id,
            round: m.round,
            name: m.name,
            start_at: m.start_at,
            end_at: m.end_at,
            is_active: m.is_active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub fn validate_create_round(req: &CreateRoundRequest) -> Result<(), AppError> {
    if req.round < 1 {
        return Err(AppError::Validation(
            "Round number must be a positive integer".into(),
        ));
    }
    validate_non_empty(&req.name, 256, "Round name")?;
    if req.end_at <= req.start_at {
        return Err(AppError::Validation("end_at must be after start_at".into()));
    }
    Ok(())
}

pub fn validate_update_round(req: &UpdateRoundRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_non_empty(name, 256, "Round name")?;
    }
    // The end > start invariant is re-checked against the merged row in the
    // handler, since either bound may arrive alone.
    if let (Some(start), Some(end)) = (req.start_at, req.end_at)
        && end <= start
    {
        return Err(AppError::Validation("end_at must be after start_at".into()));
    }
    Ok(())
}
