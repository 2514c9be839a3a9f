use chrono::{DateTime, Utc};
use common::scoring::{AdminScore, CriteriaScores, MentorScoreEntry};
use serde::{Deserialize, Serialize};

use crate::entity::score;
use crate::error::AppError;

/// Request body for a mentor score. Submitting again for the same
/// (team, round) replaces the caller's previous entry.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct MentorScoreRequest {
    #[schema(example = "AB12CD")]
    pub team_code: String,
    #[schema(example = 1)]
    pub round: i32,
    pub criteria: CriteriaScores,
    /// Required free-text feedback.
    #[schema(example = "Strong prototype, demo needs polish.")]
    pub comments: String,
}

pub fn validate_mentor_score(payload: &MentorScoreRequest) -> Result<(), AppError> {
    if payload.team_code.trim().is_empty() {
        return Err(AppError::Validation("team_code must not be empty".into()));
    }
    if payload.round < 1 {
        return Err(AppError::Validation(
            "Round number must be a positive integer".into(),
        ));
    }
    payload
        .criteria
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    if payload.comments.trim().is_empty() {
        return Err(AppError::Validation("Comments must not be empty".into()));
    }
    Ok(())
}

/// Request body for the administrator's final score. Replaces any prior
/// admin score wholesale.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct AdminScoreRequest {
    #[schema(example = "AB12CD")]
    pub team_code: String,
    #[schema(example = 1)]
    pub round: i32,
    #[schema(example = 85.0)]
    pub total: f64,
    /// Defaults to empty.
    pub final_comment: Option<String>,
}

pub fn validate_admin_score(payload: &AdminScoreRequest) -> Result<(), AppError> {
    if payload.team_code.trim().is_empty() {
        return Err(AppError::Validation("team_code must not be empty".into()));
    }
    if payload.round < 1 {
        return Err(AppError::Validation(
            "Round number must be a positive integer".into(),
        ));
    }
    if !payload.total.is_finite() || payload.total < 0.0 {
        return Err(AppError::Validation("total must be >= 0".into()));
    }
    Ok(())
}

/// Query parameters for listing score records.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct ScoreListQuery {
    /// Filter by team code.
    #[param(example = "AB12CD")]
    pub team_code: Option<String>,
    /// Filter by round number.
    #[param(example = 1)]
    pub round: Option<i32>,
}

/// A full score record.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ScoreResponse {
    pub id: i32,
    #[schema(example = "AB12CD")]
    pub team_code: String,
    #[schema(example = 1)]
    pub round: i32,
    pub mentor_scores: Vec<MentorScoreEntry>,
    pub admin_score: Option<AdminScore>,
    /// Mean of the mentor entry totals; 0 while no mentor has scored.
    #[schema(example = 27.0)]
    pub average_score: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<score::Model> for ScoreResponse {
    fn from(m: score::Model) -> Self {
        Self {
            id: m.id,
            team_code: m.team_code,
            round: m.round,
            mentor_scores: serde_json::from_value(m.mentor_scores).unwrap_or_default(),
            admin_score: m
                .admin_score
                .and_then(|v| serde_json::from_value(v).ok()),
            average_score: m.average_score,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
