use chrono::{DateTime, Utc};
use common::SubmissionStatus;
use serde::{Deserialize, Serialize};

use super::shared::{validate_min_chars, validate_url};
use crate::entity::submission;
use crate::error::AppError;

/// Request body for creating a submission. The round must be active with an
/// open window, and only a team leader may submit.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateSubmissionRequest {
    #[schema(example = 1)]
    pub round: i32,
    /// 5+ characters.
    #[schema(example = "GridSense")]
    pub title: String,
    /// 20+ characters.
    #[schema(example = "A load forecasting dashboard built on open smart-meter data.")]
    pub description: String,
    /// Optional; empty strings are treated as absent.
    #[schema(example = "https://github.com/null-pointers/gridsense")]
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
    pub presentation_url: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SubmissionResponse {
    pub id: i32,
    #[schema(example = "AB12CD")]
    pub team_code: String,
    #[schema(example = 1)]
    pub round: i32,
    pub title: String,
    pub description: String,
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
    pub presentation_url: Option<String>,
    pub status: SubmissionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<submission::Model> for SubmissionResponse {
    fn from(m: submission::Model) -> Self {
        Self {
            id: m.id,
            team_code: m.team_code,
            round: m.round,
            title: m.title,
            description: m.description,
            repo_url: m.repo_url,
            live_url: m.live_url,
            presentation_url: m.presentation_url,
            status: m.status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Normalize an optional URL field: trimmed empty strings become `None`,
/// anything else must be a valid http(s) URL.
pub fn normalize_url(
    value: &Option<String>,
    field: &str,
) -> Result<Option<String>, AppError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(url) => {
            validate_url(url, field)?;
            Ok(Some(url.to_string()))
        }
    }
}

pub fn validate_create_submission(req: &CreateSubmissionRequest) -> Result<(), AppError> {
    if req.round < 1 {
        return Err(AppError::Validation(
            "Round number must be a positive integer".into(),
        ));
    }
    validate_min_chars(&req.title, 5, "Title")?;
    validate_min_chars(&req.description, 20, "Description")?;
    normalize_url(&req.repo_url, "repo_url")?;
    normalize_url(&req.live_url, "live_url")?;
    normalize_url(&req.presentation_url, "presentation_url")?;
    Ok(())
}
