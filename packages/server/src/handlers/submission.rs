use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use common::SubmissionStatus;
use sea_orm::*;
use tracing::instrument;

use crate::entity::submission;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::submission::{
    CreateSubmissionRequest, SubmissionResponse, normalize_url, validate_create_submission,
};
use crate::state::AppState;
use crate::utils::round;

/// Create the team's submission for a round.
///
/// Three preconditions reject with distinct causes: the caller must hold
/// `submission:create` (team leaders only), the round window must be open,
/// and no submission may already exist for the (team, round) pair.
#[utoipa::path(
    post,
    path = "/",
    tag = "Submissions",
    operation_id = "createSubmission",
    summary = "Submit a solution for a round",
    request_body = CreateSubmissionRequest,
    responses(
        (status = 201, description = "Submission created", body = SubmissionResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 409, description = "Round not active, window closed, or submission already exists (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(round = payload.round))]
pub async fn create_submission(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateSubmissionRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("submission:create")?;
    let team_code = auth_user.require_team()?.to_string();
    validate_create_submission(&payload)?;

    let txn = state.db.begin().await?;

    round::require_open_window(&txn, payload.round, Utc::now()).await?;

    let exists = submission::Entity::find()
        .filter(submission::Column::TeamCode.eq(&team_code))
        .filter(submission::Column::Round.eq(payload.round))
        .one(&txn)
        .await?
        .is_some();
    if exists {
        return Err(AppError::Conflict(
            "Submission already exists for this round".into(),
        ));
    }

    let now = Utc::now();
    let new_submission = submission::ActiveModel {
        team_code: Set(team_code),
        round: Set(payload.round),
        title: Set(payload.title.trim().to_string()),
        description: Set(payload.description.trim().to_string()),
        repo_url: Set(normalize_url(&payload.repo_url, "repo_url")?),
        live_url: Set(normalize_url(&payload.live_url, "live_url")?),
        presentation_url: Set(normalize_url(&payload.presentation_url, "presentation_url")?),
        status: Set(SubmissionStatus::Submitted),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    // The unique (team_code, round) index closes the check-then-insert race.
    let model = new_submission.insert(&txn).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict("Submission already exists for this round".into())
        }
        _ => AppError::from(e),
    })?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(SubmissionResponse::from(model))))
}

/// List the caller team's submissions, ordered by round.
#[utoipa::path(
    get,
    path = "/me",
    tag = "Submissions",
    operation_id = "mySubmissions",
    summary = "List my team's submissions",
    responses(
        (status = 200, description = "List of submissions", body = [SubmissionResponse]),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "No team associated with user (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn my_submissions(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<SubmissionResponse>>, AppError> {
    auth_user.require_permission("submission:view")?;
    let team_code = auth_user.require_team()?;

    let submissions = submission::Entity::find()
        .filter(submission::Column::TeamCode.eq(team_code))
        .order_by_asc(submission::Column::Round)
        .order_by_desc(submission::Column::CreatedAt)
        .all(&state.db)
        .await?;

    Ok(Json(
        submissions
            .into_iter()
            .map(SubmissionResponse::from)
            .collect(),
    ))
}
