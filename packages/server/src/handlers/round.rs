use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::*;
use tracing::instrument;

use crate::entity::round;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::round::{
    CreateRoundRequest, RoundResponse, UpdateRoundRequest, validate_create_round,
    validate_update_round,
};
use crate::state::AppState;

/// Find a round row by ID or return 404.
async fn find_round_row<C: ConnectionTrait>(db: &C, id: i32) -> Result<round::Model, AppError> {
    round::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Round not found".into()))
}

/// List all rounds, ordered by round number.
#[utoipa::path(
    get,
    path = "/",
    tag = "Rounds",
    operation_id = "listRounds",
    summary = "List rounds",
    description = "Returns all rounds ordered by round number. Requires `round:manage` permission.",
    responses(
        (status = 200, description = "List of rounds", body = [RoundResponse]),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn list_rounds(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<RoundResponse>>, AppError> {
    auth_user.require_permission("round:manage")?;

    let rounds = round::Entity::find()
        .order_by_asc(round::Column::Round)
        .all(&state.db)
        .await?;

    Ok(Json(rounds.into_iter().map(RoundResponse::from).collect()))
}

/// Create a round.
#[utoipa::path(
    post,
    path = "/",
    tag = "Rounds",
    operation_id = "createRound",
    summary = "Create a round",
    description = "Creates a numbered, time-boxed evaluation phase. Requires `round:manage` permission.",
    request_body = CreateRoundRequest,
    responses(
        (status = 201, description = "Round created", body = RoundResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 409, description = "Round number already exists (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(round = payload.round))]
pub async fn create_round(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateRoundRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("round:manage")?;
    validate_create_round(&payload)?;

    let now = chrono::Utc::now();
    let new_round = round::ActiveModel {
        round: Set(payload.round),
        name: Set(payload.name.trim().to_string()),
        start_at: Set(payload.start_at),
        end_at: Set(payload.end_at),
        is_active: Set(payload.is_active.unwrap_or(true)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_round.insert(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict(format!("Round {} already exists", payload.round))
        }
        _ => AppError::from(e),
    })?;

    Ok((StatusCode::CREATED, Json(RoundResponse::from(model))))
}

/// Update a round.
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Rounds",
    operation_id = "updateRound",
    summary = "Update a round",
    params(("id" = i32, Path, description = "Round row ID")),
    request_body = UpdateRoundRequest,
    responses(
        (status = 200, description = "Round updated", body = RoundResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Round not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(round_id = %id))]
pub async fn update_round(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateRoundRequest>,
) -> Result<Json<RoundResponse>, AppError> {
    auth_user.require_permission("round:manage")?;
    validate_update_round(&payload)?;

    let existing = find_round_row(&state.db, id).await?;

    // Re-check the window invariant against the merged row, since either
    // bound may arrive alone.
    let merged_start = payload.start_at.unwrap_or(existing.start_at);
    let merged_end = payload.end_at.unwrap_or(existing.end_at);
    if merged_end <= merged_start {
        return Err(AppError::Validation("end_at must be after start_at".into()));
    }

    let mut active: round::ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(start_at) = payload.start_at {
        active.start_at = Set(start_at);
    }
    if let Some(end_at) = payload.end_at {
        active.end_at = Set(end_at);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&state.db).await?;
    Ok(Json(RoundResponse::from(model)))
}

/// Delete a round.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Rounds",
    operation_id = "deleteRound",
    summary = "Delete a round",
    params(("id" = i32, Path, description = "Round row ID")),
    responses(
        (status = 204, description = "Round deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Round not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(round_id = %id))]
pub async fn delete_round(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    auth_user.require_permission("round:manage")?;

    let existing = find_round_row(&state.db, id).await?;
    existing.delete(&state.db).await?;

    Ok(StatusCode::NO_CONTENT)
}
