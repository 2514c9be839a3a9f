use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::*;
use tracing::instrument;

use crate::entity::criterion;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::criteria::{
    CreateCriterionRequest, CriterionResponse, UpdateCriterionRequest, validate_create_criterion,
    validate_update_criterion,
};
use crate::state::AppState;

async fn find_criterion<C: ConnectionTrait>(db: &C, id: i32) -> Result<criterion::Model, AppError> {
    criterion::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Criterion not found".into()))
}

/// List judging criteria ordered by round, display order, then name.
///
/// Mentors see only active criteria; `criteria:manage` sees everything.
#[utoipa::path(
    get,
    path = "/",
    tag = "Criteria",
    operation_id = "listCriteria",
    summary = "List judging criteria",
    responses(
        (status = 200, description = "List of criteria", body = [CriterionResponse]),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn list_criteria(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<CriterionResponse>>, AppError> {
    let mut select = criterion::Entity::find();
    if !auth_user.has_permission("criteria:manage") {
        select = select.filter(criterion::Column::IsActive.eq(true));
    }

    let items = select
        .order_by_asc(criterion::Column::Round)
        .order_by_asc(criterion::Column::DisplayOrder)
        .order_by_asc(criterion::Column::Name)
        .all(&state.db)
        .await?;

    Ok(Json(items.into_iter().map(CriterionResponse::from).collect()))
}

/// Create a judging criterion.
#[utoipa::path(
    post,
    path = "/",
    tag = "Criteria",
    operation_id = "createCriterion",
    summary = "Create a judging criterion",
    request_body = CreateCriterionRequest,
    responses(
        (status = 201, description = "Criterion created", body = CriterionResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 409, description = "Key already exists (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(key = %payload.key))]
pub async fn create_criterion(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateCriterionRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("criteria:manage")?;
    validate_create_criterion(&payload)?;

    let now = chrono::Utc::now();
    let new_criterion = criterion::ActiveModel {
        key: Set(payload.key.trim().to_string()),
        name: Set(payload.name.trim().to_string()),
        max_score: Set(payload.max_score),
        weight: Set(payload.weight),
        round: Set(payload.round),
        is_active: Set(payload.is_active.unwrap_or(true)),
        display_order: Set(payload.display_order.unwrap_or(0)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_criterion
        .insert(&state.db)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::Conflict("Criterion key already exists".into())
            }
            _ => AppError::from(e),
        })?;

    Ok((StatusCode::CREATED, Json(CriterionResponse::from(model))))
}

/// Update a judging criterion.
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Criteria",
    operation_id = "updateCriterion",
    summary = "Update a judging criterion",
    params(("id" = i32, Path, description = "Criterion ID")),
    request_body = UpdateCriterionRequest,
    responses(
        (status = 200, description = "Criterion updated", body = CriterionResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Criterion not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(criterion_id = %id))]
pub async fn update_criterion(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateCriterionRequest>,
) -> Result<Json<CriterionResponse>, AppError> {
    auth_user.require_permission("criteria:manage")?;
    validate_update_criterion(&payload)?;

    let existing = find_criterion(&state.db, id).await?;

    let mut active: criterion::ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(max_score) = payload.max_score {
        active.max_score = Set(max_score);
    }
    if let Some(weight) = payload.weight {
        active.weight = Set(weight);
    }
    if let Some(round) = payload.round {
        active.round = Set(Some(round));
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    if let Some(display_order) = payload.display_order {
        active.display_order = Set(display_order);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&state.db).await?;
    Ok(Json(CriterionResponse::from(model)))
}

/// Delete a judging criterion.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Criteria",
    operation_id = "deleteCriterion",
    summary = "Delete a judging criterion",
    params(("id" = i32, Path, description = "Criterion ID")),
    responses(
        (status = 204, description = "Criterion deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Criterion not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(criterion_id = %id))]
pub async fn delete_criterion(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    auth_user.require_permission("criteria:manage")?;

    let existing = find_criterion(&state.db, id).await?;
    existing.delete(&state.db).await?;

    Ok(StatusCode::NO_CONTENT)
}
