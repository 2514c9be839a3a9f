use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::*;
use tracing::instrument;

use crate::entity::problem_statement;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::problem::{
    CreateProblemStatementRequest, ProblemStatementResponse, UpdateProblemStatementRequest,
    validate_create_problem_statement, validate_update_problem_statement,
};
use crate::state::AppState;

async fn find_problem_statement<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<problem_statement::Model, AppError> {
    problem_statement::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Problem statement not found".into()))
}

/// List problem statements ordered by serial number.
///
/// Participants and mentors browse the active catalogue;
/// `problem:manage` also sees deactivated statements.
#[utoipa::path(
    get,
    path = "/",
    tag = "Problem Statements",
    operation_id = "listProblemStatements",
    summary = "List problem statements",
    responses(
        (status = 200, description = "List of problem statements", body = [ProblemStatementResponse]),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn list_problem_statements(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<ProblemStatementResponse>>, AppError> {
    let mut select = problem_statement::Entity::find();
    if !auth_user.has_permission("problem:manage") {
        select = select.filter(problem_statement::Column::IsActive.eq(true));
    }

    let items = select
        .order_by_asc(problem_statement::Column::SNo)
        .all(&state.db)
        .await?;

    Ok(Json(
        items
            .into_iter()
            .map(ProblemStatementResponse::from)
            .collect(),
    ))
}

/// Create a problem statement.
#[utoipa::path(
    post,
    path = "/",
    tag = "Problem Statements",
    operation_id = "createProblemStatement",
    summary = "Create a problem statement",
    request_body = CreateProblemStatementRequest,
    responses(
        (status = 201, description = "Problem statement created", body = ProblemStatementResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 409, description = "Serial or PS number already exists (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(ps_number = %payload.ps_number))]
pub async fn create_problem_statement(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateProblemStatementRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("problem:manage")?;
    validate_create_problem_statement(&payload)?;

    let now = chrono::Utc::now();
    let new_statement = problem_statement::ActiveModel {
        s_no: Set(payload.s_no),
        organization: Set(payload.organization.trim().to_string()),
        title: Set(payload.title.trim().to_string()),
        description: Set(payload.description),
        category: Set(payload.category),
        ps_number: Set(payload.ps_number.trim().to_string()),
        theme: Set(payload.theme.trim().to_string()),
        ideas: Set(0),
        is_active: Set(payload.is_active.unwrap_or(true)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_statement
        .insert(&state.db)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::Conflict("Serial number or PS number already exists".into())
            }
            _ => AppError::from(e),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(ProblemStatementResponse::from(model)),
    ))
}

/// Update a problem statement.
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Problem Statements",
    operation_id = "updateProblemStatement",
    summary = "Update a problem statement",
    params(("id" = i32, Path, description = "Problem statement ID")),
    request_body = UpdateProblemStatementRequest,
    responses(
        (status = 200, description = "Problem statement updated", body = ProblemStatementResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Problem statement not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(problem_statement_id = %id))]
pub async fn update_problem_statement(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateProblemStatementRequest>,
) -> Result<Json<ProblemStatementResponse>, AppError> {
    auth_user.require_permission("problem:manage")?;
    validate_update_problem_statement(&payload)?;

    let existing = find_problem_statement(&state.db, id).await?;

    let mut active: problem_statement::ActiveModel = existing.into();
    if let Some(organization) = payload.organization {
        active.organization = Set(organization.trim().to_string());
    }
    if let Some(title) = payload.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(category) = payload.category {
        active.category = Set(category);
    }
    if let Some(theme) = payload.theme {
        active.theme = Set(theme.trim().to_string());
    }
    if let Some(ideas) = payload.ideas {
        active.ideas = Set(ideas);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&state.db).await?;
    Ok(Json(ProblemStatementResponse::from(model)))
}

/// Delete a problem statement.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Problem Statements",
    operation_id = "deleteProblemStatement",
    summary = "Delete a problem statement",
    params(("id" = i32, Path, description = "Problem statement ID")),
    responses(
        (status = 204, description = "Problem statement deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Problem statement not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(problem_statement_id = %id))]
pub async fn delete_problem_statement(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    auth_user.require_permission("problem:manage")?;

    let existing = find_problem_statement(&state.db, id).await?;
    existing.delete(&state.db).await?;

    Ok(StatusCode::NO_CONTENT)
}
