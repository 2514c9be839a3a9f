use axum::{Json, extract::State};
use sea_orm::*;
use tracing::instrument;

use crate::entity::team;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::team::TeamResponse;
use crate::state::AppState;

/// Return the caller's team.
#[utoipa::path(
    get,
    path = "/me",
    tag = "Teams",
    operation_id = "myTeam",
    summary = "Get my team",
    responses(
        (status = 200, description = "Team details", body = TeamResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "No team associated with user (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn my_team(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<TeamResponse>, AppError> {
    let code = auth_user.require_team()?;

    let team = team::Entity::find()
        .filter(team::Column::TeamCode.eq(code))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Team not found".into()))?;

    Ok(Json(TeamResponse::from(team)))
}
