use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use crate::entity::round;
use crate::error::AppError;
use crate::scoring::window::{self, WindowStatus};

/// Look up a round by its number, returning 404 if no row exists.
pub async fn find_round<C: ConnectionTrait>(db: &C, number: i32) -> Result<round::Model, AppError> {
    round::Entity::find()
        .filter(round::Column::Round.eq(number))
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Round not found".into()))
}

/// Look up the active round matching `number`, if any.
pub async fn find_active_round<C: ConnectionTrait>(
    db: &C,
    number: i32,
) -> Result<Option<round::Model>, AppError> {
    let found = round::Entity::find()
        .filter(round::Column::Round.eq(number))
        .filter(round::Column::IsActive.eq(true))
        .one(db)
        .await?;
    Ok(found)
}

/// Enforce the submission window for a round: the round must exist, be
/// active, and `now` must fall inside `[start_at, end_at]`.
///
/// Rejections are state conflicts with one distinct message per cause.
pub async fn require_open_window<C: ConnectionTrait>(
    db: &C,
    number: i32,
    now: DateTime<Utc>,
) -> Result<round::Model, AppError> {
    let Some(found) = find_active_round(db, number).await? else {
        return Err(AppError::Conflict("Round not active".into()));
    };
    match window::evaluate(Some(&found), now) {
        WindowStatus::Open => Ok(found),
        WindowStatus::NotActive => Err(AppError::Conflict("Round not active".into())),
        WindowStatus::Closed => Err(AppError::Conflict("Submission window closed".into())),
    }
}
