use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use common::SubmissionStatus;
use common::scoring::{self, AdminScore, MentorScoreEntry};
use sea_orm::sea_query::{LockType, OnConflict};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{score, submission, team};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::score::{
    AdminScoreRequest, MentorScoreRequest, ScoreListQuery, ScoreResponse, validate_admin_score,
    validate_mentor_score,
};
use crate::state::AppState;
use crate::utils::round;

/// Parse mentor entries from the JSONB column.
fn entries_from_json(value: &serde_json::Value) -> Vec<MentorScoreEntry> {
    serde_json::from_value(value.clone()).unwrap_or_default()
}

/// Convert mentor entries to a JSONB value for storage.
fn entries_to_json(entries: &[MentorScoreEntry]) -> serde_json::Value {
    serde_json::to_value(entries).unwrap_or(serde_json::Value::Array(vec![]))
}

/// Check that a team exists, returning 404 otherwise.
async fn require_team_exists<C: ConnectionTrait>(db: &C, team_code: &str) -> Result<(), AppError> {
    team::Entity::find()
        .filter(team::Column::TeamCode.eq(team_code))
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Team not found".into()))?;
    Ok(())
}

/// Find and row-lock the score record for (team_code, round).
async fn lock_score_row<C: ConnectionTrait>(
    db: &C,
    team_code: &str,
    round: i32,
) -> Result<Option<score::Model>, AppError> {
    let found = score::Entity::find()
        .filter(score::Column::TeamCode.eq(team_code))
        .filter(score::Column::Round.eq(round))
        .lock(LockType::Update)
        .one(db)
        .await?;
    Ok(found)
}

/// Replace the mentor's entry in a locked row and recompute the average.
async fn apply_mentor_entry<C: ConnectionTrait>(
    db: &C,
    row: score::Model,
    entry: MentorScoreEntry,
) -> Result<score::Model, AppError> {
    let mut entries = entries_from_json(&row.mentor_scores);
    scoring::upsert_mentor_entry(&mut entries, entry);
    let average = scoring::mean_total(&entries);

    let mut active: score::ActiveModel = row.into();
    active.mentor_scores = Set(entries_to_json(&entries));
    active.average_score = Set(average);
    active.updated_at = Set(Utc::now());
    Ok(active.update(db).await?)
}

/// Record a mentor's score for a team and round.
///
/// The write path is a row-locked upsert: concurrent mentors scoring the
/// same (team, round) serialize on the row lock, and a lost creation race
/// falls back to the locked-update path via `ON CONFLICT DO NOTHING`, so a
/// mentor can never end up with two entries.
#[utoipa::path(
    post,
    path = "/mentor",
    tag = "Scores",
    operation_id = "submitMentorScore",
    summary = "Submit a mentor score",
    description = "Records the caller's evaluation of a team for a round. Submitting again replaces the caller's previous entry. Requires `score:mentor` permission.",
    request_body = MentorScoreRequest,
    responses(
        (status = 201, description = "Score record created", body = ScoreResponse),
        (status = 200, description = "Score record updated", body = ScoreResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Team or round not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(team_code = %payload.team_code, round = payload.round))]
pub async fn submit_mentor_score(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<MentorScoreRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("score:mentor")?;
    validate_mentor_score(&payload)?;

    let team_code = payload.team_code.trim().to_string();
    let entry = MentorScoreEntry {
        mentor_id: auth_user.user_id,
        criteria: payload.criteria,
        comments: payload.comments.trim().to_string(),
        total: payload.criteria.total(),
    };

    let txn = state.db.begin().await?;

    require_team_exists(&txn, &team_code).await?;
    round::find_round(&txn, payload.round).await?;

    if let Some(row) = lock_score_row(&txn, &team_code, payload.round).await? {
        let model = apply_mentor_entry(&txn, row, entry).await?;
        txn.commit().await?;
        return Ok((StatusCode::OK, Json(ScoreResponse::from(model))));
    }

    let now = Utc::now();
    let entries = vec![entry.clone()];
    let new_score = score::ActiveModel {
        team_code: Set(team_code.clone()),
        round: Set(payload.round),
        mentor_scores: Set(entries_to_json(&entries)),
        admin_score: Set(None),
        average_score: Set(scoring::mean_total(&entries)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let insert_result = score::Entity::insert(new_score)
        .on_conflict(
            OnConflict::columns([score::Column::TeamCode, score::Column::Round])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&txn)
        .await;

    match insert_result {
        Ok(_) => {
            let model = score::Entity::find()
                .filter(score::Column::TeamCode.eq(&team_code))
                .filter(score::Column::Round.eq(payload.round))
                .one(&txn)
                .await?
                .ok_or_else(|| AppError::Internal("Score row missing after insert".into()))?;
            txn.commit().await?;
            Ok((StatusCode::CREATED, Json(ScoreResponse::from(model))))
        }
        Err(DbErr::RecordNotInserted) => {
            // Lost the creation race: the winner's row is now visible,
            // lock it and upsert the entry there.
            let row = lock_score_row(&txn, &team_code, payload.round)
                .await?
                .ok_or_else(|| AppError::Internal("Score row vanished after conflict".into()))?;
            let model = apply_mentor_entry(&txn, row, entry).await?;
            txn.commit().await?;
            Ok((StatusCode::OK, Json(ScoreResponse::from(model))))
        }
        Err(e) => Err(e.into()),
    }
}

/// Record the administrator's final score for a team and round.
///
/// Replaces any prior admin score wholesale; the mentor average is not
/// touched. The team's submission for the round, if handed in, is marked
/// `Reviewed`.
#[utoipa::path(
    post,
    path = "/admin",
    tag = "Scores",
    operation_id = "submitAdminScore",
    summary = "Submit the admin final score",
    request_body = AdminScoreRequest,
    responses(
        (status = 201, description = "Score record created", body = ScoreResponse),
        (status = 200, description = "Score record updated", body = ScoreResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Team or round not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(team_code = %payload.team_code, round = payload.round))]
pub async fn submit_admin_score(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<AdminScoreRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("score:admin")?;
    validate_admin_score(&payload)?;

    let team_code = payload.team_code.trim().to_string();
    let admin_score = AdminScore {
        total: payload.total,
        final_comment: payload.final_comment.unwrap_or_default(),
    };
    let admin_json = serde_json::to_value(&admin_score)
        .map_err(|e| AppError::Internal(format!("Serialize error: {}", e)))?;

    let txn = state.db.begin().await?;

    require_team_exists(&txn, &team_code).await?;
    round::find_round(&txn, payload.round).await?;

    let now = Utc::now();
    let (model, created) = match lock_score_row(&txn, &team_code, payload.round).await? {
        Some(row) => {
            let mut active: score::ActiveModel = row.into();
            active.admin_score = Set(Some(admin_json));
            active.updated_at = Set(now);
            (active.update(&txn).await?, false)
        }
        None => {
            let new_score = score::ActiveModel {
                team_code: Set(team_code.clone()),
                round: Set(payload.round),
                mentor_scores: Set(serde_json::Value::Array(vec![])),
                admin_score: Set(Some(admin_json)),
                average_score: Set(0.0),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };
            (new_score.insert(&txn).await?, true)
        }
    };

    mark_submission_reviewed(&txn, &team_code, payload.round).await?;

    txn.commit().await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(ScoreResponse::from(model))))
}

/// Advance the team's submission for the round to `Reviewed` once a final
/// score exists. Drafts stay untouched; the transition is monotonic.
async fn mark_submission_reviewed<C: ConnectionTrait>(
    db: &C,
    team_code: &str,
    round: i32,
) -> Result<(), AppError> {
    let found = submission::Entity::find()
        .filter(submission::Column::TeamCode.eq(team_code))
        .filter(submission::Column::Round.eq(round))
        .one(db)
        .await?;

    if let Some(sub) = found
        && sub.status.can_advance_to(SubmissionStatus::Reviewed)
    {
        let mut active: submission::ActiveModel = sub.into();
        active.status = Set(SubmissionStatus::Reviewed);
        active.updated_at = Set(Utc::now());
        active.update(db).await?;
    }
    Ok(())
}

/// List score records for review screens.
#[utoipa::path(
    get,
    path = "/",
    tag = "Scores",
    operation_id = "listScores",
    summary = "List score records",
    params(ScoreListQuery),
    responses(
        (status = 200, description = "List of score records", body = [ScoreResponse]),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query))]
pub async fn list_scores(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ScoreListQuery>,
) -> Result<Json<Vec<ScoreResponse>>, AppError> {
    auth_user.require_permission("score:view")?;

    let mut select = score::Entity::find();
    if let Some(ref team_code) = query.team_code {
        select = select.filter(score::Column::TeamCode.eq(team_code.trim()));
    }
    if let Some(round) = query.round {
        select = select.filter(score::Column::Round.eq(round));
    }

    let scores = select
        .order_by_asc(score::Column::TeamCode)
        .order_by_asc(score::Column::Round)
        .all(&state.db)
        .await?;

    Ok(Json(scores.into_iter().map(ScoreResponse::from).collect()))
}
