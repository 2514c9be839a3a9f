use std::collections::HashMap;

use axum::{
    Json,
    extract::{Query, State},
};
use common::scoring::AdminScore;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{score, submission, team};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::leaderboard::{
    LeaderboardEntry, LeaderboardQuery, LeaderboardResponse, LeaderboardScope,
};
use crate::scoring::leaderboard::{RoundStanding, TeamScores, rank_overall, rank_round};
use crate::state::AppState;

/// Count submissions per team code with one scan.
async fn submission_counts(db: &DatabaseConnection) -> Result<HashMap<String, u64>, AppError> {
    let team_codes: Vec<String> = submission::Entity::find()
        .select_only()
        .column(submission::Column::TeamCode)
        .into_tuple()
        .all(db)
        .await?;

    let mut counts: HashMap<String, u64> = HashMap::new();
    for code in team_codes {
        *counts.entry(code).or_default() += 1;
    }
    Ok(counts)
}

/// Return the ranked leaderboard.
///
/// Recomputed from the stored rows on every call; no caching. The overall
/// view averages each team's per-round averages (rounds weigh equally); the
/// round-filtered view prefers the admin final total as sort key.
#[utoipa::path(
    get,
    path = "/",
    tag = "Leaderboard",
    operation_id = "getLeaderboard",
    summary = "Get the leaderboard",
    params(LeaderboardQuery),
    responses(
        (status = 200, description = "Ranked teams", body = LeaderboardResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query))]
pub async fn get_leaderboard(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>, AppError> {
    auth_user.require_permission("leaderboard:view")?;
    let scope = query.scope()?;

    let teams = team::Entity::find().all(&state.db).await?;
    let counts = submission_counts(&state.db).await?;

    let entries: Vec<LeaderboardEntry> = match scope {
        LeaderboardScope::AllRounds => {
            let scores = score::Entity::find().all(&state.db).await?;

            let mut averages: HashMap<String, Vec<f64>> = HashMap::new();
            for row in scores {
                averages
                    .entry(row.team_code)
                    .or_default()
                    .push(row.average_score);
            }

            let rows = teams
                .into_iter()
                .map(|t| TeamScores {
                    round_averages: averages.remove(&t.team_code).unwrap_or_default(),
                    submissions: counts.get(&t.team_code).copied().unwrap_or(0),
                    team_code: t.team_code,
                    team_name: t.team_name,
                })
                .collect();

            rank_overall(rows)
                .into_iter()
                .map(LeaderboardEntry::from)
                .collect()
        }
        LeaderboardScope::Round(round) => {
            let scores = score::Entity::find()
                .filter(score::Column::Round.eq(round))
                .all(&state.db)
                .await?;

            let mut by_team: HashMap<String, (f64, Option<f64>)> = HashMap::new();
            for row in scores {
                let admin_total = row
                    .admin_score
                    .as_ref()
                    .and_then(|v| serde_json::from_value::<AdminScore>(v.clone()).ok())
                    .map(|a| a.total);
                by_team.insert(row.team_code, (row.average_score, admin_total));
            }

            let rows = teams
                .into_iter()
                .map(|t| {
                    let (mentor_average, admin_total) =
                        by_team.remove(&t.team_code).unwrap_or((0.0, None));
                    RoundStanding {
                        mentor_average,
                        admin_total,
                        submissions: counts.get(&t.team_code).copied().unwrap_or(0),
                        team_code: t.team_code,
                        team_name: t.team_name,
                    }
                })
                .collect();

            rank_round(rows)
                .into_iter()
                .map(LeaderboardEntry::from)
                .collect()
        }
    };

    Ok(Json(LeaderboardResponse {
        leaderboard: entries,
    }))
}
