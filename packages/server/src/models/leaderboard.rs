use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::scoring::leaderboard::{RankedRoundTeam, RankedTeam};

/// Query parameters for the leaderboard.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct LeaderboardQuery {
    /// Round number to filter by, or `all` (default) for the overall board.
    #[param(example = "all")]
    pub round: Option<String>,
}

/// Which view of the leaderboard was requested.
pub enum LeaderboardScope {
    AllRounds,
    Round(i32),
}

impl LeaderboardQuery {
    pub fn scope(&self) -> Result<LeaderboardScope, AppError> {
        match self.round.as_deref().map(str::trim) {
            None | Some("") | Some("all") => Ok(LeaderboardScope::AllRounds),
            Some(value) => match value.parse::<i32>() {
                Ok(n) if n >= 1 => Ok(LeaderboardScope::Round(n)),
                _ => Err(AppError::Validation(
                    "round must be a positive integer or 'all'".into(),
                )),
            },
        }
    }
}

/// One ranked leaderboard row. `admin_total` is only present in the
/// round-filtered view, where it overrides the mentor average as sort key.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LeaderboardEntry {
    #[schema(example = "AB12CD")]
    pub team_code: String,
    #[schema(example = "Null Pointers")]
    pub team_name: String,
    #[schema(example = 27.0)]
    pub average_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 85.0)]
    pub admin_total: Option<f64>,
    #[schema(example = 2)]
    pub submissions: u64,
    #[schema(example = 1)]
    pub rank: u32,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct LeaderboardResponse {
    pub leaderboard: Vec<LeaderboardEntry>,
}

impl From<RankedTeam> for LeaderboardEntry {
    fn from(r: RankedTeam) -> Self {
        Self {
            team_code: r.team_code,
            team_name: r.team_name,
            average_score: r.average_score,
            admin_total: None,
            submissions: r.submissions,
            rank: r.rank,
        }
    }
}

impl From<RankedRoundTeam> for LeaderboardEntry {
    fn from(r: RankedRoundTeam) -> Self {
        Self {
            team_code: r.team_code,
            team_name: r.team_name,
            average_score: r.average_score,
            admin_total: r.admin_total,
            submissions: r.submissions,
            rank: r.rank,
        }
    }
}
