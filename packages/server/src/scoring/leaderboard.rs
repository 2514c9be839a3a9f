use std::cmp::Ordering;

/// Input row for the all-rounds leaderboard: one element per team, with the
/// stored `average_score` of each of its score records (one per round).
#[derive(Clone, Debug)]
pub struct TeamScores {
    pub team_code: String,
    pub team_name: String,
    pub round_averages: Vec<f64>,
    pub submissions: u64,
}

/// Ranked all-rounds leaderboard entry.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedTeam {
    pub team_code: String,
    pub team_name: String,
    pub average_score: f64,
    pub submissions: u64,
    pub rank: u32,
}

/// Input row for the round-filtered leaderboard.
#[derive(Clone, Debug)]
pub struct RoundStanding {
    pub team_code: String,
    pub team_name: String,
    pub mentor_average: f64,
    pub admin_total: Option<f64>,
    pub submissions: u64,
}

/// Ranked round-filtered leaderboard entry. The sort key is the admin final
/// total when present, else the mentor average.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedRoundTeam {
    pub team_code: String,
    pub team_name: String,
    pub average_score: f64,
    pub admin_total: Option<f64>,
    pub submissions: u64,
    pub rank: u32,
}

/// Descending by score; equal keys order by team code ascending so the
/// result is deterministic. Incomparable values (NaN never occurs for
/// validated scores) fall through to the code tie-break.
fn by_score_then_code(key_a: f64, code_a: &str, key_b: f64, code_b: &str) -> Ordering {
    key_b
        .partial_cmp(&key_a)
        .unwrap_or(Ordering::Equal)
        .then_with(|| code_a.cmp(code_b))
}

/// Rank all teams by the mean of their per-round averages.
///
/// Each round weighs equally regardless of how many mentors scored it;
/// teams with no score records rank with 0. Ranks are contiguous 1..=N.
pub fn rank_overall(teams: Vec<TeamScores>) -> Vec<RankedTeam> {
    let mut rows: Vec<RankedTeam> = teams
        .into_iter()
        .map(|t| {
            let average_score = if t.round_averages.is_empty() {
                0.0
            } else {
                t.round_averages.iter().sum::<f64>() / t.round_averages.len() as f64
            };
            RankedTeam {
                team_code: t.team_code,
                team_name: t.team_name,
                average_score,
                submissions: t.submissions,
                rank: 0,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        by_score_then_code(a.average_score, &a.team_code, b.average_score, &b.team_code)
    });
    for (index, row) in rows.iter_mut().enumerate() {
        row.rank = index as u32 + 1;
    }
    rows
}

/// Rank teams within a single round, preferring the administrator's final
/// total over the mentor average when one has been recorded.
pub fn rank_round(standings: Vec<RoundStanding>) -> Vec<RankedRoundTeam> {
    let mut rows: Vec<RankedRoundTeam> = standings
        .into_iter()
        .map(|s| RankedRoundTeam {
            team_code: s.team_code,
            team_name: s.team_name,
            average_score: s.mentor_average,
            admin_total: s.admin_total,
            submissions: s.submissions,
            rank: 0,
        })
        .collect();

    rows.sort_by(|a, b| {
        let key_a = a.admin_total.unwrap_or(a.average_score);
        let key_b = b.admin_total.unwrap_or(b.average_score);
        by_score_then_code(key_a, &a.team_code, key_b, &b.team_code)
    });
    for (index, row) in rows.iter_mut().enumerate() {
        row.rank = index as u32 + 1;
    }
    rows
}
