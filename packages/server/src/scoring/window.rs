use chrono::{DateTime, Utc};

use crate::entity::round;

/// Outcome of the round window gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowStatus {
    /// Submissions may be created for the round.
    Open,
    /// No round with the requested number is active.
    NotActive,
    /// The round exists and is active, but `now` is outside the window.
    Closed,
}

/// Decide whether a new submission is permitted for a round at `now`.
///
/// The window is inclusive at both ends: a submission exactly at `start_at`
/// or exactly at `end_at` is allowed. Pure decision over supplied state;
/// the caller performs the lookup and is responsible for the leader-role
/// and no-duplicate-submission preconditions, which reject separately.
pub fn evaluate(found: Option<&round::Model>, now: DateTime<Utc>) -> WindowStatus {
    let Some(round) = found else {
        return WindowStatus::NotActive;
    };
    if !round.is_active {
        return WindowStatus::NotActive;
    }
    if now < round.start_at || now > round.end_at {
        return WindowStatus::Closed;
    }
    WindowStatus::Open
}
