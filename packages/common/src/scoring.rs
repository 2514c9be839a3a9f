//! Scoring primitives shared between the score records stored in the
//! database and the API payloads that mutate them.
//!
//! Mentor entries and the admin score live inside the `score` row as JSONB;
//! the functions here are the single place where totals and averages are
//! computed, so a stored record can never disagree with its source entries.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lower bound for a single criteria value.
pub const CRITERIA_MIN: f64 = 0.0;
/// Upper bound for a single criteria value.
pub const CRITERIA_MAX: f64 = 10.0;

/// Validation failure for a criteria mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("{field} must be between 0 and 10")]
    OutOfRange { field: &'static str },
}

/// The four fixed judging dimensions, each in `[0, 10]`.
///
/// The `criterion` entity carries configurable display metadata, but the
/// mentor scoring mapping itself is structurally fixed to these four names.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CriteriaScores {
    #[schema(example = 8.0, minimum = 0.0, maximum = 10.0)]
    pub innovation: f64,
    #[schema(example = 7.0, minimum = 0.0, maximum = 10.0)]
    pub feasibility: f64,
    #[schema(example = 9.0, minimum = 0.0, maximum = 10.0)]
    pub technical: f64,
    #[schema(example = 6.0, minimum = 0.0, maximum = 10.0)]
    pub presentation: f64,
}

impl CriteriaScores {
    /// Check every dimension against `[CRITERIA_MIN, CRITERIA_MAX]`,
    /// naming the first offending field.
    pub fn validate(&self) -> Result<(), ScoringError> {
        let fields = [
            ("innovation", self.innovation),
            ("feasibility", self.feasibility),
            ("technical", self.technical),
            ("presentation", self.presentation),
        ];
        for (field, value) in fields {
            if !value.is_finite() || !(CRITERIA_MIN..=CRITERIA_MAX).contains(&value) {
                return Err(ScoringError::OutOfRange { field });
            }
        }
        Ok(())
    }

    /// Sum of the four dimensions, in `[0, 40]` for valid scores.
    pub fn total(&self) -> f64 {
        self.innovation + self.feasibility + self.technical + self.presentation
    }
}

/// One mentor's evaluation of one team for one round.
///
/// At most one entry per mentor per score record; a later submission by the
/// same mentor replaces the entry, never appends.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MentorScoreEntry {
    /// User ID of the mentor who submitted the entry.
    #[schema(example = 7)]
    pub mentor_id: i32,
    pub criteria: CriteriaScores,
    /// Free-text feedback, required non-empty.
    #[schema(example = "Strong prototype, demo needs polish.")]
    pub comments: String,
    /// Cached `criteria.total()`.
    #[schema(example = 30.0)]
    pub total: f64,
}

/// Administrator-assigned final total, independent of mentor entries and
/// overwritten wholesale on each save.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AdminScore {
    #[schema(example = 85.0)]
    pub total: f64,
    #[serde(default)]
    #[schema(example = "Winner of round 1.")]
    pub final_comment: String,
}

/// Replace the entry matching `entry.mentor_id` in place, or append when the
/// mentor has not scored yet. Identity match is by mentor ID only.
pub fn upsert_mentor_entry(entries: &mut Vec<MentorScoreEntry>, entry: MentorScoreEntry) {
    match entries.iter_mut().find(|e| e.mentor_id == entry.mentor_id) {
        Some(existing) => *existing = entry,
        None => entries.push(entry),
    }
}

/// Arithmetic mean of the entry totals; 0.0 for an empty collection.
///
/// Must be re-applied after every mutation of the entry collection so the
/// stored average never drifts from its source.
pub fn mean_total(entries: &[MentorScoreEntry]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    entries.iter().map(|e| e.total).sum::<f64>() / entries.len() as f64
}
