use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-team-per-round score record.
///
/// Mentor entries and the admin score are stored as JSONB
/// (`common::scoring::MentorScoreEntry` array / `AdminScore` object).
/// `average_score` is derived from the mentor entries and recomputed by the
/// score handlers before every write; it is never edited directly.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "score")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// At most one record per (team_code, round); enforced by a unique
    /// composite index created at startup.
    pub team_code: String,
    pub round: i32,

    #[sea_orm(column_type = "JsonBinary")]
    pub mentor_scores: serde_json::Value,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub admin_score: Option<serde_json::Value>,

    /// Mean of the mentor entry totals; 0 while no mentor has scored.
    pub average_score: f64,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
