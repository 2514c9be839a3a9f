use common::SubmissionStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "submission")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// At most one submission per (team_code, round); enforced by a unique
    /// composite index created at startup.
    pub team_code: String,
    pub round: i32,

    pub title: String,
    pub description: String,
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
    pub presentation_url: Option<String>,

    /// One of: Draft, Submitted, Reviewed. Transitions are monotonic.
    pub status: SubmissionStatus,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
