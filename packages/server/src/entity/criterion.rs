use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A configurable judging dimension shown to mentors at scoring time.
///
/// Display metadata only: the mentor scoring payload is structurally fixed
/// to the four named dimensions in `common::scoring`.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "criterion")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Unique stable key, e.g. "innovation".
    #[sea_orm(unique)]
    pub key: String,
    pub name: String,
    pub max_score: i32,
    /// Non-negative; the sum across criteria is not constrained.
    pub weight: f64,
    /// Restricts the criterion to one round when set.
    pub round: Option<i32>,
    pub is_active: bool,
    /// UI ordering.
    pub display_order: i32,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
