use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "round")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Round number (1, 2, 3 ...). Submissions and scores reference this,
    /// not the row id.
    #[sea_orm(unique)]
    pub round: i32,
    pub name: String,
    pub start_at: DateTimeUtc,
    pub end_at: DateTimeUtc,
    pub is_active: bool,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
