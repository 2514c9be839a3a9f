use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "problem_statement")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Serial number used for catalogue ordering.
    #[sea_orm(unique)]
    pub s_no: i32,
    pub organization: String,
    pub title: String,
    pub description: String, // in Markdown
    /// One of: Software, Hardware.
    pub category: String,
    #[sea_orm(unique)]
    pub ps_number: String,
    pub theme: String,
    /// Count of teams that picked this statement.
    pub ideas: i32,
    pub is_active: bool,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
