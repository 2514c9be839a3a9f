use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    /// Stored lowercase; login is case-insensitive on the email.
    #[sea_orm(unique)]
    pub email: String,
    pub roll_no: Option<String>,
    /// One of: admin, mentor, team_lead, team_member.
    pub role: String,
    /// Join key to the user's team; absent for mentors and admins.
    pub team_code: Option<String>,
    pub password: String,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
