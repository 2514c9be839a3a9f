use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Identity of a single team member.
/// The leader and the members array are stored as JSONB on the team row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberIdentity {
    pub name: String,
    pub email: String,
    pub roll_no: String,
}

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "team")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Primary join key across submission and score rows.
    #[sea_orm(unique)]
    pub team_code: String,
    pub team_name: String,

    /// Leader identity stored as a JSONB `MemberIdentity` object.
    #[sea_orm(column_type = "JsonBinary")]
    pub leader: serde_json::Value,
    /// 0-4 additional members stored as a JSONB `MemberIdentity` array.
    #[sea_orm(column_type = "JsonBinary")]
    pub members: serde_json::Value,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
