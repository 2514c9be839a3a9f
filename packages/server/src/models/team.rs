use chrono::{DateTime, Utc};
use serde::Serialize;

use super::auth::MemberDto;
use crate::entity::team;

/// Full team details as stored at registration.
#[derive(Serialize, utoipa::ToSchema)]
pub struct TeamResponse {
    #[schema(example = "AB12CD")]
    pub team_code: String,
    #[schema(example = "Null Pointers")]
    pub team_name: String,
    pub leader: MemberDto,
    pub members: Vec<MemberDto>,
    pub created_at: DateTime<Utc>,
}

impl From<team::Model> for TeamResponse {
    fn from(m: team::Model) -> Self {
        Self {
            team_code: m.team_code,
            team_name: m.team_name,
            leader: serde_json::from_value(m.leader).unwrap_or(MemberDto {
                name: String::new(),
                email: String::new(),
                roll_no: String::new(),
            }),
            members: serde_json::from_value(m.members).unwrap_or_default(),
            created_at: m.created_at,
        }
    }
}
