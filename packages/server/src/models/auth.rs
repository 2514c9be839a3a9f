use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::shared::{validate_email, validate_min_chars};
use crate::error::AppError;

/// Identity of one team participant.
#[derive(Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct MemberDto {
    #[schema(example = "Priya Sharma")]
    pub name: String,
    #[schema(example = "priya@university.edu")]
    pub email: String,
    #[schema(example = "21CS3041")]
    pub roll_no: String,
}

/// Request body for team registration. Creates the team, its leader account,
/// and one account per additional member.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct RegisterTeamRequest {
    /// Team display name (3+ characters).
    #[schema(example = "Null Pointers")]
    pub team_name: String,
    pub leader: MemberDto,
    /// Leader account password (6+ characters). Members receive temporary
    /// passwords.
    #[schema(example = "hunter42")]
    pub password: String,
    /// 0-4 additional members; team size is 1-5 including the leader.
    #[serde(default)]
    pub members: Vec<MemberDto>,
}

fn validate_member(member: &MemberDto, who: &str) -> Result<(), AppError> {
    validate_min_chars(&member.name, 2, &format!("{who} name"))?;
    validate_email(&member.email, &format!("{who} email"))?;
    validate_min_chars(&member.roll_no, 6, &format!("{who} roll number"))?;
    Ok(())
}

pub fn validate_register_team(
    payload: &RegisterTeamRequest,
    max_members: usize,
) -> Result<(), AppError> {
    validate_min_chars(&payload.team_name, 3, "Team name")?;
    validate_member(&payload.leader, "Leader")?;
    validate_min_chars(&payload.password, 6, "Password")?;

    if payload.members.len() > max_members {
        return Err(AppError::Validation(format!(
            "At most {max_members} additional members allowed"
        )));
    }
    for member in &payload.members {
        validate_member(member, "Member")?;
    }

    // All emails across leader and members must be distinct.
    let mut seen = HashSet::new();
    for email in std::iter::once(&payload.leader.email).chain(payload.members.iter().map(|m| &m.email))
    {
        if !seen.insert(email.trim().to_lowercase()) {
            return Err(AppError::Validation(
                "Duplicate email addresses found".into(),
            ));
        }
    }
    Ok(())
}

/// Successful registration response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct RegisterTeamResponse {
    /// Generated code the team uses everywhere else in the portal.
    #[schema(example = "AB12CD")]
    pub team_code: String,
    #[schema(example = "Null Pointers")]
    pub team_name: String,
}

/// Request body for login.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "priya@university.edu")]
    pub email: String,
    #[schema(example = "hunter42")]
    pub password: String,
}

pub fn validate_login_request(payload: &LoginRequest) -> Result<(), AppError> {
    validate_email(&payload.email, "Email")?;
    if payload.password.is_empty() {
        return Err(AppError::Validation("Password must not be empty".into()));
    }
    Ok(())
}

/// Successful login response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// JWT bearer token valid for 7 days; also set as an httpOnly cookie.
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    #[schema(example = "Priya Sharma")]
    pub name: String,
    #[schema(example = "priya@university.edu")]
    pub email: String,
    #[schema(example = "team_lead")]
    pub role: String,
    #[schema(example = "AB12CD")]
    pub team_code: Option<String>,
    #[schema(example = json!(["submission:create"]))]
    pub permissions: Vec<String>,
}

/// Current authenticated user's identity.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MeResponse {
    #[schema(example = 42)]
    pub id: i32,
    #[schema(example = "priya@university.edu")]
    pub email: String,
    #[schema(example = "team_lead")]
    pub role: String,
    #[schema(example = "AB12CD")]
    pub team_code: Option<String>,
    #[schema(example = json!(["submission:create"]))]
    pub permissions: Vec<String>,
}
