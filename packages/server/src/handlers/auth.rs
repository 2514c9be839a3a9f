use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use rand::Rng;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{role_permission, team, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::{AUTH_COOKIE, AuthUser};
use crate::extractors::json::AppJson;
use crate::models::auth::{
    LoginRequest, LoginResponse, MeResponse, RegisterTeamRequest, RegisterTeamResponse,
    validate_login_request, validate_register_team,
};
use crate::state::AppState;
use crate::utils::{hash, jwt, team_code};

/// Generate a throwaway password for member accounts; members reset it
/// through the usual flow before first login.
fn temporary_password() -> String {
    let mut rng = rand::rng();
    (0..12)
        .map(|_| rng.random_range(b'a'..=b'z') as char)
        .collect()
}

/// Draw team codes until one is unused.
async fn unused_team_code<C: ConnectionTrait>(db: &C) -> Result<String, AppError> {
    loop {
        let code = team_code::generate();
        let taken = team::Entity::find()
            .filter(team::Column::TeamCode.eq(&code))
            .one(db)
            .await?
            .is_some();
        if !taken {
            return Ok(code);
        }
    }
}

fn map_unique_violation(e: DbErr) -> AppError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            tracing::debug!("Registration race condition: unique constraint caught on insert");
            AppError::EmailTaken
        }
        _ => AppError::from(e),
    }
}

/// Register a team: the team row, its leader account, and one account per
/// additional member, all in one transaction.
#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    operation_id = "registerTeam",
    summary = "Register a team",
    request_body = RegisterTeamRequest,
    responses(
        (status = 201, description = "Team registered", body = RegisterTeamResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Email already registered (EMAIL_TAKEN)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(team_name = %payload.team_name))]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterTeamRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_register_team(&payload, state.config.registration.max_members)?;

    let team_name = payload.team_name.trim().to_string();
    let mut leader = payload.leader.clone();
    leader.email = leader.email.trim().to_lowercase();
    let mut members = payload.members.clone();
    for member in &mut members {
        member.email = member.email.trim().to_lowercase();
    }

    let txn = state.db.begin().await?;

    let all_emails: Vec<String> = std::iter::once(leader.email.clone())
        .chain(members.iter().map(|m| m.email.clone()))
        .collect();
    let already_registered = user::Entity::find()
        .filter(user::Column::Email.is_in(all_emails))
        .one(&txn)
        .await?
        .is_some();
    if already_registered {
        return Err(AppError::EmailTaken);
    }

    let code = unused_team_code(&txn).await?;
    let now = chrono::Utc::now();

    let leader_hash = hash::hash_password(&payload.password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;
    let leader_user = user::ActiveModel {
        name: Set(leader.name.trim().to_string()),
        email: Set(leader.email.clone()),
        roll_no: Set(Some(leader.roll_no.trim().to_string())),
        role: Set("team_lead".to_string()),
        team_code: Set(Some(code.clone())),
        password: Set(leader_hash),
        created_at: Set(now),
        ..Default::default()
    };
    leader_user.insert(&txn).await.map_err(map_unique_violation)?;

    for member in &members {
        let member_hash = hash::hash_password(&temporary_password())
            .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;
        let member_user = user::ActiveModel {
            name: Set(member.name.trim().to_string()),
            email: Set(member.email.clone()),
            roll_no: Set(Some(member.roll_no.trim().to_string())),
            role: Set("team_member".to_string()),
            team_code: Set(Some(code.clone())),
            password: Set(member_hash),
            created_at: Set(now),
            ..Default::default()
        };
        member_user.insert(&txn).await.map_err(map_unique_violation)?;
    }

    let new_team = team::ActiveModel {
        team_code: Set(code.clone()),
        team_name: Set(team_name.clone()),
        leader: Set(serde_json::to_value(&leader)
            .map_err(|e| AppError::Internal(format!("Serialize error: {}", e)))?),
        members: Set(serde_json::to_value(&members)
            .map_err(|e| AppError::Internal(format!("Serialize error: {}", e)))?),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    new_team.insert(&txn).await.map_err(map_unique_violation)?;

    txn.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterTeamResponse {
            team_code: code,
            team_name,
        }),
    ))
}

/// Handle login with email and password.
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    operation_id = "login",
    summary = "Log in",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (INVALID_CREDENTIALS)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, jar, payload))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_login_request(&payload)?;

    let email = payload.email.trim().to_lowercase();

    let user = user::Entity::find()
        .filter(user::Column::Email.eq(&email))
        .one(&state.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let is_valid = hash::verify_password(&payload.password, &user.password)
        .map_err(|e| AppError::Internal(format!("Password verify error: {}", e)))?;

    if !is_valid {
        return Err(AppError::InvalidCredentials);
    }

    let role_perms = role_permission::Entity::find()
        .filter(role_permission::Column::Role.eq(&user.role))
        .all(&state.db)
        .await?;

    let permissions: Vec<String> = role_perms.into_iter().map(|rp| rp.permission).collect();

    let token = jwt::sign(
        user.id,
        &user.email,
        &user.role,
        user.team_code.clone(),
        permissions.clone(),
        &state.config.auth.jwt_secret,
    )
    .map_err(|e| AppError::Internal(format!("JWT sign error: {}", e)))?;

    let cookie = Cookie::build((AUTH_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            token,
            name: user.name,
            email: user.email,
            role: user.role,
            team_code: user.team_code,
            permissions,
        }),
    ))
}

/// Return the current authenticated user's info.
#[utoipa::path(
    get,
    path = "/me",
    tag = "Auth",
    operation_id = "me",
    summary = "Current user",
    responses(
        (status = 200, description = "Current user", body = MeResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user), fields(user_id = auth_user.user_id))]
pub async fn me(auth_user: AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        id: auth_user.user_id,
        email: auth_user.email,
        role: auth_user.role,
        team_code: auth_user.team_code,
        permissions: auth_user.permissions,
    })
}
