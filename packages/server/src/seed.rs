use sea_orm::sea_query::{Index, OnConflict, PostgresQueryBuilder};
use sea_orm::*;
use tracing::info;

use crate::entity::{role, role_permission, score, submission};

/// Default roles seeded on startup.
const DEFAULT_ROLES: &[&str] = &["admin", "mentor", "team_lead", "team_member"];

/// Default role-permission mappings seeded on startup.
const DEFAULT_MAPPINGS: &[(&str, &str)] = &[
    // Admin: all permissions
    ("admin", "submission:view"),
    ("admin", "score:mentor"),
    ("admin", "score:admin"),
    ("admin", "score:view"),
    ("admin", "round:manage"),
    ("admin", "criteria:manage"),
    ("admin", "problem:manage"),
    ("admin", "team:view"),
    ("admin", "leaderboard:view"),
    // Mentor
    ("mentor", "score:mentor"),
    ("mentor", "score:view"),
    ("mentor", "leaderboard:view"),
    // Team lead: the only role that may create submissions
    ("team_lead", "submission:create"),
    ("team_lead", "submission:view"),
    ("team_lead", "team:view"),
    ("team_lead", "leaderboard:view"),
    // Team member
    ("team_member", "submission:view"),
    ("team_member", "team:view"),
    ("team_member", "leaderboard:view"),
];

/// Seed the `role` and `role_permission` tables with defaults.
pub async fn seed_role_permissions(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Seed roles
    let mut roles_inserted = 0u32;
    for &name in DEFAULT_ROLES {
        let model = role::ActiveModel {
            name: Set(name.to_string()),
        };

        let result = role::Entity::insert(model)
            .on_conflict(
                OnConflict::column(role::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(_) => roles_inserted += 1,
            Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if roles_inserted > 0 {
        info!("Seeded {} new roles", roles_inserted);
    }

    // Seed role-permission mappings
    let mut perms_inserted = 0u32;
    for &(role, permission) in DEFAULT_MAPPINGS {
        let model = role_permission::ActiveModel {
            role: Set(role.to_string()),
            permission: Set(permission.to_string()),
        };

        let result = role_permission::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    role_permission::Column::Role,
                    role_permission::Column::Permission,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(_) => perms_inserted += 1,
            Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if perms_inserted > 0 {
        info!("Seeded {} new role-permission mappings", perms_inserted);
    }

    Ok(())
}

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't support composite unique indexes, so we
/// create them manually on startup. Both are load-bearing: they are what
/// makes "at most one submission / score record per (team, round)" hold
/// under concurrent requests.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // One submission per (team_code, round); closes the check-then-insert race.
    let stmt = Index::create()
        .if_not_exists()
        .unique()
        .name("idx_submission_team_round")
        .table(submission::Entity)
        .col(submission::Column::TeamCode)
        .col(submission::Column::Round)
        .to_string(PostgresQueryBuilder);

    db.execute_unprepared(&stmt).await?;
    info!("Ensured index idx_submission_team_round exists");

    // One score record per (team_code, round); the mentor upsert's
    // ON CONFLICT target.
    let stmt = Index::create()
        .if_not_exists()
        .unique()
        .name("idx_score_team_round")
        .table(score::Entity)
        .col(score::Column::TeamCode)
        .col(score::Column::Round)
        .to_string(PostgresQueryBuilder);

    db.execute_unprepared(&stmt).await?;
    info!("Ensured index idx_score_team_round exists");

    Ok(())
}
