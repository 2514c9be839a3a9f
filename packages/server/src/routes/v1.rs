use utoipa_axum::{router::OpenApiRouter, routes};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/teams", team_routes())
        .nest("/problem-statements", problem_statement_routes())
        .nest("/rounds", round_routes())
        .nest("/criteria", criteria_routes())
        .nest("/submissions", submission_routes())
        .nest("/scores", score_routes())
        .nest("/leaderboard", leaderboard_routes())
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::register))
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::me))
}

fn team_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::team::my_team))
}

fn problem_statement_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::problem::list_problem_statements,
            handlers::problem::create_problem_statement
        ))
        .routes(routes!(
            handlers::problem::update_problem_statement,
            handlers::problem::delete_problem_statement
        ))
}

fn round_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::round::list_rounds,
            handlers::round::create_round
        ))
        .routes(routes!(
            handlers::round::update_round,
            handlers::round::delete_round
        ))
}

fn criteria_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::criteria::list_criteria,
            handlers::criteria::create_criterion
        ))
        .routes(routes!(
            handlers::criteria::update_criterion,
            handlers::criteria::delete_criterion
        ))
}

fn submission_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::submission::create_submission))
        .routes(routes!(handlers::submission::my_submissions))
}

fn score_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::score::submit_mentor_score))
        .routes(routes!(handlers::score::submit_admin_score))
        .routes(routes!(handlers::score::list_scores))
}

fn leaderboard_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::leaderboard::get_leaderboard))
}
