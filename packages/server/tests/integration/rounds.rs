use crate::common::{TestApp, routes};
use serde_json::json;

fn valid_round_body(round: i32) -> serde_json::Value {
    json!({
        "round": round,
        "name": "Ideation",
        "start_at": "2099-01-01T00:00:00Z",
        "end_at": "2099-01-02T00:00:00Z",
    })
}

#[tokio::test]
async fn admin_can_create_a_round() {
    let app = TestApp::spawn().await;
    let token = app
        .create_user_with_role("admin@university.edu", "pass1234", "admin")
        .await;

    let res = app
        .post_with_token(routes::ROUNDS, &valid_round_body(1), &token)
        .await;

    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["round"], 1);
    assert_eq!(res.body["name"], "Ideation");
    assert_eq!(res.body["is_active"], true);
}

#[tokio::test]
async fn rejects_end_before_start() {
    let app = TestApp::spawn().await;
    let token = app
        .create_user_with_role("admin@university.edu", "pass1234", "admin")
        .await;

    let body = json!({
        "round": 1,
        "name": "Bad Times",
        "start_at": "2099-01-02T00:00:00Z",
        "end_at": "2099-01-01T00:00:00Z",
    });
    let res = app.post_with_token(routes::ROUNDS, &body, &token).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn rejects_duplicate_round_number() {
    let app = TestApp::spawn().await;
    let token = app
        .create_user_with_role("admin@university.edu", "pass1234", "admin")
        .await;

    let res = app
        .post_with_token(routes::ROUNDS, &valid_round_body(1), &token)
        .await;
    assert_eq!(res.status, 201);

    let res = app
        .post_with_token(routes::ROUNDS, &valid_round_body(1), &token)
        .await;
    assert_eq!(res.status, 409);
    assert_eq!(res.body["code"], "CONFLICT");
}

#[tokio::test]
async fn team_lead_cannot_manage_rounds() {
    let app = TestApp::spawn().await;
    let (_, token) = app.register_team("Null Pointers", "priya@university.edu").await;

    let res = app
        .post_with_token(routes::ROUNDS, &valid_round_body(1), &token)
        .await;
    assert_eq!(res.status, 403);
    assert_eq!(res.body["code"], "PERMISSION_DENIED");

    let res = app.get_with_token(routes::ROUNDS, &token).await;
    assert_eq!(res.status, 403);
}

#[tokio::test]
async fn lists_rounds_in_number_order() {
    let app = TestApp::spawn().await;
    let token = app
        .create_user_with_role("admin@university.edu", "pass1234", "admin")
        .await;

    for round in [3, 1, 2] {
        let res = app
            .post_with_token(routes::ROUNDS, &valid_round_body(round), &token)
            .await;
        assert_eq!(res.status, 201);
    }

    let res = app.get_with_token(routes::ROUNDS, &token).await;
    assert_eq!(res.status, 200);
    let numbers: Vec<i64> = res.body.as_array().unwrap().iter()
        .map(|r| r["round"].as_i64().unwrap())
        .collect();
    assert_eq!(numbers, [1, 2, 3]);
}

#[tokio::test]
async fn patch_updates_fields_and_rechecks_the_window() {
    let app = TestApp::spawn().await;
    let token = app
        .create_user_with_role("admin@university.edu", "pass1234", "admin")
        .await;
    let id = app
        .create_round(&token, 1, "2099-01-01T00:00:00Z", "2099-01-02T00:00:00Z", true)
        .await;

    let res = app
        .patch_with_token(&routes::round(id), &json!({ "is_active": false }), &token)
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["is_active"], false);

    // end_at alone that falls before the stored start_at must be rejected
    let res = app
        .patch_with_token(
            &routes::round(id),
            &json!({ "end_at": "2098-01-01T00:00:00Z" }),
            &token,
        )
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn delete_removes_the_round() {
    let app = TestApp::spawn().await;
    let token = app
        .create_user_with_role("admin@university.edu", "pass1234", "admin")
        .await;
    let id = app
        .create_round(&token, 1, "2099-01-01T00:00:00Z", "2099-01-02T00:00:00Z", true)
        .await;

    let res = app.delete_with_token(&routes::round(id), &token).await;
    assert_eq!(res.status, 204);

    let res = app.delete_with_token(&routes::round(id), &token).await;
    assert_eq!(res.status, 404);
}
