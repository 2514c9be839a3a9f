use crate::common::{TestApp, routes};
use serde_json::json;

fn valid_criterion(key: &str, order: i32) -> serde_json::Value {
    json!({
        "key": key,
        "name": "Innovation",
        "max_score": 10,
        "weight": 1.0,
        "display_order": order,
    })
}

#[tokio::test]
async fn admin_can_create_and_list_criteria() {
    let app = TestApp::spawn().await;
    let token = app
        .create_user_with_role("admin@university.edu", "pass1234", "admin")
        .await;

    let res = app
        .post_with_token(routes::CRITERIA, &valid_criterion("innovation", 0), &token)
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["key"], "innovation");
    assert_eq!(res.body["is_active"], true);

    let res = app.get_with_token(routes::CRITERIA, &token).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn rejects_duplicate_key() {
    let app = TestApp::spawn().await;
    let token = app
        .create_user_with_role("admin@university.edu", "pass1234", "admin")
        .await;

    let res = app
        .post_with_token(routes::CRITERIA, &valid_criterion("innovation", 0), &token)
        .await;
    assert_eq!(res.status, 201);

    let res = app
        .post_with_token(routes::CRITERIA, &valid_criterion("innovation", 1), &token)
        .await;
    assert_eq!(res.status, 409);
    assert_eq!(res.body["code"], "CONFLICT");
}

#[tokio::test]
async fn rejects_bad_key_weight_and_max_score() {
    let app = TestApp::spawn().await;
    let token = app
        .create_user_with_role("admin@university.edu", "pass1234", "admin")
        .await;

    let mut body = valid_criterion("Has Spaces", 0);
    let res = app.post_with_token(routes::CRITERIA, &body, &token).await;
    assert_eq!(res.status, 400);

    body = valid_criterion("ok_key", 0);
    body["weight"] = json!(-1.0);
    let res = app.post_with_token(routes::CRITERIA, &body, &token).await;
    assert_eq!(res.status, 400);

    body = valid_criterion("ok_key", 0);
    body["max_score"] = json!(0);
    let res = app.post_with_token(routes::CRITERIA, &body, &token).await;
    assert_eq!(res.status, 400);
}

#[tokio::test]
async fn mentors_see_only_active_criteria() {
    let app = TestApp::spawn().await;
    let admin = app
        .create_user_with_role("admin@university.edu", "pass1234", "admin")
        .await;
    let mentor = app
        .create_user_with_role("mentor@university.edu", "pass1234", "mentor")
        .await;

    let res = app
        .post_with_token(routes::CRITERIA, &valid_criterion("innovation", 0), &admin)
        .await;
    let id = res.id();
    app.post_with_token(routes::CRITERIA, &valid_criterion("technical", 1), &admin)
        .await;

    let res = app
        .patch_with_token(&routes::criterion(id), &json!({ "is_active": false }), &admin)
        .await;
    assert_eq!(res.status, 200);

    let res = app.get_with_token(routes::CRITERIA, &mentor).await;
    assert_eq!(res.status, 200);
    let keys: Vec<&str> = res.body.as_array().unwrap().iter()
        .map(|c| c["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, ["technical"]);

    // The admin still sees both
    let res = app.get_with_token(routes::CRITERIA, &admin).await;
    assert_eq!(res.body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn mentor_cannot_manage_criteria() {
    let app = TestApp::spawn().await;
    let mentor = app
        .create_user_with_role("mentor@university.edu", "pass1234", "mentor")
        .await;

    let res = app
        .post_with_token(routes::CRITERIA, &valid_criterion("innovation", 0), &mentor)
        .await;
    assert_eq!(res.status, 403);
    assert_eq!(res.body["code"], "PERMISSION_DENIED");
}
