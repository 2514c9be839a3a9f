use crate::common::{TestApp, routes};
use serde_json::json;

#[tokio::test]
async fn leader_can_submit_within_an_open_window() {
    let app = TestApp::spawn().await;
    let admin = app
        .create_user_with_role("admin@university.edu", "pass1234", "admin")
        .await;
    let (team_code, leader) = app.register_team("Null Pointers", "priya@university.edu").await;
    app.create_open_round(&admin, 1).await;

    let res = app.create_submission(&leader, 1).await;

    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["team_code"], team_code.as_str());
    assert_eq!(res.body["round"], 1);
    assert_eq!(res.body["status"], "Submitted");
}

#[tokio::test]
async fn rejects_when_no_round_is_active() {
    let app = TestApp::spawn().await;
    let (_, leader) = app.register_team("Null Pointers", "priya@university.edu").await;

    // No round row at all
    let res = app.create_submission(&leader, 1).await;
    assert_eq!(res.status, 409);
    assert_eq!(res.body["code"], "CONFLICT");
    assert_eq!(res.body["message"], "Round not active");
}

#[tokio::test]
async fn rejects_an_inactive_round_even_inside_its_window() {
    let app = TestApp::spawn().await;
    let admin = app
        .create_user_with_role("admin@university.edu", "pass1234", "admin")
        .await;
    let (_, leader) = app.register_team("Null Pointers", "priya@university.edu").await;
    app.create_round(&admin, 1, "2020-01-01T00:00:00Z", "2099-01-02T00:00:00Z", false)
        .await;

    let res = app.create_submission(&leader, 1).await;
    assert_eq!(res.status, 409);
    assert_eq!(res.body["message"], "Round not active");
}

#[tokio::test]
async fn rejects_a_closed_window() {
    let app = TestApp::spawn().await;
    let admin = app
        .create_user_with_role("admin@university.edu", "pass1234", "admin")
        .await;
    let (_, leader) = app.register_team("Null Pointers", "priya@university.edu").await;
    // Ended long ago
    app.create_round(&admin, 1, "2020-01-01T00:00:00Z", "2020-01-02T00:00:00Z", true)
        .await;

    let res = app.create_submission(&leader, 1).await;
    assert_eq!(res.status, 409);
    assert_eq!(res.body["message"], "Submission window closed");
}

#[tokio::test]
async fn rejects_a_window_that_has_not_opened() {
    let app = TestApp::spawn().await;
    let admin = app
        .create_user_with_role("admin@university.edu", "pass1234", "admin")
        .await;
    let (_, leader) = app.register_team("Null Pointers", "priya@university.edu").await;
    app.create_round(&admin, 1, "2098-01-01T00:00:00Z", "2099-01-02T00:00:00Z", true)
        .await;

    let res = app.create_submission(&leader, 1).await;
    assert_eq!(res.status, 409);
    assert_eq!(res.body["message"], "Submission window closed");
}

#[tokio::test]
async fn rejects_a_second_submission_for_the_same_round() {
    let app = TestApp::spawn().await;
    let admin = app
        .create_user_with_role("admin@university.edu", "pass1234", "admin")
        .await;
    let (_, leader) = app.register_team("Null Pointers", "priya@university.edu").await;
    app.create_open_round(&admin, 1).await;

    let res = app.create_submission(&leader, 1).await;
    assert_eq!(res.status, 201);

    let res = app.create_submission(&leader, 1).await;
    assert_eq!(res.status, 409);
    assert_eq!(res.body["message"], "Submission already exists for this round");
}

#[tokio::test]
async fn the_same_team_may_submit_to_different_rounds() {
    let app = TestApp::spawn().await;
    let admin = app
        .create_user_with_role("admin@university.edu", "pass1234", "admin")
        .await;
    let (_, leader) = app.register_team("Null Pointers", "priya@university.edu").await;
    app.create_open_round(&admin, 1).await;
    app.create_open_round(&admin, 2).await;

    assert_eq!(app.create_submission(&leader, 1).await.status, 201);
    assert_eq!(app.create_submission(&leader, 2).await.status, 201);

    let res = app.get_with_token(routes::MY_SUBMISSIONS, &leader).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn mentors_and_members_cannot_submit() {
    let app = TestApp::spawn().await;
    let admin = app
        .create_user_with_role("admin@university.edu", "pass1234", "admin")
        .await;
    app.register_team("Null Pointers", "priya@university.edu").await;
    app.create_open_round(&admin, 1).await;

    let mentor = app
        .create_user_with_role("mentor@university.edu", "pass1234", "mentor")
        .await;
    let res = app.create_submission(&mentor, 1).await;
    assert_eq!(res.status, 403);
    assert_eq!(res.body["code"], "PERMISSION_DENIED");

    // Members registered alongside the leader hold submission:view only;
    // log one in directly since member passwords are temporary.
    let member = app
        .create_user_with_role("member@university.edu", "pass1234", "team_member")
        .await;
    let res = app.create_submission(&member, 1).await;
    assert_eq!(res.status, 403);
}

#[tokio::test]
async fn rejects_short_titles_and_bad_urls() {
    let app = TestApp::spawn().await;
    let admin = app
        .create_user_with_role("admin@university.edu", "pass1234", "admin")
        .await;
    let (_, leader) = app.register_team("Null Pointers", "priya@university.edu").await;
    app.create_open_round(&admin, 1).await;

    let body = json!({
        "round": 1,
        "title": "abc",
        "description": "A load forecasting dashboard built on smart-meter data.",
    });
    let res = app.post_with_token(routes::SUBMISSIONS, &body, &leader).await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");

    let body = json!({
        "round": 1,
        "title": "GridSense",
        "description": "A load forecasting dashboard built on smart-meter data.",
        "repo_url": "not a url",
    });
    let res = app.post_with_token(routes::SUBMISSIONS, &body, &leader).await;
    assert_eq!(res.status, 400);
}

#[tokio::test]
async fn empty_url_strings_are_stored_as_absent() {
    let app = TestApp::spawn().await;
    let admin = app
        .create_user_with_role("admin@university.edu", "pass1234", "admin")
        .await;
    let (_, leader) = app.register_team("Null Pointers", "priya@university.edu").await;
    app.create_open_round(&admin, 1).await;

    let body = json!({
        "round": 1,
        "title": "GridSense",
        "description": "A load forecasting dashboard built on smart-meter data.",
        "repo_url": "",
        "live_url": "https://gridsense.example.com",
    });
    let res = app.post_with_token(routes::SUBMISSIONS, &body, &leader).await;
    assert_eq!(res.status, 201, "{}", res.text);
    assert!(res.body["repo_url"].is_null());
    assert_eq!(res.body["live_url"], "https://gridsense.example.com");
}
