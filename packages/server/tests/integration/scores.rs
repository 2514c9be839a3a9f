use crate::common::{TestApp, routes};
use serde_json::json;

/// Register a team, create an open round, and return (team_code, admin token).
async fn team_and_round(app: &TestApp) -> (String, String) {
    let admin = app
        .create_user_with_role("admin@university.edu", "pass1234", "admin")
        .await;
    let (team_code, _) = app.register_team("Null Pointers", "priya@university.edu").await;
    app.create_open_round(&admin, 1).await;
    (team_code, admin)
}

mod mentor_scoring {
    use super::*;

    #[tokio::test]
    async fn first_score_creates_the_record_with_its_total_as_average() {
        let app = TestApp::spawn().await;
        let (team_code, _) = team_and_round(&app).await;
        let mentor = app
            .create_user_with_role("mentor-a@university.edu", "pass1234", "mentor")
            .await;

        let res = app
            .submit_mentor_score(&mentor, &team_code, 1, [8.0, 7.0, 9.0, 6.0])
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["team_code"], team_code.as_str());
        assert_eq!(res.body["mentor_scores"].as_array().unwrap().len(), 1);
        assert_eq!(res.body["mentor_scores"][0]["total"], 30.0);
        assert_eq!(res.body["average_score"], 30.0);
    }

    #[tokio::test]
    async fn resubmission_by_the_same_mentor_replaces_the_entry() {
        let app = TestApp::spawn().await;
        let (team_code, _) = team_and_round(&app).await;
        let mentor = app
            .create_user_with_role("mentor-a@university.edu", "pass1234", "mentor")
            .await;

        app.submit_mentor_score(&mentor, &team_code, 1, [8.0, 7.0, 9.0, 6.0])
            .await;
        let res = app
            .submit_mentor_score(&mentor, &team_code, 1, [5.0, 5.0, 5.0, 5.0])
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        // Length unchanged, entry updated in place
        assert_eq!(res.body["mentor_scores"].as_array().unwrap().len(), 1);
        assert_eq!(res.body["mentor_scores"][0]["total"], 20.0);
        assert_eq!(res.body["average_score"], 20.0);
    }

    #[tokio::test]
    async fn two_mentors_average_their_totals() {
        let app = TestApp::spawn().await;
        let (team_code, _) = team_and_round(&app).await;
        let mentor_a = app
            .create_user_with_role("mentor-a@university.edu", "pass1234", "mentor")
            .await;
        let mentor_b = app
            .create_user_with_role("mentor-b@university.edu", "pass1234", "mentor")
            .await;

        // total = 30
        app.submit_mentor_score(&mentor_a, &team_code, 1, [8.0, 7.0, 9.0, 6.0])
            .await;
        // total = 24
        let res = app
            .submit_mentor_score(&mentor_b, &team_code, 1, [6.0, 6.0, 6.0, 6.0])
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["mentor_scores"].as_array().unwrap().len(), 2);
        assert_eq!(res.body["average_score"], 27.0);
    }

    #[tokio::test]
    async fn rejects_out_of_range_and_missing_criteria() {
        let app = TestApp::spawn().await;
        let (team_code, _) = team_and_round(&app).await;
        let mentor = app
            .create_user_with_role("mentor-a@university.edu", "pass1234", "mentor")
            .await;

        let res = app
            .submit_mentor_score(&mentor, &team_code, 1, [11.0, 7.0, 9.0, 6.0])
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert!(res.body["message"].as_str().unwrap().contains("innovation"));

        let body = json!({
            "team_code": team_code,
            "round": 1,
            "criteria": {
                "innovation": 8.0,
                "feasibility": 7.0,
                "technical": 9.0,
            },
            "comments": "Missing a dimension.",
        });
        let res = app.post_with_token(routes::MENTOR_SCORES, &body, &mentor).await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn rejects_empty_comments() {
        let app = TestApp::spawn().await;
        let (team_code, _) = team_and_round(&app).await;
        let mentor = app
            .create_user_with_role("mentor-a@university.edu", "pass1234", "mentor")
            .await;

        let body = json!({
            "team_code": team_code,
            "round": 1,
            "criteria": {
                "innovation": 8.0,
                "feasibility": 7.0,
                "technical": 9.0,
                "presentation": 6.0,
            },
            "comments": "   ",
        });
        let res = app.post_with_token(routes::MENTOR_SCORES, &body, &mentor).await;
        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn rejects_unknown_team_or_round() {
        let app = TestApp::spawn().await;
        let (team_code, _) = team_and_round(&app).await;
        let mentor = app
            .create_user_with_role("mentor-a@university.edu", "pass1234", "mentor")
            .await;

        let res = app
            .submit_mentor_score(&mentor, "ZZZZZZ", 1, [8.0, 7.0, 9.0, 6.0])
            .await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");

        let res = app
            .submit_mentor_score(&mentor, &team_code, 9, [8.0, 7.0, 9.0, 6.0])
            .await;
        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn team_lead_cannot_score() {
        let app = TestApp::spawn().await;
        let (team_code, _) = team_and_round(&app).await;
        let (_, leader) = app.register_team("Rivals", "rival@university.edu").await;

        let res = app
            .submit_mentor_score(&leader, &team_code, 1, [8.0, 7.0, 9.0, 6.0])
            .await;
        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }
}

mod admin_scoring {
    use super::*;

    #[tokio::test]
    async fn admin_score_replaces_wholesale_and_leaves_average_alone() {
        let app = TestApp::spawn().await;
        let (team_code, admin) = team_and_round(&app).await;
        let mentor = app
            .create_user_with_role("mentor-a@university.edu", "pass1234", "mentor")
            .await;

        app.submit_mentor_score(&mentor, &team_code, 1, [8.0, 7.0, 9.0, 6.0])
            .await;

        let body = json!({
            "team_code": team_code,
            "round": 1,
            "total": 85.0,
            "final_comment": "Winner of round 1.",
        });
        let res = app.post_with_token(routes::ADMIN_SCORES, &body, &admin).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["admin_score"]["total"], 85.0);
        assert_eq!(res.body["average_score"], 30.0);

        // Second save without a comment replaces the whole sub-record
        let body = json!({ "team_code": team_code, "round": 1, "total": 70.0 });
        let res = app.post_with_token(routes::ADMIN_SCORES, &body, &admin).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["admin_score"]["total"], 70.0);
        assert_eq!(res.body["admin_score"]["final_comment"], "");
        assert_eq!(res.body["average_score"], 30.0);
    }

    #[tokio::test]
    async fn admin_score_creates_the_record_when_none_exists() {
        let app = TestApp::spawn().await;
        let (team_code, admin) = team_and_round(&app).await;

        let body = json!({ "team_code": team_code, "round": 1, "total": 42.0 });
        let res = app.post_with_token(routes::ADMIN_SCORES, &body, &admin).await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["mentor_scores"].as_array().unwrap().len(), 0);
        assert_eq!(res.body["average_score"], 0.0);
        assert_eq!(res.body["admin_score"]["total"], 42.0);
    }

    #[tokio::test]
    async fn admin_score_marks_the_submission_reviewed() {
        let app = TestApp::spawn().await;
        let admin = app
            .create_user_with_role("admin@university.edu", "pass1234", "admin")
            .await;
        let (team_code, leader) = app.register_team("Null Pointers", "priya@university.edu").await;
        app.create_open_round(&admin, 1).await;
        assert_eq!(app.create_submission(&leader, 1).await.status, 201);

        let body = json!({ "team_code": team_code, "round": 1, "total": 85.0 });
        let res = app.post_with_token(routes::ADMIN_SCORES, &body, &admin).await;
        assert_eq!(res.status, 201, "{}", res.text);

        let res = app.get_with_token(routes::MY_SUBMISSIONS, &leader).await;
        assert_eq!(res.body[0]["status"], "Reviewed");
    }

    #[tokio::test]
    async fn rejects_negative_totals_and_wrong_roles() {
        let app = TestApp::spawn().await;
        let (team_code, admin) = team_and_round(&app).await;

        let body = json!({ "team_code": team_code, "round": 1, "total": -1.0 });
        let res = app.post_with_token(routes::ADMIN_SCORES, &body, &admin).await;
        assert_eq!(res.status, 400);

        let mentor = app
            .create_user_with_role("mentor-a@university.edu", "pass1234", "mentor")
            .await;
        let body = json!({ "team_code": team_code, "round": 1, "total": 10.0 });
        let res = app.post_with_token(routes::ADMIN_SCORES, &body, &mentor).await;
        assert_eq!(res.status, 403);
    }
}

mod score_listing {
    use super::*;

    #[tokio::test]
    async fn mentors_can_list_and_filter_scores() {
        let app = TestApp::spawn().await;
        let (team_code, admin) = team_and_round(&app).await;
        app.create_open_round(&admin, 2).await;
        let mentor = app
            .create_user_with_role("mentor-a@university.edu", "pass1234", "mentor")
            .await;

        app.submit_mentor_score(&mentor, &team_code, 1, [8.0, 7.0, 9.0, 6.0])
            .await;
        app.submit_mentor_score(&mentor, &team_code, 2, [6.0, 6.0, 6.0, 6.0])
            .await;

        let res = app.get_with_token(routes::SCORES, &mentor).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body.as_array().unwrap().len(), 2);

        let path = format!("{}?round=2", routes::SCORES);
        let res = app.get_with_token(&path, &mentor).await;
        assert_eq!(res.body.as_array().unwrap().len(), 1);
        assert_eq!(res.body[0]["round"], 2);
    }

    #[tokio::test]
    async fn team_members_cannot_list_scores() {
        let app = TestApp::spawn().await;
        let (_, leader) = app.register_team("Null Pointers", "priya@university.edu").await;

        let res = app.get_with_token(routes::SCORES, &leader).await;
        assert_eq!(res.status, 403);
    }
}
