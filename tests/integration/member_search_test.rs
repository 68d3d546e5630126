//! Integration tests for member search filters.

mod helpers;

use http::StatusCode;

use helpers::TestApp;

#[tokio::test]
async fn test_filter_by_team_returns_team_members_with_team() {
    let app = TestApp::new().await;

    let resp = app.get("/v2/members?teamName=teamB").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.usernames(), ["member3", "member4"]);
    for row in resp.body["content"].as_array().expect("content array") {
        assert_eq!(row["teamName"], "teamB");
        assert!(row["teamId"].is_number());
    }
}

#[tokio::test]
async fn test_age_window_without_matches_is_empty() {
    let app = TestApp::new().await;

    let resp = app.get("/v2/members?ageGoe=31&ageLoe=35").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["content"].as_array().map(Vec::len), Some(0));
    assert_eq!(resp.body["totalElements"], 0);
    assert_eq!(app.store.stats().counts, 0);
}

#[tokio::test]
async fn test_all_filters_combine() {
    let app = TestApp::new().await;

    let resp = app
        .get("/v1/members?teamName=teamB&ageGoe=35&username=member4")
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.usernames(), ["member4"]);
}

#[tokio::test]
async fn test_blank_parameters_are_ignored() {
    let app = TestApp::new().await;

    let resp = app
        .get("/v1/members?username=&teamName=%20%20&ageGoe=&ageLoe=")
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(
        resp.usernames(),
        ["member1", "member2", "member3", "member4"]
    );
}

#[tokio::test]
async fn test_v1_returns_plain_array() {
    let app = TestApp::new().await;

    let resp = app.get("/v1/members?ageLoe=20").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.is_array());
    assert_eq!(resp.usernames(), ["member1", "member2"]);
    assert_eq!(resp.body[0]["teamName"], "teamA");
    assert_eq!(resp.body[0]["age"], 10);
}

#[tokio::test]
async fn test_member_without_team() {
    let app = TestApp::new().await;
    app.insert_member("drifter", 25, None).await;

    let all = app.get("/v1/members").await;
    let drifter = all
        .body
        .as_array()
        .and_then(|rows| rows.iter().find(|r| r["username"] == "drifter"))
        .cloned()
        .expect("member without team is listed");
    assert!(drifter["teamId"].is_null());
    assert!(drifter["teamName"].is_null());

    let filtered = app.get("/v1/members?teamName=teamA").await;
    assert_eq!(filtered.usernames(), ["member1", "member2"]);
}

#[tokio::test]
async fn test_non_numeric_age_is_rejected() {
    let app = TestApp::new().await;

    let resp = app.get("/v1/members?ageGoe=old").await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_empty_store_is_not_an_error() {
    let app = TestApp::empty();

    let resp = app.get("/v1/members?teamName=teamA").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, serde_json::json!([]));
}
