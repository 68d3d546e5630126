//! Integration tests for the paged member search.

mod helpers;

use http::StatusCode;

use helpers::TestApp;

#[tokio::test]
async fn test_first_page_smaller_than_total() {
    let app = TestApp::new().await;

    let resp = app.get("/v2/members?size=2").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.usernames(), ["member1", "member2"]);
    assert_eq!(resp.body["totalElements"], 4);
    assert_eq!(resp.body["totalPages"], 2);
    assert_eq!(resp.body["first"], true);
    assert_eq!(resp.body["last"], false);
    assert_eq!(app.store.stats().counts, 1);
}

#[tokio::test]
async fn test_page_larger_than_total_skips_count() {
    let app = TestApp::new().await;

    let resp = app.get("/v2/members?page=0&size=10").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["content"].as_array().map(Vec::len), Some(4));
    assert_eq!(resp.body["totalElements"], 4);
    assert_eq!(resp.body["totalPages"], 1);

    let stats = app.store.stats();
    assert_eq!(stats.fetches, 1);
    assert_eq!(stats.counts, 0);
}

#[tokio::test]
async fn test_second_page_counts() {
    let app = TestApp::new().await;

    let resp = app.get("/v2/members?page=1&size=3").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.usernames(), ["member4"]);
    assert_eq!(resp.body["offset"], 3);
    assert_eq!(resp.body["pageNumber"], 1);
    assert_eq!(resp.body["totalElements"], 4);
    assert_eq!(resp.body["last"], true);
    assert_eq!(app.store.stats().counts, 1);
}

#[tokio::test]
async fn test_default_page_size() {
    let app = TestApp::new().await;

    let resp = app.get("/v2/members").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["pageSize"], 20);
}

#[tokio::test]
async fn test_sort_parameter() {
    let app = TestApp::new().await;

    let resp = app.get("/v2/members?sort=age,desc&size=2").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.usernames(), ["member4", "member3"]);
}

#[tokio::test]
async fn test_invalid_paging_rejected_before_query() {
    let app = TestApp::new().await;

    for path in [
        "/v2/members?size=0",
        "/v2/members?size=-5",
        "/v2/members?page=-1",
        "/v2/members?size=2001",
        "/v2/members?sort=password",
        "/v2/members?size=ten",
    ] {
        let resp = app.get(path).await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(resp.body["error"], "VALIDATION_ERROR", "{path}");
    }

    let stats = app.store.stats();
    assert_eq!(stats.fetches, 0);
    assert_eq!(stats.counts, 0);
}

#[tokio::test]
async fn test_storage_outage_is_service_unavailable() {
    let app = TestApp::new().await;
    app.store.set_available(false);

    let resp = app.get("/v2/members?size=2").await;

    assert_eq!(resp.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(resp.body["error"], "SERVICE_UNAVAILABLE");
}
