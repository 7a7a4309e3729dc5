use crate::e2e::helpers;

use axum::http::StatusCode;
use futures::future::join_all;
use helpers::{TestContext, TestSettings};
use serde_json::{json, Value};
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_full_quota_for_a_new_user(ctx: &TestContext) {
    let response = ctx
        .client
        .get("/api/ai/usage/stats?userId=newcomer")
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let stats: Value = response.json().unwrap();
    assert_eq!(stats["chatRemaining"], 3);
    assert_eq!(stats["flashcardsRemaining"], 3);
    assert_eq!(stats["quizRemaining"], 3);
    assert_eq!(stats["summaryRemaining"], 3);
    assert_eq!(stats["totalRequestsToday"], 0);
    assert!(stats["resetsAt"].is_string());

    // Reading stats never creates history
    let history: Vec<Value> = ctx
        .client
        .get("/api/ai/usage/history?userId=newcomer")
        .await
        .unwrap()
        .json()
        .unwrap();
    assert!(history.is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_count_accepted_requests(ctx: &TestContext) {
    ctx.client
        .post("/api/chat", &json!({ "userId": "alice", "message": "hi" }))
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let stats: Value = ctx
        .client
        .get("/api/ai/usage/stats?userId=alice")
        .await
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(stats["chatRemaining"], 2);
    assert_eq!(stats["quizRemaining"], 3);
    assert_eq!(stats["totalRequestsToday"], 1);

    let history: Vec<Value> = ctx
        .client
        .get("/api/ai/usage/history?userId=alice&days=30")
        .await
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["chat"], 1);
    assert_eq!(history[0]["totalRequests"], 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_require_a_user_id(ctx: &TestContext) {
    let response = ctx.client.get("/api/ai/usage/stats").await.unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_code("BAD_REQUEST");
}

#[tokio::test]
async fn it_should_throttle_back_to_back_requests() {
    let ctx = TestContext::with_settings(TestSettings {
        requests_per_minute: 5,
        ..TestSettings::default()
    });

    ctx.client
        .post("/api/chat", &json!({ "userId": "alice", "message": "one" }))
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    // A different feature shares the same per-user interval
    let response = ctx
        .client
        .post("/api/summary", &json!({ "userId": "alice", "text": "two" }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::TOO_MANY_REQUESTS)
        .assert_error_code("RATE_LIMIT_EXCEEDED");
    let retry_after: u64 = response.header("retry-after").unwrap().parse().unwrap();
    assert!((1..=12).contains(&retry_after), "retry-after {retry_after}");
    assert_eq!(ctx.primary.calls(), 1);

    // Another user is not affected
    ctx.client
        .post("/api/chat", &json!({ "userId": "bob", "message": "one" }))
        .await
        .unwrap()
        .assert_status(StatusCode::OK);
}

#[tokio::test]
async fn it_should_refuse_everything_when_ai_is_disabled() {
    let ctx = TestContext::with_settings(TestSettings {
        ai_enabled: false,
        ..TestSettings::default()
    });

    let response = ctx
        .client
        .post("/api/chat", &json!({ "userId": "alice", "message": "hi" }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::SERVICE_UNAVAILABLE)
        .assert_error_code("AI_DISABLED");
    assert!(response.header("retry-after").is_none());
    assert_eq!(ctx.primary.calls(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn it_should_never_exceed_the_limit_under_concurrency() {
    let ctx = TestContext::with_settings(TestSettings::default());

    let requests = (0..8).map(|i| {
        let client = ctx.client.clone();
        tokio::spawn(async move {
            client
                .post(
                    "/api/chat",
                    &json!({ "userId": "alice", "message": format!("msg {i}") }),
                )
                .await
                .unwrap()
                .status
        })
    });
    let statuses: Vec<StatusCode> = join_all(requests)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let accepted = statuses.iter().filter(|s| **s == StatusCode::OK).count();
    let limited = statuses
        .iter()
        .filter(|s| **s == StatusCode::TOO_MANY_REQUESTS)
        .count();
    assert_eq!(accepted, 3);
    assert_eq!(limited, 5);
    assert_eq!(ctx.primary.calls(), 3);
}
