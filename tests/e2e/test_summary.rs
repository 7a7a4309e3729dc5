use crate::e2e::helpers;

use axum::http::StatusCode;
use helpers::{TestContext, PRIMARY};
use serde_json::json;
use studybot_backend::domain::summary::{Summary, MAX_SUMMARY_INPUT_CHARS};
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_summarize_and_list_for_the_user(ctx: &TestContext) {
    ctx.primary.reply_next("Cells make energy.");

    let response = ctx
        .client
        .post(
            "/api/summary",
            &json!({ "userId": "alice", "text": "A long passage about cellular respiration." }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let summary: Summary = response.json().unwrap();
    assert_eq!(summary.summarized_text, "Cells make energy.");
    assert_eq!(summary.provider, PRIMARY);

    let listed: Vec<Summary> = ctx
        .client
        .get("/api/summary?userId=alice")
        .await
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, summary.id);

    let others: Vec<Summary> = ctx
        .client
        .get("/api/summary?userId=bob")
        .await
        .unwrap()
        .json()
        .unwrap();
    assert!(others.is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_oversized_text(ctx: &TestContext) {
    let text = "a".repeat(MAX_SUMMARY_INPUT_CHARS + 1);

    let response = ctx
        .client
        .post("/api/summary", &json!({ "userId": "alice", "text": text }))
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(ctx.primary.calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_require_a_user_to_list(ctx: &TestContext) {
    let response = ctx.client.get("/api/summary").await.unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_code("BAD_REQUEST");
}
