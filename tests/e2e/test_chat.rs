use crate::e2e::helpers;

use axum::http::StatusCode;
use helpers::{TestContext, PRIMARY, SECONDARY};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use studybot_backend::domain::ai::ProviderError;
use studybot_backend::domain::chat::ChatMessage;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_the_reply_and_its_provider(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/chat", &json!({ "userId": "alice", "message": "What is ATP?" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let message: ChatMessage = response.json().unwrap();
    assert_eq!(message.user_id, "alice");
    assert_eq!(message.user_message, "What is ATP?");
    assert_eq!(message.ai_response, "primary reply");
    assert_eq!(message.provider, PRIMARY);
    assert!(!message.session_id.is_empty());
    assert_eq!(ctx.secondary.calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fall_back_when_the_primary_fails(ctx: &TestContext) {
    ctx.primary
        .fail_next(ProviderError::Network("connection reset".to_string()));

    let response = ctx
        .client
        .post("/api/chat", &json!({ "userId": "alice", "message": "hello" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let message: ChatMessage = response.json().unwrap();
    assert_eq!(message.ai_response, "secondary reply");
    assert_eq!(message.provider, SECONDARY);
    assert_eq!(ctx.primary.calls(), 1);
    assert_eq!(ctx.secondary.calls(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_session_history_in_order(ctx: &TestContext) {
    for message in ["first", "second"] {
        ctx.client
            .post(
                "/api/chat",
                &json!({ "userId": "alice", "message": message, "sessionId": "s-1" }),
            )
            .await
            .unwrap()
            .assert_status(StatusCode::OK);
    }

    let response = ctx.client.get("/api/chat/history/s-1").await.unwrap();
    response.assert_status(StatusCode::OK);

    let history: Vec<ChatMessage> = response.json().unwrap();
    let messages: Vec<_> = history.iter().map(|m| m.user_message.as_str()).collect();
    assert_eq!(messages, vec!["first", "second"]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_an_empty_message_without_using_quota(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/chat", &json!({ "userId": "alice", "message": "   " }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_code("BAD_REQUEST");
    assert_eq!(ctx.primary.calls(), 0);

    let stats: Value = ctx
        .client
        .get("/api/ai/usage/stats?userId=alice")
        .await
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(stats["chatRemaining"], 3);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_stop_at_the_daily_limit(ctx: &TestContext) {
    let request = json!({ "userId": "alice", "message": "again" });
    for _ in 0..3 {
        ctx.client
            .post("/api/chat", &request)
            .await
            .unwrap()
            .assert_status(StatusCode::OK);
    }

    let response = ctx.client.post("/api/chat", &request).await.unwrap();

    response
        .assert_status(StatusCode::TOO_MANY_REQUESTS)
        .assert_error_code("AI_LIMIT_EXCEEDED")
        .assert_error_message("Daily limit reached for CHAT. Limit: 3");
    let retry_after: u64 = response.header("retry-after").unwrap().parse().unwrap();
    assert!(retry_after >= 1 && retry_after <= 86_400);
    assert_eq!(ctx.primary.calls(), 3);
}
