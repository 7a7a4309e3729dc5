use crate::e2e::helpers;

use axum::http::StatusCode;
use helpers::{flashcards_json, TestContext, SECONDARY};
use serde_json::json;
use studybot_backend::domain::ai::ProviderError;
use studybot_backend::domain::flashcards::{Flashcard, FlashcardDeck};
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_generate_a_deck_through_the_fallback(ctx: &TestContext) {
    ctx.primary.fail_next(ProviderError::Upstream {
        status: Some(500),
        message: "internal error".to_string(),
    });
    ctx.secondary
        .reply_next(&format!("```json\n{}\n```", flashcards_json(3)));

    let response = ctx
        .client
        .post(
            "/api/flashcards/generate",
            &json!({ "userId": "alice", "topic": "photosynthesis", "count": 3 }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let deck: FlashcardDeck = response.json().unwrap();
    assert_eq!(deck.provider, SECONDARY);
    assert_eq!(deck.topic, "photosynthesis");
    assert_eq!(deck.cards.len(), 3);
    assert_eq!(deck.cards[0].question, "Q1");

    let response = ctx
        .client
        .get("/api/flashcards/topic/photosynthesis")
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    let cards: Vec<Flashcard> = response.json().unwrap();
    assert_eq!(cards.len(), 3);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_a_malformed_payload_as_bad_gateway(ctx: &TestContext) {
    ctx.primary.reply_next("Sure! Here are some flashcards about cells.");

    let response = ctx
        .client
        .post(
            "/api/flashcards/generate",
            &json!({ "userId": "alice", "topic": "cells" }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error_code("AI_RESPONSE_INVALID");
    assert_eq!(ctx.secondary.calls(), 0);

    let cards: Vec<Flashcard> = ctx
        .client
        .get("/api/flashcards/topic/cells")
        .await
        .unwrap()
        .json()
        .unwrap();
    assert!(cards.is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_an_out_of_range_count(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/flashcards/generate",
            &json!({ "userId": "alice", "topic": "cells", "count": 0 }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(ctx.primary.calls(), 0);
}
