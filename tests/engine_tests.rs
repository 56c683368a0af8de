//! Response engine behaviour as seen by a caller of the library.

use shop_assistant_api::core::assistant::ScriptedResponder;
use shop_assistant_api::core::engine::{Intent, RULES, classify, classify_and_respond};
use shop_assistant_api::core::mock::SUGGESTED_QUERIES;
use shop_assistant_api::core::model::Role;
use shop_assistant_api::core::traits::Responder;
use std::time::Duration;

#[test]
fn test_every_query_gets_one_assistant_reply_with_text() {
    for query in [
        "a",
        "best",
        "PREDICT",
        "festival",
        "inventory",
        "¿qué tal?",
        "日本語のクエリ",
        "🙂",
    ] {
        let message = classify_and_respond(query);
        assert_eq!(message.role(), Role::Assistant);
        assert!(!message.text().trim().is_empty(), "{query}");
        assert!(message.series().is_none() || message.table().is_none());
    }
}

#[test]
fn test_suggested_queries_classification() {
    // "sold the most" and "customer growth" carry no keyword and fall through to help.
    let intents: Vec<_> = SUGGESTED_QUERIES.iter().map(|q| classify(q)).collect();
    assert_eq!(
        intents,
        vec![
            Intent::Help,
            Intent::Forecast,
            Intent::Campaign,
            Intent::SlowInventory,
            Intent::Help,
        ]
    );
}

#[test]
fn test_rules_are_checked_in_declared_order() {
    let order: Vec<_> = RULES.iter().map(|r| r.intent).collect();
    assert_eq!(
        order,
        vec![
            Intent::TopProducts,
            Intent::Forecast,
            Intent::Campaign,
            Intent::SlowInventory,
        ]
    );

    // One keyword from each later rule, plus one from the first.
    assert_eq!(classify("stock festival next best"), Intent::TopProducts);
    assert_eq!(classify("stock festival next"), Intent::Forecast);
    assert_eq!(classify("stock festival"), Intent::Campaign);
}

#[test]
fn test_best_forecast_yields_top_products() {
    let message = classify_and_respond("best forecast");
    assert!(message.table().is_some());
    assert!(message.series().is_none());
}

#[test]
fn test_responder_with_zero_delay() {
    let responder = ScriptedResponder::new(Duration::ZERO);

    let reply = tokio_test::block_on(responder.respond("Suggest a Diwali campaign"));

    assert!(reply.text().contains("Bundle Deal"));
    assert!(reply.series().is_none());
    assert!(reply.table().is_none());
}
