//! Wire-contract tests for the review call against a mock HTTP server.
//!
//! Covers the success path (including the exact request body the service
//! must receive), every error class, the closed-enum fallbacks, and the
//! all-or-nothing interaction between a review and the history store.

use coderev_core::app::ReviewApp;
use coderev_core::client::{ReviewClient, DEFAULT_MODEL};
use coderev_core::error::ReviewError;
use coderev_core::history::HistoryStore;
use coderev_core::prompt;
use coderev_core::storage::MemoryStorage;
use coderev_core::types::{Category, Severity};

const SAMPLE_CODE: &str = "def sum(a,b): return a+b\nprint(sum(2,'3'))";

const SAMPLE_REVIEW: &str = r#"{"summary":"Type mismatch risk","score":65,"analysis":[{"category":"bug","finding":"string+int addition","reasoning":"Python raises TypeError when adding int and str","severity":"high"}],"recommendations":[{"title":"Validate types","description":"Cast or check argument types before addition.","fixedCode":"def sum(a,b): return a+b"}]}"#;

const GENERATE_PATH: &str = "/models/gemini-3-pro-preview:generateContent";

/// Wraps review-payload text in the generateContent response envelope.
fn envelope(text: &str) -> String {
    serde_json::json!({
        "candidates": [{ "content": { "parts": [{ "text": text }] } }]
    })
    .to_string()
}

fn client_for(server: &mockito::ServerGuard) -> ReviewClient {
    ReviewClient::new("test-key").with_base_url(server.url())
}

#[tokio::test]
async fn conformant_response_yields_a_typed_result() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", GENERATE_PATH)
        .match_query(mockito::Matcher::Any)
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "systemInstruction": { "parts": [{ "text": prompt::SYSTEM_PROMPT }] },
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt::user_content(SAMPLE_CODE, "python") }]
            }],
            "generationConfig": {
                "temperature": 0.2,
                "responseMimeType": "application/json"
            }
        })))
        .with_status(200)
        .with_body(envelope(SAMPLE_REVIEW))
        .expect(1)
        .create_async()
        .await;

    let result = client_for(&server)
        .review(SAMPLE_CODE, "python")
        .await
        .expect("conformant response should parse");
    mock.assert_async().await;

    assert_eq!(result.score, 65);
    assert_eq!(result.summary, "Type mismatch risk");
    assert_eq!(result.analysis.len(), 1);
    assert_eq!(result.analysis[0].category, Category::Bug);
    assert_eq!(result.analysis[0].severity, Severity::High);
    assert_eq!(result.recommendations.len(), 1);
    assert_eq!(
        result.recommendations[0].fixed_code.as_deref(),
        Some("def sum(a,b): return a+b")
    );
}

#[tokio::test]
async fn element_order_is_preserved() {
    let review = r#"{"summary":"s","score":40,"analysis":[
        {"category":"security","finding":"first","reasoning":"r1","severity":"high"},
        {"category":"performance","finding":"second","reasoning":"r2","severity":"low"}
    ],"recommendations":[]}"#;

    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", GENERATE_PATH)
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(envelope(review))
        .create_async()
        .await;

    let result = client_for(&server).review("x", "rust").await.unwrap();
    let findings: Vec<&str> = result
        .analysis
        .iter()
        .map(|f| f.finding.as_str())
        .collect();
    assert_eq!(findings, ["first", "second"]);
    assert!(result.recommendations.is_empty());
}

#[tokio::test]
async fn unknown_enum_strings_do_not_fail_the_review() {
    let review = r#"{"summary":"s","score":70,"analysis":[
        {"category":"style","finding":"f","reasoning":"r","severity":"blocker"}
    ],"recommendations":[]}"#;

    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", GENERATE_PATH)
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(envelope(review))
        .create_async()
        .await;

    let result = client_for(&server).review("x", "go").await.unwrap();
    assert_eq!(result.analysis[0].category, Category::BestPractice);
    assert_eq!(result.analysis[0].severity, Severity::Medium);
}

#[tokio::test]
async fn empty_text_fails_with_empty_response() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", GENERATE_PATH)
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(envelope("   "))
        .create_async()
        .await;

    let err = client_for(&server)
        .review("x", "python")
        .await
        .expect_err("blank text must not parse");
    assert!(matches!(err, ReviewError::EmptyResponse));
}

#[tokio::test]
async fn missing_candidates_fail_with_empty_response() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", GENERATE_PATH)
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let err = client_for(&server).review("x", "python").await.unwrap_err();
    assert!(matches!(err, ReviewError::EmptyResponse));
}

#[tokio::test]
async fn unparseable_text_fails_with_malformed_response() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", GENERATE_PATH)
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(envelope("I'd rate this code a solid 7/10."))
        .create_async()
        .await;

    let err = client_for(&server).review("x", "python").await.unwrap_err();
    assert!(matches!(err, ReviewError::MalformedResponse(_)));
}

#[tokio::test]
async fn missing_top_level_field_fails_with_malformed_response() {
    // Schema violation: no recommendations array.
    let review = r#"{"summary":"s","score":90,"analysis":[]}"#;

    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", GENERATE_PATH)
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(envelope(review))
        .create_async()
        .await;

    let err = client_for(&server).review("x", "python").await.unwrap_err();
    assert!(matches!(err, ReviewError::MalformedResponse(_)));
}

#[tokio::test]
async fn http_error_status_fails_with_api_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", GENERATE_PATH)
        .match_query(mockito::Matcher::Any)
        .with_status(429)
        .with_body("quota exceeded")
        .create_async()
        .await;

    let err = client_for(&server).review("x", "python").await.unwrap_err();
    match err {
        ReviewError::Api { status, message } => {
            assert_eq!(status.as_u16(), 429);
            assert_eq!(message, "quota exceeded");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn configured_model_changes_the_request_path() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/gemini-2.5-flash:generateContent")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(envelope(SAMPLE_REVIEW))
        .expect(1)
        .create_async()
        .await;

    let client = ReviewClient::new("test-key")
        .with_base_url(server.url())
        .with_model("gemini-2.5-flash");
    client.review("x", "python").await.unwrap();
    mock.assert_async().await;
    assert_ne!(DEFAULT_MODEL, "gemini-2.5-flash");
}

#[tokio::test]
async fn successful_submit_records_one_history_item() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", GENERATE_PATH)
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(envelope(SAMPLE_REVIEW))
        .create_async()
        .await;

    let history = HistoryStore::open(Box::new(MemoryStorage::new()));
    let mut app = ReviewApp::new(client_for(&server), history);

    let result = app.submit(SAMPLE_CODE, "python").await.unwrap();
    assert_eq!(result.score, 65);

    let items = app.history();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].code, SAMPLE_CODE);
    assert_eq!(items[0].language, "python");
    assert_eq!(items[0].result.score, 65);
    assert!(!items[0].id.is_empty());
    assert!(items[0].timestamp > 0);

    let id = items[0].id.clone();
    let recalled = app.select(&id).expect("recall by id");
    assert_eq!(recalled.code, SAMPLE_CODE);
}

#[tokio::test]
async fn failed_submit_leaves_history_untouched() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", GENERATE_PATH)
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(envelope(""))
        .create_async()
        .await;

    let history = HistoryStore::open(Box::new(MemoryStorage::new()));
    let mut app = ReviewApp::new(client_for(&server), history);

    let err = app.submit(SAMPLE_CODE, "python").await.unwrap_err();
    assert!(matches!(err, ReviewError::EmptyResponse));
    assert!(app.history().is_empty(), "no entry for a failed review");
}
