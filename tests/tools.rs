//! Tool handlers end to end: argument parsing, one backend call, rendered text.

mod common;

use std::sync::{Arc, Mutex};

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Map, Value};

use common::{entry, page, success, MockBackend};
use journal_mcp::{McpError, ToolRegistry};

fn args(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

#[tokio::test]
async fn create_entry_always_requests_in_progress() {
    let seen: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let captured = seen.clone();
    let routes = Router::new().route(
        "/entries",
        post(move |Json(body): Json<Value>| {
            let captured = captured.clone();
            async move {
                *captured.lock().unwrap() = Some(body.clone());
                let mut created = entry("e42", body["content"].as_str().unwrap_or(""), "draft");
                created["status"] = body["status"].clone();
                created["mood"] = body["mood"].clone();
                created["tags"] = body.get("tags").cloned().unwrap_or(json!([]));
                success(created)
            }
        }),
    );
    let backend = MockBackend::spawn(routes).await;
    let registry = ToolRegistry::new();

    let text = registry
        .dispatch(
            &backend.client(),
            "create_entry",
            args(json!({
                "content": "Walked by the river this morning.",
                "mood": "calm",
                "tags": ["walk", "morning"],
                "status": "completed"
            })),
        )
        .await
        .unwrap();

    let body = seen.lock().unwrap().clone().unwrap();
    assert_eq!(body["status"], "in_progress");
    assert_eq!(body["mood"], "calm");
    assert_eq!(body["tags"], json!(["walk", "morning"]));
    assert!(body.get("date").is_none());

    assert!(text.starts_with("Journal entry created."));
    assert!(text.contains("ID: e42"));
    assert!(text.contains("Status: in_progress"));
    assert!(text.contains("Settings used:\n- Mood: calm\n- Tags: walk, morning"));
    assert!(!text.contains("- Date:"));
}

#[tokio::test]
async fn finalize_short_entry_passes_backend_error_through() {
    const MESSAGE: &str = "Entry content must be at least 100 characters to finalize";
    let routes = Router::new().route(
        "/entries/:id/finalize",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "status": "error", "message": MESSAGE })),
            )
        }),
    );
    let backend = MockBackend::spawn(routes).await;

    let err = ToolRegistry::new()
        .dispatch(&backend.client(), "finalize_entry", args(json!({ "entry_id": "e1" })))
        .await
        .unwrap_err();

    match err {
        McpError::Backend { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, MESSAGE);
        }
        other => panic!("expected backend error, got {:?}", other),
    }
    assert_eq!(backend.request_count(), 1);
}

#[tokio::test]
async fn finalize_renders_analysis() {
    let routes = Router::new().route(
        "/entries/:id/finalize",
        post(|Path(id): Path<String>| async move {
            let mut finalized = entry(&id, &"x".repeat(120), "completed");
            finalized["analysis"] = json!({
                "sentimentScore": 0.72,
                "themes": ["gratitude", "family"],
                "insights": ["You write more on weekends.", "Family brings you calm."]
            });
            success(finalized)
        }),
    );
    let backend = MockBackend::spawn(routes).await;

    let text = ToolRegistry::new()
        .dispatch(&backend.client(), "finalize_entry", args(json!({ "entry_id": "e7" })))
        .await
        .unwrap();

    assert_eq!(backend.requests()[0].path, "/api/v1/entries/e7/finalize");
    assert_eq!(backend.requests()[0].method, "POST");
    assert!(text.contains("Status: completed"));
    assert!(text.contains("Sentiment: Positive (0.72)"));
    assert!(text.contains("Themes: gratitude, family"));
    assert!(text.contains("Key insight: You write more on weekends."));
    assert!(text.contains("- Family brings you calm."));
}

fn analyzed_entry_routes(score: f64) -> Router {
    Router::new().route(
        "/entries/:id",
        get(move |Path(id): Path<String>| async move {
            let mut e = entry(&id, "Full text of the entry.", "completed");
            e["analysis"] = json!({
                "sentimentScore": score,
                "themes": ["work"],
                "insights": ["Deadlines weigh on you."]
            });
            success(e)
        }),
    )
}

#[tokio::test]
async fn get_entry_labels_sentiment() {
    for (score, label) in [
        (0.5, "Positive"),
        (-0.5, "Negative"),
        (0.1, "Neutral"),
        (0.3, "Neutral"),
        (-0.3, "Neutral"),
    ] {
        let backend = MockBackend::spawn(analyzed_entry_routes(score)).await;
        let text = ToolRegistry::new()
            .dispatch(&backend.client(), "get_entry", args(json!({ "entry_id": "e1" })))
            .await
            .unwrap();
        assert!(
            text.contains(&format!("Sentiment: {} (", label)),
            "score {} rendered as:\n{}",
            score,
            text
        );
        assert!(text.contains("Full text of the entry."));
        assert!(text.contains("- Deadlines weigh on you."));
        assert_eq!(
            backend.requests()[0].query.as_deref(),
            Some("include_analysis=true")
        );
    }
}

#[tokio::test]
async fn get_entry_can_skip_analysis() {
    let backend = MockBackend::spawn(analyzed_entry_routes(0.9)).await;
    let text = ToolRegistry::new()
        .dispatch(
            &backend.client(),
            "get_entry",
            args(json!({ "entry_id": "e1", "include_analysis": false })),
        )
        .await
        .unwrap();

    assert_eq!(
        backend.requests()[0].query.as_deref(),
        Some("include_analysis=false")
    );
    assert!(!text.contains("Sentiment"));
}

#[tokio::test]
async fn search_previews_truncate_and_append_ellipsis() {
    let long = format!("{}{}", "a".repeat(150), "b".repeat(50));
    let items = vec![entry("e1", &long, "completed"), entry("e2", "tiny", "draft")];
    let routes = Router::new().route(
        "/entries/search",
        get(move || {
            let items = items.clone();
            async move { success(page(items, 2, 10, 0)) }
        }),
    );
    let backend = MockBackend::spawn(routes).await;

    let text = ToolRegistry::new()
        .dispatch(&backend.client(), "search_entries", args(json!({ "query": "a" })))
        .await
        .unwrap();

    assert!(text.starts_with("Found 2 entries matching \"a\":"));
    assert!(text.contains(&format!("   {}...", "a".repeat(150))));
    assert!(!text.contains('b'));
    assert!(text.contains("   tiny..."));

    let query = backend.requests()[0].query.clone().unwrap();
    assert!(query.contains("q=a"));
    assert!(query.contains("limit=10"));
}

#[tokio::test]
async fn list_entries_hints_next_offset() {
    let routes = Router::new().route(
        "/entries",
        get(|| async {
            let items = (0..5)
                .map(|i| entry(&format!("e{}", i), "text", "completed"))
                .collect();
            success(page(items, 12, 5, 0))
        }),
    );
    let backend = MockBackend::spawn(routes).await;

    let text = ToolRegistry::new()
        .dispatch(&backend.client(), "list_entries", args(json!({ "limit": 5 })))
        .await
        .unwrap();

    assert!(text.starts_with("Found 12 entries (showing 5):"));
    assert!(text.contains("Use offset=5"));
    let query = backend.requests()[0].query.clone().unwrap();
    assert!(query.contains("limit=5"));
    assert!(query.contains("offset=0"));
}

#[tokio::test]
async fn weekly_review_defaults_to_latest() {
    let routes = Router::new().route(
        "/reviews/:id",
        get(|Path(id): Path<String>| async move {
            success(json!({
                "id": id,
                "weekStart": "2024-02-26",
                "weekEnd": "2024-03-03",
                "summary": "Busy but hopeful.",
                "themes": ["work", "rest"],
                "emotionalTrend": "Started anxious, ended calm.",
                "insights": ["Rest days lift your mood."],
                "entryCount": 5
            }))
        }),
    );
    let backend = MockBackend::spawn(routes).await;

    let text = ToolRegistry::new()
        .dispatch(&backend.client(), "get_weekly_review", Map::new())
        .await
        .unwrap();

    assert_eq!(backend.requests()[0].path, "/api/v1/reviews/latest");
    assert!(text.starts_with("# Weekly Review: 2024-02-26 to 2024-03-03"));
    assert!(text.contains("## Summary\nBusy but hopeful."));
    assert!(text.contains("## Emotional Trend\nStarted anxious, ended calm."));
    assert!(text.contains("- rest"));
    assert!(text.contains("- Rest days lift your mood."));
}

#[tokio::test]
async fn writing_style_lists_suggestions() {
    let routes = Router::new().route(
        "/users/me/writing-style",
        get(|| async {
            success(json!({
                "currentStyle": "Reflective",
                "description": "Thoughtful and introspective.",
                "voiceTone": "warm",
                "suggestions": ["Try ending with a question."]
            }))
        }),
    );
    let backend = MockBackend::spawn(routes).await;

    let text = ToolRegistry::new()
        .dispatch(&backend.client(), "get_writing_style", Map::new())
        .await
        .unwrap();

    assert!(text.starts_with("# Writing Style: Reflective"));
    assert!(text.contains("Voice tone: warm"));
    assert!(text.contains("## Suggestions\n- Try ending with a question."));
}

#[tokio::test]
async fn list_weekly_reviews_pages() {
    let routes = Router::new().route(
        "/reviews",
        get(|| async {
            let items = vec![json!({
                "id": "rev_2",
                "weekStart": "2024-02-26",
                "weekEnd": "2024-03-03",
                "entryCount": 5
            })];
            success(page(items, 3, 1, 0))
        }),
    );
    let backend = MockBackend::spawn(routes).await;

    let text = ToolRegistry::new()
        .dispatch(&backend.client(), "list_weekly_reviews", args(json!({ "limit": 1 })))
        .await
        .unwrap();

    assert!(text.contains("- 2024-02-26 to 2024-03-03 (5 entries) - ID: rev_2"));
    assert!(text.contains("Use offset=1"));
}

#[tokio::test]
async fn unknown_tool_makes_no_backend_call() {
    let backend = MockBackend::spawn(Router::new().route("/entries", get(|| async { "" }))).await;

    let err = ToolRegistry::new()
        .dispatch(&backend.client(), "delete_everything", Map::new())
        .await
        .unwrap_err();

    assert!(matches!(err, McpError::UnknownTool(ref n) if n == "delete_everything"));
    assert_eq!(backend.request_count(), 0);
}

#[tokio::test]
async fn invalid_arguments_make_no_backend_call() {
    let backend = MockBackend::spawn(Router::new().route("/entries", get(|| async { "" }))).await;
    let registry = ToolRegistry::new();
    let client = backend.client();

    let missing = registry
        .dispatch(&client, "get_entry", Map::new())
        .await
        .unwrap_err();
    assert!(matches!(missing, McpError::MissingArg(ref n) if n == "entry_id"));

    let bad_status = registry
        .dispatch(&client, "list_entries", args(json!({ "status": "archived" })))
        .await
        .unwrap_err();
    assert!(matches!(bad_status, McpError::InvalidArg { .. }));

    assert_eq!(backend.request_count(), 0);
}

#[tokio::test]
async fn dot_segment_ids_make_no_backend_call() {
    let routes = Router::new()
        .route("/entries", get(|| async { success(page(vec![], 0, 20, 0)) }))
        .route("/entries/finalize", post(|| async { success(json!({})) }))
        .route("/reviews", get(|| async { success(page(vec![], 0, 10, 0)) }));
    let backend = MockBackend::spawn(routes).await;
    let registry = ToolRegistry::new();
    let client = backend.client();

    for (tool, arguments) in [
        ("finalize_entry", json!({ "entry_id": ".." })),
        ("get_entry", json!({ "entry_id": "." })),
        ("get_weekly_review", json!({ "week": ".." })),
    ] {
        let err = registry
            .dispatch(&client, tool, args(arguments))
            .await
            .unwrap_err();
        assert!(matches!(err, McpError::InvalidArg { .. }), "{}: {:?}", tool, err);
    }

    assert!(client.finalize_entry("..").await.is_err());
    assert!(client.get_entry(".", true).await.is_err());

    assert_eq!(backend.request_count(), 0);
}
