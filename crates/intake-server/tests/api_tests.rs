//! Integration tests for the intake HTTP API

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use intake_core::{IngestResponse, IntakePipeline, IssueCode, MemoryAuditSink, Outcome};
use intake_server::handlers::{create_router, AppState, ErrorResponse, HealthResponse};
use pretty_assertions::assert_eq;
use tower::ServiceExt; // for oneshot

const PROFILE: &str = "Acme Federal Solutions LLC
UEI: ABC123DEF456
DUNS: 123456789
NAICS: 541511, 541512
POC: Jane Smith, jane.smith@acme.com, (555) 123-4567
Address: 123 Main St, Arlington, VA 22201
SAM.gov: registered";

const PERFORMANCE: &str = "Customer: U.S. Department of Veterans Affairs
Contract: 36C10B21C0001
Value: $2,400,000
Period: 09/2021 - 08/2024
Contact: John Doe, john.doe@va.gov, 202-555-0199";

/// Helper to create test application state
fn create_test_state() -> (AppState, Arc<MemoryAuditSink>) {
    let sink = Arc::new(MemoryAuditSink::new());
    let state = AppState {
        pipeline: Arc::new(IntakePipeline::new(sink.clone())),
    };
    (state, sink)
}

async fn post_ingest(app: axum::Router, body: String) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method("POST")
        .uri("/ingest")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let (state, _) = create_test_state();
    let app = create_router(state);

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let health: HealthResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(health.status, "healthy");
    assert!(chrono::DateTime::parse_from_rfc3339(&health.timestamp).is_ok());
}

#[tokio::test]
async fn test_ingest_sample_documents() {
    let (state, sink) = create_test_state();
    let app = create_router(state);

    let body = serde_json::json!({
        "company_profile": PROFILE,
        "past_performance": PERFORMANCE,
    });
    let (status, body) = post_ingest(app, body.to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let response: IngestResponse = serde_json::from_slice(&body).unwrap();
    assert!(response.issues.is_empty());
    assert_eq!(response.recommended_sins, vec!["54151S".to_string()]);
    assert!(response.checklist.overall.ok);
    assert_eq!(
        response.parsed.company_profile.uei.as_deref(),
        Some("ABC123DEF456")
    );

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].request_id, response.request_id);
    assert_eq!(records[0].outcome, Outcome::Pass);
}

#[tokio::test]
async fn test_ingest_response_shape() {
    let (state, _) = create_test_state();
    let app = create_router(state);

    let body = serde_json::json!({
        "company_profile": PROFILE,
        "past_performance": PERFORMANCE,
    });
    let (_, body) = post_ingest(app, body.to_string()).await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    for key in ["request_id", "parsed", "issues", "recommended_sins", "checklist"] {
        assert!(json.get(key).is_some(), "missing key {}", key);
    }
    let required = json["checklist"]["required"].as_object().unwrap();
    assert_eq!(required.len(), 5);
    assert_eq!(json["checklist"]["overall"]["total_issues"], 0);
    assert_eq!(json["parsed"]["company_profile"]["sam_registered"], true);
}

#[tokio::test]
async fn test_ingest_empty_documents() {
    let (state, sink) = create_test_state();
    let app = create_router(state);

    let (status, body) = post_ingest(
        app,
        r#"{"company_profile": "", "past_performance": ""}"#.to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let response: IngestResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(response.issues.len(), 14);
    assert!(response.issues.iter().all(|i| i.code == IssueCode::Missing));
    assert!(response.recommended_sins.is_empty());
    assert!(!response.checklist.overall.ok);
    assert_eq!(sink.records()[0].outcome, Outcome::Fail);
}

#[tokio::test]
async fn test_ingest_invalid_email_is_reported() {
    let (state, _) = create_test_state();
    let app = create_router(state);

    let profile = PROFILE.replace("jane.smith@acme.com", "not-an-email");
    let body = serde_json::json!({
        "company_profile": profile,
        "past_performance": PERFORMANCE,
    });
    let (status, body) = post_ingest(app, body.to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let response: IngestResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(response.issues.len(), 1);
    assert_eq!(response.issues[0].field, "poc_email");
    assert_eq!(response.issues[0].code, IssueCode::InvalidFormat);
}

#[tokio::test]
async fn test_ingest_rejects_missing_field() {
    let (state, sink) = create_test_state();
    let app = create_router(state);

    let (status, body) =
        post_ingest(app, r#"{"past_performance": "Customer: GSA"}"#.to_string()).await;
    assert!(status.is_client_error());

    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert!(error.error.contains("company_profile"));
    assert!(sink.records().is_empty());
}

#[tokio::test]
async fn test_ingest_rejects_malformed_json() {
    let (state, _) = create_test_state();
    let app = create_router(state);

    let (status, _) = post_ingest(app, "{ nope".to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
