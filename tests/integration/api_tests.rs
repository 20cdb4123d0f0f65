//! API integration tests
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot`

use megazap_server::{
    build_router, config::AppConfig, pipeline::FixedClock, services::Services, AppState,
};

const SERIES: &str = include_str!("../fixtures/series.json");
const SIDE_A: &str = include_str!("../fixtures/side_a.json");
const SIDE_B: &str = include_str!("../fixtures/side_b.json");

/// Test helper: app with a fixed processing date
fn setup_app() -> Router {
    let config = AppConfig::default();
    let today = NaiveDate::from_ymd_opt(2024, 11, 5).unwrap();
    let services = Services::with_clock(config.pipeline.clone(), Arc::new(FixedClock(today)));
    build_router(AppState::with_services(config, services))
}

fn fixture(document: &str) -> Value {
    serde_json::from_str(document).expect("Failed to parse fixture")
}

fn json_request(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

fn process_body(options: Value) -> Value {
    json!({
        "series": fixture(SERIES),
        "side_a": fixture(SIDE_A),
        "side_b": fixture(SIDE_B),
        "options": options
    })
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_app();

    let request = Request::builder()
        .uri("/api/v1/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["default_variant"], "standard");
}

#[tokio::test]
async fn test_process_records() {
    let app = setup_app();

    let body = process_body(json!({
        "isbn_flat": "978-0-85665-000-1",
        "isbn_folded": "",
        "sheet_number": "42"
    }));
    let response = app
        .oneshot(json_request("/api/v1/records/process", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    let documents = body["documents"].as_array().expect("documents");
    assert_eq!(documents.len(), 3);
    assert_eq!(documents[0]["role"], "series");
    assert_eq!(
        documents[1]["file_name"],
        "0be5339c-9d35-44c9-a10f-da4b5356840b.json"
    );

    let side_a: Value = serde_json::from_str(documents[1]["content"].as_str().unwrap()).unwrap();
    let isbns: Vec<_> = side_a["identification"]["identifiers"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|i| i["namespace"] == "isbn")
        .collect();
    // empty folded ISBN is ignored
    assert_eq!(isbns.len(), 1);
    assert_eq!(isbns[0]["identifier"], "978-0-85665-000-1 (Flat)");
    assert_eq!(side_a["metadata"]["date_stamp"], "2024-11-05");

    let info: Value =
        serde_json::from_str(side_a["identification"]["supplemental_information"].as_str().unwrap())
            .unwrap();
    assert_eq!(info["sheet_number"], "42A");
}

#[tokio::test]
async fn test_process_legacy_variant() {
    let app = setup_app();

    let mut body = process_body(json!({}));
    body["variant"] = json!("legacy");
    let response = app
        .oneshot(json_request("/api/v1/records/process", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    let series: Value = serde_json::from_str(body["documents"][0]["content"].as_str().unwrap()).unwrap();
    assert_eq!(series["identification"]["graphic_overviews"][1]["identifier"], "side_a");
    assert_eq!(series["identification"]["extents"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_process_contact_order_by_name() {
    let app = setup_app();

    let body = process_body(json!({
        "contact_order": [
            "UK Antarctic Place-names Committee",
            "Watson, Connie",
            "Mapping and Geographic Information Centre, British Antarctic Survey"
        ]
    }));
    let response = app
        .oneshot(json_request("/api/v1/records/process", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    for document in body["documents"].as_array().unwrap() {
        let record: Value = serde_json::from_str(document["content"].as_str().unwrap()).unwrap();
        let first = &record["identification"]["contacts"][0];
        assert_eq!(first["organisation"]["name"], "UK Antarctic Place-names Committee");
    }
}

#[tokio::test]
async fn test_legacy_contact_order_rejected() {
    let app = setup_app();

    let mut body = process_body(json!({ "contact_order": ["Watson, Connie"] }));
    body["variant"] = json!("legacy");
    let response = app
        .oneshot(json_request("/api/v1/records/process", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_process_unknown_contact_name_rejected() {
    let app = setup_app();

    let body = process_body(json!({ "contact_order": ["Nobody"] }));
    let response = app
        .oneshot(json_request("/api/v1/records/process", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "InvalidContactOrder");
}

#[tokio::test]
async fn test_process_malformed_supplemental_information() {
    let app = setup_app();

    let mut body = process_body(json!({ "sheet_number": "7" }));
    body["side_b"]["identification"]["supplemental_information"] = json!("not json");
    let response = app
        .oneshot(json_request("/api/v1/records/process", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "MalformedRecord");
    assert!(body["message"].as_str().unwrap().contains("side B"));
}

#[tokio::test]
async fn test_contact_names() {
    let app = setup_app();

    let body = json!({
        "series": fixture(SERIES),
        "side_a": fixture(SIDE_A),
        "side_b": fixture(SIDE_B)
    });
    let response = app
        .oneshot(json_request("/api/v1/records/contacts", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["series"].as_array().unwrap().len(), 3);
    assert_eq!(body["shared"], body["series"]);
}

fn multipart_body(boundary: &str, parts: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (name, content) in parts {
        body.push_str(&format!("--{}\r\n", boundary));
        body.push_str(&format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}.json\"\r\n",
            name, name
        ));
        body.push_str("Content-Type: application/json\r\n\r\n");
        body.push_str(content);
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{}--\r\n", boundary));
    body
}

#[tokio::test]
async fn test_upload_records() {
    let app = setup_app();

    let boundary = "megazap-boundary";
    let body = multipart_body(
        boundary,
        &[
            ("series", SERIES),
            ("side_a", SIDE_A),
            ("side_b", SIDE_B),
            ("isbn_folded", "978-0-85665-000-2"),
        ],
    );
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/records/upload")
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    let series: Value = serde_json::from_str(body["documents"][0]["content"].as_str().unwrap()).unwrap();
    let last_identifier = series["identification"]["identifiers"]
        .as_array()
        .unwrap()
        .last()
        .cloned()
        .unwrap();
    assert_eq!(last_identifier["identifier"], "978-0-85665-000-2 (Folded)");
}

#[tokio::test]
async fn test_upload_missing_side_rejected() {
    let app = setup_app();

    let boundary = "megazap-boundary";
    let body = multipart_body(boundary, &[("series", SERIES), ("side_a", SIDE_A)]);
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/records/upload")
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert!(body["message"].as_str().unwrap().contains("side_b"));
}
