use super::common::*;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

fn post_report(body: serde_json::Value) -> Request<Body> {
    Request::post("/api/v1/reports")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn submit_route_returns_receipt() {
    let body = serde_json::to_value(submission()).expect("serializes");
    let response = router()
        .oneshot(post_report(body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["connected_shelter"]["id"], 2);
    assert_eq!(payload["dropped_attachments"][0]["reason"], "unsupported_type");
    assert!(payload["report_id"].as_str().expect("id").starts_with("rpt-"));
}

#[tokio::test]
async fn submit_route_rejects_blank_description() {
    let response = router()
        .oneshot(post_report(json!({ "description": "", "address": "10007" })))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn submit_route_maps_locator_failures() {
    let response = router()
        .oneshot(post_report(json!({ "description": "Injured stray" })))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = empty_router()
        .oneshot(post_report(json!({ "description": "Injured stray", "address": "10007" })))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert!(payload["fallback"].as_str().expect("fallback").contains("emergency services"));
}
