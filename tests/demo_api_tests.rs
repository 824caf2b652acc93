use axum::{
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use care_console::demo::{DemoState, build_router};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> (DemoState, axum::Router) {
    let state = DemoState::seeded().expect("seed data should load");
    (state.clone(), build_router(state))
}

async fn send(app: &axum::Router, method: Method, uri: &str, payload: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match payload {
        Some(payload) => builder
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("response expected");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body should be readable");

    if body.is_empty() {
        return (status, Value::Null);
    }
    let json = serde_json::from_slice::<Value>(&body).expect("body should be valid JSON");
    (status, json)
}

#[tokio::test]
async fn list_wraps_items_and_pagination_in_envelope() {
    let (_, app) = app();

    let (status, body) = send(&app, Method::GET, "/api/v1/caregivers?page=1&limit=10", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["caregivers"].as_array().unwrap().len(), 10);
    assert_eq!(body["data"]["pagination"]["totalPages"], 2);
    assert_eq!(body["data"]["pagination"]["hasNextPage"], true);
    assert_eq!(body["data"]["pagination"]["hasPrevPage"], false);
}

#[tokio::test]
async fn search_status_and_sort_are_applied() {
    let (state, app) = app();

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/v1/caregivers?page=1&limit=10&search=jane&sort_by=name&order=desc",
        None,
    )
    .await;
    let names: Vec<_> = body["data"]["caregivers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["fullName"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["jane Okafor", "Jane Doe"]);
    assert_eq!(body["data"]["pagination"]["totalPages"], 1);

    let (_, body) = send(&app, Method::GET, "/api/v1/bookings?status=pending", None).await;
    assert_eq!(body["data"]["bookings"].as_array().unwrap().len(), 2);

    let (_, body) = send(&app, Method::GET, "/api/v1/blogs?status=draft", None).await;
    assert_eq!(body["data"]["blogs"][0]["slug"], "winter-safety-checklist");

    let recorded = state.requests();
    assert_eq!(recorded[0].param("search"), Some("jane"));
    assert_eq!(recorded[0].param("order"), Some("desc"));
}

#[tokio::test]
async fn delete_then_delete_again_is_not_found() {
    let (_, app) = app();

    let (status, body) = send(&app, Method::DELETE, "/api/v1/faqs/fq-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Deleted successfully");

    let (status, body) = send(&app, Method::DELETE, "/api/v1/faqs/fq-1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "faq fq-1 not found");
}

#[tokio::test]
async fn rejected_delete_returns_conflict_message() {
    let (state, app) = app();
    state
        .reject_delete("cg-1", "Caregiver has active bookings")
        .unwrap();

    let (status, body) = send(&app, Method::DELETE, "/api/v1/caregivers/cg-1", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Caregiver has active bookings");
}

#[tokio::test]
async fn location_service_items_crud() {
    let (_, app) = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/location-services/loc-2/services",
        Some(json!({ "title": "Night care", "description": "Overnight support." })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let service_id = body["data"]["service"]["id"].as_str().unwrap().to_string();

    let uri = format!("/api/v1/location-services/loc-2/services/{service_id}");
    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "title": "Night sitting" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["service"]["title"], "Night sitting");

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/api/v1/location-services/loc-2", None).await;
    assert_eq!(body["data"]["locationService"]["services"], json!([]));
}

#[tokio::test]
async fn array_updates_get_server_ids() {
    let (_, app) = app();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/cms/about",
        Some(json!({ "points": [ { "id": "pt-1", "title": "Vetted carers" }, { "title": "Local teams" } ] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let points = body["data"]["about"]["points"].as_array().unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0]["id"], "pt-1");
    assert!(points[1]["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(body["data"]["about"]["heading"], "About us");
}

#[tokio::test]
async fn unknown_resource_is_not_found_with_message() {
    let (_, app) = app();
    let (status, body) = send(&app, Method::GET, "/api/v1/invoices", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "unknown resource invoices");
}
