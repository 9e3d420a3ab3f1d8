#![cfg(feature = "http-server")]

mod support;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use mesa_rust::db::repositories::LocalRepository;
use mesa_rust::http::{create_router, AppState};
use mesa_rust::locks::InMemoryLockStore;
use mesa_rust::services::EngineSettings;

use support::seed_basic;

fn app(repo: &LocalRepository) -> Router {
    let state = AppState::new(
        Arc::new(repo.clone()),
        Arc::new(InMemoryLockStore::new()),
        EngineSettings::default(),
    );
    create_router(state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn booking_request(key: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/bookings")
        .header(header::CONTENT_TYPE, "application/json")
        .header("idempotency-key", key)
        .body(Body::from(
            json!({
                "restaurantId": "R1",
                "sectorId": "S1",
                "date": "2025-10-22",
                "partySize": 4,
                "duration": 60,
                "windowStart": "10:00",
                "windowEnd": "11:00",
            })
            .to_string(),
        ))
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let repo = seed_basic();
    let response = app(&repo)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn test_discover_offers_single_table() {
    let repo = seed_basic();
    let uri = "/v1/discover?restaurantId=R1&sectorId=S1&date=2025-10-22\
               &partySize=4&duration=60&windowStart=10:00&windowEnd=11:00";
    let response = app(&repo)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["slotMinutes"], 60);
    assert_eq!(body["durationMinutes"], 60);

    let candidates = body["candidates"].as_array().unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0]["score"], 10.0);
    assert_eq!(candidates[0]["kind"], "single");
    assert_eq!(candidates[0]["tableIds"], json!(["T1"]));
    assert_eq!(candidates[0]["sectorId"], "S1");
    assert_eq!(candidates[0]["minSize"], 2);
    assert_eq!(candidates[0]["maxSize"], 4);
    assert_eq!(candidates[0]["start"], "2025-10-22T10:00:00Z");
    assert_eq!(candidates[0]["end"], "2025-10-22T11:00:00Z");
}

#[tokio::test]
async fn test_discover_missing_parameters_is_bad_request() {
    let repo = seed_basic();
    let response = app(&repo)
        .oneshot(
            Request::builder()
                .uri("/v1/discover")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_discover_invalid_date_is_bad_request() {
    let repo = seed_basic();
    let uri = "/v1/discover?restaurantId=R1&sectorId=S1&date=22-10-2025\
               &partySize=4&duration=60";
    let response = app(&repo)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_discover_closed_restaurant_is_outside_service_window() {
    let repo = LocalRepository::new();
    repo.add_restaurant("R1", None);
    repo.add_sector("S1", "R1");
    repo.add_table(support::table("T1", "S1", 2, 4));

    let uri = "/v1/discover?restaurantId=R1&sectorId=S1&date=2025-10-22\
               &partySize=4&duration=60&windowStart=10:00&windowEnd=11:00";
    let response = app(&repo)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "outside_service_window");
}

#[tokio::test]
async fn test_booking_fresh_commit_then_replay() {
    let repo = seed_basic();
    let app = app(&repo);

    let first = app.clone().oneshot(booking_request("unique-key-123")).await.unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);
    let first_body = body_json(first).await;
    assert_eq!(first_body["restaurantId"], "R1");
    assert_eq!(first_body["tableIds"], json!(["T1"]));
    assert_eq!(first_body["start"], "2025-10-22T10:00:00Z");
    assert_eq!(first_body["end"], "2025-10-22T11:00:00Z");
    assert_eq!(first_body["durationMinutes"], 60);
    assert_eq!(first_body["status"], "CONFIRMED");

    let second = app.clone().oneshot(booking_request("unique-key-123")).await.unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(
        second.headers().get("idempotency-replay").unwrap(),
        "true"
    );
    let second_body = body_json(second).await;
    assert_eq!(second_body, first_body);

    assert_eq!(repo.booking_count(), 1);
}

#[tokio::test]
async fn test_booking_without_idempotency_key_is_bad_request() {
    let repo = seed_basic();
    let request = Request::builder()
        .method("POST")
        .uri("/v1/bookings")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "restaurantId": "R1",
                "sectorId": "S1",
                "date": "2025-10-22",
                "partySize": 4,
                "duration": 60,
                "windowStart": "10:00",
                "windowEnd": "11:00",
            })
            .to_string(),
        ))
        .unwrap();

    let response = app(&repo).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "missing_idempotency_key");
}

#[tokio::test]
async fn test_booking_exhausted_capacity_is_conflict() {
    let repo = seed_basic();
    let app = app(&repo);

    let first = app.clone().oneshot(booking_request("key-1")).await.unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.clone().oneshot(booking_request("key-2")).await.unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body = body_json(second).await;
    assert_eq!(body["error"], "no_capacity");
}

#[tokio::test]
async fn test_day_listing_route() {
    let repo = seed_basic();
    let app = app(&repo);

    app.clone().oneshot(booking_request("key-1")).await.unwrap();

    let uri = "/v1/bookings/day?restaurantId=R1&sectorId=S1&date=2025-10-22";
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let days = body.as_array().unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0]["date"], "2025-10-22");
    assert_eq!(days[0]["items"].as_array().unwrap().len(), 1);
    assert_eq!(days[0]["items"][0]["partySize"], 4);
}

#[tokio::test]
async fn test_cancel_route() {
    let repo = seed_basic();
    let app = app(&repo);

    let created = app.clone().oneshot(booking_request("key-1")).await.unwrap();
    let body = body_json(created).await;
    let id = body["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/v1/bookings/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let missing = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/v1/bookings/BK_UNKNOWN")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}
