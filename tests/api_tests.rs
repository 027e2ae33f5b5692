use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use property_dashboard::api::{router, AppState};
use property_dashboard::store::MemoryStore;

fn app() -> Router {
    router(AppState::new(Arc::new(MemoryStore::new())))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn listing(name: &str, kind: &str, location: &str, price: f64) -> Value {
    json!({
        "name": name,
        "type": kind,
        "location": location,
        "price": price,
        "description": format!("{name} in {location}"),
        "image": "https://example.com/photo.jpg",
        "coordinates": { "lat": 18.5204, "lng": 73.8567 }
    })
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, body) = send(app, Method::POST, "/api/properties", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {body}");
    body["data"].clone()
}

#[tokio::test]
async fn create_returns_created_record() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/properties",
        Some(listing("Luxury Plot", "Plot", "Pune", 250000.0)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    let data = &body["data"];
    assert!(data["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(data["name"], "Luxury Plot");
    assert_eq!(data["type"], "Plot");
    assert_eq!(data["price"], 250000.0);
    assert_eq!(data["createdAt"], data["updatedAt"]);
}

#[tokio::test]
async fn create_applies_defaults_for_optional_fields() {
    let app = app();
    let mut body = listing("Commercial Shed", "Shed", "Bangalore", 75000.0);
    let object = body.as_object_mut().unwrap();
    object.remove("image");
    object.remove("coordinates");

    let data = create(&app, body).await;
    assert_eq!(data["coordinates"]["lat"], 28.6139);
    assert_eq!(data["coordinates"]["lng"], 77.209);
    assert!(data["image"].as_str().is_some_and(|i| i.starts_with("https://")));
}

#[tokio::test]
async fn create_without_required_field_is_rejected() {
    let app = app();
    let mut body = listing("Commercial Shed", "Shed", "Bangalore", 75000.0);
    body.as_object_mut().unwrap().remove("price");

    let (status, body) = send(&app, Method::POST, "/api/properties", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("price"));

    let (_, list) = send(&app, Method::GET, "/api/properties", None).await;
    assert_eq!(list["count"], 0);
}

#[tokio::test]
async fn create_rejects_unknown_type_and_negative_price() {
    let app = app();
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/properties",
        Some(listing("Castle", "Castle", "Udaipur", 1000.0)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/properties",
        Some(listing("Cheap Plot", "Plot", "Pune", -5.0)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_json_gets_failure_envelope() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/properties")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn list_is_newest_first_with_count() {
    let app = app();
    create(&app, listing("First", "Plot", "Pune", 100.0)).await;
    create(&app, listing("Second", "Shed", "Mumbai", 200.0)).await;
    create(&app, listing("Third", "Retail Store", "Kolkata", 300.0)).await;

    let (status, body) = send(&app, Method::GET, "/api/properties", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 3);

    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Third", "Second", "First"]);
}

#[tokio::test]
async fn list_filters_by_type_search_and_price() {
    let app = app();
    create(&app, listing("Commercial Shed", "Shed", "Bangalore", 75000.0)).await;
    create(&app, listing("Industrial Shed", "Shed", "Mumbai", 90000.0)).await;
    create(&app, listing("Central Plot", "Plot", "Chennai", 300000.0)).await;

    let (_, body) = send(&app, Method::GET, "/api/properties?type=Shed", None).await;
    assert_eq!(body["count"], 2);

    let (_, body) = send(&app, Method::GET, "/api/properties?search=CHENNAI", None).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["name"], "Central Plot");

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/properties?minPrice=80000&maxPrice=300000",
        None,
    )
    .await;
    assert_eq!(body["count"], 2);

    let (_, body) = send(&app, Method::GET, "/api/properties?type=&search=", None).await;
    assert_eq!(body["count"], 3);
}

#[tokio::test]
async fn list_with_unmatchable_filters_is_empty() {
    let app = app();
    create(&app, listing("Central Plot", "Plot", "Chennai", 300000.0)).await;

    for uri in [
        "/api/properties?type=Castle",
        "/api/properties?minPrice=cheap",
        "/api/properties?maxPrice=NaN&type=Plot",
    ] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body, json!({ "success": true, "count": 0, "data": [] }), "{uri}");
    }
}

#[tokio::test]
async fn get_by_id_returns_record() {
    let app = app();
    let created = create(&app, listing("Central Plot", "Plot", "Chennai", 300000.0)).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(&app, Method::GET, &format!("/api/properties/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], created);
}

#[tokio::test]
async fn get_unknown_or_malformed_id_is_not_found() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::GET,
        "/api/properties/6f1c1f7e-8a55-4d2e-9f61-3b0d1c2a4e5f",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "error": "Property not found" }));

    let (status, body) = send(&app, Method::GET, "/api/properties/not-an-id", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Property not found");
}

#[tokio::test]
async fn update_replaces_fields_and_keeps_identity() {
    let app = app();
    let created = create(&app, listing("Central Plot", "Plot", "Chennai", 300000.0)).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/properties/{id}"),
        Some(listing("Central Plot", "Plot", "Chennai", 320000.0)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["id"], created["id"]);
    assert_eq!(data["price"], 320000.0);
    assert_eq!(data["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn update_validates_and_reports_missing_records() {
    let app = app();
    let created = create(&app, listing("Central Plot", "Plot", "Chennai", 300000.0)).await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/properties/{id}"),
        Some(listing("", "Plot", "Chennai", 300000.0)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/properties/6f1c1f7e-8a55-4d2e-9f61-3b0d1c2a4e5f",
        Some(listing("Central Plot", "Plot", "Chennai", 300000.0)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Property not found");

    let (_, body) = send(&app, Method::GET, &format!("/api/properties/{id}"), None).await;
    assert_eq!(body["data"], created);
}

#[tokio::test]
async fn delete_removes_record() {
    let app = app();
    let created = create(&app, listing("Central Plot", "Plot", "Chennai", 300000.0)).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(&app, Method::DELETE, &format!("/api/properties/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "data": {} }));

    let (status, _) = send(&app, Method::GET, &format!("/api/properties/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_unknown_id_leaves_collection_unchanged() {
    let app = app();
    create(&app, listing("Central Plot", "Plot", "Chennai", 300000.0)).await;

    let (status, body) = send(
        &app,
        Method::DELETE,
        "/api/properties/6f1c1f7e-8a55-4d2e-9f61-3b0d1c2a4e5f",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (_, list) = send(&app, Method::GET, "/api/properties", None).await;
    assert_eq!(list["count"], 1);
}

#[tokio::test]
async fn root_describes_the_service() {
    let (status, body) = send(&app(), Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Property Dashboard API");
    assert_eq!(body["endpoints"]["properties"], "/api/properties");
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (status, body) = send(&app(), Method::GET, "/api/unknown", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "error": "Route not found" }));
}

#[tokio::test]
async fn create_accepts_large_embedded_image() {
    let app = app();
    let mut body = listing("Warehouse Tour", "Shed", "Pune", 90000.0);
    let image = format!("data:video/mp4;base64,{}", "A".repeat(5 * 1024 * 1024));
    body["image"] = Value::String(image.clone());

    let data = create(&app, body).await;
    assert_eq!(data["image"].as_str().map(str::len), Some(image.len()));
}
