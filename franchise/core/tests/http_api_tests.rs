// Copyright (c) 2026 Franchise Inventory Maintainers
// SPDX-License-Identifier: AGPL-3.0

//! HTTP API tests
//!
//! Drive the axum router in-process with `tower::ServiceExt::oneshot` over
//! in-memory storage and check status codes plus the response envelope.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use franchise_core::application::{Gateways, UseCases};
use franchise_core::domain::franchise::Franchise;
use franchise_core::domain::gateway::{FranchiseGateway, GatewayError};
use franchise_core::presentation::api;

fn router() -> Router {
    api::app(UseCases::new(&Gateways::in_memory()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let app = router();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_create_and_list_franchises() {
    let app = router();

    let (status, body) = send(&app, Method::POST, "/api/franchises", Some(json!({"name": "Acme"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["code"], "S201000");
    assert_eq!(body["data"]["id"], "1");
    assert_eq!(body["data"]["name"], "Acme");
    assert!(body.get("errors").is_none());

    send(&app, Method::POST, "/api/franchises/1/branches", Some(json!({"name": "Downtown"}))).await;

    let (status, body) = send(&app, Method::GET, "/api/franchises", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "S200000");
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    // Listings are summaries
    assert!(body["data"][0].get("branches").is_none());

    let (status, body) = send(&app, Method::GET, "/api/franchises/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["branches"][0]["name"], "Downtown");
}

#[tokio::test]
async fn test_validation_errors_are_400() {
    let app = router();

    let (status, body) = send(&app, Method::POST, "/api/franchises", Some(json!({"name": "  "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "B400000");
    assert_eq!(body["title"], "Error");
    assert_eq!(body["errors"][0], "Name cannot be empty");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_malformed_body_uses_error_envelope() {
    let app = router();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/franchises")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "B400000");
}

#[tokio::test]
async fn test_missing_resources_are_404() {
    let app = router();

    let (status, body) = send(&app, Method::POST, "/api/franchises/999/branches", Some(json!({"name": "X"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "B404000");
    assert_eq!(body["errors"][0], "Franchise not found");

    let (status, body) = send(&app, Method::GET, "/api/franchises/1/branches/1/products/name/Widget", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errors"][0], "Franchise not found");
}

#[tokio::test]
async fn test_product_lifecycle() {
    let app = router();
    send(&app, Method::POST, "/api/franchises", Some(json!({"name": "Acme"}))).await;
    send(&app, Method::POST, "/api/franchises/1/branches", Some(json!({"name": "Downtown", "city": "Springfield"}))).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/franchises/1/branches/1/products",
        Some(json!({"name": "Widget", "stock": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], "1");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/franchises/1/branches/1/products/1/stock",
        Some(json!({"stock": -3})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0], "Stock must be a non-negative number");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/franchises/1/branches/1/products/1/stock",
        Some(json!({"stock": 25})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["stock"], 25);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/franchises/1/branches/1/products/1",
        Some(json!({"name": "Gizmo"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Gizmo");

    let (status, body) = send(&app, Method::GET, "/api/franchises/1/branches/1/products/name/Gizmo", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["stock"], 25);

    let (status, body) = send(&app, Method::GET, "/api/franchises/1/max-stock-products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["product"]["name"], "Gizmo");
    assert_eq!(body["data"][0]["branch"]["city"], "Springfield");
    assert!(body["data"][0]["branch"].get("products").is_none());

    let (status, _) = send(&app, Method::DELETE, "/api/franchises/1/branches/1/products/1", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::GET, "/api/franchises/1/branches/1/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());

    let (status, _) = send(&app, Method::DELETE, "/api/franchises/1/branches/1/products/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_branch_updates() {
    let app = router();
    send(&app, Method::POST, "/api/franchises", Some(json!({"name": "Acme"}))).await;
    send(&app, Method::POST, "/api/franchises/1/branches", Some(json!({"name": "Downtown"}))).await;

    let (status, body) = send(&app, Method::PUT, "/api/franchises/1/branches/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0], "At least one field must be provided");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/franchises/1/branches/1",
        Some(json!({"address": "Main St 1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Downtown");
    assert_eq!(body["data"]["address"], "Main St 1");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/franchises/1/branches/1/name",
        Some(json!({"name": "Uptown"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Uptown");

    let (status, body) = send(&app, Method::PUT, "/api/franchises/1", Some(json!({"name": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0], "Name cannot be empty");

    let (status, body) = send(&app, Method::GET, "/api/franchises/1/branches/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Uptown");
}

#[tokio::test]
async fn test_max_stock_for_unknown_franchise_is_empty() {
    let app = router();
    let (status, body) = send(&app, Method::GET, "/api/franchises/42/max-stock-products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());
}

/// Franchise storage that is unreachable on reads and corrupt on listings
struct BrokenFranchiseGateway;

#[async_trait]
impl FranchiseGateway for BrokenFranchiseGateway {
    async fn save(&self, _franchise: &Franchise) -> Result<Franchise, GatewayError> {
        Err(GatewayError::Unavailable("pool timed out".into()))
    }

    async fn find_by_id(&self, _id: &str) -> Result<Option<Franchise>, GatewayError> {
        Err(GatewayError::Unavailable("pool timed out".into()))
    }

    async fn delete_by_id(&self, _id: &str) -> Result<(), GatewayError> {
        Err(GatewayError::Unavailable("pool timed out".into()))
    }

    async fn update(&self, _franchise: &Franchise) -> Result<Franchise, GatewayError> {
        Err(GatewayError::Unavailable("pool timed out".into()))
    }

    async fn find_all(&self) -> Result<Vec<Franchise>, GatewayError> {
        Err(GatewayError::Database("relation \"franchises\" does not exist".into()))
    }

    async fn get_next_id(&self) -> Result<String, GatewayError> {
        Err(GatewayError::Unavailable("pool timed out".into()))
    }
}

fn broken_router() -> Router {
    let gateways = Gateways {
        franchises: Arc::new(BrokenFranchiseGateway),
        ..Gateways::in_memory()
    };
    api::app(UseCases::new(&gateways))
}

#[tokio::test]
async fn test_unavailable_storage_is_503_without_details() {
    let app = broken_router();

    let (status, body) = send(&app, Method::GET, "/api/franchises/1", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "B503000");
    assert_eq!(body["title"], "Error");
    assert_eq!(body["message"], "Service temporarily unavailable");
    assert!(body.get("errors").is_none());
    assert!(body.get("data").is_none());

    let (status, body) = send(&app, Method::POST, "/api/franchises", Some(json!({"name": "Acme"}))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "B503000");
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn test_unexpected_storage_error_is_500_without_details() {
    let app = broken_router();

    let (status, body) = send(&app, Method::GET, "/api/franchises", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "E500000");
    assert_eq!(body["message"], "Internal server error");
    assert!(body.get("errors").is_none());
    assert!(!body.to_string().contains("relation"));
}
