// Copyright (c) 2026 Franchise Inventory Maintainers
// SPDX-License-Identifier: AGPL-3.0
//! # Franchise HTTP API
//!
//! Axum router under `/api/franchises`. Handlers parse the request, call one
//! use case and wrap the outcome in the [`ApiResponse`] envelope.
//!
//! | Outcome | Status | Code |
//! |---------|--------|------|
//! | read or update succeeded | 200 | `S200000` |
//! | resource created | 201 | `S201000` |
//! | `InvalidArgument` or malformed body | 400 | `B400000` |
//! | `NotFound` | 404 | `B404000` |
//! | `StorageUnavailable` | 503 | `B503000` |
//! | `Unexpected` | 500 | `E500000` |

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::application::{BranchUpdate, NewBranch, NewFranchise, NewProduct, UseCaseError, UseCases};
use crate::domain::franchise::{Branch, Franchise, Product, ProductWithBranch};

/// Business code attached to every response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BusinessCode {
    S200000,
    S201000,
    B400000,
    B404000,
    B503000,
    E500000,
}

impl BusinessCode {
    pub fn message(&self) -> &'static str {
        match self {
            BusinessCode::S200000 => "Operation successful",
            BusinessCode::S201000 => "Resource created successfully",
            BusinessCode::B400000 => "Invalid request",
            BusinessCode::B404000 => "Resource not found",
            BusinessCode::B503000 => "Service temporarily unavailable",
            BusinessCode::E500000 => "Internal server error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            BusinessCode::S200000 => StatusCode::OK,
            BusinessCode::S201000 => StatusCode::CREATED,
            BusinessCode::B400000 => StatusCode::BAD_REQUEST,
            BusinessCode::B404000 => StatusCode::NOT_FOUND,
            BusinessCode::B503000 => StatusCode::SERVICE_UNAVAILABLE,
            BusinessCode::E500000 => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Response envelope: `{code, title, message, data?, errors?}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: BusinessCode,
    pub title: &'static str,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(code: BusinessCode, data: T) -> Self {
        Self {
            code,
            title: "Success",
            message: code.message(),
            data: Some(data),
            errors: None,
        }
    }
}

impl ApiResponse<()> {
    fn failure(code: BusinessCode, errors: Option<Vec<String>>) -> Self {
        Self {
            code,
            title: "Error",
            message: code.message(),
            data: None,
            errors,
        }
    }
}

type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(ApiResponse::success(BusinessCode::S200000, data))))
}

fn created<T: Serialize>(data: T) -> ApiResult<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::success(BusinessCode::S201000, data))))
}

/// Handler failure rendered as an error envelope
#[derive(Debug)]
pub enum ApiError {
    UseCase(UseCaseError),
    MalformedBody(String),
}

impl From<UseCaseError> for ApiError {
    fn from(err: UseCaseError) -> Self {
        ApiError::UseCase(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (code, errors) = match &self {
            ApiError::MalformedBody(reason) => (BusinessCode::B400000, Some(vec![reason.clone()])),
            ApiError::UseCase(err) => match err {
                UseCaseError::InvalidArgument(_) => (BusinessCode::B400000, Some(vec![err.to_string()])),
                UseCaseError::NotFound(_) => (BusinessCode::B404000, Some(vec![err.to_string()])),
                // Storage details stay in the logs
                UseCaseError::StorageUnavailable(_) => (BusinessCode::B503000, None),
                UseCaseError::Unexpected(_) => (BusinessCode::E500000, None),
            },
        };

        match &self {
            ApiError::UseCase(err) if !err.is_client_error() => error!(error = %err, "Request failed"),
            ApiError::UseCase(err) => warn!(error = %err, "Request rejected"),
            ApiError::MalformedBody(reason) => warn!(reason = %reason, "Malformed request body"),
        }

        (code.status(), Json(ApiResponse::failure(code, errors))).into_response()
    }
}

/// Franchise without its branches, used for listings
#[derive(Debug, Serialize)]
pub struct FranchiseSummary {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<Franchise> for FranchiseSummary {
    fn from(franchise: Franchise) -> Self {
        Self {
            id: franchise.id,
            name: franchise.name,
            description: franchise.description,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateNameRequest {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStockRequest {
    pub stock: Option<i64>,
}

pub struct AppState {
    pub use_cases: UseCases,
    pub start_time: Instant,
}

pub fn app(use_cases: UseCases) -> Router {
    let state = Arc::new(AppState {
        use_cases,
        start_time: Instant::now(),
    });

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/franchises", get(list_franchises).post(create_franchise))
        .route("/api/franchises/{franchise_id}", get(get_franchise).put(update_franchise_name))
        .route("/api/franchises/{franchise_id}/max-stock-products", get(max_stock_products))
        .route("/api/franchises/{franchise_id}/branches", post(add_branch))
        .route(
            "/api/franchises/{franchise_id}/branches/{branch_id}",
            get(get_branch).put(update_branch),
        )
        .route(
            "/api/franchises/{franchise_id}/branches/{branch_id}/name",
            put(update_branch_name),
        )
        .route(
            "/api/franchises/{franchise_id}/branches/{branch_id}/products",
            get(list_products).post(add_product),
        )
        .route(
            "/api/franchises/{franchise_id}/branches/{branch_id}/products/{product_id}",
            put(update_product_name).delete(delete_product),
        )
        .route(
            "/api/franchises/{franchise_id}/branches/{branch_id}/products/{product_id}/stock",
            put(update_product_stock),
        )
        .route(
            "/api/franchises/{franchise_id}/branches/{branch_id}/products/name/{product_name}",
            get(get_product_by_name),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "uptime_seconds": state.start_time.elapsed().as_secs(),
    }))
}

async fn list_franchises(State(state): State<Arc<AppState>>) -> ApiResult<Vec<FranchiseSummary>> {
    let franchises = state.use_cases.get_all_franchises.execute().await?;
    ok(franchises.into_iter().map(FranchiseSummary::from).collect())
}

async fn create_franchise(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewFranchise>, JsonRejection>,
) -> ApiResult<Franchise> {
    let Json(request) = payload?;
    created(state.use_cases.create_franchise.execute(request).await?)
}

async fn get_franchise(State(state): State<Arc<AppState>>, Path(franchise_id): Path<String>) -> ApiResult<Franchise> {
    ok(state.use_cases.get_franchise_by_id.execute(&franchise_id).await?)
}

async fn update_franchise_name(
    State(state): State<Arc<AppState>>,
    Path(franchise_id): Path<String>,
    payload: Result<Json<UpdateNameRequest>, JsonRejection>,
) -> ApiResult<Franchise> {
    let Json(request) = payload?;
    let name = request.name.unwrap_or_default();
    ok(state
        .use_cases
        .update_franchise_name
        .execute(&franchise_id, &name)
        .await?)
}

async fn max_stock_products(
    State(state): State<Arc<AppState>>,
    Path(franchise_id): Path<String>,
) -> ApiResult<Vec<ProductWithBranch>> {
    ok(state.use_cases.get_max_stock_products.execute(&franchise_id).await?)
}

async fn add_branch(
    State(state): State<Arc<AppState>>,
    Path(franchise_id): Path<String>,
    payload: Result<Json<NewBranch>, JsonRejection>,
) -> ApiResult<Branch> {
    let Json(request) = payload?;
    created(state.use_cases.add_branch.execute(&franchise_id, request).await?)
}

async fn get_branch(
    State(state): State<Arc<AppState>>,
    Path((franchise_id, branch_id)): Path<(String, String)>,
) -> ApiResult<Branch> {
    ok(state
        .use_cases
        .get_branch_by_id
        .execute(&franchise_id, &branch_id)
        .await?)
}

async fn update_branch(
    State(state): State<Arc<AppState>>,
    Path((franchise_id, branch_id)): Path<(String, String)>,
    payload: Result<Json<BranchUpdate>, JsonRejection>,
) -> ApiResult<Branch> {
    let Json(update) = payload?;
    ok(state
        .use_cases
        .update_branch
        .execute(&franchise_id, &branch_id, update)
        .await?)
}

async fn update_branch_name(
    State(state): State<Arc<AppState>>,
    Path((franchise_id, branch_id)): Path<(String, String)>,
    payload: Result<Json<UpdateNameRequest>, JsonRejection>,
) -> ApiResult<Branch> {
    let Json(request) = payload?;
    let name = request.name.unwrap_or_default();
    ok(state
        .use_cases
        .update_branch_name
        .execute(&franchise_id, &branch_id, &name)
        .await?)
}

async fn list_products(
    State(state): State<Arc<AppState>>,
    Path((franchise_id, branch_id)): Path<(String, String)>,
) -> ApiResult<Vec<Product>> {
    ok(state
        .use_cases
        .get_products_by_branch
        .execute(&franchise_id, &branch_id)
        .await?)
}

async fn add_product(
    State(state): State<Arc<AppState>>,
    Path((franchise_id, branch_id)): Path<(String, String)>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> ApiResult<Product> {
    let Json(request) = payload?;
    created(
        state
            .use_cases
            .add_product
            .execute(&franchise_id, &branch_id, request)
            .await?,
    )
}

async fn update_product_name(
    State(state): State<Arc<AppState>>,
    Path((franchise_id, branch_id, product_id)): Path<(String, String, String)>,
    payload: Result<Json<UpdateNameRequest>, JsonRejection>,
) -> ApiResult<Product> {
    let Json(request) = payload?;
    let name = request.name.unwrap_or_default();
    ok(state
        .use_cases
        .update_product_name
        .execute(&franchise_id, &branch_id, &product_id, &name)
        .await?)
}

async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path((franchise_id, branch_id, product_id)): Path<(String, String, String)>,
) -> ApiResult<serde_json::Value> {
    state
        .use_cases
        .delete_product
        .execute(&franchise_id, &branch_id, &product_id)
        .await?;
    ok(serde_json::json!({ "deleted": product_id }))
}

async fn update_product_stock(
    State(state): State<Arc<AppState>>,
    Path((franchise_id, branch_id, product_id)): Path<(String, String, String)>,
    payload: Result<Json<UpdateStockRequest>, JsonRejection>,
) -> ApiResult<Product> {
    let Json(request) = payload?;
    ok(state
        .use_cases
        .update_product_stock
        .execute(&franchise_id, &branch_id, &product_id, request.stock)
        .await?)
}

async fn get_product_by_name(
    State(state): State<Arc<AppState>>,
    Path((franchise_id, branch_id, product_name)): Path<(String, String, String)>,
) -> ApiResult<Product> {
    ok(state
        .use_cases
        .get_product_by_name
        .execute(&franchise_id, &branch_id, &product_name)
        .await?)
}
