// Copyright (c) 2026 Franchise Inventory Maintainers
// SPDX-License-Identifier: AGPL-3.0
//! # Domain Gateway Interfaces
//!
//! Storage-agnostic persistence contracts for the franchise hierarchy. Use
//! cases in `crate::application` depend only on these traits; concrete
//! adapters live in `crate::infrastructure::repositories`.
//!
//! | Trait | Entity | Implementations |
//! |-------|--------|----------------|
//! | `FranchiseGateway` | `Franchise` | `InMemoryFranchiseGateway`, `PostgresFranchiseGateway` |
//! | `BranchGateway` | `Branch` | `InMemoryBranchGateway`, `PostgresBranchGateway` |
//! | `ProductGateway` | `Product` | `InMemoryProductGateway`, `PostgresProductGateway` |
//!
//! ## Call outcomes
//!
//! Every gateway call completes with a value, completes empty (`Ok(None)` or
//! an empty `Vec`), or fails with a [`GatewayError`]. The use-case layer reacts
//! only to these three outcomes and never retries.
//!
//! ## Identifier sequencing
//!
//! `get_next_id` on each gateway mints the next ID for that entity kind via
//! the atomic sequence protocol in [`crate::domain::sequence`].

use async_trait::async_trait;
use crate::domain::franchise::{Branch, EntityKind, Franchise, Product, ProductWithBranch};

/// Storage backend enum for pluggable persistence
#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    InMemory,
    PostgreSQL(PostgresConfig),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostgresConfig {
    pub connection_string: String,
    pub max_connections: u32,
}

#[async_trait]
pub trait FranchiseGateway: Send + Sync {
    /// Persist a franchise (create or overwrite)
    async fn save(&self, franchise: &Franchise) -> Result<Franchise, GatewayError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Franchise>, GatewayError>;

    async fn delete_by_id(&self, id: &str) -> Result<(), GatewayError>;

    /// Overwrite an existing franchise; fails with `NotFound` if absent
    async fn update(&self, franchise: &Franchise) -> Result<Franchise, GatewayError>;

    async fn find_all(&self) -> Result<Vec<Franchise>, GatewayError>;

    /// Next value of the `franchise_sequence` counter
    async fn get_next_id(&self) -> Result<String, GatewayError>;
}

#[async_trait]
pub trait BranchGateway: Send + Sync {
    /// Persist a branch under a franchise (create or overwrite)
    async fn save(&self, franchise_id: &str, branch: &Branch) -> Result<Branch, GatewayError>;

    async fn find_by_id(&self, franchise_id: &str, branch_id: &str) -> Result<Option<Branch>, GatewayError>;

    async fn delete_by_id(&self, franchise_id: &str, branch_id: &str) -> Result<(), GatewayError>;

    /// Overwrite an existing branch; fails with `NotFound` if absent
    async fn update(&self, franchise_id: &str, branch: &Branch) -> Result<Branch, GatewayError>;

    async fn find_all_by_franchise_id(&self, franchise_id: &str) -> Result<Vec<Branch>, GatewayError>;

    /// Next value of the `branch_sequence` counter
    async fn get_next_id(&self) -> Result<String, GatewayError>;
}

#[async_trait]
pub trait ProductGateway: Send + Sync {
    /// Persist a product under a (franchise, branch) pair (create or overwrite)
    async fn save(&self, franchise_id: &str, branch_id: &str, product: &Product) -> Result<Product, GatewayError>;

    async fn find_by_id(
        &self,
        franchise_id: &str,
        branch_id: &str,
        product_id: &str,
    ) -> Result<Option<Product>, GatewayError>;

    /// Exact-match lookup by product name within one branch
    async fn find_by_name(
        &self,
        franchise_id: &str,
        branch_id: &str,
        name: &str,
    ) -> Result<Option<Product>, GatewayError>;

    async fn delete_by_id(&self, franchise_id: &str, branch_id: &str, product_id: &str) -> Result<(), GatewayError>;

    /// Overwrite an existing product; fails with `NotFound` if absent
    async fn update(&self, franchise_id: &str, branch_id: &str, product: &Product) -> Result<Product, GatewayError>;

    async fn find_all_by_branch(&self, franchise_id: &str, branch_id: &str) -> Result<Vec<Product>, GatewayError>;

    /// One pairing per branch of the franchise: the branch's highest-stock
    /// product. Branches without products contribute nothing.
    async fn find_max_stock_products_by_franchise(
        &self,
        franchise_id: &str,
    ) -> Result<Vec<ProductWithBranch>, GatewayError>;

    /// Next value of the `product_sequence` counter
    async fn get_next_id(&self) -> Result<String, GatewayError>;
}

/// Gateway errors
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("{0} not found")]
    NotFound(EntityKind),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<sqlx::Error> for GatewayError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                GatewayError::Unavailable(err.to_string())
            }
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                GatewayError::Serialization(err.to_string())
            }
            _ => GatewayError::Database(err.to_string()),
        }
    }
}
