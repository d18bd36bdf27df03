// Copyright (c) 2026 Franchise Inventory Maintainers
// SPDX-License-Identifier: AGPL-3.0
//! Gateway Factory - Application Layer
//!
//! Creates concrete gateway implementations based on the storage backend
//! configuration, keeping the domain layer free of infrastructure types.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Wire `StorageBackend` to in-memory or PostgreSQL adapters

use anyhow::Result;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;

use crate::domain::gateway::{BranchGateway, FranchiseGateway, ProductGateway, StorageBackend};
use crate::infrastructure::db::Database;
use crate::infrastructure::repositories::{
    InMemoryBranchGateway, InMemoryFranchiseGateway, InMemoryProductGateway, InMemoryStore, PostgresBranchGateway,
    PostgresFranchiseGateway, PostgresProductGateway,
};

/// One gateway per entity kind, all backed by the same storage
#[derive(Clone)]
pub struct Gateways {
    pub franchises: Arc<dyn FranchiseGateway>,
    pub branches: Arc<dyn BranchGateway>,
    pub products: Arc<dyn ProductGateway>,
}

impl Gateways {
    /// Fresh, empty in-memory storage
    pub fn in_memory() -> Self {
        let store = InMemoryStore::new();
        Self {
            franchises: Arc::new(InMemoryFranchiseGateway::new(store.clone())),
            branches: Arc::new(InMemoryBranchGateway::new(store.clone())),
            products: Arc::new(InMemoryProductGateway::new(store)),
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self {
            franchises: Arc::new(PostgresFranchiseGateway::new(pool.clone())),
            branches: Arc::new(PostgresBranchGateway::new(pool.clone())),
            products: Arc::new(PostgresProductGateway::new(pool)),
        }
    }
}

/// Creates the gateways for the configured backend. The PostgreSQL backend
/// connects and applies pending migrations first.
pub async fn create_gateways(backend: &StorageBackend) -> Result<Gateways> {
    match backend {
        StorageBackend::InMemory => {
            info!("Using in-memory storage");
            Ok(Gateways::in_memory())
        }
        StorageBackend::PostgreSQL(config) => {
            info!(max_connections = config.max_connections, "Using PostgreSQL storage");
            let database = Database::new(config).await?;
            database.migrate().await?;
            Ok(Gateways::postgres(database.get_pool().clone()))
        }
    }
}
