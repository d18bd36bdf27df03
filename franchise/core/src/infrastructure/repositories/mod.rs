// Copyright (c) 2026 Franchise Inventory Maintainers
// SPDX-License-Identifier: AGPL-3.0

//! Gateway Implementations
//!
//! Infrastructure adapters for the gateway traits defined in
//! `crate::domain::gateway`.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Persist and retrieve the franchise hierarchy
//! - **Pattern:** Repository (DDD), Adapter (Hexagonal Architecture)
//!
//! # Available Implementations
//!
//! ## PostgreSQL
//!
//! - **PostgresFranchiseGateway**, **PostgresBranchGateway**, **PostgresProductGateway**
//! - **PostgresSequenceStore** - `INSERT ... ON CONFLICT ... RETURNING` counters
//!
//! ## In-Memory
//!
//! - **InMemoryFranchiseGateway**, **InMemoryBranchGateway**, **InMemoryProductGateway**
//!   sharing one `InMemoryStore`
//! - **InMemorySequenceStore** - mutex-guarded counters
//!
//! # Usage
//!
//! ```no_run
//! # async fn demo(pool: sqlx::PgPool) -> Result<(), franchise_core::domain::gateway::GatewayError> {
//! use franchise_core::domain::gateway::FranchiseGateway;
//! use franchise_core::infrastructure::repositories::PostgresFranchiseGateway;
//!
//! let gateway = PostgresFranchiseGateway::new(pool);
//! let franchise = gateway.find_by_id("1").await?;
//! # Ok(())
//! # }
//! ```

pub mod in_memory;
pub mod postgres;

pub use in_memory::{
    InMemoryBranchGateway, InMemoryFranchiseGateway, InMemoryProductGateway, InMemorySequenceStore, InMemoryStore,
};
pub use postgres::{PostgresBranchGateway, PostgresFranchiseGateway, PostgresProductGateway, PostgresSequenceStore};
