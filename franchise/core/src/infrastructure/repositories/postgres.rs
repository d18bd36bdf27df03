// Copyright (c) 2026 Franchise Inventory Maintainers
// SPDX-License-Identifier: AGPL-3.0
//! PostgreSQL Gateways
//!
//! Table layout (see `migrations/`):
//!
//! | Table | Key | Notes |
//! |-------|-----|-------|
//! | `franchises` | `id` | |
//! | `branches` | `(franchise_id, id)` | cascades from `franchises` |
//! | `products` | `(franchise_id, branch_id, id)` | cascades from `branches`, `stock >= 0` |
//! | `sequences` | `name` | one counter row per entity kind |
//!
//! Franchises and branches are returned hydrated with their children. Child
//! rows are never written through a parent's `save` or `update`.

use async_trait::async_trait;
use futures::future::try_join_all;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;
use std::sync::Arc;

use crate::domain::aggregation::{compare_ids, max_stock_per_branch};
use crate::domain::franchise::{Branch, EntityKind, Franchise, Product, ProductWithBranch};
use crate::domain::gateway::{BranchGateway, FranchiseGateway, GatewayError, ProductGateway};
use crate::domain::sequence::{SequenceGenerator, SequenceStore};

/// Counter rows in the `sequences` table
pub struct PostgresSequenceStore {
    pool: PgPool,
}

impl PostgresSequenceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SequenceStore for PostgresSequenceStore {
    async fn increment(&self, name: &str) -> Result<Option<i64>, GatewayError> {
        let value: Option<i64> = sqlx::query_scalar(
            r#"
            INSERT INTO sequences (name, value)
            VALUES ($1, 1)
            ON CONFLICT (name) DO UPDATE SET value = sequences.value + 1
            RETURNING value
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(value)
    }

    async fn insert_initial(&self, name: &str) -> Result<(), GatewayError> {
        sqlx::query("INSERT INTO sequences (name, value) VALUES ($1, 0) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

fn sequence_generator(pool: &PgPool) -> SequenceGenerator {
    SequenceGenerator::new(Arc::new(PostgresSequenceStore::new(pool.clone())))
}

fn franchise_from_row(row: &PgRow) -> Result<Franchise, GatewayError> {
    Ok(Franchise::new(row.try_get::<String, _>("id")?, row.try_get::<String, _>("name")?)
        .with_description(row.try_get("description")?))
}

fn branch_from_row(row: &PgRow) -> Result<Branch, GatewayError> {
    Ok(Branch::new(row.try_get::<String, _>("id")?, row.try_get::<String, _>("name")?)
        .with_location(row.try_get("address")?, row.try_get("city")?))
}

fn product_from_row(row: &PgRow) -> Result<Product, GatewayError> {
    Ok(Product::new(
        row.try_get::<String, _>("id")?,
        row.try_get::<String, _>("name")?,
        row.try_get::<i64, _>("stock")?,
    ))
}

async fn load_products(pool: &PgPool, franchise_id: &str, branch_id: &str) -> Result<Vec<Product>, GatewayError> {
    let rows = sqlx::query("SELECT id, name, stock FROM products WHERE franchise_id = $1 AND branch_id = $2")
        .bind(franchise_id)
        .bind(branch_id)
        .fetch_all(pool)
        .await?;

    let mut products = rows.iter().map(product_from_row).collect::<Result<Vec<_>, _>>()?;
    products.sort_by(|a, b| compare_ids(&a.id, &b.id));
    Ok(products)
}

/// Branch rows of a franchise, without products
async fn load_branch_rows(pool: &PgPool, franchise_id: &str) -> Result<Vec<Branch>, GatewayError> {
    let rows = sqlx::query("SELECT id, name, address, city FROM branches WHERE franchise_id = $1")
        .bind(franchise_id)
        .fetch_all(pool)
        .await?;

    let mut branches = rows.iter().map(branch_from_row).collect::<Result<Vec<_>, _>>()?;
    branches.sort_by(|a, b| compare_ids(&a.id, &b.id));
    Ok(branches)
}

async fn load_branches(pool: &PgPool, franchise_id: &str) -> Result<Vec<Branch>, GatewayError> {
    let branches = load_branch_rows(pool, franchise_id).await?;
    try_join_all(branches.into_iter().map(|mut branch| async move {
        branch.products = load_products(pool, franchise_id, &branch.id).await?;
        Ok::<_, GatewayError>(branch)
    }))
    .await
}

pub struct PostgresFranchiseGateway {
    pool: PgPool,
    sequences: SequenceGenerator,
}

impl PostgresFranchiseGateway {
    pub fn new(pool: PgPool) -> Self {
        let sequences = sequence_generator(&pool);
        Self { pool, sequences }
    }

    async fn hydrate(&self, mut franchise: Franchise) -> Result<Franchise, GatewayError> {
        franchise.branches = load_branches(&self.pool, &franchise.id).await?;
        Ok(franchise)
    }
}

#[async_trait]
impl FranchiseGateway for PostgresFranchiseGateway {
    async fn save(&self, franchise: &Franchise) -> Result<Franchise, GatewayError> {
        let row = sqlx::query(
            r#"
            INSERT INTO franchises (id, name, description)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                description = EXCLUDED.description
            RETURNING id, name, description
            "#,
        )
        .bind(&franchise.id)
        .bind(&franchise.name)
        .bind(&franchise.description)
        .fetch_one(&self.pool)
        .await?;

        self.hydrate(franchise_from_row(&row)?).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Franchise>, GatewayError> {
        let row = sqlx::query("SELECT id, name, description FROM franchises WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate(franchise_from_row(&row)?).await?)),
            None => Ok(None),
        }
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), GatewayError> {
        sqlx::query("DELETE FROM franchises WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update(&self, franchise: &Franchise) -> Result<Franchise, GatewayError> {
        let row = sqlx::query(
            "UPDATE franchises SET name = $2, description = $3 WHERE id = $1 RETURNING id, name, description",
        )
        .bind(&franchise.id)
        .bind(&franchise.name)
        .bind(&franchise.description)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(GatewayError::NotFound(EntityKind::Franchise))?;

        self.hydrate(franchise_from_row(&row)?).await
    }

    async fn find_all(&self) -> Result<Vec<Franchise>, GatewayError> {
        let rows = sqlx::query("SELECT id, name, description FROM franchises")
            .fetch_all(&self.pool)
            .await?;

        let mut franchises = Vec::with_capacity(rows.len());
        for row in &rows {
            franchises.push(self.hydrate(franchise_from_row(row)?).await?);
        }
        franchises.sort_by(|a, b| compare_ids(&a.id, &b.id));
        Ok(franchises)
    }

    async fn get_next_id(&self) -> Result<String, GatewayError> {
        self.sequences.next_id(EntityKind::Franchise).await
    }
}

pub struct PostgresBranchGateway {
    pool: PgPool,
    sequences: SequenceGenerator,
}

impl PostgresBranchGateway {
    pub fn new(pool: PgPool) -> Self {
        let sequences = sequence_generator(&pool);
        Self { pool, sequences }
    }

    async fn hydrate(&self, franchise_id: &str, mut branch: Branch) -> Result<Branch, GatewayError> {
        branch.products = load_products(&self.pool, franchise_id, &branch.id).await?;
        Ok(branch)
    }
}

#[async_trait]
impl BranchGateway for PostgresBranchGateway {
    async fn save(&self, franchise_id: &str, branch: &Branch) -> Result<Branch, GatewayError> {
        let row = sqlx::query(
            r#"
            INSERT INTO branches (franchise_id, id, name, address, city)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (franchise_id, id) DO UPDATE SET
                name = EXCLUDED.name,
                address = EXCLUDED.address,
                city = EXCLUDED.city
            RETURNING id, name, address, city
            "#,
        )
        .bind(franchise_id)
        .bind(&branch.id)
        .bind(&branch.name)
        .bind(&branch.address)
        .bind(&branch.city)
        .fetch_one(&self.pool)
        .await?;

        self.hydrate(franchise_id, branch_from_row(&row)?).await
    }

    async fn find_by_id(&self, franchise_id: &str, branch_id: &str) -> Result<Option<Branch>, GatewayError> {
        let row = sqlx::query("SELECT id, name, address, city FROM branches WHERE franchise_id = $1 AND id = $2")
            .bind(franchise_id)
            .bind(branch_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate(franchise_id, branch_from_row(&row)?).await?)),
            None => Ok(None),
        }
    }

    async fn delete_by_id(&self, franchise_id: &str, branch_id: &str) -> Result<(), GatewayError> {
        sqlx::query("DELETE FROM branches WHERE franchise_id = $1 AND id = $2")
            .bind(franchise_id)
            .bind(branch_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update(&self, franchise_id: &str, branch: &Branch) -> Result<Branch, GatewayError> {
        let row = sqlx::query(
            r#"
            UPDATE branches SET name = $3, address = $4, city = $5
            WHERE franchise_id = $1 AND id = $2
            RETURNING id, name, address, city
            "#,
        )
        .bind(franchise_id)
        .bind(&branch.id)
        .bind(&branch.name)
        .bind(&branch.address)
        .bind(&branch.city)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(GatewayError::NotFound(EntityKind::Branch))?;

        self.hydrate(franchise_id, branch_from_row(&row)?).await
    }

    async fn find_all_by_franchise_id(&self, franchise_id: &str) -> Result<Vec<Branch>, GatewayError> {
        load_branches(&self.pool, franchise_id).await
    }

    async fn get_next_id(&self) -> Result<String, GatewayError> {
        self.sequences.next_id(EntityKind::Branch).await
    }
}

pub struct PostgresProductGateway {
    pool: PgPool,
    sequences: SequenceGenerator,
}

impl PostgresProductGateway {
    pub fn new(pool: PgPool) -> Self {
        let sequences = sequence_generator(&pool);
        Self { pool, sequences }
    }
}

#[async_trait]
impl ProductGateway for PostgresProductGateway {
    async fn save(&self, franchise_id: &str, branch_id: &str, product: &Product) -> Result<Product, GatewayError> {
        let row = sqlx::query(
            r#"
            INSERT INTO products (franchise_id, branch_id, id, name, stock)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (franchise_id, branch_id, id) DO UPDATE SET
                name = EXCLUDED.name,
                stock = EXCLUDED.stock
            RETURNING id, name, stock
            "#,
        )
        .bind(franchise_id)
        .bind(branch_id)
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.stock)
        .fetch_one(&self.pool)
        .await?;

        product_from_row(&row)
    }

    async fn find_by_id(
        &self,
        franchise_id: &str,
        branch_id: &str,
        product_id: &str,
    ) -> Result<Option<Product>, GatewayError> {
        let row = sqlx::query(
            "SELECT id, name, stock FROM products WHERE franchise_id = $1 AND branch_id = $2 AND id = $3",
        )
        .bind(franchise_id)
        .bind(branch_id)
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(product_from_row).transpose()
    }

    async fn find_by_name(
        &self,
        franchise_id: &str,
        branch_id: &str,
        name: &str,
    ) -> Result<Option<Product>, GatewayError> {
        let rows = sqlx::query(
            "SELECT id, name, stock FROM products WHERE franchise_id = $1 AND branch_id = $2 AND name = $3",
        )
        .bind(franchise_id)
        .bind(branch_id)
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        // Names are not unique; the lowest id wins for a stable answer
        let mut products = rows.iter().map(product_from_row).collect::<Result<Vec<_>, _>>()?;
        products.sort_by(|a, b| compare_ids(&a.id, &b.id));
        Ok(products.into_iter().next())
    }

    async fn delete_by_id(&self, franchise_id: &str, branch_id: &str, product_id: &str) -> Result<(), GatewayError> {
        sqlx::query("DELETE FROM products WHERE franchise_id = $1 AND branch_id = $2 AND id = $3")
            .bind(franchise_id)
            .bind(branch_id)
            .bind(product_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update(&self, franchise_id: &str, branch_id: &str, product: &Product) -> Result<Product, GatewayError> {
        let row = sqlx::query(
            r#"
            UPDATE products SET name = $4, stock = $5
            WHERE franchise_id = $1 AND branch_id = $2 AND id = $3
            RETURNING id, name, stock
            "#,
        )
        .bind(franchise_id)
        .bind(branch_id)
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.stock)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(GatewayError::NotFound(EntityKind::Product))?;

        product_from_row(&row)
    }

    async fn find_all_by_branch(&self, franchise_id: &str, branch_id: &str) -> Result<Vec<Product>, GatewayError> {
        load_products(&self.pool, franchise_id, branch_id).await
    }

    async fn find_max_stock_products_by_franchise(
        &self,
        franchise_id: &str,
    ) -> Result<Vec<ProductWithBranch>, GatewayError> {
        let groups = load_branches(&self.pool, franchise_id)
            .await?
            .into_iter()
            .map(|mut branch| {
                let products = std::mem::take(&mut branch.products);
                (branch, products)
            });

        Ok(max_stock_per_branch(groups))
    }

    async fn get_next_id(&self) -> Result<String, GatewayError> {
        self.sequences.next_id(EntityKind::Product).await
    }
}
