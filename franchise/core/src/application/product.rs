// Copyright (c) 2026 Franchise Inventory Maintainers
// SPDX-License-Identifier: AGPL-3.0

//! Product Use Cases
//!
//! Stock and delete operations check only the product itself; every other
//! operation walks the hierarchy top-down and reports the first missing
//! ancestor.

use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::application::error::UseCaseError;
use crate::application::lookup::{require_branch, require_franchise, require_product};
use crate::domain::franchise::{EntityKind, Product, ProductWithBranch};
use crate::domain::gateway::{BranchGateway, FranchiseGateway, ProductGateway};
use crate::domain::validation::{non_blank, require_id, require_name, require_stock, ValidationError};

/// Fields accepted when adding a product to a branch
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewProduct {
    pub id: Option<String>,
    pub name: Option<String>,
    pub stock: Option<i64>,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, stock: i64) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            stock: Some(stock),
        }
    }
}

pub struct AddProductUseCase {
    product_gateway: Arc<dyn ProductGateway>,
    branch_gateway: Arc<dyn BranchGateway>,
    franchise_gateway: Arc<dyn FranchiseGateway>,
}

impl AddProductUseCase {
    pub fn new(
        product_gateway: Arc<dyn ProductGateway>,
        branch_gateway: Arc<dyn BranchGateway>,
        franchise_gateway: Arc<dyn FranchiseGateway>,
    ) -> Self {
        Self {
            product_gateway,
            branch_gateway,
            franchise_gateway,
        }
    }

    pub async fn execute(
        &self,
        franchise_id: &str,
        branch_id: &str,
        request: NewProduct,
    ) -> Result<Product, UseCaseError> {
        let name = require_name(request.name.as_deref())?;
        let stock = require_stock(request.stock)?;

        require_franchise(self.franchise_gateway.as_ref(), franchise_id).await?;
        require_branch(self.branch_gateway.as_ref(), franchise_id, branch_id).await?;

        let id = match non_blank(request.id.as_deref()) {
            Some(id) => id.to_string(),
            None => self.product_gateway.get_next_id().await?,
        };

        let saved = self
            .product_gateway
            .save(franchise_id, branch_id, &Product::new(id, name, stock))
            .await?;
        info!(
            franchise_id = %franchise_id,
            branch_id = %branch_id,
            product_id = %saved.id,
            stock = saved.stock,
            "Product added"
        );
        Ok(saved)
    }
}

pub struct UpdateProductStockUseCase {
    product_gateway: Arc<dyn ProductGateway>,
}

impl UpdateProductStockUseCase {
    pub fn new(product_gateway: Arc<dyn ProductGateway>) -> Self {
        Self { product_gateway }
    }

    pub async fn execute(
        &self,
        franchise_id: &str,
        branch_id: &str,
        product_id: &str,
        stock: Option<i64>,
    ) -> Result<Product, UseCaseError> {
        let stock = require_stock(stock)?;

        let mut product =
            require_product(self.product_gateway.as_ref(), franchise_id, branch_id, product_id).await?;
        let previous = product.stock;
        product.stock = stock;

        let updated = self.product_gateway.update(franchise_id, branch_id, &product).await?;
        info!(product_id = %updated.id, previous, stock = updated.stock, "Product stock updated");
        Ok(updated)
    }
}

pub struct UpdateProductNameUseCase {
    product_gateway: Arc<dyn ProductGateway>,
    branch_gateway: Arc<dyn BranchGateway>,
    franchise_gateway: Arc<dyn FranchiseGateway>,
}

impl UpdateProductNameUseCase {
    pub fn new(
        product_gateway: Arc<dyn ProductGateway>,
        branch_gateway: Arc<dyn BranchGateway>,
        franchise_gateway: Arc<dyn FranchiseGateway>,
    ) -> Self {
        Self {
            product_gateway,
            branch_gateway,
            franchise_gateway,
        }
    }

    pub async fn execute(
        &self,
        franchise_id: &str,
        branch_id: &str,
        product_id: &str,
        new_name: &str,
    ) -> Result<Product, UseCaseError> {
        let name = require_name(Some(new_name))?;

        require_franchise(self.franchise_gateway.as_ref(), franchise_id).await?;
        require_branch(self.branch_gateway.as_ref(), franchise_id, branch_id).await?;
        let mut product =
            require_product(self.product_gateway.as_ref(), franchise_id, branch_id, product_id).await?;
        product.name = name;

        let updated = self.product_gateway.update(franchise_id, branch_id, &product).await?;
        info!(product_id = %updated.id, name = %updated.name, "Product renamed");
        Ok(updated)
    }
}

pub struct DeleteProductUseCase {
    product_gateway: Arc<dyn ProductGateway>,
}

impl DeleteProductUseCase {
    pub fn new(product_gateway: Arc<dyn ProductGateway>) -> Self {
        Self { product_gateway }
    }

    pub async fn execute(&self, franchise_id: &str, branch_id: &str, product_id: &str) -> Result<(), UseCaseError> {
        require_product(self.product_gateway.as_ref(), franchise_id, branch_id, product_id).await?;

        self.product_gateway
            .delete_by_id(franchise_id, branch_id, product_id)
            .await?;
        info!(franchise_id = %franchise_id, branch_id = %branch_id, product_id = %product_id, "Product deleted");
        Ok(())
    }
}

pub struct GetProductByNameUseCase {
    product_gateway: Arc<dyn ProductGateway>,
    branch_gateway: Arc<dyn BranchGateway>,
    franchise_gateway: Arc<dyn FranchiseGateway>,
}

impl GetProductByNameUseCase {
    pub fn new(
        product_gateway: Arc<dyn ProductGateway>,
        branch_gateway: Arc<dyn BranchGateway>,
        franchise_gateway: Arc<dyn FranchiseGateway>,
    ) -> Self {
        Self {
            product_gateway,
            branch_gateway,
            franchise_gateway,
        }
    }

    /// Exact-name lookup within one branch
    pub async fn execute(&self, franchise_id: &str, branch_id: &str, name: &str) -> Result<Product, UseCaseError> {
        require_id(EntityKind::Franchise, franchise_id)?;
        require_id(EntityKind::Branch, branch_id)?;
        let name = non_blank(Some(name)).ok_or(ValidationError::BlankName)?;

        require_franchise(self.franchise_gateway.as_ref(), franchise_id).await?;
        require_branch(self.branch_gateway.as_ref(), franchise_id, branch_id).await?;

        self.product_gateway
            .find_by_name(franchise_id, branch_id, name)
            .await?
            .ok_or_else(|| {
                warn!(franchise_id = %franchise_id, branch_id = %branch_id, name = %name, "Product not found by name");
                UseCaseError::NotFound(EntityKind::Product)
            })
    }
}

pub struct GetProductsByBranchUseCase {
    product_gateway: Arc<dyn ProductGateway>,
    branch_gateway: Arc<dyn BranchGateway>,
    franchise_gateway: Arc<dyn FranchiseGateway>,
}

impl GetProductsByBranchUseCase {
    pub fn new(
        product_gateway: Arc<dyn ProductGateway>,
        branch_gateway: Arc<dyn BranchGateway>,
        franchise_gateway: Arc<dyn FranchiseGateway>,
    ) -> Self {
        Self {
            product_gateway,
            branch_gateway,
            franchise_gateway,
        }
    }

    pub async fn execute(&self, franchise_id: &str, branch_id: &str) -> Result<Vec<Product>, UseCaseError> {
        require_id(EntityKind::Franchise, franchise_id)?;
        require_id(EntityKind::Branch, branch_id)?;

        require_franchise(self.franchise_gateway.as_ref(), franchise_id).await?;
        require_branch(self.branch_gateway.as_ref(), franchise_id, branch_id).await?;

        Ok(self.product_gateway.find_all_by_branch(franchise_id, branch_id).await?)
    }
}

pub struct GetMaxStockProductsUseCase {
    product_gateway: Arc<dyn ProductGateway>,
}

impl GetMaxStockProductsUseCase {
    pub fn new(product_gateway: Arc<dyn ProductGateway>) -> Self {
        Self { product_gateway }
    }

    /// Highest-stock product of every branch in the franchise. An unknown
    /// franchise is not an error and yields an empty list.
    pub async fn execute(&self, franchise_id: &str) -> Result<Vec<ProductWithBranch>, UseCaseError> {
        let pairings = self
            .product_gateway
            .find_max_stock_products_by_franchise(franchise_id)
            .await?;
        info!(franchise_id = %franchise_id, branches = pairings.len(), "Computed max-stock products");
        Ok(pairings)
    }
}
