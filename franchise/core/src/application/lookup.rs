// Copyright (c) 2026 Franchise Inventory Maintainers
// SPDX-License-Identifier: AGPL-3.0

// Existence checks shared by the use cases. Callers chain them in hierarchy
// order (franchise, then branch, then product) and stop at the first miss.

use tracing::warn;

use crate::application::error::UseCaseError;
use crate::domain::franchise::{Branch, EntityKind, Franchise, Product};
use crate::domain::gateway::{BranchGateway, FranchiseGateway, ProductGateway};

pub(crate) async fn require_franchise(
    franchises: &dyn FranchiseGateway,
    franchise_id: &str,
) -> Result<Franchise, UseCaseError> {
    franchises.find_by_id(franchise_id).await?.ok_or_else(|| {
        warn!(franchise_id = %franchise_id, "Franchise not found");
        UseCaseError::NotFound(EntityKind::Franchise)
    })
}

pub(crate) async fn require_branch(
    branches: &dyn BranchGateway,
    franchise_id: &str,
    branch_id: &str,
) -> Result<Branch, UseCaseError> {
    branches.find_by_id(franchise_id, branch_id).await?.ok_or_else(|| {
        warn!(franchise_id = %franchise_id, branch_id = %branch_id, "Branch not found");
        UseCaseError::NotFound(EntityKind::Branch)
    })
}

pub(crate) async fn require_product(
    products: &dyn ProductGateway,
    franchise_id: &str,
    branch_id: &str,
    product_id: &str,
) -> Result<Product, UseCaseError> {
    products
        .find_by_id(franchise_id, branch_id, product_id)
        .await?
        .ok_or_else(|| {
            warn!(
                franchise_id = %franchise_id,
                branch_id = %branch_id,
                product_id = %product_id,
                "Product not found"
            );
            UseCaseError::NotFound(EntityKind::Product)
        })
}
