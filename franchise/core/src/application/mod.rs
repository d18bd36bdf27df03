// Copyright (c) 2026 Franchise Inventory Maintainers
// SPDX-License-Identifier: AGPL-3.0

pub mod error;
mod lookup;

pub mod franchise;
pub mod branch;
pub mod product;

pub mod gateway_factory;
pub mod use_cases;

// Re-export use cases for convenience
pub use branch::{AddBranchUseCase, BranchUpdate, GetBranchByIdUseCase, NewBranch, UpdateBranchNameUseCase, UpdateBranchUseCase};
pub use error::UseCaseError;
pub use franchise::{CreateFranchiseUseCase, GetAllFranchisesUseCase, GetFranchiseByIdUseCase, NewFranchise, UpdateFranchiseNameUseCase};
pub use gateway_factory::{create_gateways, Gateways};
pub use product::{
    AddProductUseCase, DeleteProductUseCase, GetMaxStockProductsUseCase, GetProductByNameUseCase,
    GetProductsByBranchUseCase, NewProduct, UpdateProductNameUseCase, UpdateProductStockUseCase,
};
pub use use_cases::UseCases;
