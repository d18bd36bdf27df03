// Copyright (c) 2026 Franchise Inventory Maintainers
// SPDX-License-Identifier: AGPL-3.0

use crate::application::branch::{AddBranchUseCase, GetBranchByIdUseCase, UpdateBranchNameUseCase, UpdateBranchUseCase};
use crate::application::franchise::{
    CreateFranchiseUseCase, GetAllFranchisesUseCase, GetFranchiseByIdUseCase, UpdateFranchiseNameUseCase,
};
use crate::application::gateway_factory::Gateways;
use crate::application::product::{
    AddProductUseCase, DeleteProductUseCase, GetMaxStockProductsUseCase, GetProductByNameUseCase,
    GetProductsByBranchUseCase, UpdateProductNameUseCase, UpdateProductStockUseCase,
};

/// Every use case wired against one set of gateways
pub struct UseCases {
    pub create_franchise: CreateFranchiseUseCase,
    pub update_franchise_name: UpdateFranchiseNameUseCase,
    pub get_franchise_by_id: GetFranchiseByIdUseCase,
    pub get_all_franchises: GetAllFranchisesUseCase,

    pub add_branch: AddBranchUseCase,
    pub update_branch_name: UpdateBranchNameUseCase,
    pub update_branch: UpdateBranchUseCase,
    pub get_branch_by_id: GetBranchByIdUseCase,

    pub add_product: AddProductUseCase,
    pub update_product_stock: UpdateProductStockUseCase,
    pub update_product_name: UpdateProductNameUseCase,
    pub delete_product: DeleteProductUseCase,
    pub get_product_by_name: GetProductByNameUseCase,
    pub get_products_by_branch: GetProductsByBranchUseCase,
    pub get_max_stock_products: GetMaxStockProductsUseCase,
}

impl UseCases {
    pub fn new(gateways: &Gateways) -> Self {
        let Gateways {
            franchises,
            branches,
            products,
        } = gateways;

        Self {
            create_franchise: CreateFranchiseUseCase::new(franchises.clone()),
            update_franchise_name: UpdateFranchiseNameUseCase::new(franchises.clone()),
            get_franchise_by_id: GetFranchiseByIdUseCase::new(franchises.clone()),
            get_all_franchises: GetAllFranchisesUseCase::new(franchises.clone()),

            add_branch: AddBranchUseCase::new(branches.clone(), franchises.clone()),
            update_branch_name: UpdateBranchNameUseCase::new(branches.clone(), franchises.clone()),
            update_branch: UpdateBranchUseCase::new(branches.clone(), franchises.clone()),
            get_branch_by_id: GetBranchByIdUseCase::new(branches.clone(), franchises.clone()),

            add_product: AddProductUseCase::new(products.clone(), branches.clone(), franchises.clone()),
            update_product_stock: UpdateProductStockUseCase::new(products.clone()),
            update_product_name: UpdateProductNameUseCase::new(products.clone(), branches.clone(), franchises.clone()),
            delete_product: DeleteProductUseCase::new(products.clone()),
            get_product_by_name: GetProductByNameUseCase::new(products.clone(), branches.clone(), franchises.clone()),
            get_products_by_branch: GetProductsByBranchUseCase::new(
                products.clone(),
                branches.clone(),
                franchises.clone(),
            ),
            get_max_stock_products: GetMaxStockProductsUseCase::new(products.clone()),
        }
    }
}
