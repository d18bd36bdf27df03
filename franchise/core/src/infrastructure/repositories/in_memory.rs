// Copyright (c) 2026 Franchise Inventory Maintainers
// SPDX-License-Identifier: AGPL-3.0
//! In-Memory Gateways
//!
//! Thread-safe, process-local storage for development and tests. The three
//! gateways share one [`InMemoryStore`], so a branch saved through
//! `InMemoryBranchGateway` is visible on the franchise returned by
//! `InMemoryFranchiseGateway`.
//!
//! Listings are returned in id order (numeric-aware), which for sequence ids
//! is creation order.

use async_trait::async_trait;
use futures::future::try_join_all;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::aggregation::{compare_ids, max_stock_per_branch};
use crate::domain::franchise::{Branch, EntityKind, Franchise, Product, ProductWithBranch};
use crate::domain::gateway::{BranchGateway, FranchiseGateway, GatewayError, ProductGateway};
use crate::domain::sequence::{SequenceGenerator, SequenceStore};

type BranchKey = (String, String);
type ProductKey = (String, String, String);

#[derive(Default)]
struct Tables {
    /// Franchise rows; `branches` is always stored empty
    franchises: HashMap<String, Franchise>,
    /// Branch rows; `products` is always stored empty
    branches: HashMap<BranchKey, Branch>,
    products: HashMap<ProductKey, Product>,
}

impl Tables {
    fn branches_of(&self, franchise_id: &str) -> Vec<Branch> {
        let mut branches: Vec<Branch> = self
            .branches
            .iter()
            .filter(|((fid, _), _)| fid == franchise_id)
            .map(|((_, bid), branch)| {
                let mut branch = branch.clone();
                branch.products = self.products_of(franchise_id, bid);
                branch
            })
            .collect();
        branches.sort_by(|a, b| compare_ids(&a.id, &b.id));
        branches
    }

    fn products_of(&self, franchise_id: &str, branch_id: &str) -> Vec<Product> {
        let mut products: Vec<Product> = self
            .products
            .iter()
            .filter(|((fid, bid, _), _)| fid == franchise_id && bid == branch_id)
            .map(|(_, product)| product.clone())
            .collect();
        products.sort_by(|a, b| compare_ids(&a.id, &b.id));
        products
    }

    fn hydrate(&self, franchise: &Franchise) -> Franchise {
        let mut franchise = franchise.clone();
        franchise.branches = self.branches_of(&franchise.id);
        franchise
    }

    /// Drop the branch and its products
    fn remove_branch(&mut self, franchise_id: &str, branch_id: &str) {
        self.branches
            .remove(&(franchise_id.to_string(), branch_id.to_string()));
        self.products
            .retain(|(fid, bid, _), _| !(fid == franchise_id && bid == branch_id));
    }
}

fn key2(franchise_id: &str, branch_id: &str) -> BranchKey {
    (franchise_id.to_string(), branch_id.to_string())
}

fn key3(franchise_id: &str, branch_id: &str, product_id: &str) -> ProductKey {
    (
        franchise_id.to_string(),
        branch_id.to_string(),
        product_id.to_string(),
    )
}

/// Named counters guarded by a single mutex
#[derive(Default)]
pub struct InMemorySequenceStore {
    counters: Mutex<HashMap<String, i64>>,
}

impl InMemorySequenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SequenceStore for InMemorySequenceStore {
    async fn increment(&self, name: &str) -> Result<Option<i64>, GatewayError> {
        let mut counters = self.counters.lock();
        let value = counters.entry(name.to_string()).or_insert(0);
        *value += 1;
        Ok(Some(*value))
    }

    async fn insert_initial(&self, name: &str) -> Result<(), GatewayError> {
        self.counters.lock().entry(name.to_string()).or_insert(0);
        Ok(())
    }
}

/// Shared state behind the in-memory gateways
#[derive(Clone)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
    sequences: SequenceGenerator,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
            sequences: SequenceGenerator::new(Arc::new(InMemorySequenceStore::new())),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub struct InMemoryFranchiseGateway {
    store: InMemoryStore,
}

impl InMemoryFranchiseGateway {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl FranchiseGateway for InMemoryFranchiseGateway {
    async fn save(&self, franchise: &Franchise) -> Result<Franchise, GatewayError> {
        let mut tables = self.store.tables.write();
        let mut row = franchise.clone();
        row.branches.clear();
        tables.franchises.insert(row.id.clone(), row);
        Ok(tables.hydrate(franchise))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Franchise>, GatewayError> {
        let tables = self.store.tables.read();
        Ok(tables.franchises.get(id).map(|f| tables.hydrate(f)))
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), GatewayError> {
        let mut tables = self.store.tables.write();
        tables.franchises.remove(id);
        let branch_ids: Vec<String> = tables
            .branches
            .keys()
            .filter(|(fid, _)| fid == id)
            .map(|(_, bid)| bid.clone())
            .collect();
        for branch_id in branch_ids {
            tables.remove_branch(id, &branch_id);
        }
        Ok(())
    }

    async fn update(&self, franchise: &Franchise) -> Result<Franchise, GatewayError> {
        let mut tables = self.store.tables.write();
        let row = tables
            .franchises
            .get_mut(&franchise.id)
            .ok_or(GatewayError::NotFound(EntityKind::Franchise))?;
        row.name = franchise.name.clone();
        row.description = franchise.description.clone();
        let row = row.clone();
        Ok(tables.hydrate(&row))
    }

    async fn find_all(&self) -> Result<Vec<Franchise>, GatewayError> {
        let tables = self.store.tables.read();
        let mut franchises: Vec<Franchise> = tables.franchises.values().map(|f| tables.hydrate(f)).collect();
        franchises.sort_by(|a, b| compare_ids(&a.id, &b.id));
        Ok(franchises)
    }

    async fn get_next_id(&self) -> Result<String, GatewayError> {
        self.store.sequences.next_id(EntityKind::Franchise).await
    }
}

#[derive(Clone)]
pub struct InMemoryBranchGateway {
    store: InMemoryStore,
}

impl InMemoryBranchGateway {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BranchGateway for InMemoryBranchGateway {
    async fn save(&self, franchise_id: &str, branch: &Branch) -> Result<Branch, GatewayError> {
        let mut tables = self.store.tables.write();
        let mut row = branch.clone();
        row.products.clear();
        tables.branches.insert(key2(franchise_id, &branch.id), row);

        let mut saved = branch.clone();
        saved.products = tables.products_of(franchise_id, &branch.id);
        Ok(saved)
    }

    async fn find_by_id(&self, franchise_id: &str, branch_id: &str) -> Result<Option<Branch>, GatewayError> {
        let tables = self.store.tables.read();
        Ok(tables.branches.get(&key2(franchise_id, branch_id)).map(|row| {
            let mut branch = row.clone();
            branch.products = tables.products_of(franchise_id, branch_id);
            branch
        }))
    }

    async fn delete_by_id(&self, franchise_id: &str, branch_id: &str) -> Result<(), GatewayError> {
        self.store.tables.write().remove_branch(franchise_id, branch_id);
        Ok(())
    }

    async fn update(&self, franchise_id: &str, branch: &Branch) -> Result<Branch, GatewayError> {
        let mut tables = self.store.tables.write();
        let row = tables
            .branches
            .get_mut(&key2(franchise_id, &branch.id))
            .ok_or(GatewayError::NotFound(EntityKind::Branch))?;
        row.name = branch.name.clone();
        row.address = branch.address.clone();
        row.city = branch.city.clone();

        let mut updated = row.clone();
        updated.products = tables.products_of(franchise_id, &branch.id);
        Ok(updated)
    }

    async fn find_all_by_franchise_id(&self, franchise_id: &str) -> Result<Vec<Branch>, GatewayError> {
        Ok(self.store.tables.read().branches_of(franchise_id))
    }

    async fn get_next_id(&self) -> Result<String, GatewayError> {
        self.store.sequences.next_id(EntityKind::Branch).await
    }
}

#[derive(Clone)]
pub struct InMemoryProductGateway {
    store: InMemoryStore,
}

impl InMemoryProductGateway {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProductGateway for InMemoryProductGateway {
    async fn save(&self, franchise_id: &str, branch_id: &str, product: &Product) -> Result<Product, GatewayError> {
        self.store
            .tables
            .write()
            .products
            .insert(key3(franchise_id, branch_id, &product.id), product.clone());
        Ok(product.clone())
    }

    async fn find_by_id(
        &self,
        franchise_id: &str,
        branch_id: &str,
        product_id: &str,
    ) -> Result<Option<Product>, GatewayError> {
        let tables = self.store.tables.read();
        Ok(tables.products.get(&key3(franchise_id, branch_id, product_id)).cloned())
    }

    async fn find_by_name(
        &self,
        franchise_id: &str,
        branch_id: &str,
        name: &str,
    ) -> Result<Option<Product>, GatewayError> {
        let tables = self.store.tables.read();
        Ok(tables
            .products_of(franchise_id, branch_id)
            .into_iter()
            .find(|product| product.name == name))
    }

    async fn delete_by_id(&self, franchise_id: &str, branch_id: &str, product_id: &str) -> Result<(), GatewayError> {
        self.store
            .tables
            .write()
            .products
            .remove(&key3(franchise_id, branch_id, product_id));
        Ok(())
    }

    async fn update(&self, franchise_id: &str, branch_id: &str, product: &Product) -> Result<Product, GatewayError> {
        let mut tables = self.store.tables.write();
        let row = tables
            .products
            .get_mut(&key3(franchise_id, branch_id, &product.id))
            .ok_or(GatewayError::NotFound(EntityKind::Product))?;
        *row = product.clone();
        Ok(product.clone())
    }

    async fn find_all_by_branch(&self, franchise_id: &str, branch_id: &str) -> Result<Vec<Product>, GatewayError> {
        Ok(self.store.tables.read().products_of(franchise_id, branch_id))
    }

    async fn find_max_stock_products_by_franchise(
        &self,
        franchise_id: &str,
    ) -> Result<Vec<ProductWithBranch>, GatewayError> {
        let branches = self.store.tables.read().branches_of(franchise_id);

        let groups = try_join_all(branches.into_iter().map(|branch| async move {
            let products = self.find_all_by_branch(franchise_id, &branch.id).await?;
            Ok::<_, GatewayError>((branch, products))
        }))
        .await?;

        Ok(max_stock_per_branch(groups))
    }

    async fn get_next_id(&self) -> Result<String, GatewayError> {
        self.store.sequences.next_id(EntityKind::Product).await
    }
}
