// Copyright (c) 2026 Franchise Inventory Maintainers
// SPDX-License-Identifier: AGPL-3.0
//! # Franchise Hierarchy Entities
//!
//! Plain data types for the Franchise → Branch → Product hierarchy. Entities
//! carry no behavior beyond construction: every consistency rule (parent
//! existence, non-blank names, non-negative stock) lives in the use-case layer
//! (`crate::application`).
//!
//! | Type | Storage key | Notes |
//! |------|-------------|-------|
//! | `Franchise` | `id` | `branches` is never null, empty on construction |
//! | `Branch` | `(franchise_id, id)` | franchise id is part of the key, not a field |
//! | `Product` | `(franchise_id, branch_id, id)` | `stock` is validated as `>= 0` by use cases |
//! | `ProductWithBranch` | n/a | output-only projection for max-stock aggregation |

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of entity in the hierarchy, used for error reporting and for naming
/// the per-kind ID sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Franchise,
    Branch,
    Product,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Franchise => "franchise",
            EntityKind::Branch => "branch",
            EntityKind::Product => "product",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Franchise => "Franchise",
            EntityKind::Branch => "Branch",
            EntityKind::Product => "Product",
        };
        f.write_str(label)
    }
}

/// Franchise aggregate root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Franchise {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub branches: Vec<Branch>,
}

impl Franchise {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            branches: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default)]
    pub products: Vec<Product>,
}

impl Branch {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: None,
            city: None,
            products: Vec::new(),
        }
    }

    pub fn with_location(mut self, address: Option<String>, city: Option<String>) -> Self {
        self.address = address;
        self.city = city;
        self
    }

    /// Branch fields without its product list
    pub fn summary(&self) -> BranchSummary {
        BranchSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
        }
    }
}

/// Branch projection used where the product list is irrelevant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchSummary {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub stock: i64,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, stock: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            stock,
        }
    }
}

/// One product paired with the branch that stocks it.
///
/// Serialized with a [`BranchSummary`], so the branch's product list never
/// leaks into aggregation output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductWithBranch {
    pub product: Product,
    pub branch: BranchSummary,
}

impl ProductWithBranch {
    pub fn new(product: Product, branch: &Branch) -> Self {
        Self {
            product,
            branch: branch.summary(),
        }
    }
}
