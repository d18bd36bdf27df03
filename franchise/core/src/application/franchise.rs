// Copyright (c) 2026 Franchise Inventory Maintainers
// SPDX-License-Identifier: AGPL-3.0

//! Franchise Use Cases
//!
//! Application services for the root of the hierarchy.
//!
//! # DDD Pattern: Application Service
//!
//! - **Layer:** Application
//! - **Collaborators:** `FranchiseGateway`
//!
//! # Flow
//!
//! 1. Validate request fields (no gateway call on failure)
//! 2. Check existence where the operation targets an existing franchise
//! 3. Mint an id from `franchise_sequence` when the caller supplied none
//! 4. Persist and return the stored franchise

use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::application::error::UseCaseError;
use crate::application::lookup::require_franchise;
use crate::domain::franchise::{EntityKind, Franchise};
use crate::domain::gateway::FranchiseGateway;
use crate::domain::validation::{non_blank, require_id, require_name};

/// Fields accepted when creating a franchise
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewFranchise {
    /// Caller-chosen id; minted from the sequence when absent or blank
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl NewFranchise {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

pub struct CreateFranchiseUseCase {
    franchise_gateway: Arc<dyn FranchiseGateway>,
}

impl CreateFranchiseUseCase {
    pub fn new(franchise_gateway: Arc<dyn FranchiseGateway>) -> Self {
        Self { franchise_gateway }
    }

    pub async fn execute(&self, request: NewFranchise) -> Result<Franchise, UseCaseError> {
        let name = require_name(request.name.as_deref())?;

        let id = match non_blank(request.id.as_deref()) {
            Some(id) => id.to_string(),
            None => self.franchise_gateway.get_next_id().await?,
        };

        let franchise = Franchise::new(id, name)
            .with_description(non_blank(request.description.as_deref()).map(str::to_string));

        let saved = self.franchise_gateway.save(&franchise).await?;
        info!(franchise_id = %saved.id, name = %saved.name, "Franchise created");
        Ok(saved)
    }
}

pub struct UpdateFranchiseNameUseCase {
    franchise_gateway: Arc<dyn FranchiseGateway>,
}

impl UpdateFranchiseNameUseCase {
    pub fn new(franchise_gateway: Arc<dyn FranchiseGateway>) -> Self {
        Self { franchise_gateway }
    }

    /// Rename a franchise. Branches and description are carried over unchanged.
    pub async fn execute(&self, franchise_id: &str, new_name: &str) -> Result<Franchise, UseCaseError> {
        let name = require_name(Some(new_name))?;

        let mut franchise = require_franchise(self.franchise_gateway.as_ref(), franchise_id).await?;
        franchise.name = name;

        let updated = self.franchise_gateway.update(&franchise).await?;
        info!(franchise_id = %updated.id, name = %updated.name, "Franchise renamed");
        Ok(updated)
    }
}

pub struct GetFranchiseByIdUseCase {
    franchise_gateway: Arc<dyn FranchiseGateway>,
}

impl GetFranchiseByIdUseCase {
    pub fn new(franchise_gateway: Arc<dyn FranchiseGateway>) -> Self {
        Self { franchise_gateway }
    }

    pub async fn execute(&self, franchise_id: &str) -> Result<Franchise, UseCaseError> {
        require_id(EntityKind::Franchise, franchise_id)?;
        require_franchise(self.franchise_gateway.as_ref(), franchise_id).await
    }
}

pub struct GetAllFranchisesUseCase {
    franchise_gateway: Arc<dyn FranchiseGateway>,
}

impl GetAllFranchisesUseCase {
    pub fn new(franchise_gateway: Arc<dyn FranchiseGateway>) -> Self {
        Self { franchise_gateway }
    }

    /// Every stored franchise; an empty store yields an empty list
    pub async fn execute(&self) -> Result<Vec<Franchise>, UseCaseError> {
        Ok(self.franchise_gateway.find_all().await?)
    }
}
