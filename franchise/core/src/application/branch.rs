// Copyright (c) 2026 Franchise Inventory Maintainers
// SPDX-License-Identifier: AGPL-3.0

//! Branch Use Cases
//!
//! Every operation verifies the owning franchise before touching the branch,
//! so a missing franchise is always reported ahead of a missing branch.

use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::application::error::UseCaseError;
use crate::application::lookup::{require_branch, require_franchise};
use crate::domain::franchise::{Branch, EntityKind};
use crate::domain::gateway::{BranchGateway, FranchiseGateway};
use crate::domain::validation::{is_blank, non_blank, require_id, require_name, ValidationError};

/// Fields accepted when adding a branch to a franchise
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewBranch {
    pub id: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
}

impl NewBranch {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Partial branch update. Absent or blank fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BranchUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
}

impl BranchUpdate {
    pub fn has_any_field(&self) -> bool {
        [&self.name, &self.address, &self.city]
            .iter()
            .any(|field| !is_blank(field.as_deref()))
    }

    fn apply_to(&self, branch: &mut Branch) {
        if let Some(name) = non_blank(self.name.as_deref()) {
            branch.name = name.to_string();
        }
        if let Some(address) = non_blank(self.address.as_deref()) {
            branch.address = Some(address.to_string());
        }
        if let Some(city) = non_blank(self.city.as_deref()) {
            branch.city = Some(city.to_string());
        }
    }
}

pub struct AddBranchUseCase {
    branch_gateway: Arc<dyn BranchGateway>,
    franchise_gateway: Arc<dyn FranchiseGateway>,
}

impl AddBranchUseCase {
    pub fn new(branch_gateway: Arc<dyn BranchGateway>, franchise_gateway: Arc<dyn FranchiseGateway>) -> Self {
        Self {
            branch_gateway,
            franchise_gateway,
        }
    }

    pub async fn execute(&self, franchise_id: &str, request: NewBranch) -> Result<Branch, UseCaseError> {
        let name = require_name(request.name.as_deref())?;

        require_franchise(self.franchise_gateway.as_ref(), franchise_id).await?;

        let id = match non_blank(request.id.as_deref()) {
            Some(id) => id.to_string(),
            None => self.branch_gateway.get_next_id().await?,
        };

        let branch = Branch::new(id, name).with_location(
            non_blank(request.address.as_deref()).map(str::to_string),
            non_blank(request.city.as_deref()).map(str::to_string),
        );

        let saved = self.branch_gateway.save(franchise_id, &branch).await?;
        info!(franchise_id = %franchise_id, branch_id = %saved.id, "Branch added");
        Ok(saved)
    }
}

pub struct UpdateBranchNameUseCase {
    branch_gateway: Arc<dyn BranchGateway>,
    franchise_gateway: Arc<dyn FranchiseGateway>,
}

impl UpdateBranchNameUseCase {
    pub fn new(branch_gateway: Arc<dyn BranchGateway>, franchise_gateway: Arc<dyn FranchiseGateway>) -> Self {
        Self {
            branch_gateway,
            franchise_gateway,
        }
    }

    pub async fn execute(&self, franchise_id: &str, branch_id: &str, new_name: &str) -> Result<Branch, UseCaseError> {
        let name = require_name(Some(new_name))?;

        require_franchise(self.franchise_gateway.as_ref(), franchise_id).await?;
        let mut branch = require_branch(self.branch_gateway.as_ref(), franchise_id, branch_id).await?;
        branch.name = name;

        let updated = self.branch_gateway.update(franchise_id, &branch).await?;
        info!(franchise_id = %franchise_id, branch_id = %updated.id, "Branch renamed");
        Ok(updated)
    }
}

pub struct UpdateBranchUseCase {
    branch_gateway: Arc<dyn BranchGateway>,
    franchise_gateway: Arc<dyn FranchiseGateway>,
}

impl UpdateBranchUseCase {
    pub fn new(branch_gateway: Arc<dyn BranchGateway>, franchise_gateway: Arc<dyn FranchiseGateway>) -> Self {
        Self {
            branch_gateway,
            franchise_gateway,
        }
    }

    /// Merge the provided fields into the stored branch. At least one of
    /// name, address or city must be non-blank.
    pub async fn execute(
        &self,
        franchise_id: &str,
        branch_id: &str,
        update: BranchUpdate,
    ) -> Result<Branch, UseCaseError> {
        if !update.has_any_field() {
            return Err(ValidationError::NoFieldsProvided.into());
        }

        require_franchise(self.franchise_gateway.as_ref(), franchise_id).await?;
        let mut branch = require_branch(self.branch_gateway.as_ref(), franchise_id, branch_id).await?;
        update.apply_to(&mut branch);

        let updated = self.branch_gateway.update(franchise_id, &branch).await?;
        info!(franchise_id = %franchise_id, branch_id = %updated.id, "Branch updated");
        Ok(updated)
    }
}

pub struct GetBranchByIdUseCase {
    branch_gateway: Arc<dyn BranchGateway>,
    franchise_gateway: Arc<dyn FranchiseGateway>,
}

impl GetBranchByIdUseCase {
    pub fn new(branch_gateway: Arc<dyn BranchGateway>, franchise_gateway: Arc<dyn FranchiseGateway>) -> Self {
        Self {
            branch_gateway,
            franchise_gateway,
        }
    }

    pub async fn execute(&self, franchise_id: &str, branch_id: &str) -> Result<Branch, UseCaseError> {
        require_id(EntityKind::Franchise, franchise_id)?;
        require_id(EntityKind::Branch, branch_id)?;

        require_franchise(self.franchise_gateway.as_ref(), franchise_id).await?;
        require_branch(self.branch_gateway.as_ref(), franchise_id, branch_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_update_requires_a_non_blank_field() {
        assert!(!BranchUpdate::default().has_any_field());

        let blanks = BranchUpdate {
            name: Some("  ".into()),
            address: Some(String::new()),
            city: None,
        };
        assert!(!blanks.has_any_field());

        let city_only = BranchUpdate {
            city: Some("Bogotá".into()),
            ..BranchUpdate::default()
        };
        assert!(city_only.has_any_field());
    }

    #[test]
    fn test_branch_update_merges_only_provided_fields() {
        let mut branch = Branch::new("3", "Centro").with_location(Some("Calle 1".into()), Some("Cali".into()));

        BranchUpdate {
            name: Some(" Norte ".into()),
            address: Some("   ".into()),
            city: None,
        }
        .apply_to(&mut branch);

        assert_eq!(branch.name, "Norte");
        assert_eq!(branch.address.as_deref(), Some("Calle 1"));
        assert_eq!(branch.city.as_deref(), Some("Cali"));
    }
}
