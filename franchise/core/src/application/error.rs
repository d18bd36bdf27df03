// Copyright (c) 2026 Franchise Inventory Maintainers
// SPDX-License-Identifier: AGPL-3.0
//! Use-case error taxonomy
//!
//! | Variant | Raised by | Transport mapping |
//! |---------|-----------|-------------------|
//! | `InvalidArgument` | field validation, before any gateway call | client error |
//! | `NotFound` | first missing entity in the Franchise → Branch → Product chain | client error |
//! | `StorageUnavailable` | adapter, passed through untouched | service unavailable |
//! | `Unexpected` | any other adapter failure, passed through untouched | internal error |

use crate::domain::franchise::EntityKind;
use crate::domain::gateway::GatewayError;
use crate::domain::validation::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum UseCaseError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0} not found")]
    NotFound(EntityKind),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl UseCaseError {
    /// Caller-side failures, as opposed to storage faults
    pub fn is_client_error(&self) -> bool {
        matches!(self, UseCaseError::InvalidArgument(_) | UseCaseError::NotFound(_))
    }
}

impl From<ValidationError> for UseCaseError {
    fn from(err: ValidationError) -> Self {
        UseCaseError::InvalidArgument(err.to_string())
    }
}

impl From<GatewayError> for UseCaseError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::NotFound(kind) => UseCaseError::NotFound(kind),
            GatewayError::Unavailable(reason) => UseCaseError::StorageUnavailable(reason),
            other => UseCaseError::Unexpected(other.to_string()),
        }
    }
}
