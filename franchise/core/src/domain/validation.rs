// Copyright (c) 2026 Franchise Inventory Maintainers
// SPDX-License-Identifier: AGPL-3.0
//! # Field Validation Rules
//!
//! Field contracts checked by use cases before any gateway call:
//!
//! | Field | Rule |
//! |-------|------|
//! | `name` | present and non-blank after trimming; stored trimmed |
//! | `stock` | present and `>= 0` |
//! | path ids | non-blank |
//!
//! A blank value is treated exactly like an absent one.

use thiserror::Error;

use crate::domain::franchise::EntityKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name cannot be empty")]
    BlankName,

    #[error("Stock is required")]
    MissingStock,

    #[error("Stock must be a non-negative number")]
    NegativeStock(i64),

    #[error("{0} id cannot be empty")]
    BlankId(EntityKind),

    #[error("At least one field must be provided")]
    NoFieldsProvided,
}

/// Trimmed value, or `None` when absent or whitespace-only
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub fn is_blank(value: Option<&str>) -> bool {
    non_blank(value).is_none()
}

pub fn require_name(name: Option<&str>) -> Result<String, ValidationError> {
    non_blank(name)
        .map(str::to_string)
        .ok_or(ValidationError::BlankName)
}

pub fn require_stock(stock: Option<i64>) -> Result<i64, ValidationError> {
    match stock {
        None => Err(ValidationError::MissingStock),
        Some(value) if value < 0 => Err(ValidationError::NegativeStock(value)),
        Some(value) => Ok(value),
    }
}

pub fn require_id(kind: EntityKind, id: &str) -> Result<(), ValidationError> {
    if is_blank(Some(id)) {
        return Err(ValidationError::BlankId(kind));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_trimmed_and_blank_rejected() {
        assert_eq!(require_name(Some("  Acme ")).unwrap(), "Acme");
        assert_eq!(require_name(Some("   ")), Err(ValidationError::BlankName));
        assert_eq!(require_name(Some("")), Err(ValidationError::BlankName));
        assert_eq!(require_name(None), Err(ValidationError::BlankName));
    }

    #[test]
    fn test_stock_rules() {
        assert_eq!(require_stock(Some(0)), Ok(0));
        assert_eq!(require_stock(Some(42)), Ok(42));
        assert_eq!(require_stock(Some(-1)), Err(ValidationError::NegativeStock(-1)));
        assert_eq!(require_stock(None), Err(ValidationError::MissingStock));
    }

    #[test]
    fn test_blank_ids() {
        assert!(require_id(EntityKind::Branch, "7").is_ok());
        let err = require_id(EntityKind::Branch, " ").unwrap_err();
        assert_eq!(err.to_string(), "Branch id cannot be empty");
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some(" x ")), Some("x"));
        assert_eq!(non_blank(Some("\t")), None);
        assert!(is_blank(None));
    }
}
