// Copyright (c) 2026 Franchise Inventory Maintainers
// SPDX-License-Identifier: AGPL-3.0
//! Domain
//!
//! Entities, gateway ports and the pure rules shared by every adapter.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Franchise hierarchy model, persistence contracts, id sequencing

pub mod franchise;
pub mod gateway;
pub mod sequence;
pub mod aggregation;
pub mod validation;
pub mod service_config;
