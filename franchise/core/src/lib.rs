// Copyright (c) 2026 Franchise Inventory Maintainers
// SPDX-License-Identifier: AGPL-3.0
//! Franchise Inventory Core
//!
//! Franchise → Branch → Product inventory: domain model, use cases, storage
//! adapters and the HTTP surface.
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** Everything the `franchised` binary wires together

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
