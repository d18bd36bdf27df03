// Copyright (c) 2026 Franchise Inventory Maintainers
// SPDX-License-Identifier: AGPL-3.0
//! # Presentation Layer
//!
//! HTTP surface that translates external requests into use-case calls. No
//! business logic lives here; all real work is delegated to
//! `crate::application`.
//!
//! | Module | Transport | Description |
//! |--------|-----------|-------------|
//! | [`api`] | HTTP (Axum) | REST endpoints under `/api/franchises` plus `/health` |

pub mod api;
