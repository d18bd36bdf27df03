// Copyright (c) 2026 Franchise Inventory Maintainers
// SPDX-License-Identifier: AGPL-3.0
//! Franchise inventory CLI library - exposes testable components
//!
//! # Architecture
//!
//! - **Layer:** Interface / Presentation Layer
//! - **Purpose:** Command handlers and HTTP server bootstrap for `franchised`

pub mod commands;
pub mod server;
