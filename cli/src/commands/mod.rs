// Copyright (c) 2026 Franchise Inventory Maintainers
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for the franchise inventory CLI

pub mod config;
pub mod migrate;

pub use self::config::ConfigCommand;
pub use self::migrate::MigrateCommand;
