// Copyright (c) 2026 Franchise Inventory Maintainers
// SPDX-License-Identifier: AGPL-3.0
//! # Atomic ID Sequencing
//!
//! Mints human-readable, strictly increasing IDs per entity kind. Each kind
//! owns one counter record named `<kind>_sequence` (`franchise_sequence`,
//! `branch_sequence`, `product_sequence`).
//!
//! ## Protocol
//!
//! 1. `increment` the counter: one storage-level increment-and-fetch with
//!    upsert semantics.
//! 2. If the store reports that the record neither existed nor could be
//!    created (two callers racing on the very first ID), insert a zero-valued
//!    record unless one already exists and increment again.
//! 3. Render the counter value as the ID string.
//!
//! Atomicity is delegated entirely to the [`SequenceStore`]; no application
//! lock is held. Gaps are acceptable (a reserved value may go unused),
//! duplicates are not.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::franchise::EntityKind;
use crate::domain::gateway::GatewayError;

/// Counter storage with an atomic increment-or-create primitive
#[async_trait]
pub trait SequenceStore: Send + Sync {
    /// Atomically increment the named counter, creating it when missing, and
    /// return the new value.
    ///
    /// `Ok(None)` means the record did not exist and could not be created by
    /// this call.
    async fn increment(&self, name: &str) -> Result<Option<i64>, GatewayError>;

    /// Insert the named counter with value `0` unless it already exists.
    /// Must never reset an existing counter.
    async fn insert_initial(&self, name: &str) -> Result<(), GatewayError>;
}

pub fn sequence_name(kind: EntityKind) -> String {
    format!("{}_sequence", kind.as_str())
}

#[derive(Clone)]
pub struct SequenceGenerator {
    store: Arc<dyn SequenceStore>,
}

impl SequenceGenerator {
    pub fn new(store: Arc<dyn SequenceStore>) -> Self {
        Self { store }
    }

    pub async fn next_id(&self, kind: EntityKind) -> Result<String, GatewayError> {
        let name = sequence_name(kind);
        debug!(sequence = %name, "Reserving next id");

        let value = match self.store.increment(&name).await? {
            Some(value) => value,
            None => {
                info!(sequence = %name, "Sequence record missing, creating initial record");
                self.store.insert_initial(&name).await?;
                self.store.increment(&name).await?.ok_or_else(|| {
                    warn!(sequence = %name, "Sequence record still missing after initialization");
                    GatewayError::Unknown(format!("sequence '{}' could not be initialized", name))
                })?
            }
        };

        let next_id = value.to_string();
        info!(sequence = %name, id = %next_id, "Generated next {} id", kind.as_str());
        Ok(next_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashMap;

    /// Store whose first `increment` per counter reports the first-use race
    struct RacyStore {
        counters: Mutex<HashMap<String, i64>>,
        raced: Mutex<Vec<String>>,
        inserts: Mutex<u32>,
    }

    impl RacyStore {
        fn new() -> Self {
            Self {
                counters: Mutex::new(HashMap::new()),
                raced: Mutex::new(Vec::new()),
                inserts: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl SequenceStore for RacyStore {
        async fn increment(&self, name: &str) -> Result<Option<i64>, GatewayError> {
            let mut counters = self.counters.lock();
            match counters.get_mut(name) {
                Some(value) => {
                    *value += 1;
                    Ok(Some(*value))
                }
                None => {
                    let mut raced = self.raced.lock();
                    if raced.iter().any(|n| n == name) {
                        counters.insert(name.to_string(), 1);
                        Ok(Some(1))
                    } else {
                        raced.push(name.to_string());
                        Ok(None)
                    }
                }
            }
        }

        async fn insert_initial(&self, name: &str) -> Result<(), GatewayError> {
            *self.inserts.lock() += 1;
            self.counters.lock().entry(name.to_string()).or_insert(0);
            Ok(())
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl SequenceStore for BrokenStore {
        async fn increment(&self, _name: &str) -> Result<Option<i64>, GatewayError> {
            Ok(None)
        }

        async fn insert_initial(&self, _name: &str) -> Result<(), GatewayError> {
            Ok(())
        }
    }

    #[test]
    fn test_sequence_names() {
        assert_eq!(sequence_name(EntityKind::Franchise), "franchise_sequence");
        assert_eq!(sequence_name(EntityKind::Branch), "branch_sequence");
        assert_eq!(sequence_name(EntityKind::Product), "product_sequence");
    }

    #[tokio::test]
    async fn test_first_use_race_inserts_initial_record_and_retries() {
        let store = Arc::new(RacyStore::new());
        let generator = SequenceGenerator::new(store.clone());

        assert_eq!(generator.next_id(EntityKind::Product).await.unwrap(), "1");
        assert_eq!(*store.inserts.lock(), 1);

        assert_eq!(generator.next_id(EntityKind::Product).await.unwrap(), "2");
        assert_eq!(*store.inserts.lock(), 1);
    }

    #[tokio::test]
    async fn test_counters_are_independent_per_kind() {
        let generator = SequenceGenerator::new(Arc::new(RacyStore::new()));

        assert_eq!(generator.next_id(EntityKind::Franchise).await.unwrap(), "1");
        assert_eq!(generator.next_id(EntityKind::Franchise).await.unwrap(), "2");
        assert_eq!(generator.next_id(EntityKind::Branch).await.unwrap(), "1");
    }

    #[tokio::test]
    async fn test_unrecoverable_missing_record_is_an_error() {
        let generator = SequenceGenerator::new(Arc::new(BrokenStore));
        let err = generator.next_id(EntityKind::Branch).await.unwrap_err();
        assert!(matches!(err, GatewayError::Unknown(_)));
    }
}
