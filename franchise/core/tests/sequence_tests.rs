// Copyright (c) 2026 Franchise Inventory Maintainers
// SPDX-License-Identifier: AGPL-3.0

//! Concurrency tests for id sequencing
//!
//! Concurrent callers must never receive the same id, and a fresh store must
//! hand out exactly `1..=N`.

use std::sync::Arc;

use franchise_core::domain::franchise::EntityKind;
use franchise_core::domain::gateway::{BranchGateway, FranchiseGateway};
use franchise_core::domain::sequence::SequenceGenerator;
use franchise_core::infrastructure::repositories::{
    InMemoryBranchGateway, InMemoryFranchiseGateway, InMemorySequenceStore, InMemoryStore,
};

const CALLERS: usize = 64;

fn sorted_numeric(ids: Vec<String>) -> Vec<u64> {
    let mut values: Vec<u64> = ids.iter().map(|id| id.parse().unwrap()).collect();
    values.sort_unstable();
    values
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_next_id_yields_exactly_one_to_n() {
    let gateway = Arc::new(InMemoryFranchiseGateway::new(InMemoryStore::new()));

    let handles: Vec<_> = (0..CALLERS)
        .map(|_| {
            let gateway = gateway.clone();
            tokio::spawn(async move { gateway.get_next_id().await })
        })
        .collect();

    let mut ids = Vec::with_capacity(CALLERS);
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap());
    }

    let expected: Vec<u64> = (1..=CALLERS as u64).collect();
    assert_eq!(sorted_numeric(ids), expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_generator_shared_across_kinds_keeps_counters_apart() {
    let generator = SequenceGenerator::new(Arc::new(InMemorySequenceStore::new()));

    let franchise_ids = futures::future::try_join_all((0..CALLERS).map(|_| generator.next_id(EntityKind::Franchise)));
    let product_ids = futures::future::try_join_all((0..CALLERS).map(|_| generator.next_id(EntityKind::Product)));
    let (franchise_ids, product_ids) = tokio::try_join!(franchise_ids, product_ids).unwrap();

    let expected: Vec<u64> = (1..=CALLERS as u64).collect();
    assert_eq!(sorted_numeric(franchise_ids), expected);
    assert_eq!(sorted_numeric(product_ids), expected);
}

#[tokio::test]
async fn test_ids_strictly_increase() {
    let gateway = InMemoryBranchGateway::new(InMemoryStore::new());

    let mut previous = 0u64;
    for _ in 0..10 {
        let next: u64 = gateway.get_next_id().await.unwrap().parse().unwrap();
        assert!(next > previous);
        previous = next;
    }
}
