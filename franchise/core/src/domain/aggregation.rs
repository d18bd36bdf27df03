// Copyright (c) 2026 Franchise Inventory Maintainers
// SPDX-License-Identifier: AGPL-3.0
//! # Max-Stock-Per-Branch Aggregation
//!
//! Reduces every branch of a franchise to its single highest-stock product.
//! Storage adapters gather `(Branch, products)` groups and hand them to
//! [`max_stock_per_branch`], so every backend shares one reduction rule.
//!
//! ## Tie-break
//!
//! When several products share the maximum stock, the lowest product id wins.
//! Ids follow [`compare_ids`]. The winner never depends on the order in which
//! storage returned the products.

use std::cmp::Ordering;

use crate::domain::franchise::{Branch, Product, ProductWithBranch};

/// Emit one pairing per branch, in branch order. Branches with no products
/// are skipped.
pub fn max_stock_per_branch<I>(groups: I) -> Vec<ProductWithBranch>
where
    I: IntoIterator<Item = (Branch, Vec<Product>)>,
{
    groups
        .into_iter()
        .filter_map(|(branch, products)| {
            max_stock_product(&products).map(|winner| ProductWithBranch::new(winner.clone(), &branch))
        })
        .collect()
}

pub fn max_stock_product(products: &[Product]) -> Option<&Product> {
    products.iter().fold(None, |best: Option<&Product>, candidate| match best {
        None => Some(candidate),
        Some(current) => match candidate.stock.cmp(&current.stock) {
            Ordering::Greater => Some(candidate),
            Ordering::Equal if compare_ids(&candidate.id, &current.id) == Ordering::Less => Some(candidate),
            _ => Some(current),
        },
    })
}

/// Total id ordering used by listings and the tie-break.
///
/// Numeric ids come first and compare by value (`"2" < "10"`), with the raw
/// string breaking ties between equal values (`"01" < "1"`). Every other id
/// sorts after them in plain string order.
pub fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, stock: i64) -> Product {
        Product::new(id, format!("product-{}", id), stock)
    }

    #[test]
    fn test_one_pairing_per_branch() {
        let b1 = Branch::new("B1", "North");
        let b2 = Branch::new("B2", "South");

        let result = max_stock_per_branch(vec![
            (b1, vec![product("1", 50), product("2", 30)]),
            (b2, vec![product("3", 100), product("4", 80)]),
        ]);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].product.stock, 50);
        assert_eq!(result[0].branch.id, "B1");
        assert_eq!(result[1].product.stock, 100);
        assert_eq!(result[1].branch.id, "B2");
    }

    #[test]
    fn test_empty_branch_contributes_nothing() {
        let result = max_stock_per_branch(vec![
            (Branch::new("B1", "Empty"), vec![]),
            (Branch::new("B2", "Stocked"), vec![product("7", 3)]),
        ]);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].branch.id, "B2");
        assert_eq!(result[0].product.id, "7");
    }

    #[test]
    fn test_tie_resolves_to_lowest_id_regardless_of_order() {
        let forward = vec![product("2", 40), product("10", 40), product("5", 12)];
        let backward = vec![product("10", 40), product("5", 12), product("2", 40)];

        assert_eq!(max_stock_product(&forward).unwrap().id, "2");
        assert_eq!(max_stock_product(&backward).unwrap().id, "2");
    }

    #[test]
    fn test_zero_stock_products_still_win_an_otherwise_empty_branch() {
        let only = vec![product("9", 0)];
        assert_eq!(max_stock_product(&only).unwrap().id, "9");
        assert!(max_stock_product(&[]).is_none());
    }

    #[test]
    fn test_compare_ids() {
        assert_eq!(compare_ids("2", "10"), Ordering::Less);
        assert_eq!(compare_ids("abc", "abd"), Ordering::Less);
        assert_eq!(compare_ids("10", "abc"), Ordering::Less);
        assert_eq!(compare_ids("7", "7"), Ordering::Equal);
        assert_eq!(compare_ids("01", "1"), Ordering::Less);
        assert_eq!(compare_ids("1", "01"), Ordering::Greater);
        assert_eq!(compare_ids("1a", "9"), Ordering::Greater);
    }

    #[test]
    fn test_mixed_id_tie_break_is_order_independent() {
        let orders = [
            vec![product("9", 5), product("10", 5), product("1a", 5)],
            vec![product("1a", 5), product("9", 5), product("10", 5)],
            vec![product("10", 5), product("1a", 5), product("9", 5)],
        ];

        for products in &orders {
            assert_eq!(max_stock_product(products).unwrap().id, "9");
        }
    }

    #[test]
    fn test_sorting_mixed_ids_is_stable_across_shuffles() {
        let mut ids: Vec<String> = (0..200)
            .flat_map(|n| [n.to_string(), format!("{}a", n)])
            .chain(["007".to_string(), "7".to_string(), "abc".to_string()])
            .collect();

        // Deterministic shuffle: reverse, then interleave halves
        ids.reverse();
        let (left, right) = ids.split_at(ids.len() / 2);
        let mut shuffled: Vec<String> = left
            .iter()
            .zip(right.iter())
            .flat_map(|(l, r)| [r.clone(), l.clone()])
            .collect();
        if ids.len() % 2 == 1 {
            shuffled.push(ids[ids.len() - 1].clone());
        }
        let mut sorted_copy = ids.clone();

        shuffled.sort_by(|a, b| compare_ids(a, b));
        sorted_copy.sort_by(|a, b| compare_ids(a, b));

        assert_eq!(shuffled, sorted_copy);
        assert_eq!(shuffled.len(), 403);
        assert_eq!(&shuffled[..3], &["0", "1", "2"]);
        let seven = shuffled.iter().position(|id| id == "007").unwrap();
        assert_eq!(shuffled[seven + 1], "7");
        assert!(shuffled.windows(2).all(|w| compare_ids(&w[0], &w[1]) != Ordering::Greater));

        let first_alpha = shuffled.iter().position(|id| id.parse::<u64>().is_err()).unwrap();
        assert!(shuffled[first_alpha..].iter().all(|id| id.parse::<u64>().is_err()));
        assert_eq!(shuffled[first_alpha], "0a");
        assert_eq!(shuffled.last().unwrap(), "abc");
    }
}
