//! Per-product and per-pair basket counts.
//!
//! Each basket adds one to the support of every distinct product it holds
//! and one to the co-occurrence of every ordered pair of distinct products.
//! Cost is `O(sum of basket_size^2)`.

use std::collections::{BTreeMap, HashMap};

use crate::domain::basket::Baskets;
use crate::domain::id::ProductId;

/// Basket counts derived from one set of baskets.
#[derive(Debug, Clone, Default)]
pub struct SupportCounts {
    total_baskets: usize,
    support: HashMap<ProductId, u32>,
    pairs: HashMap<ProductId, BTreeMap<ProductId, u32>>,
}

impl SupportCounts {
    /// Count supports and all co-occurring pairs.
    #[must_use]
    pub fn count(baskets: &Baskets) -> Self {
        Self::count_where(baskets, |_, _| true)
    }

    /// Count supports, keeping only pairs accepted by `keep_pair`.
    ///
    /// Product supports and the basket total are unaffected by the filter.
    #[must_use]
    pub fn count_where<F>(baskets: &Baskets, keep_pair: F) -> Self
    where
        F: Fn(ProductId, ProductId) -> bool,
    {
        let mut counts = Self {
            total_baskets: baskets.len(),
            ..Self::default()
        };

        for products in baskets.contents() {
            for &a in products {
                *counts.support.entry(a).or_insert(0) += 1;
                for &b in products {
                    if a != b && keep_pair(a, b) {
                        *counts.pairs.entry(a).or_default().entry(b).or_insert(0) += 1;
                    }
                }
            }
        }

        counts
    }

    /// Number of baskets counted.
    #[must_use]
    pub fn total_baskets(&self) -> usize {
        self.total_baskets
    }

    /// Baskets containing `product`.
    #[must_use]
    pub fn support(&self, product: ProductId) -> u32 {
        self.support.get(&product).copied().unwrap_or(0)
    }

    /// Baskets containing both `a` and `b`.
    #[must_use]
    pub fn co_occurrence(&self, a: ProductId, b: ProductId) -> u32 {
        self.pairs
            .get(&a)
            .and_then(|partners| partners.get(&b))
            .copied()
            .unwrap_or(0)
    }

    /// Products that co-occur with `product`, in ascending id order.
    pub fn partners(&self, product: ProductId) -> impl Iterator<Item = (ProductId, u32)> + '_ {
        self.pairs
            .get(&product)
            .into_iter()
            .flat_map(|partners| partners.iter().map(|(&p, &n)| (p, n)))
    }

    /// Products ranked by support descending, ties by ascending id.
    #[must_use]
    pub fn ranked_products(&self) -> Vec<(ProductId, u32)> {
        let mut ranked: Vec<(ProductId, u32)> =
            self.support.iter().map(|(&p, &n)| (p, n)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
    }

    /// Number of distinct products seen.
    #[must_use]
    pub fn product_count(&self) -> usize {
        self.support.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::baskets;

    fn p(id: i64) -> ProductId {
        ProductId::new(id)
    }

    #[test]
    fn counts_each_basket_once_per_product() {
        let counts = SupportCounts::count(&baskets(&[&[1, 2], &[1, 2], &[1, 3]]));

        assert_eq!(counts.total_baskets(), 3);
        assert_eq!(counts.support(p(1)), 3);
        assert_eq!(counts.support(p(2)), 2);
        assert_eq!(counts.support(p(3)), 1);
        assert_eq!(counts.support(p(99)), 0);
    }

    #[test]
    fn pairs_are_counted_in_both_directions() {
        let counts = SupportCounts::count(&baskets(&[&[1, 2], &[1, 2], &[1, 3]]));

        assert_eq!(counts.co_occurrence(p(1), p(2)), 2);
        assert_eq!(counts.co_occurrence(p(2), p(1)), 2);
        assert_eq!(counts.co_occurrence(p(2), p(3)), 0);
        assert_eq!(counts.co_occurrence(p(1), p(1)), 0);
    }

    #[test]
    fn partners_are_sorted_by_id() {
        let counts = SupportCounts::count(&baskets(&[&[5, 1, 3]]));
        let partners: Vec<_> = counts.partners(p(5)).collect();

        assert_eq!(partners, vec![(p(1), 1), (p(3), 1)]);
    }

    #[test]
    fn filter_drops_pairs_but_keeps_support() {
        let counts = SupportCounts::count_where(&baskets(&[&[1, 2, 3]]), |a, b| {
            a.get() + b.get() != 3
        });

        assert_eq!(counts.support(p(1)), 1);
        assert_eq!(counts.co_occurrence(p(1), p(2)), 0);
        assert_eq!(counts.co_occurrence(p(1), p(3)), 1);
    }

    #[test]
    fn ranking_breaks_ties_by_id() {
        let counts = SupportCounts::count(&baskets(&[&[4, 2], &[2, 3], &[3]]));
        let ranked = counts.ranked_products();

        assert_eq!(ranked, vec![(p(2), 2), (p(3), 2), (p(4), 1)]);
    }

    #[test]
    fn empty_baskets_yield_empty_counts() {
        let counts = SupportCounts::count(&Baskets::new());

        assert_eq!(counts.total_baskets(), 0);
        assert_eq!(counts.product_count(), 0);
        assert!(counts.ranked_products().is_empty());
    }
}
