//! Same-cluster co-occurrence scoring.
//!
//! Pairs are counted exactly like the support counter, but a pair only
//! survives when both products landed in the same cluster. Cross-cluster
//! pairs that co-occur by coincidence are suppressed.

use std::collections::BTreeMap;

use crate::application::support::SupportCounts;
use crate::domain::basket::Baskets;
use crate::domain::error::DomainError;
use crate::domain::id::ProductId;

/// Cluster label per product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterAssignment {
    labels: BTreeMap<ProductId, usize>,
}

impl ClusterAssignment {
    /// Zip products with their labels. Extra entries on either side are dropped.
    #[must_use]
    pub fn new(products: &[ProductId], labels: &[usize]) -> Self {
        Self {
            labels: products.iter().copied().zip(labels.iter().copied()).collect(),
        }
    }

    #[must_use]
    pub fn label(&self, product: ProductId) -> Option<usize> {
        self.labels.get(&product).copied()
    }

    /// True if both products carry the same label.
    #[must_use]
    pub fn same_cluster(&self, a: ProductId, b: ProductId) -> bool {
        match (self.label(a), self.label(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// A product pair scored by same-cluster co-occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredPair {
    pub product: ProductId,
    pub recommended: ProductId,
    /// Baskets holding both products.
    pub co_count: u32,
}

/// Ranks same-cluster partners per product.
#[derive(Debug, Clone, Copy)]
pub struct ClusterScorer {
    min_count: u32,
    top_per_product: usize,
}

impl ClusterScorer {
    /// Create a scorer.
    ///
    /// # Errors
    /// Returns [`DomainError::ZeroTopPerProduct`] if the per-product cap is 0.
    pub fn new(min_count: u32, top_per_product: usize) -> Result<Self, DomainError> {
        if top_per_product == 0 {
            return Err(DomainError::ZeroTopPerProduct);
        }
        Ok(Self {
            min_count,
            top_per_product,
        })
    }

    /// Score pairs, products in ascending id order, partners best first.
    #[must_use]
    pub fn score(&self, baskets: &Baskets, assignment: &ClusterAssignment) -> Vec<ScoredPair> {
        let counts = SupportCounts::count_where(baskets, |a, b| assignment.same_cluster(a, b));

        let mut scored = Vec::new();
        for product in baskets.products() {
            let mut partners: Vec<(ProductId, u32)> = counts
                .partners(product)
                .filter(|&(_, n)| n >= self.min_count)
                .collect();
            partners.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
            partners.truncate(self.top_per_product);

            scored.extend(partners.into_iter().map(|(recommended, co_count)| ScoredPair {
                product,
                recommended,
                co_count,
            }));
        }
        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::baskets;

    fn p(id: i64) -> ProductId {
        ProductId::new(id)
    }

    fn assignment(pairs: &[(i64, usize)]) -> ClusterAssignment {
        let products: Vec<ProductId> = pairs.iter().map(|&(id, _)| p(id)).collect();
        let labels: Vec<usize> = pairs.iter().map(|&(_, l)| l).collect();
        ClusterAssignment::new(&products, &labels)
    }

    #[test]
    fn cross_cluster_pairs_are_suppressed() {
        let baskets = baskets(&[&[1, 2, 3], &[1, 2, 3], &[1, 2]]);
        let clusters = assignment(&[(1, 0), (2, 0), (3, 1)]);

        let scored = ClusterScorer::new(1, 5).unwrap().score(&baskets, &clusters);

        assert!(scored
            .iter()
            .all(|s| clusters.same_cluster(s.product, s.recommended)));
        assert!(scored.contains(&ScoredPair {
            product: p(1),
            recommended: p(2),
            co_count: 3
        }));
        assert!(!scored.iter().any(|s| s.product == p(3) || s.recommended == p(3)));
    }

    #[test]
    fn min_count_and_cap_apply() {
        let baskets = baskets(&[&[1, 2, 3, 4], &[1, 2, 3], &[1, 2], &[1, 5]]);
        let clusters = assignment(&[(1, 0), (2, 0), (3, 0), (4, 0), (5, 0)]);

        let scored = ClusterScorer::new(2, 1).unwrap().score(&baskets, &clusters);
        let for_one: Vec<_> = scored.iter().filter(|s| s.product == p(1)).collect();

        assert_eq!(for_one.len(), 1);
        assert_eq!(for_one[0].recommended, p(2));
        assert!(scored.iter().all(|s| s.co_count >= 2));
    }

    #[test]
    fn unassigned_products_never_pair() {
        let clusters = assignment(&[(1, 0)]);
        assert!(!clusters.same_cluster(p(1), p(2)));
        assert!(!clusters.same_cluster(p(2), p(3)));
    }

    #[test]
    fn zero_cap_is_rejected() {
        assert_eq!(
            ClusterScorer::new(1, 0).unwrap_err(),
            DomainError::ZeroTopPerProduct
        );
    }
}
