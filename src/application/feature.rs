//! Co-purchase feature vectors for clustering.
//!
//! The most frequent products become fixed feature dimensions. Every product
//! seen in a basket is projected onto those dimensions by counting how often
//! it shares a basket with each feature product. A product never counts
//! against itself.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::domain::basket::Baskets;
use crate::domain::error::DomainError;
use crate::domain::id::ProductId;

/// Products projected onto a fixed set of feature products.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSpace {
    features: Vec<ProductId>,
    vectors: BTreeMap<ProductId, Vec<f64>>,
}

impl FeatureSpace {
    /// Build vectors over the `top_features` most frequent products.
    ///
    /// Returns `Ok(None)` when no product has a nonzero feature, i.e. there
    /// is no co-purchase signal worth clustering.
    ///
    /// # Errors
    /// Returns [`DomainError::ZeroFeatures`] if `top_features` is 0.
    pub fn build(baskets: &Baskets, top_features: usize) -> Result<Option<Self>, DomainError> {
        if top_features == 0 {
            return Err(DomainError::ZeroFeatures);
        }

        let mut frequency: HashMap<ProductId, u32> = HashMap::new();
        for products in baskets.contents() {
            for &product in products {
                *frequency.entry(product).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(ProductId, u32)> = frequency.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        let features: Vec<ProductId> = ranked
            .iter()
            .take(top_features)
            .map(|&(product, _)| product)
            .collect();
        let index: HashMap<ProductId, usize> = features
            .iter()
            .enumerate()
            .map(|(i, &product)| (product, i))
            .collect();

        let mut vectors: BTreeMap<ProductId, Vec<f64>> = ranked
            .iter()
            .map(|&(product, _)| (product, vec![0.0; features.len()]))
            .collect();

        for products in baskets.contents() {
            for &product in products {
                let Some(vector) = vectors.get_mut(&product) else {
                    continue;
                };
                for other in products {
                    if *other == product {
                        continue;
                    }
                    if let Some(&dim) = index.get(other) {
                        vector[dim] += 1.0;
                    }
                }
            }
        }

        let has_signal = vectors.values().flatten().any(|&v| v > 0.0);
        debug!(
            products = vectors.len(),
            features = features.len(),
            has_signal,
            "Built feature vectors"
        );
        if !has_signal {
            return Ok(None);
        }

        Ok(Some(Self { features, vectors }))
    }

    /// Feature products, most frequent first.
    #[must_use]
    pub fn features(&self) -> &[ProductId] {
        &self.features
    }

    /// Vector for `product`, if it appeared in any basket.
    #[must_use]
    pub fn vector(&self, product: ProductId) -> Option<&[f64]> {
        self.vectors.get(&product).map(Vec::as_slice)
    }

    /// Products in ascending id order; matches [`Self::matrix`] row order.
    #[must_use]
    pub fn products(&self) -> Vec<ProductId> {
        self.vectors.keys().copied().collect()
    }

    /// Vectors in ascending product id order.
    #[must_use]
    pub fn matrix(&self) -> Vec<Vec<f64>> {
        self.vectors.values().cloned().collect()
    }

    /// Number of projected products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
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
    fn features_are_the_most_frequent_products() {
        let baskets = baskets(&[&[1, 2], &[1, 3], &[1, 2], &[4, 5]]);
        let space = FeatureSpace::build(&baskets, 2).unwrap().unwrap();

        assert_eq!(space.features(), &[p(1), p(2)]);
        assert_eq!(space.len(), 5);
    }

    #[test]
    fn vectors_count_co_purchases_with_feature_products() {
        let baskets = baskets(&[&[1, 2], &[1, 3], &[1, 2]]);
        let space = FeatureSpace::build(&baskets, 2).unwrap().unwrap();

        // features: [1, 2]
        assert_eq!(space.vector(p(1)), Some(&[0.0, 2.0][..]));
        assert_eq!(space.vector(p(2)), Some(&[2.0, 0.0][..]));
        assert_eq!(space.vector(p(3)), Some(&[1.0, 0.0][..]));
    }

    #[test]
    fn product_without_feature_partners_has_zero_vector() {
        let baskets = baskets(&[&[1, 2], &[1, 2], &[7, 8]]);
        let space = FeatureSpace::build(&baskets, 2).unwrap().unwrap();

        assert_eq!(space.vector(p(7)), Some(&[0.0, 0.0][..]));
    }

    #[test]
    fn single_item_baskets_have_no_signal() {
        let baskets = baskets(&[&[1], &[2], &[1]]);
        assert_eq!(FeatureSpace::build(&baskets, 10).unwrap(), None);
    }

    #[test]
    fn empty_baskets_have_no_signal() {
        assert_eq!(FeatureSpace::build(&Baskets::new(), 10).unwrap(), None);
    }

    #[test]
    fn matrix_rows_follow_product_order() {
        let baskets = baskets(&[&[3, 1], &[2, 1]]);
        let space = FeatureSpace::build(&baskets, 3).unwrap().unwrap();

        let products = space.products();
        let matrix = space.matrix();
        assert_eq!(products, vec![p(1), p(2), p(3)]);
        for (product, row) in products.iter().zip(&matrix) {
            assert_eq!(space.vector(*product), Some(row.as_slice()));
        }
    }

    #[test]
    fn zero_features_is_rejected() {
        assert_eq!(
            FeatureSpace::build(&Baskets::new(), 0).unwrap_err(),
            DomainError::ZeroFeatures
        );
    }
}
