//! Purchase baskets, the unit of co-occurrence analysis.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::id::{ProductId, StoreId, UserId};

/// Grouping key for line-items that were bought together.
///
/// `Reference` keys come from an explicit order/receipt identifier and are
/// authoritative. `Window` keys are a heuristic fallback: lines from the same
/// store and user whose timestamps fall into the same fixed-width bucket.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BasketKey {
    Reference(String),
    Window {
        store_id: StoreId,
        /// `None` buckets under the shared anonymous partition.
        user_id: Option<UserId>,
        bucket: i64,
    },
}

impl fmt::Display for BasketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference(reference) => write!(f, "ref:{reference}"),
            Self::Window {
                store_id,
                user_id: Some(user),
                bucket,
            } => write!(f, "{store_id}:{user}:{bucket}"),
            Self::Window {
                store_id,
                user_id: None,
                bucket,
            } => write!(f, "{store_id}:anon:{bucket}"),
        }
    }
}

/// Baskets keyed by [`BasketKey`], each holding distinct product ids.
///
/// Backed by ordered collections so every consumer iterates baskets and
/// products in the same order for identical input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Baskets {
    inner: BTreeMap<BasketKey, BTreeSet<ProductId>>,
}

impl Baskets {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product to a basket. Repeated products collapse.
    pub fn insert(&mut self, key: BasketKey, product: ProductId) {
        self.inner.entry(key).or_default().insert(product);
    }

    /// Number of baskets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Products in the basket with the given key.
    #[must_use]
    pub fn get(&self, key: &BasketKey) -> Option<&BTreeSet<ProductId>> {
        self.inner.get(key)
    }

    /// Iterate baskets in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&BasketKey, &BTreeSet<ProductId>)> {
        self.inner.iter()
    }

    /// Iterate basket contents in key order.
    pub fn contents(&self) -> impl Iterator<Item = &BTreeSet<ProductId>> {
        self.inner.values()
    }

    /// Every distinct product that appears in at least one basket.
    #[must_use]
    pub fn products(&self) -> BTreeSet<ProductId> {
        self.inner.values().flatten().copied().collect()
    }
}

impl FromIterator<(BasketKey, ProductId)> for Baskets {
    fn from_iter<I: IntoIterator<Item = (BasketKey, ProductId)>>(iter: I) -> Self {
        let mut baskets = Self::new();
        for (key, product) in iter {
            baskets.insert(key, product);
        }
        baskets
    }
}
