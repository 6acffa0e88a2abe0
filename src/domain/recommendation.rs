//! Persisted recommendations and recompute results.

use serde::Serialize;

use super::id::{OwnerId, ProductId};

/// A stored `(owner, product) -> recommended product` pairing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub owner_id: OwnerId,
    pub product_id: ProductId,
    pub recommended_product_id: ProductId,
    pub score: f64,
    pub period_tag: String,
}

/// Read-side view with product names resolved from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationView {
    pub product_id: ProductId,
    pub product_name: String,
    pub recommended_product_id: ProductId,
    pub recommended_product_name: String,
    pub score: f64,
}

/// Why a recompute wrote nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    #[serde(rename = "no stores")]
    NoStores,
    #[serde(rename = "no transactions")]
    NoTransactions,
    #[serde(rename = "no signal")]
    NoSignal,
}

impl SkipReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoStores => "no stores",
            Self::NoTransactions => "no transactions",
            Self::NoSignal => "no signal",
        }
    }
}

/// Result of one recompute call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecomputeOutcome {
    /// Rows written for the `(owner, period)` scope.
    pub updated: usize,
    /// Distinct clusters used, for the clustering path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clusters: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<SkipReason>,
}

impl RecomputeOutcome {
    #[must_use]
    pub const fn written(updated: usize) -> Self {
        Self {
            updated,
            clusters: None,
            reason: None,
        }
    }

    #[must_use]
    pub const fn clustered(updated: usize, clusters: usize) -> Self {
        Self {
            updated,
            clusters: Some(clusters),
            reason: None,
        }
    }

    #[must_use]
    pub const fn skipped(reason: SkipReason) -> Self {
        Self {
            updated: 0,
            clusters: None,
            reason: Some(reason),
        }
    }
}
