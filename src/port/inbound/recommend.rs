//! Recommendation use-cases for inbound adapters.

use std::future::Future;

use serde::Serialize;

use crate::domain::id::{OwnerId, ProductId};
use crate::domain::period::Period;
use crate::domain::recommendation::{RecommendationView, RecomputeOutcome};
use crate::domain::rule::Rationale;
use crate::error::Result;

/// Parameters for the association-rule recompute.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleRecompute {
    pub owner: OwnerId,
    pub period: Period,
    /// Minimum co-occurring baskets to keep a rule.
    pub min_count: u32,
    pub top_per_product: usize,
    /// Most-frequent products expanded into rules.
    pub max_antecedents: usize,
}

impl RuleRecompute {
    /// Request with the standard defaults (30d, 5, 5, 15).
    #[must_use]
    pub fn for_owner(owner: OwnerId) -> Self {
        Self {
            owner,
            period: Period::default(),
            min_count: 5,
            top_per_product: 5,
            max_antecedents: 15,
        }
    }
}

/// Parameters for the clustering recompute.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterRecompute {
    pub owner: OwnerId,
    pub period: Period,
    pub top_features: usize,
    pub k: usize,
    pub max_iter: usize,
    pub init_retries: usize,
    pub seed: Option<u64>,
    pub min_count: u32,
    pub top_per_product: usize,
}

impl ClusterRecompute {
    /// Request with the standard defaults (30d, 100 features, k = 8, 5, 5).
    #[must_use]
    pub fn for_owner(owner: OwnerId) -> Self {
        Self {
            owner,
            period: Period::default(),
            top_features: 100,
            k: 8,
            max_iter: 80,
            init_retries: 10,
            seed: None,
            min_count: 5,
            top_per_product: 5,
        }
    }
}

/// One recommended product with its rule metrics and explanation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub support: u32,
    pub confidence: f64,
    pub lift: f64,
    pub score: f64,
    pub rationale: Rationale,
    pub reason: String,
}

/// Dashboard entry: a product and what is bought with it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductInsight {
    pub product_id: ProductId,
    pub product_name: String,
    pub recommendations: Vec<InsightItem>,
}

/// Recommendation use-cases.
pub trait RecommendationOperator: Send + Sync {
    /// Mine association rules and replace the owner's stored rows.
    fn recompute_rules(
        &self,
        request: &RuleRecompute,
    ) -> impl Future<Output = Result<RecomputeOutcome>> + Send;

    /// Cluster products and replace the owner's stored rows.
    fn recompute_clusters(
        &self,
        request: &ClusterRecompute,
    ) -> impl Future<Output = Result<RecomputeOutcome>> + Send;

    /// Read stored recommendations with product names.
    fn query(
        &self,
        owner: OwnerId,
        product: Option<ProductId>,
    ) -> impl Future<Output = Result<Vec<RecommendationView>>> + Send;

    /// Mine dashboard rules on the fly without persisting them.
    fn insights(
        &self,
        owner: OwnerId,
        period: Period,
    ) -> impl Future<Output = Result<Vec<ProductInsight>>> + Send;
}
