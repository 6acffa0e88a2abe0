//! Association rule mining over basket support counts.
//!
//! Rules are derived pairwise from [`SupportCounts`]:
//!
//! ```text
//! confidence(A -> B) = co(A, B) / support(A) * 100
//! lift(A -> B)       = co(A, B) * baskets / (support(A) * support(B))
//! ```
//!
//! Only the `max_antecedents` most frequent products are expanded into
//! rules. That cap keeps the pairwise search bounded and trades
//! completeness for speed on larger catalogs.

use std::cmp::Ordering;

use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::id::ProductId;
use crate::domain::rule::AssociationRule;

use super::support::SupportCounts;

/// Minimum product support, as a basket count or a share of all baskets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SupportThreshold {
    Count(u32),
    /// Share of all baskets in `0.0..=1.0`, rounded up to whole baskets.
    Fraction(f64),
}

impl SupportThreshold {
    /// Resolve to a basket count for `total_baskets`.
    #[must_use]
    pub fn min_baskets(self, total_baskets: usize) -> u32 {
        match self {
            Self::Count(n) => n,
            Self::Fraction(share) => {
                let share = share.clamp(0.0, 1.0);
                let needed = (share * total_baskets as f64).ceil() as u32;
                needed.max(1)
            }
        }
    }
}

/// Thresholds and caps applied by [`AssociationMiner`].
#[derive(Debug, Clone, PartialEq)]
pub struct MinerConfig {
    pub min_support: SupportThreshold,
    /// Antecedents considered, most frequent first.
    pub max_antecedents: usize,
    /// Minimum co-occurring baskets for a rule.
    pub min_count: u32,
    /// Confidence (percent) a rule must exceed, if set.
    pub min_confidence: Option<f64>,
    /// Lift a rule must exceed, if set.
    pub min_lift: Option<f64>,
    pub top_per_product: usize,
}

impl MinerConfig {
    /// Permissive thresholds calibrated for sparse store data, as shown on
    /// owner dashboards.
    #[must_use]
    pub fn dashboard() -> Self {
        Self {
            min_support: SupportThreshold::Count(1),
            max_antecedents: 15,
            min_count: 1,
            min_confidence: Some(20.0),
            min_lift: Some(1.2),
            top_per_product: 5,
        }
    }

    /// Thresholds for a persisted recompute: co-occurrence floor and cap only.
    #[must_use]
    pub fn recompute(min_count: u32, top_per_product: usize) -> Self {
        Self {
            min_support: SupportThreshold::Count(1),
            max_antecedents: 15,
            min_count,
            min_confidence: None,
            min_lift: None,
            top_per_product,
        }
    }

    /// Replace the antecedent cap.
    #[must_use]
    pub fn with_max_antecedents(mut self, max_antecedents: usize) -> Self {
        self.max_antecedents = max_antecedents;
        self
    }

    /// Replace the support threshold.
    #[must_use]
    pub fn with_min_support(mut self, min_support: SupportThreshold) -> Self {
        self.min_support = min_support;
        self
    }

    fn accepts(&self, rule: &AssociationRule) -> bool {
        rule.support >= self.min_count
            && self.min_confidence.map_or(true, |min| rule.confidence > min)
            && self.min_lift.map_or(true, |min| rule.lift > min)
    }
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self::recompute(5, 5)
    }
}

/// Rules kept for one antecedent, best first.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleGroup {
    pub antecedent: ProductId,
    pub rules: Vec<AssociationRule>,
}

/// Mines ranked product-to-product rules.
#[derive(Debug, Clone)]
pub struct AssociationMiner {
    config: MinerConfig,
}

impl AssociationMiner {
    /// Create a miner.
    ///
    /// # Errors
    /// Returns [`DomainError::ZeroTopPerProduct`] if the per-product cap is 0.
    pub fn new(config: MinerConfig) -> Result<Self, DomainError> {
        if config.top_per_product == 0 {
            return Err(DomainError::ZeroTopPerProduct);
        }
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &MinerConfig {
        &self.config
    }

    /// Compute the rule for `a -> b`, or `None` if either side has no support.
    #[must_use]
    pub fn rule(counts: &SupportCounts, a: ProductId, b: ProductId) -> Option<AssociationRule> {
        let support_a = counts.support(a);
        let support_b = counts.support(b);
        let together = counts.co_occurrence(a, b);
        if support_a == 0 || support_b == 0 || together == 0 {
            return None;
        }

        let together_f = f64::from(together);
        let confidence = together_f / f64::from(support_a) * 100.0;
        let lift = together_f * counts.total_baskets() as f64
            / (f64::from(support_a) * f64::from(support_b));

        Some(AssociationRule {
            antecedent: a,
            consequent: b,
            support: together,
            confidence,
            lift,
        })
    }

    /// Mine rules grouped by antecedent, antecedents in support order.
    #[must_use]
    pub fn mine_grouped(&self, counts: &SupportCounts) -> Vec<RuleGroup> {
        if counts.total_baskets() == 0 {
            return Vec::new();
        }

        let min_baskets = self.config.min_support.min_baskets(counts.total_baskets());
        let antecedents: Vec<ProductId> = counts
            .ranked_products()
            .into_iter()
            .filter(|&(_, support)| support >= min_baskets)
            .take(self.config.max_antecedents)
            .map(|(product, _)| product)
            .collect();

        let mut groups = Vec::with_capacity(antecedents.len());
        for antecedent in antecedents {
            let mut rules: Vec<AssociationRule> = counts
                .partners(antecedent)
                .filter(|&(consequent, _)| counts.support(consequent) >= min_baskets)
                .filter_map(|(consequent, _)| Self::rule(counts, antecedent, consequent))
                .filter(|rule| self.config.accepts(rule))
                .collect();

            rules.sort_by(rank_rules);
            rules.truncate(self.config.top_per_product);

            if !rules.is_empty() {
                groups.push(RuleGroup { antecedent, rules });
            }
        }

        debug!(
            baskets = counts.total_baskets(),
            min_baskets,
            groups = groups.len(),
            "Mined association rules"
        );
        groups
    }

    /// Mine rules as a flat list, grouped by antecedent.
    #[must_use]
    pub fn mine(&self, counts: &SupportCounts) -> Vec<AssociationRule> {
        self.mine_grouped(counts)
            .into_iter()
            .flat_map(|group| group.rules)
            .collect()
    }
}

/// Order by combined score, then co-count, then consequent id.
fn rank_rules(a: &AssociationRule, b: &AssociationRule) -> Ordering {
    b.score()
        .total_cmp(&a.score())
        .then(b.support.cmp(&a.support))
        .then(a.consequent.cmp(&b.consequent))
}
