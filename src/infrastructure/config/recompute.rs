//! Defaults for the two recompute paths.
//!
//! CLI flags override individual fields of the request built here.

use serde::{Deserialize, Serialize};

use crate::domain::id::OwnerId;
use crate::domain::period::Period;
use crate::port::inbound::recommend::{ClusterRecompute, RuleRecompute};

/// Association-rule recompute defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub period: Period,

    /// Minimum co-occurring baskets per rule. Defaults to 5.
    #[serde(default = "default_min_count")]
    pub min_count: u32,

    #[serde(default = "default_top_per_product")]
    pub top_per_product: usize,

    /// Most frequent products expanded into rules. Defaults to 15.
    #[serde(default = "default_max_antecedents")]
    pub max_antecedents: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            period: Period::default(),
            min_count: default_min_count(),
            top_per_product: default_top_per_product(),
            max_antecedents: default_max_antecedents(),
        }
    }
}

impl RulesConfig {
    #[must_use]
    pub fn request(&self, owner: OwnerId) -> RuleRecompute {
        RuleRecompute {
            owner,
            period: self.period,
            min_count: self.min_count,
            top_per_product: self.top_per_product,
            max_antecedents: self.max_antecedents,
        }
    }
}

/// Clustering recompute defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusteringConfig {
    #[serde(default)]
    pub period: Period,

    /// Feature dimensions, most frequent products first. Defaults to 100.
    #[serde(default = "default_top_features")]
    pub top_features: usize,

    /// Requested clusters before clamping. Defaults to 8.
    #[serde(default = "default_k")]
    pub k: usize,

    #[serde(default = "default_max_iter")]
    pub max_iter: usize,

    #[serde(default = "default_init_retries")]
    pub init_retries: usize,

    /// Fixed k-means seed. Unset seeds from entropy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    #[serde(default = "default_min_count")]
    pub min_count: u32,

    #[serde(default = "default_top_per_product")]
    pub top_per_product: usize,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            period: Period::default(),
            top_features: default_top_features(),
            k: default_k(),
            max_iter: default_max_iter(),
            init_retries: default_init_retries(),
            seed: None,
            min_count: default_min_count(),
            top_per_product: default_top_per_product(),
        }
    }
}

impl ClusteringConfig {
    #[must_use]
    pub fn request(&self, owner: OwnerId) -> ClusterRecompute {
        ClusterRecompute {
            owner,
            period: self.period,
            top_features: self.top_features,
            k: self.k,
            max_iter: self.max_iter,
            init_retries: self.init_retries,
            seed: self.seed,
            min_count: self.min_count,
            top_per_product: self.top_per_product,
        }
    }
}

const fn default_min_count() -> u32 {
    5
}

const fn default_top_per_product() -> usize {
    5
}

const fn default_max_antecedents() -> usize {
    15
}

const fn default_top_features() -> usize {
    100
}

const fn default_k() -> usize {
    8
}

const fn default_max_iter() -> usize {
    80
}

const fn default_init_retries() -> usize {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_build_standard_requests() {
        let owner = OwnerId::new(4);
        assert_eq!(RulesConfig::default().request(owner), RuleRecompute::for_owner(owner));
        assert_eq!(
            ClusteringConfig::default().request(owner),
            ClusterRecompute::for_owner(owner)
        );
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: ClusteringConfig = toml::from_str("k = 3\nseed = 9\nperiod = \"7d\"").unwrap();

        assert_eq!(config.k, 3);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.period.to_string(), "7d");
        assert_eq!(config.top_features, 100);
    }
}
