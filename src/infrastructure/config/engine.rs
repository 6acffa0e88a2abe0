//! Basket grouping, query and dashboard insight settings.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::application::basket::{BasketBuilder, DEFAULT_WINDOW_SECS};
use crate::application::mining::{MinerConfig, SupportThreshold};
use crate::application::recommend::{EngineSettings, DEFAULT_QUERY_LIMIT};
use crate::domain::period::Period;
use crate::error::Result;

/// How lines without a basket reference are grouped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketsConfig {
    /// Width of the store/user time bucket in seconds. Defaults to 300.
    #[serde(default = "default_window_secs")]
    pub window_secs: i64,
}

impl Default for BasketsConfig {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
        }
    }
}

impl BasketsConfig {
    /// # Errors
    /// Returns an error if the window is not positive.
    pub fn builder(&self) -> Result<BasketBuilder> {
        Ok(BasketBuilder::new(Duration::seconds(self.window_secs))?)
    }
}

const fn default_window_secs() -> i64 {
    DEFAULT_WINDOW_SECS
}

/// Read-side settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Maximum rows returned per query. Defaults to 200.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
        }
    }
}

const fn default_limit() -> usize {
    DEFAULT_QUERY_LIMIT
}

/// Thresholds for on-the-fly dashboard rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsConfig {
    #[serde(default)]
    pub period: Period,

    /// Minimum baskets for a product or pair. Defaults to 1.
    #[serde(default = "default_min_support")]
    pub min_support: u32,

    /// Confidence percentage a rule must exceed. Defaults to 20.
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,

    /// Lift a rule must exceed. Defaults to 1.2.
    #[serde(default = "default_min_lift")]
    pub min_lift: f64,

    #[serde(default = "default_max_antecedents")]
    pub max_antecedents: usize,

    #[serde(default = "default_top_per_product")]
    pub top_per_product: usize,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            period: Period::default(),
            min_support: default_min_support(),
            min_confidence: default_min_confidence(),
            min_lift: default_min_lift(),
            max_antecedents: default_max_antecedents(),
            top_per_product: default_top_per_product(),
        }
    }
}

impl InsightsConfig {
    /// Miner thresholds for this section.
    #[must_use]
    pub fn miner_config(&self) -> MinerConfig {
        MinerConfig {
            min_support: SupportThreshold::Count(self.min_support),
            max_antecedents: self.max_antecedents,
            min_count: self.min_support,
            min_confidence: Some(self.min_confidence),
            min_lift: Some(self.min_lift),
            top_per_product: self.top_per_product,
        }
    }
}

const fn default_min_support() -> u32 {
    1
}

const fn default_min_confidence() -> f64 {
    20.0
}

const fn default_min_lift() -> f64 {
    1.2
}

const fn default_max_antecedents() -> usize {
    15
}

const fn default_top_per_product() -> usize {
    5
}

/// Assemble service settings from the config sections.
///
/// # Errors
/// Returns an error if the basket window is not positive.
pub fn engine_settings(
    baskets: &BasketsConfig,
    query: &QueryConfig,
    insights: &InsightsConfig,
) -> Result<EngineSettings> {
    Ok(EngineSettings {
        baskets: baskets.builder()?,
        query_limit: query.limit,
        insights: insights.miner_config(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_insights_match_dashboard_thresholds() {
        assert_eq!(InsightsConfig::default().miner_config(), MinerConfig::dashboard());
    }

    #[test]
    fn engine_settings_carry_each_section() {
        let settings = engine_settings(
            &BasketsConfig { window_secs: 60 },
            &QueryConfig { limit: 10 },
            &InsightsConfig::default(),
        )
        .unwrap();

        assert_eq!(settings.baskets.window(), Duration::seconds(60));
        assert_eq!(settings.query_limit, 10);
    }

    #[test]
    fn zero_window_is_rejected() {
        assert!(BasketsConfig { window_secs: 0 }.builder().is_err());
    }
}
