//! Recommendation service: recompute, query and dashboard insights.
//!
//! # Data flow
//!
//! ```text
//! TransactionFeed ──▶ BasketBuilder ──┬─▶ SupportCounts ─▶ AssociationMiner ───────────┐
//!                                     │                                                ├─▶ RecommendationStore
//!                                     └─▶ FeatureSpace ─▶ KMeans ─▶ ClusterScorer ─────┘
//! ```
//!
//! Each recompute runs synchronously inside the caller's task. Missing
//! input (no stores, no transactions, no signal) returns a skipped outcome
//! and leaves stored rows untouched.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::application::basket::BasketBuilder;
use crate::application::cluster::{ClusterAssignment, ClusterScorer, KMeans, KMeansConfig};
use crate::application::feature::FeatureSpace;
use crate::application::mining::{AssociationMiner, MinerConfig};
use crate::application::support::SupportCounts;
use crate::domain::basket::Baskets;
use crate::domain::id::{OwnerId, ProductId};
use crate::domain::period::Period;
use crate::domain::recommendation::{
    Recommendation, RecommendationView, RecomputeOutcome, SkipReason,
};
use crate::error::Result;
use crate::port::inbound::recommend::{
    ClusterRecompute, InsightItem, ProductInsight, RecommendationOperator, RuleRecompute,
};
use crate::port::outbound::feed::{ProductCatalog, TransactionFeed};
use crate::port::outbound::store::RecommendationStore;

/// Maximum rows returned by [`RecommendationService::query`] by default.
pub const DEFAULT_QUERY_LIMIT: usize = 200;

/// Tunables shared by every use-case of the service.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub baskets: BasketBuilder,
    pub query_limit: usize,
    /// Thresholds for on-the-fly dashboard rules.
    pub insights: MinerConfig,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            baskets: BasketBuilder::default(),
            query_limit: DEFAULT_QUERY_LIMIT,
            insights: MinerConfig::dashboard(),
        }
    }
}

/// Baskets for an owner, or the reason there are none.
enum BasketLoad {
    Ready(Baskets),
    Skipped(SkipReason),
}

/// Orchestrates the recommendation pipeline over injected ports.
pub struct RecommendationService<F, C, S> {
    feed: F,
    catalog: C,
    store: S,
    settings: EngineSettings,
    clock: fn() -> DateTime<Utc>,
}

impl<F, C, S> RecommendationService<F, C, S>
where
    F: TransactionFeed,
    C: ProductCatalog,
    S: RecommendationStore,
{
    /// Create a service with the given adapters.
    pub fn new(feed: F, catalog: C, store: S, settings: EngineSettings) -> Self {
        Self {
            feed,
            catalog,
            store,
            settings,
            clock: Utc::now,
        }
    }

    /// Replace the time source used to anchor lookback windows.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Owners known to the transaction feed.
    pub async fn owners(&self) -> Result<Vec<OwnerId>> {
        self.feed.owners().await
    }

    async fn load_baskets(&self, owner: OwnerId, period: Period) -> Result<BasketLoad> {
        let stores = self.feed.stores(owner).await?;
        if stores.is_empty() {
            return Ok(BasketLoad::Skipped(SkipReason::NoStores));
        }

        let since = period.since((self.clock)());
        let lines = self.feed.lines(&stores, since).await?;
        if lines.is_empty() {
            return Ok(BasketLoad::Skipped(SkipReason::NoTransactions));
        }

        let baskets = self.settings.baskets.build(&lines);
        debug!(
            stores = stores.len(),
            lines = lines.len(),
            baskets = baskets.len(),
            "Loaded baskets"
        );
        Ok(BasketLoad::Ready(baskets))
    }

    async fn persist(&self, owner: OwnerId, period: Period, rows: &[Recommendation]) -> Result<usize> {
        match self.store.replace(owner, &period.tag(), rows).await {
            Ok(written) => Ok(written),
            Err(e) => {
                warn!(error = %e, rows = rows.len(), "Failed to replace recommendations");
                Err(e)
            }
        }
    }

    async fn product_names(&self, products: &BTreeSet<ProductId>) -> Result<HashMap<ProductId, String>> {
        if products.is_empty() {
            return Ok(HashMap::new());
        }
        let ids: Vec<ProductId> = products.iter().copied().collect();
        self.catalog.names(&ids).await
    }

    async fn run_rules(&self, request: &RuleRecompute) -> Result<RecomputeOutcome> {
        let miner = AssociationMiner::new(
            MinerConfig::recompute(request.min_count, request.top_per_product)
                .with_max_antecedents(request.max_antecedents),
        )?;

        let baskets = match self.load_baskets(request.owner, request.period).await? {
            BasketLoad::Ready(baskets) => baskets,
            BasketLoad::Skipped(reason) => {
                info!(reason = reason.as_str(), "Recompute skipped");
                return Ok(RecomputeOutcome::skipped(reason));
            }
        };

        let counts = SupportCounts::count(&baskets);
        let rules = miner.mine(&counts);
        let tag = request.period.tag();
        let rows: Vec<Recommendation> = rules
            .iter()
            .map(|rule| Recommendation {
                owner_id: request.owner,
                product_id: rule.antecedent,
                recommended_product_id: rule.consequent,
                score: rule.score(),
                period_tag: tag.clone(),
            })
            .collect();

        let written = self.persist(request.owner, request.period, &rows).await?;
        info!(
            baskets = counts.total_baskets(),
            products = counts.product_count(),
            updated = written,
            "Rule recompute finished"
        );
        Ok(RecomputeOutcome::written(written))
    }

    async fn run_clusters(&self, request: &ClusterRecompute) -> Result<RecomputeOutcome> {
        let scorer = ClusterScorer::new(request.min_count, request.top_per_product)?;
        let mut kmeans = KMeans::new(KMeansConfig {
            k: request.k,
            max_iter: request.max_iter,
            init_retries: request.init_retries,
            seed: request.seed,
        })?;

        let baskets = match self.load_baskets(request.owner, request.period).await? {
            BasketLoad::Ready(baskets) => baskets,
            BasketLoad::Skipped(reason) => {
                info!(reason = reason.as_str(), "Recompute skipped");
                return Ok(RecomputeOutcome::skipped(reason));
            }
        };

        let Some(space) = FeatureSpace::build(&baskets, request.top_features)? else {
            info!(reason = SkipReason::NoSignal.as_str(), "Recompute skipped");
            return Ok(RecomputeOutcome::skipped(SkipReason::NoSignal));
        };

        let fit = kmeans.fit(&space.matrix())?;
        let assignment = ClusterAssignment::new(&space.products(), &fit.labels);
        let clusters = fit.distinct_clusters();
        debug!(
            products = assignment.len(),
            clusters,
            iterations = fit.iterations,
            converged = fit.converged,
            "Clustered products"
        );

        let tag = request.period.tag();
        let rows: Vec<Recommendation> = scorer
            .score(&baskets, &assignment)
            .into_iter()
            .map(|pair| Recommendation {
                owner_id: request.owner,
                product_id: pair.product,
                recommended_product_id: pair.recommended,
                score: f64::from(pair.co_count),
                period_tag: tag.clone(),
            })
            .collect();

        let written = self.persist(request.owner, request.period, &rows).await?;
        info!(updated = written, clusters, "Cluster recompute finished");
        Ok(RecomputeOutcome::clustered(written, clusters))
    }

    async fn run_query(
        &self,
        owner: OwnerId,
        product: Option<ProductId>,
    ) -> Result<Vec<RecommendationView>> {
        let rows = self
            .store
            .list(owner, product, self.settings.query_limit)
            .await?;

        let ids: BTreeSet<ProductId> = rows
            .iter()
            .flat_map(|row| [row.product_id, row.recommended_product_id])
            .collect();
        let names = self.product_names(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| RecommendationView {
                product_id: row.product_id,
                product_name: display_name(&names, row.product_id),
                recommended_product_id: row.recommended_product_id,
                recommended_product_name: display_name(&names, row.recommended_product_id),
                score: row.score,
            })
            .collect())
    }

    async fn run_insights(&self, owner: OwnerId, period: Period) -> Result<Vec<ProductInsight>> {
        let miner = AssociationMiner::new(self.settings.insights.clone())?;
        let baskets = match self.load_baskets(owner, period).await? {
            BasketLoad::Ready(baskets) => baskets,
            BasketLoad::Skipped(reason) => {
                debug!(reason = reason.as_str(), "No insights available");
                return Ok(Vec::new());
            }
        };

        let groups = miner.mine_grouped(&SupportCounts::count(&baskets));
        let ids: BTreeSet<ProductId> = groups
            .iter()
            .flat_map(|g| std::iter::once(g.antecedent).chain(g.rules.iter().map(|r| r.consequent)))
            .collect();
        let names = self.product_names(&ids).await?;

        Ok(groups
            .into_iter()
            .map(|group| ProductInsight {
                product_id: group.antecedent,
                product_name: display_name(&names, group.antecedent),
                recommendations: group
                    .rules
                    .iter()
                    .map(|rule| {
                        let rationale = rule.rationale();
                        InsightItem {
                            product_id: rule.consequent,
                            product_name: display_name(&names, rule.consequent),
                            support: rule.support,
                            confidence: rule.confidence,
                            lift: rule.lift,
                            score: rule.score(),
                            rationale,
                            reason: rationale.describe(rule),
                        }
                    })
                    .collect(),
            })
            .collect())
    }
}

impl<F, C, S> RecommendationOperator for RecommendationService<F, C, S>
where
    F: TransactionFeed,
    C: ProductCatalog,
    S: RecommendationStore,
{
    async fn recompute_rules(&self, request: &RuleRecompute) -> Result<RecomputeOutcome> {
        let span = info_span!(
            "recompute",
            run_id = %Uuid::new_v4(),
            path = "rules",
            owner = %request.owner,
            period = %request.period,
        );
        self.run_rules(request).instrument(span).await
    }

    async fn recompute_clusters(&self, request: &ClusterRecompute) -> Result<RecomputeOutcome> {
        let span = info_span!(
            "recompute",
            run_id = %Uuid::new_v4(),
            path = "clusters",
            owner = %request.owner,
            period = %request.period,
        );
        self.run_clusters(request).instrument(span).await
    }

    async fn query(
        &self,
        owner: OwnerId,
        product: Option<ProductId>,
    ) -> Result<Vec<RecommendationView>> {
        self.run_query(owner, product).await
    }

    async fn insights(&self, owner: OwnerId, period: Period) -> Result<Vec<ProductInsight>> {
        let span = info_span!("insights", owner = %owner, period = %period);
        self.run_insights(owner, period).instrument(span).await
    }
}

fn display_name(names: &HashMap<ProductId, String>, product: ProductId) -> String {
    names
        .get(&product)
        .cloned()
        .unwrap_or_else(|| format!("Product #{product}"))
}
