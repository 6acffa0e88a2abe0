//! Handlers for `recompute rules` and `recompute clusters`.

use serde_json::json;

use crate::adapter::inbound::cli::command::{ClustersArgs, RulesArgs};
use crate::adapter::inbound::cli::{context, output};
use crate::domain::id::OwnerId;
use crate::domain::recommendation::RecomputeOutcome;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::recommend::{ClusterRecompute, RecommendationOperator, RuleRecompute};

/// Merge CLI flags over the `[rules]` section.
#[must_use]
pub fn rules_request(config: &Config, args: &RulesArgs) -> RuleRecompute {
    let defaults = config.rules.request(args.owner);
    RuleRecompute {
        period: args.period.unwrap_or(defaults.period),
        min_count: args.min_count.unwrap_or(defaults.min_count),
        top_per_product: args.top_per_product.unwrap_or(defaults.top_per_product),
        max_antecedents: args.max_antecedents.unwrap_or(defaults.max_antecedents),
        ..defaults
    }
}

/// Merge CLI flags over the `[clustering]` section.
#[must_use]
pub fn clusters_request(config: &Config, args: &ClustersArgs) -> ClusterRecompute {
    let defaults = config.clustering.request(args.owner);
    ClusterRecompute {
        period: args.period.unwrap_or(defaults.period),
        top_features: args.top_features.unwrap_or(defaults.top_features),
        k: args.k.unwrap_or(defaults.k),
        min_count: args.min_count.unwrap_or(defaults.min_count),
        top_per_product: args.top_per_product.unwrap_or(defaults.top_per_product),
        seed: args.seed.or(defaults.seed),
        ..defaults
    }
}

/// Execute `recompute rules`.
pub async fn execute_rules(config: &Config, args: &RulesArgs) -> Result<()> {
    let request = rules_request(config, args);
    let service = context::open_service(config)?;
    let outcome = service.recompute_rules(&request).await?;
    report("rules", request.owner, &request.period.tag(), &outcome);
    Ok(())
}

/// Execute `recompute clusters`.
pub async fn execute_clusters(config: &Config, args: &ClustersArgs) -> Result<()> {
    let request = clusters_request(config, args);
    let service = context::open_service(config)?;
    let outcome = service.recompute_clusters(&request).await?;
    report("clusters", request.owner, &request.period.tag(), &outcome);
    Ok(())
}

fn report(path: &str, owner: OwnerId, period: &str, outcome: &RecomputeOutcome) {
    if output::is_json() {
        output::json_output(json!({
            "command": format!("recompute.{path}"),
            "owner": owner,
            "period": period,
            "outcome": outcome,
        }));
        return;
    }

    output::section("Recompute");
    output::field("Path", path);
    output::field("Owner", owner);
    output::field("Period", period);
    output::field("Updated", outcome.updated);
    if let Some(clusters) = outcome.clusters {
        output::field("Clusters", clusters);
    }
    match outcome.reason {
        Some(reason) => output::warning(&format!("Nothing written: {}", reason.as_str())),
        None => output::success(&format!("Stored {} recommendations", outcome.updated)),
    }
}
