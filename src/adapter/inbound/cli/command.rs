//! Command-line interface definitions.
//!
//! Defines the CLI structure for basketry using `clap`: recompute
//! recommendations, read them back, inspect dashboard insights, run the
//! periodic batch and manage configuration.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::id::{OwnerId, ProductId};
use crate::domain::period::Period;

/// Product co-purchase recommendations from transaction history
#[derive(Parser, Debug)]
#[command(name = "basketry")]
#[command(version)]
pub struct Cli {
    /// Configuration file [default: ~/.basketry/config.toml]
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database, overriding the configured one
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recompute and store recommendations for one owner
    #[command(subcommand)]
    Recompute(RecomputeCommand),

    /// Show stored recommendations
    Query(QueryArgs),

    /// Explain what sells together, without storing anything
    Insights(InsightsArgs),

    /// Recompute every owner on a fixed interval
    Schedule(ScheduleArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `basketry recompute`.
#[derive(Subcommand, Debug)]
pub enum RecomputeCommand {
    /// Association rules ranked by confidence x lift
    Rules(RulesArgs),
    /// K-means clusters scored by same-cluster co-purchases
    Clusters(ClustersArgs),
}

/// Arguments for `recompute rules`. Unset flags use the `[rules]` section.
#[derive(Args, Debug, Clone)]
pub struct RulesArgs {
    #[arg(long)]
    pub owner: OwnerId,

    /// Lookback period such as 30d, 12h or 2w
    #[arg(long)]
    pub period: Option<Period>,

    /// Minimum baskets containing both products
    #[arg(long)]
    pub min_count: Option<u32>,

    /// Recommendations kept per product
    #[arg(long)]
    pub top_per_product: Option<usize>,

    /// Most frequent products expanded into rules
    #[arg(long)]
    pub max_antecedents: Option<usize>,
}

/// Arguments for `recompute clusters`. Unset flags use `[clustering]`.
#[derive(Args, Debug, Clone)]
pub struct ClustersArgs {
    #[arg(long)]
    pub owner: OwnerId,

    /// Lookback period such as 30d, 12h or 2w
    #[arg(long)]
    pub period: Option<Period>,

    /// Feature dimensions (most frequent products)
    #[arg(long)]
    pub top_features: Option<usize>,

    /// Requested cluster count
    #[arg(long)]
    pub k: Option<usize>,

    /// Minimum baskets containing both products
    #[arg(long)]
    pub min_count: Option<u32>,

    /// Recommendations kept per product
    #[arg(long)]
    pub top_per_product: Option<usize>,

    /// Seed for reproducible clustering
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for `query`.
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    #[arg(long)]
    pub owner: OwnerId,

    /// Only recommendations for this product
    #[arg(long)]
    pub product: Option<ProductId>,
}

/// Arguments for `insights`.
#[derive(Args, Debug, Clone)]
pub struct InsightsArgs {
    #[arg(long)]
    pub owner: OwnerId,

    /// Lookback period [default: from `[insights]`]
    #[arg(long)]
    pub period: Option<Period>,
}

/// Arguments for `schedule`.
#[derive(Args, Debug, Clone)]
pub struct ScheduleArgs {
    /// Run one pass and exit
    #[arg(long)]
    pub once: bool,
}

/// Subcommands for `basketry config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults applied
    Show,
    /// Validate the configuration file
    Validate,
}
