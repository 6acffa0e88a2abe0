//! CLI module graph.

pub mod command;
pub mod config;
pub mod context;
pub mod insights;
pub mod output;
pub mod paths;
pub mod query;
pub mod recompute;
pub mod schedule;

use command::{Cli, Commands, ConfigCommand, RecomputeCommand};
use output::OutputConfig;

use crate::error::Result;

/// Configure output and logging, then run the selected command.
///
/// # Errors
/// Returns the first error raised by config loading or the handler.
pub async fn run(cli: Cli) -> Result<()> {
    let output_config = OutputConfig::new(cli.json, cli.quiet, cli.verbose);
    output::configure(output_config);

    let settings = context::load_config(cli.config.as_deref(), cli.db.as_deref())?;
    match output_config.log_level() {
        Some(level) => settings.logging.with_level(level).init(),
        None => settings.init_logging(),
    }

    match &cli.command {
        Commands::Recompute(RecomputeCommand::Rules(args)) => {
            recompute::execute_rules(&settings, args).await
        }
        Commands::Recompute(RecomputeCommand::Clusters(args)) => {
            recompute::execute_clusters(&settings, args).await
        }
        Commands::Query(args) => query::execute(&settings, args).await,
        Commands::Insights(args) => insights::execute(&settings, args).await,
        Commands::Schedule(args) => schedule::execute(&settings, args).await,
        Commands::Config(ConfigCommand::Show) => config::execute_show(&settings),
        Commands::Config(ConfigCommand::Validate) => config::execute_validate(&settings),
    }
}
