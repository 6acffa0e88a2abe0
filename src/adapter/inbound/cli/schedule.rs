//! Handler for `schedule`.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::watch;
use tracing::info;

use crate::adapter::inbound::cli::command::ScheduleArgs;
use crate::adapter::inbound::cli::{context, output};
use crate::error::Result;
use crate::infrastructure::bootstrap::build_batch_job;
use crate::infrastructure::config::settings::Config;

/// Execute `schedule`.
pub async fn execute(config: &Config, args: &ScheduleArgs) -> Result<()> {
    let service = Arc::new(context::open_service(config)?);
    let job = build_batch_job(config, service);

    if args.once {
        let report = job.run_once().await?;
        if output::is_json() {
            output::json_output(json!({
                "command": "schedule",
                "report": report,
            }));
            return Ok(());
        }
        output::section("Batch");
        output::field("Succeeded", report.succeeded);
        output::field("Skipped", report.skipped);
        output::field("Failed", report.failed);
        if report.failed > 0 {
            output::warning(&format!("{} owners failed, see logs", report.failed));
        } else {
            output::success(&format!("Processed {} owners", report.owners()));
        }
        return Ok(());
    }

    let interval = config.schedule.interval();
    output::section("Schedule");
    output::field("Every", format!("{}h", config.schedule.interval_hours));
    output::note("Press Ctrl-C to stop");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received");
        }
        let _ = shutdown_tx.send(true);
    });

    job.run_every(interval, shutdown_rx).await;
    output::success("Scheduler stopped");
    Ok(())
}
