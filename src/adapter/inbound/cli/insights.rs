//! Handler for `insights`.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::InsightsArgs;
use crate::adapter::inbound::cli::{context, output};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::recommend::{InsightItem, RecommendationOperator};

#[derive(Tabled)]
struct InsightRow {
    #[tabled(rename = "Recommended")]
    product: String,
    #[tabled(rename = "Baskets")]
    support: u32,
    #[tabled(rename = "Confidence")]
    confidence: String,
    #[tabled(rename = "Lift")]
    lift: String,
    #[tabled(rename = "Why")]
    reason: String,
}

impl From<&InsightItem> for InsightRow {
    fn from(item: &InsightItem) -> Self {
        Self {
            product: item.product_name.clone(),
            support: item.support,
            confidence: format!("{:.1}%", item.confidence),
            lift: output::score(item.lift),
            reason: item.reason.clone(),
        }
    }
}

/// Execute `insights`.
pub async fn execute(config: &Config, args: &InsightsArgs) -> Result<()> {
    let period = args.period.unwrap_or(config.insights.period);
    let service = context::open_service(config)?;
    let insights = service.insights(args.owner, period).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "insights",
            "owner": args.owner,
            "period": period,
            "products": insights,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    if insights.is_empty() {
        output::note(&format!("No co-purchase patterns in the last {period}"));
        return Ok(());
    }

    for insight in &insights {
        output::section(&format!(
            "{} {}",
            insight.product_name,
            output::muted(format!("#{}", insight.product_id))
        ));
        let rows: Vec<InsightRow> = insight.recommendations.iter().map(InsightRow::from).collect();
        output::lines(&Table::new(rows).to_string());
    }
    Ok(())
}
