//! Handler for `query`.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::QueryArgs;
use crate::adapter::inbound::cli::{context, output};
use crate::domain::recommendation::RecommendationView;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::recommend::RecommendationOperator;

#[derive(Tabled)]
struct ViewRow {
    #[tabled(rename = "Product")]
    product: String,
    #[tabled(rename = "Recommended")]
    recommended: String,
    #[tabled(rename = "Score")]
    score: String,
}

impl From<&RecommendationView> for ViewRow {
    fn from(view: &RecommendationView) -> Self {
        Self {
            product: format!("{} ({})", view.product_name, view.product_id),
            recommended: format!(
                "{} ({})",
                view.recommended_product_name, view.recommended_product_id
            ),
            score: output::score(view.score),
        }
    }
}

/// Execute `query`.
pub async fn execute(config: &Config, args: &QueryArgs) -> Result<()> {
    let service = context::open_service(config)?;
    let views = service.query(args.owner, args.product).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "query",
            "owner": args.owner,
            "product": args.product,
            "recommendations": views,
        }));
        return Ok(());
    }

    output::section("Recommendations");
    output::field("Owner", args.owner);
    if let Some(product) = args.product {
        output::field("Product", product);
    }

    if views.is_empty() {
        output::note("(none stored)");
        output::hint(&format!(
            "run {} first",
            output::highlight("basketry recompute rules --owner <id>")
        ));
        return Ok(());
    }

    let rows: Vec<ViewRow> = views.iter().map(ViewRow::from).collect();
    output::lines(&Table::new(rows).to_string());
    Ok(())
}
