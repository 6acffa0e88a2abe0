use basketry::adapter::inbound::cli::command::Cli;
use basketry::adapter::inbound::cli::{self, output};
use clap::Parser;
use tracing::error;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let args = Cli::parse();
    if let Err(e) = cli::run(args).await {
        error!(error = %e, "Command failed");
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
