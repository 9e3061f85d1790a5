use std::process::ExitCode;

use clap::Parser;
use telesana_lib::cli::{self, Args};
use telesana_lib::config;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    telesana_lib::init_tracing();

    let args = Args::parse();
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    match cli::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Seed failed");
            ExitCode::FAILURE
        }
    }
}
