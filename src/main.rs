mod app;
mod config;
mod constants;
mod conversion;
mod planner;
mod probe;
mod report;
mod scanner;

use app::BatchConverter;
use config::ConverterConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    tracing::info!("Starting {} {}", constants::APP_NAME, constants::APP_VERSION);

    let config = ConverterConfig::default();
    let summary = BatchConverter::new(config).run().await?;

    tracing::info!(
        "Run finished: {} converted, {} failed",
        summary.converted,
        summary.failed
    );
    Ok(())
}
