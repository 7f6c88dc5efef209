//! Bill line-item service entry point

use anyhow::Context;
use billscan_ocr::{BillPipeline, CognitiveServicesRecognizer, LineItemReconstructor};
use billscan_server::{build_router, start_server, AppState, Cli, ServerConfig};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "billscan_server=info,billscan_ocr=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::resolve(Cli::parse())?;
    tracing::info!("Starting with {config:?}");

    let recognizer = CognitiveServicesRecognizer::new(
        config.api_key.clone(),
        config.ocr_endpoint.clone(),
        config.ocr_timeout,
    )
    .context("building recognition client")?;
    tracing::info!("Recognition endpoint: {}", recognizer.endpoint());

    let pipeline = BillPipeline::new(recognizer, LineItemReconstructor::new(config.threshold));
    let router = build_router(AppState::new(pipeline));

    start_server(config.listen, router)
        .await
        .context("serving HTTP")?;

    Ok(())
}
