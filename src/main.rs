use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the lung catalog service
///
/// Loads `.env` if present, resolves configuration once, then serves the REST API with
/// OpenAPI/Swagger documentation.
///
/// # Environment Variables
/// - `LUNG_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `LUNG_CATALOG_DIR`: catalog YAML directory (default: data embedded in the binary)
/// - `LUNG_ANALYSIS_STEP_MS`: delay per mock analysis step (default: 800)
/// - `LUNG_INFERENCE_SEED`: seed for the mock classifier (default: random)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, catalog loading or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lung_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("lung_catalog=info".parse()?)
                .add_directive("lung_inference=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = api_rest::AppConfig::from_env()?;
    tracing::info!("++ Starting lung catalog REST on {}", cfg.rest_addr());

    api_rest::serve(&cfg).await
}
