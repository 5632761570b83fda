//! Standalone REST API server binary.
//!
//! Serves the same router as the workspace's `lung-run` binary, without reading a `.env` file.
//! Useful when the environment is managed elsewhere (containers, CI).

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Entry point for the lung catalog REST API server.
///
/// # Environment Variables
/// - `LUNG_REST_ADDR`: server address (default: "0.0.0.0:3000")
/// - `LUNG_CATALOG_DIR`: directory holding `diseases.yaml` and `remedies.yaml` (default: embedded)
/// - `LUNG_ANALYSIS_STEP_MS`: delay per analysis progress step (default: 800)
/// - `LUNG_INFERENCE_SEED`: seed for the placeholder classifier (default: random)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - a configuration value is invalid or the catalog fails to load,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("lung_catalog=info".parse()?)
                .add_directive("lung_inference=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = api_rest::AppConfig::from_env()?;
    api_rest::serve(&cfg).await
}
