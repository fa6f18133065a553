//! counter-server — order-count aggregator for a storefront widget
//!
//! Long-running service that:
//! - Answers `{ "count": <int> }` for a single configured shop
//! - Evaluates one configurable counting strategy per request
//! - Issues sequential, best-effort queries against the Shopify Admin API

use counter_server::api;
use counter_server::config::Config;
use counter_server::state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "counter_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env();

    let missing = config.missing_vars();
    if !missing.is_empty() {
        // Boot anyway: every count request answers 500 naming the variables,
        // matching the serverless origin's behavior.
        tracing::warn!(
            "missing required configuration: {}; count requests will fail until set",
            missing.join(", ")
        );
    }

    tracing::info!(strategy = %config.strategy, "Starting counter-server");

    let state = AppState::new(config)?;
    let app = api::build_app(state.clone());

    let addr = format!("0.0.0.0:{}", state.config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("counter-server HTTP listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
