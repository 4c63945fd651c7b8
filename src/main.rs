//! GroupBook pricing service entry point.

use anyhow::Context;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use groupbook_pricing::{pricing, AppState, EngineLimits};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let max_preview_rows = std::env::var("PRICING_MAX_PREVIEW_ROWS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(EngineLimits::default().max_preview_rows);

    let state = AppState {
        limits: EngineLimits { max_preview_rows },
    };

    let app = pricing::router()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(CompressionLayer::new()),
        )
        .with_state(state);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8090".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("could not bind {bind_addr}"))?;
    tracing::info!("pricing service listening on {bind_addr}");

    axum::serve(listener, app)
        .await
        .context("server error")?;
    Ok(())
}
