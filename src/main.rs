//! Geo events service: binary entrypoint.
//! Boots the Axum HTTP server, wiring routes, shared state, and middleware.

use anyhow::Context;
use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use geo_events_analyzer::api::{self, AppState};
use geo_events_analyzer::config::PipelineConfig;
use geo_events_analyzer::engine::{
    lexicon_path, start_hot_reload_thread, EngineHandle, EnrichmentEngine,
};
use geo_events_analyzer::ingest::{config::load_sources_default, providers::build_all};
use geo_events_analyzer::metrics::Metrics;

/// Enable compact tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - EVENTS_DEV_LOG=1
fn enable_dev_tracing() {
    let dev_flag = std::env::var("EVENTS_DEV_LOG")
        .ok()
        .is_some_and(|v| v == "1");

    let is_dev_env = cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        );

    if !(dev_flag && is_dev_env) {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("enrich=info,pipeline=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    enable_dev_tracing();

    let engine = EnrichmentEngine::from_toml().context("loading lexicon")?;
    let handle = EngineHandle::new(engine);
    // No-op unless EVENTS_HOT_RELOAD=1 in dev.
    start_hot_reload_thread(handle.clone(), lexicon_path());

    let pipeline = PipelineConfig::load_default().context("loading pipeline config")?;
    let sources = load_sources_default().context("loading sources")?;
    tracing::info!(sources = sources.len(), "configured upstream sources");

    let metrics = Metrics::init(pipeline.page_size, pipeline.retention_days)?;

    let state = AppState::new(handle, pipeline, build_all(&sources));
    let router = api::create_router(state).merge(metrics.router());

    Ok(router.into())
}
