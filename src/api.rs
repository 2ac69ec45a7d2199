use std::sync::Arc;
use std::time::Duration;

use shuttle_axum::axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::config::PipelineConfig;
use crate::engine::{EngineHandle, EnrichmentEngine};
use crate::event::{Classification, Location};
use crate::ingest::{self, types::{RawRecord, SourceProvider}};
use crate::military::{self, MilitaryActivity};
use crate::pipeline::{self, RankedEventSet};
use crate::predictions::{self, PredictionSet};
use crate::signals::{self, SignalSet};

/// Retention used by the live `/events` view.
pub const EVENTS_VIEW_RETENTION_DAYS: u64 = 7;

#[derive(Clone)]
pub struct AppState {
    pub engine: EngineHandle,
    pub pipeline: Arc<PipelineConfig>,
    pub providers: Arc<Vec<Box<dyn SourceProvider>>>,
}

impl AppState {
    pub fn new(
        engine: EngineHandle,
        pipeline: PipelineConfig,
        providers: Vec<Box<dyn SourceProvider>>,
    ) -> Self {
        Self {
            engine,
            pipeline: Arc::new(pipeline),
            providers: Arc::new(providers),
        }
    }

    /// Builtin lexicon, default pipeline settings, no upstream sources.
    pub fn builtin() -> anyhow::Result<Self> {
        let engine = EngineHandle::new(EnrichmentEngine::builtin()?);
        Ok(Self::new(engine, PipelineConfig::default(), Vec::new()))
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/enrich", post(enrich))
        .route("/classify", post(classify))
        .route("/locate", post(locate))
        .route("/events", get(events))
        .route("/signals", post(signals))
        .route("/predictions", post(predictions))
        .route("/military", post(military))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

fn current_unix() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

async fn enrich(
    State(state): State<AppState>,
    Json(records): Json<Vec<RawRecord>>,
) -> Json<RankedEventSet> {
    let now = current_unix();
    let set = state
        .engine
        .with(|e| pipeline::enrich_and_rank(records, e, &state.pipeline, now));
    Json(set)
}

#[derive(serde::Deserialize)]
struct ClassifyReq {
    #[serde(default)]
    title: String,
    #[serde(default)]
    summary: String,
}

async fn classify(
    State(state): State<AppState>,
    Json(body): Json<ClassifyReq>,
) -> Json<Classification> {
    Json(state.engine.classify(&body.title, &body.summary))
}

#[derive(serde::Deserialize)]
struct LocateReq {
    #[serde(default)]
    text: String,
}

async fn locate(State(state): State<AppState>, Json(body): Json<LocateReq>) -> Json<Location> {
    Json(state.engine.locate(&body.text))
}

async fn events(State(state): State<AppState>) -> Json<RankedEventSet> {
    let now = current_unix();
    let timeout = Duration::from_secs(state.pipeline.branch_timeout_secs);
    let (branches, reports) = ingest::gather(&state.providers, timeout).await;
    tracing::info!(
        target: "pipeline",
        branches = reports.len(),
        failed = reports.iter().filter(|r| r.outcome != ingest::BranchOutcome::Ok).count(),
        "gathered"
    );

    let cfg = state.pipeline.with_retention_days(EVENTS_VIEW_RETENTION_DAYS);
    let records = pipeline::merge_branches(branches);
    let set = state
        .engine
        .with(|e| pipeline::enrich_and_rank(records, e, &cfg, now));
    Json(set)
}

async fn signals(
    State(state): State<AppState>,
    Json(records): Json<Vec<RawRecord>>,
) -> Json<SignalSet> {
    let now = current_unix();
    let set = state
        .engine
        .with(|e| signals::build_signals(records, e.signal_tables(), now));
    Json(set)
}

async fn predictions(Json(records): Json<Vec<RawRecord>>) -> Json<PredictionSet> {
    Json(predictions::build_predictions(&records, current_unix()))
}

async fn military(
    State(state): State<AppState>,
    Json(records): Json<Vec<RawRecord>>,
) -> Json<MilitaryActivity> {
    let now = current_unix();
    let activity = state.engine.with(|e| {
        let events = e.enrich_all(records);
        military::build_activity(&events, e.military_rules(), now)
    });
    Json(activity)
}
