// src/pipeline.rs
//! Enrich → dedup → filter → rank → truncate.

use chrono::{DateTime, SecondsFormat, Utc};
use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use serde::Serialize;

use crate::config::PipelineConfig;
use crate::dedup::dedup;
use crate::engine::EnrichmentEngine;
use crate::event::EnrichedEvent;
use crate::ingest::types::RawRecord;
use crate::rank::{filter_events, rank_events};

pub const NO_DATA: &str = "No Data Available";

fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("pipeline_dedup_total", "Events removed as duplicates.");
        describe_counter!(
            "pipeline_filtered_total",
            "Events dropped by blocklist, script, empty-title or retention filters."
        );
        describe_counter!("pipeline_kept_total", "Events returned after truncation.");
    });
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEventSet {
    pub events: Vec<EnrichedEvent>,
    /// Count after filtering, before truncation.
    pub total_count: usize,
    pub data_source: String,
    pub sources_used: Vec<String>,
    pub last_updated: String,
}

impl RankedEventSet {
    pub fn empty(now: u64) -> Self {
        Self {
            events: Vec::new(),
            total_count: 0,
            data_source: NO_DATA.to_string(),
            sources_used: Vec::new(),
            last_updated: rfc3339(now),
        }
    }
}

pub fn rfc3339(unix: u64) -> String {
    DateTime::<Utc>::from_timestamp(unix as i64, 0)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Branches in branch order, flattened. Failed branches are already empty.
pub fn merge_branches(branches: Vec<Vec<RawRecord>>) -> Vec<RawRecord> {
    branches.into_iter().flatten().collect()
}

pub fn enrich_and_rank(
    records: Vec<RawRecord>,
    engine: &EnrichmentEngine,
    cfg: &PipelineConfig,
    now: u64,
) -> RankedEventSet {
    rank_enriched(engine.enrich_all(records), cfg, now)
}

/// Everything after enrichment. Output is a subset of the input, in ranked order.
pub fn rank_enriched(events: Vec<EnrichedEvent>, cfg: &PipelineConfig, now: u64) -> RankedEventSet {
    ensure_metrics_described();

    let (unique, dup_cnt) = dedup(events, &cfg.dedup);
    let (mut kept, filtered_cnt) =
        filter_events(unique, &cfg.blocklist, now, cfg.retention_secs());
    rank_events(&mut kept, &cfg.provenance_priority);

    let total_count = kept.len();
    let mut sources_used: Vec<String> = Vec::new();
    for ev in &kept {
        let label = ev.record.source_system.label();
        if !sources_used.iter().any(|s| s == label) {
            sources_used.push(label.to_string());
        }
    }
    let data_source = kept
        .first()
        .map(|e| e.record.source_system.label().to_string())
        .unwrap_or_else(|| NO_DATA.to_string());

    kept.truncate(cfg.page_size);

    counter!("pipeline_dedup_total").increment(dup_cnt as u64);
    counter!("pipeline_filtered_total").increment(filtered_cnt as u64);
    counter!("pipeline_kept_total").increment(kept.len() as u64);
    tracing::debug!(
        target: "pipeline",
        kept = kept.len(),
        total_count,
        dup = dup_cnt,
        filtered = filtered_cnt,
        "ranked"
    );

    RankedEventSet {
        events: kept,
        total_count,
        data_source,
        sources_used,
        last_updated: rfc3339(now),
    }
}
