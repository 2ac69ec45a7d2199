// src/signals.rs
//! OSINT signal feed: coarse signal kind, source confidence and region per record.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::engine::anon_hash;
use crate::event::record_key;
use crate::ingest::types::RawRecord;
use crate::lexicon::{contains_any, first_label, SignalTables};
use crate::pipeline::rfc3339;

pub const MAX_SIGNALS: usize = 50;
pub const NO_SIGNALS: &str = "No Data";
const MULTI_SOURCE: &str = "Multi-Source";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    Military,
    Political,
    Economic,
    Security,
    Strategic,
    General,
}

pub const DEFAULT_REGION: &str = "Global";

pub fn categorize_signal(tables: &SignalTables, title: &str) -> SignalKind {
    first_label(&title.to_lowercase(), &tables.kinds)
        .copied()
        .unwrap_or(SignalKind::General)
}

pub fn estimate_confidence(tables: &SignalTables, source: &str) -> f32 {
    let s = source.to_lowercase();
    if contains_any(&s, &tables.high_confidence) {
        0.9
    } else if contains_any(&s, &tables.medium_confidence) {
        0.7
    } else {
        0.5
    }
}

pub fn extract_region<'a>(tables: &'a SignalTables, title: &str) -> &'a str {
    first_label(&title.to_lowercase(), &tables.regions)
        .map(String::as_str)
        .unwrap_or(DEFAULT_REGION)
}

/// `.edu` domains and academic keywords in source or title.
pub fn is_academic(tables: &SignalTables, source: &str, title: &str) -> bool {
    let s = source.to_lowercase();
    let t = title.to_lowercase();
    s.trim_end().ends_with(".edu")
        || t.trim_end().ends_with(".edu")
        || contains_any(&s, &tables.academic)
        || contains_any(&t, &tables.academic)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub source: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: SignalKind,
    pub confidence: f32,
    pub published_at: u64,
    pub region: String,
    pub verified: bool,
    pub data_source: String,
}

impl Signal {
    pub fn from_record(tables: &SignalTables, r: RawRecord) -> Self {
        Self {
            id: format!("sig-{}", anon_hash(record_key(&r))),
            kind: categorize_signal(tables, &r.title),
            confidence: estimate_confidence(tables, &r.source),
            region: extract_region(tables, &r.title).to_string(),
            verified: false,
            data_source: r.source_system.label().to_string(),
            title: r.title,
            summary: r.summary,
            source: r.source,
            url: r.url,
            published_at: r.published_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalSet {
    pub signals: Vec<Signal>,
    pub last_updated: String,
    pub total_count: usize,
    pub data_source: String,
    pub sources_used: Vec<String>,
    pub disclaimer: &'static str,
}

/// Exact-title dedup, academic filter, confidence desc (stable), capped at 50.
pub fn build_signals(records: Vec<RawRecord>, tables: &SignalTables, now: u64) -> SignalSet {
    let mut titles = HashSet::new();
    let mut signals: Vec<Signal> = records
        .into_iter()
        .filter(|r| titles.insert(r.title.clone()))
        .filter(|r| !is_academic(tables, &r.source, &r.title))
        .map(|r| Signal::from_record(tables, r))
        .collect();

    signals.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    signals.truncate(MAX_SIGNALS);

    let mut sources_used: Vec<String> = Vec::new();
    for s in &signals {
        if !sources_used.contains(&s.data_source) {
            sources_used.push(s.data_source.clone());
        }
    }

    let data_source = match sources_used.as_slice() {
        [] => NO_SIGNALS.to_string(),
        [only] => only.clone(),
        _ => MULTI_SOURCE.to_string(),
    };
    let disclaimer = if signals.is_empty() {
        "No real-time data available at this time"
    } else {
        "Aggregated OSINT data; requires independent verification"
    };

    SignalSet {
        total_count: signals.len(),
        signals,
        last_updated: rfc3339(now),
        data_source,
        sources_used,
        disclaimer,
    }
}
