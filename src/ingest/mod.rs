// src/ingest/mod.rs
pub mod config;
pub mod providers;
pub mod types;

use crate::ingest::types::{RawRecord, SourceProvider};
use futures::future::join_all;
use metrics::{counter, describe_counter, describe_histogram};
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::time::{Duration, Instant};

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("ingest_events_total", "Total records parsed from providers.");
        describe_counter!(
            "ingest_provider_errors_total",
            "Provider fetch/parse errors."
        );
        describe_counter!(
            "ingest_provider_timeouts_total",
            "Provider branches that missed their deadline."
        );
        describe_histogram!("ingest_parse_ms", "Provider parse time in milliseconds.");
    });
}

/// Normalize text: decode entities, strip tags, collapse whitespace, trim.
pub fn normalize_text(s: &str) -> String {
    // 1) HTML entity decode
    let mut out = html_escape::decode_html_entities(s).to_string();

    // 2) Strip HTML tags
    static RE_TAGS: OnceCell<regex::Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, "").to_string();

    // 3) Typographic quotes to ASCII
    out = out
        .replace(['\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    // 4) Collapse whitespace
    static RE_WS: OnceCell<regex::Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").trim().to_string();

    // 5) Length cap: 1500 chars
    if out.chars().count() > 1500 {
        out = out.chars().take(1500).collect();
    }

    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchOutcome {
    Ok,
    Failed,
    TimedOut,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchReport {
    pub provider: String,
    pub outcome: BranchOutcome,
    pub records: usize,
    pub elapsed_ms: u64,
}

/// Runs every provider concurrently, each under its own deadline.
/// A failing or slow branch contributes an empty list; all branches settle
/// before returning. Branch order matches provider order.
pub async fn gather(
    providers: &[Box<dyn SourceProvider>],
    default_timeout: Duration,
) -> (Vec<Vec<RawRecord>>, Vec<BranchReport>) {
    ensure_metrics_described();

    let futures = providers.iter().map(|p| async move {
        let deadline = p.timeout().unwrap_or(default_timeout);
        let t0 = Instant::now();
        let result = tokio::time::timeout(deadline, p.fetch_latest()).await;
        let elapsed_ms = t0.elapsed().as_millis() as u64;

        let (records, outcome) = match result {
            Ok(Ok(v)) => (v, BranchOutcome::Ok),
            Ok(Err(e)) => {
                tracing::warn!(error = ?e, provider = p.name(), "provider error");
                counter!("ingest_provider_errors_total").increment(1);
                (Vec::new(), BranchOutcome::Failed)
            }
            Err(_) => {
                tracing::warn!(
                    provider = p.name(),
                    timeout_ms = deadline.as_millis() as u64,
                    "provider timed out"
                );
                counter!("ingest_provider_timeouts_total").increment(1);
                (Vec::new(), BranchOutcome::TimedOut)
            }
        };
        let report = BranchReport {
            provider: p.name().to_string(),
            outcome,
            records: records.len(),
            elapsed_ms,
        };
        (records, report)
    });

    join_all(futures).await.into_iter().unzip()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_text_decodes_strips_and_collapses() {
        let s = "  <b>Hello</b>,&nbsp;&nbsp; \u{201C}world\u{201D}  ";
        assert_eq!(normalize_text(s), "Hello, \"world\"");
    }

    #[test]
    fn normalize_text_keeps_question_marks() {
        assert_eq!(normalize_text("Is a ceasefire near?"), "Is a ceasefire near?");
    }

    #[test]
    fn normalize_text_caps_length() {
        let long = "a".repeat(2000);
        assert_eq!(normalize_text(&long).chars().count(), 1500);
    }
}
