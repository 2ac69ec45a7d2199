// src/rank.rs
//! Post-dedup filtering and the dashboard ordering.

use crate::event::EnrichedEvent;
use crate::ingest::types::SourceSystem;

/// True when the lowercased source name or url contains any blocklist pattern.
pub fn is_blocked(source: &str, url: &str, blocklist: &[String]) -> bool {
    let source = source.to_lowercase();
    let url = url.to_lowercase();
    blocklist
        .iter()
        .any(|b| source.contains(b.as_str()) || url.contains(b.as_str()))
}

fn is_latin_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || ('\u{00C0}'..='\u{00FF}').contains(&c)
}

/// The trimmed title must open with a Latin letter (A-Z, a-z, À-ÿ).
/// Digits, quotes and other punctuation in first position fail.
pub fn is_latin_title(title: &str) -> bool {
    match title.trim().chars().next() {
        Some(c) => is_latin_letter(c),
        None => true,
    }
}

/// Undated records (`published_at == 0`) are never considered stale.
pub fn is_stale(published_at: u64, now: u64, retention_secs: u64) -> bool {
    published_at != 0 && published_at < now.saturating_sub(retention_secs)
}

pub fn keep_event(ev: &EnrichedEvent, blocklist: &[String], now: u64, retention_secs: u64) -> bool {
    let r = &ev.record;
    !r.title.trim().is_empty()
        && !is_blocked(&r.source, &r.url, blocklist)
        && is_latin_title(&r.title)
        && !is_stale(r.published_at, now, retention_secs)
}

/// Returns (kept, dropped).
pub fn filter_events(
    events: Vec<EnrichedEvent>,
    blocklist: &[String],
    now: u64,
    retention_secs: u64,
) -> (Vec<EnrichedEvent>, usize) {
    let before = events.len();
    let kept: Vec<EnrichedEvent> = events
        .into_iter()
        .filter(|ev| keep_event(ev, blocklist, now, retention_secs))
        .collect();
    let dropped = before - kept.len();
    (kept, dropped)
}

pub const UNKNOWN_PROVENANCE: usize = 999;

pub fn provenance_rank(system: &SourceSystem, priority: &[String]) -> usize {
    priority
        .iter()
        .position(|p| p.eq_ignore_ascii_case(system.label()))
        .unwrap_or(UNKNOWN_PROVENANCE)
}

/// Provenance priority, then composite score desc, then newest first.
/// Stable, so full ties keep their input order.
pub fn rank_events(events: &mut [EnrichedEvent], priority: &[String]) {
    events.sort_by(|a, b| {
        provenance_rank(&a.record.source_system, priority)
            .cmp(&provenance_rank(&b.record.source_system, priority))
            .then_with(|| b.composite_score().cmp(&a.composite_score()))
            .then_with(|| b.record.published_at.cmp(&a.record.published_at))
    });
}
