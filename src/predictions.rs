// src/predictions.rs
//! Trend indicators from keyword frequency: last 24h against the 24-72h window before it.

use serde::Serialize;

use crate::ingest::types::RawRecord;
use crate::lexicon::contains_any;
use crate::pipeline::rfc3339;

const DAY: u64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Trend {
    Escalating,
    DeEscalating,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Escalating => "escalating",
            Trend::DeEscalating => "de-escalating",
            Trend::Stable => "stable",
        }
    }
}

/// Undated records (`published_at == 0`) are not counted in either window.
pub fn analyze_event_trend(events: &[RawRecord], keywords: &[&str], now: u64) -> Trend {
    let one_day_ago = now.saturating_sub(DAY);
    let three_days_ago = now.saturating_sub(3 * DAY);

    let hits = |r: &&RawRecord| contains_any(&r.title.to_lowercase(), keywords);
    let recent = events
        .iter()
        .filter(|r| r.published_at != 0 && r.published_at > one_day_ago)
        .filter(hits)
        .count() as f64;
    let previous = events
        .iter()
        .filter(|r| {
            r.published_at != 0 && r.published_at > three_days_ago && r.published_at <= one_day_ago
        })
        .filter(hits)
        .count() as f64;

    if recent == 0.0 && previous == 0.0 {
        Trend::Stable
    } else if recent > previous * 1.5 {
        Trend::Escalating
    } else if recent < previous * 0.7 {
        Trend::DeEscalating
    } else {
        Trend::Stable
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub id: &'static str,
    pub category: &'static str,
    pub title: String,
    pub question: &'static str,
    pub indicator: &'static str,
    pub trend: Trend,
    pub probability: f32,
    pub timeframe: &'static str,
    pub factors: &'static [&'static str],
    pub confidence: f32,
    pub search_query: &'static str,
    pub last_updated: String,
}

#[derive(Debug, Clone, Copy)]
enum IndicatorRule {
    /// indicator is the trend itself
    Trend,
    /// "elevated" when stable, else the trend
    StableIsElevated,
    /// "elevated" when escalating, else the given label
    EscalatingElse(&'static str),
}

struct Template {
    id: &'static str,
    category: &'static str,
    name: &'static str,
    question: &'static str,
    keywords: &'static [&'static str],
    rule: IndicatorRule,
    /// (when escalating, otherwise)
    probability: (f32, f32),
    timeframe: &'static str,
    factors: &'static [&'static str],
    confidence: f32,
    search_query: &'static str,
}

const TEMPLATES: &[Template] = &[
    Template {
        id: "pred-me-001",
        category: "regional",
        name: "Middle East",
        question: "What is the likely trajectory of tensions in the Middle East?",
        keywords: &["iran", "israel", "gaza", "lebanon", "syria", "iraq"],
        rule: IndicatorRule::Trend,
        probability: (0.72, 0.45),
        timeframe: "24-72 hours",
        factors: &[
            "Ongoing regional conflicts",
            "Geopolitical tensions",
            "Media coverage intensity",
        ],
        confidence: 0.65,
        search_query: "conflict middle east news tensions",
    },
    Template {
        id: "pred-eur-001",
        category: "regional",
        name: "Eastern Europe",
        question: "How will conflict activity in Eastern Europe develop?",
        keywords: &["ukraine", "russia", "war", "military"],
        rule: IndicatorRule::Trend,
        probability: (0.68, 0.42),
        timeframe: "24-48 hours",
        factors: &[
            "Military activity reports",
            "Diplomatic developments",
            "Economic indicators",
        ],
        confidence: 0.70,
        search_query: "conflict ukraine russia war news",
    },
    Template {
        id: "pred-gl-001",
        category: "economic",
        name: "Global Markets",
        question: "What is the expected volatility in global markets?",
        keywords: &["econom", "market", "trade", "sanction", "oil", "energy"],
        rule: IndicatorRule::StableIsElevated,
        probability: (0.55, 0.55),
        timeframe: "24 hours",
        factors: &[
            "Geopolitical developments",
            "Energy market fluctuations",
            "Currency movements",
        ],
        confidence: 0.60,
        search_query: "market volatility news economy trade",
    },
    Template {
        id: "pred-str-001",
        category: "strategic",
        name: "Asia-Pacific",
        question: "What is the geopolitical risk level for the tech sector?",
        keywords: &["china", "taiwan", "tech", "semiconductor", "nuclear"],
        rule: IndicatorRule::EscalatingElse("moderate"),
        probability: (0.50, 0.50),
        timeframe: "1 week",
        factors: &[
            "Chip industry developments",
            "Taiwan Strait developments",
            "US-China relations",
        ],
        confidence: 0.55,
        search_query: "geopolitical risk technology sector",
    },
    Template {
        id: "pred-hlth-001",
        category: "health",
        name: "Global Health",
        question: "What is the alert level for global health threats?",
        keywords: &["health", "virus", "pandemic", "outbreak", "disease"],
        rule: IndicatorRule::EscalatingElse("low"),
        probability: (0.35, 0.35),
        timeframe: "1 month",
        factors: &[
            "Disease surveillance data",
            "Healthcare capacity",
            "International travel patterns",
        ],
        confidence: 0.50,
        search_query: "pandemic outbreak disease health news",
    },
];

fn capitalize(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        Some(first) => first.to_uppercase().chain(c).collect(),
        None => String::new(),
    }
}

fn indicator_for(rule: IndicatorRule, trend: Trend) -> &'static str {
    match (rule, trend) {
        (IndicatorRule::Trend, t) => t.as_str(),
        (IndicatorRule::StableIsElevated, Trend::Stable) => "elevated",
        (IndicatorRule::StableIsElevated, t) => t.as_str(),
        (IndicatorRule::EscalatingElse(_), Trend::Escalating) => "elevated",
        (IndicatorRule::EscalatingElse(other), _) => other,
    }
}

/// Five fixed indicators, always in the same order.
pub fn generate_predictions(events: &[RawRecord], now: u64) -> Vec<Prediction> {
    let last_updated = rfc3339(now);
    TEMPLATES
        .iter()
        .map(|tpl| {
            let trend = analyze_event_trend(events, tpl.keywords, now);
            let indicator = indicator_for(tpl.rule, trend);
            let probability = if trend == Trend::Escalating {
                tpl.probability.0
            } else {
                tpl.probability.1
            };
            Prediction {
                id: tpl.id,
                category: tpl.category,
                title: format!("{}: {}", tpl.name, capitalize(indicator)),
                question: tpl.question,
                indicator,
                trend,
                probability,
                timeframe: tpl.timeframe,
                factors: tpl.factors,
                confidence: tpl.confidence,
                search_query: tpl.search_query,
                last_updated: last_updated.clone(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionSet {
    pub predictions: Vec<Prediction>,
    pub last_updated: String,
    pub methodology: &'static str,
    pub sources_used: Vec<String>,
    pub disclaimer: &'static str,
}

pub fn build_predictions(events: &[RawRecord], now: u64) -> PredictionSet {
    let mut sources_used: Vec<String> = Vec::new();
    for r in events {
        let label = r.source_system.label();
        if !sources_used.iter().any(|s| s == label) {
            sources_used.push(label.to_string());
        }
    }
    PredictionSet {
        predictions: generate_predictions(events, now),
        last_updated: rfc3339(now),
        methodology: "Keyword frequency over the last 24 hours compared with the preceding 48 hours",
        sources_used,
        disclaimer: "Algorithmic assessments from available OSINT data; not a sole basis for decisions.",
    }
}
