//! Enriched event model: categories, severities, locations and the record that carries them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::engine::anon_hash;
use crate::ingest::types::RawRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    ArmedConflict,
    Terrorism,
    PoliticalInstability,
    DiplomaticTensions,
    Humanitarian,
    CyberWarfare,
    MaritimeSecurity,
    HealthEmergency,
    Environmental,
    Economic,
    Geopolitical,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::ArmedConflict => "armed-conflict",
            Category::Terrorism => "terrorism",
            Category::PoliticalInstability => "political-instability",
            Category::DiplomaticTensions => "diplomatic-tensions",
            Category::Humanitarian => "humanitarian",
            Category::CyberWarfare => "cyber-warfare",
            Category::MaritimeSecurity => "maritime-security",
            Category::HealthEmergency => "health-emergency",
            Category::Environmental => "environmental",
            Category::Economic => "economic",
            Category::Geopolitical => "geopolitical",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered most to least severe, so `Critical < Low` under `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// Points used by the composite ranking score.
    pub fn points(&self) -> i32 {
        match self {
            Severity::Critical => 50,
            Severity::High => 35,
            Severity::Medium => 20,
            Severity::Low => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

pub const GLOBAL_LAT: f64 = 20.0;
pub const GLOBAL_LNG: f64 = 0.0;
pub const GLOBAL_COUNTRY: &str = "XX";
pub const GLOBAL_PLACE: &str = "Global";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub country_code: String,
    pub place_name: String,
}

impl Location {
    /// Sentinel returned when no place name matches.
    pub fn global() -> Self {
        Self {
            lat: GLOBAL_LAT,
            lng: GLOBAL_LNG,
            country_code: GLOBAL_COUNTRY.to_string(),
            place_name: GLOBAL_PLACE.to_string(),
        }
    }

    pub fn is_global(&self) -> bool {
        self.country_code == GLOBAL_COUNTRY
    }
}

/// Additive hotspot/topic score plus the label that won the relevance pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relevance {
    pub score: i32,
    pub topic: String,
}

pub const GENERAL_TOPIC: &str = "general";

impl Default for Relevance {
    fn default() -> Self {
        Self {
            score: 0,
            topic: GENERAL_TOPIC.to_string(),
        }
    }
}

/// Everything the classifier derives from `(title, summary)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub category: Category,
    pub severity: Severity,
    pub relevance_score: i32,
    pub relevance_topic: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedEvent {
    pub id: String,
    #[serde(flatten)]
    pub record: RawRecord,
    pub category: Category,
    pub severity: Severity,
    pub location: Location,
    pub relevance_score: i32,
    pub relevance_topic: String,
}

impl EnrichedEvent {
    /// Severity dominates, hotspot/topic relevance breaks ties within a tier.
    pub fn composite_score(&self) -> i32 {
        self.severity.points() * 2 + self.relevance_score
    }

    pub fn title(&self) -> &str {
        &self.record.title
    }

    pub fn url(&self) -> &str {
        &self.record.url
    }
}

/// Short stable id: first 6 bytes of sha256 over the url, or the title when the url is empty.
pub fn event_id(record: &RawRecord) -> String {
    format!("evt-{}", anon_hash(record_key(record)))
}

pub(crate) fn record_key(record: &RawRecord) -> &str {
    if record.url.trim().is_empty() {
        record.title.trim()
    } else {
        record.url.trim()
    }
}
