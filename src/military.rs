// src/military.rs
//! Military activity zones: keyword-detected operations placed at the event's
//! location, plus long-running conflict zones once current reporting confirms them.

use anyhow::{anyhow, Result};
use once_cell::sync::OnceCell;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::event::EnrichedEvent;
use crate::lexicon::{
    contains_any, first_label, haystack, ConflictZone, Lexicon, MilitaryTables,
};
use crate::pipeline::rfc3339;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Branch {
    Navy,
    AirForce,
    Army,
    Combined,
}

/// Military tables with the exclusion patterns compiled.
#[derive(Debug, Clone)]
pub struct MilitaryRules {
    tables: MilitaryTables,
    exclusions: Vec<Regex>,
}

impl MilitaryRules {
    pub fn from_tables(tables: MilitaryTables) -> Result<Self> {
        let exclusions = tables
            .exclusions
            .iter()
            .map(|p| Regex::new(p).map_err(|e| anyhow!("military exclusion `{}`: {}", p, e)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { tables, exclusions })
    }

    pub fn from_lexicon(lex: &Lexicon) -> Result<Self> {
        Self::from_tables(lex.military.clone())
    }

    /// Shared instance over the builtin tables.
    pub fn builtin() -> &'static Self {
        static RULES: OnceCell<MilitaryRules> = OnceCell::new();
        RULES.get_or_init(|| {
            Self::from_tables(MilitaryTables::default())
                .expect("builtin military patterns compile")
        })
    }

    pub fn tables(&self) -> &MilitaryTables {
        &self.tables
    }

    /// `text` is the lowercased title + summary.
    pub fn is_military_event(&self, text: &str) -> bool {
        if self.exclusions.iter().any(|re| re.is_match(text)) {
            return false;
        }
        contains_any(text, &self.tables.keywords)
    }

    pub fn categorize_branch(&self, text: &str) -> Branch {
        first_label(&text.to_lowercase(), &self.tables.branches)
            .copied()
            .unwrap_or(Branch::Combined)
    }

    pub fn intensity(&self, text: &str) -> f32 {
        first_label(&text.to_lowercase(), &self.tables.intensity)
            .copied()
            .unwrap_or(DEFAULT_INTENSITY)
    }
}

const DEFAULT_INTENSITY: f32 = 0.5;

fn tracker_url(location: &str) -> String {
    format!("https://www.cfr.org/global-conflict-tracker/?location={location}")
}

/// Persistent zones are skipped when a detected zone sits within this many degrees.
pub const PROXIMITY_DEGREES: f64 = 3.0;
const DEFAULT_ZONE_NAME: &str = "Military Activity Zone";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evidence {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilitaryZone {
    pub id: String,
    pub name: String,
    #[serde(rename = "category")]
    pub branch: Branch,
    pub latitude: f64,
    pub longitude: f64,
    pub intensity: f32,
    pub country: String,
    pub source: String,
    pub title: String,
    pub url: String,
    pub published_at: u64,
    pub persistent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Evidence>,
}

fn zone_from_event(rules: &MilitaryRules, ev: &EnrichedEvent, text: &str) -> MilitaryZone {
    let loc = &ev.location;
    MilitaryZone {
        id: format!("mil-{}", ev.id),
        name: if loc.place_name.trim().is_empty() {
            DEFAULT_ZONE_NAME.to_string()
        } else {
            loc.place_name.clone()
        },
        branch: rules.categorize_branch(text),
        latitude: loc.lat,
        longitude: loc.lng,
        intensity: rules.intensity(text),
        country: loc.country_code.clone(),
        source: if ev.record.source.is_empty() {
            "Unknown".to_string()
        } else {
            ev.record.source.clone()
        },
        title: ev.record.title.clone(),
        url: ev.record.url.clone(),
        published_at: ev.record.published_at,
        persistent: false,
        evidence: None,
    }
}

fn mentions_zone(z: &ConflictZone, ev: &EnrichedEvent, text: &str) -> bool {
    let by_name = z
        .name
        .to_lowercase()
        .split(' ')
        .any(|w| w.chars().count() > 3 && text.contains(w));
    by_name || ev.location.country_code.eq_ignore_ascii_case(&z.country)
}

/// First conflict-related event that mentions the zone, if any.
fn confirming_event<'a>(
    z: &ConflictZone,
    conflict_keywords: &[String],
    events: &'a [EnrichedEvent],
) -> Option<&'a EnrichedEvent> {
    events.iter().find(|ev| {
        let text = haystack(ev.title(), &ev.record.summary);
        mentions_zone(z, ev, &text) && contains_any(&text, conflict_keywords)
    })
}

fn near_any(lat: f64, lng: f64, zones: &[MilitaryZone]) -> bool {
    zones.iter().any(|z| {
        let d = ((z.latitude - lat).powi(2) + (z.longitude - lng).powi(2)).sqrt();
        d < PROXIMITY_DEGREES
    })
}

/// Event zones first (input order), then confirmed persistent zones in table order.
pub fn detect_zones(events: &[EnrichedEvent], rules: &MilitaryRules) -> Vec<MilitaryZone> {
    let mut zones: Vec<MilitaryZone> = events
        .iter()
        .filter(|ev| !ev.location.is_global())
        .filter_map(|ev| {
            let text = haystack(ev.title(), &ev.record.summary);
            rules
                .is_military_event(&text)
                .then(|| zone_from_event(rules, ev, &text))
        })
        .collect();
    let detected = zones.len();

    let tables = rules.tables();
    for z in &tables.zones {
        let Some(ev) = confirming_event(z, &tables.conflict_keywords, events) else {
            continue;
        };
        if near_any(z.lat, z.lng, &zones[..detected]) {
            continue;
        }
        tracing::debug!(target: "military", zone = %z.id, "persistent zone confirmed");
        zones.push(MilitaryZone {
            id: format!("persistent-{}", z.id),
            name: z.name.clone(),
            branch: z.branch,
            latitude: z.lat,
            longitude: z.lng,
            intensity: z.intensity,
            country: z.country.clone(),
            source: "Persistent Conflict Zone".to_string(),
            title: z.title.clone(),
            url: tracker_url(&z.tracker),
            published_at: ev.record.published_at,
            persistent: true,
            evidence: Some(Evidence {
                title: ev.record.title.clone(),
                url: ev.record.url.clone(),
            }),
        });
    }
    zones
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchCounts {
    pub army: usize,
    pub navy: usize,
    pub air_force: usize,
    pub combined: usize,
}

impl BranchCounts {
    fn add(&mut self, b: Branch) {
        match b {
            Branch::Army => self.army += 1,
            Branch::Navy => self.navy += 1,
            Branch::AirForce => self.air_force += 1,
            Branch::Combined => self.combined += 1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilitaryActivity {
    pub zones: Vec<MilitaryZone>,
    pub counts: BranchCounts,
    pub total_zones: usize,
    pub last_updated: String,
    pub data_source: &'static str,
}

pub fn build_activity(
    events: &[EnrichedEvent],
    rules: &MilitaryRules,
    now: u64,
) -> MilitaryActivity {
    let zones = detect_zones(events, rules);
    let mut counts = BranchCounts::default();
    for z in &zones {
        counts.add(z.branch);
    }
    let data_source = if zones.is_empty() {
        "No Military Activity Data"
    } else if zones.iter().any(|z| z.persistent) {
        "OSINT + Confirmed Persistent Zones"
    } else {
        "OSINT Real-Time Analysis"
    };
    MilitaryActivity {
        total_zones: zones.len(),
        zones,
        counts,
        last_updated: rfc3339(now),
        data_source,
    }
}
