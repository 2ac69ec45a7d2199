// src/lexicon/mod.rs
//! Keyword tables behind classification and geolocation.
//!
//! A `Lexicon` is plain data: ordered category rules, severity tiers, scored topic
//! groups and an ordered place table, plus the keyword tables of the signal and
//! military analyses. The builtin tables live in [`builtin`]; a TOML file with the
//! same shape replaces them. The `[signals]` and `[military]` sections fall back to
//! the builtin tables when absent.

pub mod builtin;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::event::Category;
use crate::military::Branch;
use crate::signals::SignalKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: Category,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeverityTiers {
    #[serde(default)]
    pub critical: Vec<String>,
    #[serde(default)]
    pub high: Vec<String>,
    #[serde(default)]
    pub medium: Vec<String>,
}

/// Labelled keyword group worth `points` when any keyword occurs in the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicGroup {
    pub label: String,
    pub points: i32,
    pub keywords: Vec<String>,
}

impl TopicGroup {
    pub fn matches(&self, text_lower: &str) -> bool {
        contains_any(text_lower, &self.keywords)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub country: String,
    /// Display name; defaults to `name`.
    #[serde(default)]
    pub place_name: Option<String>,
}

impl Place {
    pub fn display_name(&self) -> &str {
        self.place_name.as_deref().unwrap_or(&self.name)
    }
}

/// Keyword list tagged with the label it selects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordGroup<L> {
    pub label: L,
    pub keywords: Vec<String>,
}

/// Keyword tables of the signal feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalTables {
    /// First matching kind wins; `general` otherwise.
    pub kinds: Vec<KeywordGroup<SignalKind>>,
    pub high_confidence: Vec<String>,
    pub medium_confidence: Vec<String>,
    /// First matching region wins; `Global` otherwise.
    pub regions: Vec<KeywordGroup<String>>,
    pub academic: Vec<String>,
}

impl Default for SignalTables {
    fn default() -> Self {
        builtin::signal_tables()
    }
}

/// Long-running conflict area that is reported once current events confirm it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictZone {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub intensity: f32,
    pub country: String,
    pub title: String,
    /// `location=` parameter of the conflict tracker link
    pub tracker: String,
    pub branch: Branch,
}

/// Keyword tables and zone list of the military activity analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilitaryTables {
    pub keywords: Vec<String>,
    /// Regexes for commentary about the military; a hit vetoes the keywords.
    pub exclusions: Vec<String>,
    /// First matching branch wins; `combined` otherwise.
    pub branches: Vec<KeywordGroup<Branch>>,
    /// First matching tier wins; 0.5 otherwise.
    pub intensity: Vec<KeywordGroup<f32>>,
    pub conflict_keywords: Vec<String>,
    /// Ordered.
    pub zones: Vec<ConflictZone>,
}

impl Default for MilitaryTables {
    fn default() -> Self {
        builtin::military_tables()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lexicon {
    /// Scanned in order; first rule with a hit wins.
    #[serde(default)]
    pub categories: Vec<CategoryRule>,
    #[serde(default)]
    pub severity: SeverityTiers,
    /// Only the first matching hotspot scores.
    #[serde(default)]
    pub hotspots: Vec<TopicGroup>,
    #[serde(default)]
    pub high_topics: Vec<TopicGroup>,
    #[serde(default)]
    pub medium_topics: Vec<TopicGroup>,
    /// Place names checked before the main table.
    #[serde(default)]
    pub disambiguation: Vec<String>,
    /// Ordered; first match wins.
    #[serde(default)]
    pub places: Vec<Place>,
    #[serde(default)]
    pub signals: SignalTables,
    #[serde(default)]
    pub military: MilitaryTables,
}

impl Lexicon {
    pub fn builtin() -> Self {
        builtin::lexicon()
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let lex: Lexicon = toml::from_str(s).context("parsing lexicon TOML")?;
        lex.sanitize()
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading lexicon from {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("invalid lexicon in {}", path.display()))
    }

    /// Lowercases keywords, drops empty ones and rejects out-of-range coordinates.
    /// Leading/trailing spaces inside a keyword are significant and kept.
    fn sanitize(mut self) -> Result<Self> {
        for rule in &mut self.categories {
            clean_keywords(&mut rule.keywords);
        }
        clean_keywords(&mut self.severity.critical);
        clean_keywords(&mut self.severity.high);
        clean_keywords(&mut self.severity.medium);
        for g in self
            .hotspots
            .iter_mut()
            .chain(self.high_topics.iter_mut())
            .chain(self.medium_topics.iter_mut())
        {
            clean_keywords(&mut g.keywords);
        }
        self.disambiguation.retain(|n| !n.trim().is_empty());
        for p in &self.places {
            if p.name.trim().is_empty() {
                bail!("place with empty name");
            }
            check_coordinates(&p.name, p.lat, p.lng)?;
        }

        let sig = &mut self.signals;
        for g in &mut sig.kinds {
            clean_keywords(&mut g.keywords);
        }
        for g in &mut sig.regions {
            clean_keywords(&mut g.keywords);
        }
        clean_keywords(&mut sig.high_confidence);
        clean_keywords(&mut sig.medium_confidence);
        clean_keywords(&mut sig.academic);

        let mil = &mut self.military;
        clean_keywords(&mut mil.keywords);
        clean_keywords(&mut mil.conflict_keywords);
        for g in &mut mil.branches {
            clean_keywords(&mut g.keywords);
        }
        for g in &mut mil.intensity {
            clean_keywords(&mut g.keywords);
        }
        mil.exclusions.retain(|p| !p.trim().is_empty());
        for z in &mil.zones {
            check_coordinates(&z.id, z.lat, z.lng)?;
        }
        Ok(self)
    }
}

fn check_coordinates(name: &str, lat: f64, lng: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        bail!("place `{}` has out-of-range coordinates", name);
    }
    Ok(())
}

fn clean_keywords(list: &mut Vec<String>) {
    for k in list.iter_mut() {
        *k = k.to_lowercase();
    }
    list.retain(|k| !k.trim().is_empty());
}

/// Substring test against an already-lowercased haystack.
pub fn contains_any<S: AsRef<str>>(text_lower: &str, keywords: &[S]) -> bool {
    keywords.iter().any(|k| text_lower.contains(k.as_ref()))
}

/// Label of the first group whose keywords hit `text_lower`.
pub fn first_label<'a, L>(text_lower: &str, groups: &'a [KeywordGroup<L>]) -> Option<&'a L> {
    groups
        .iter()
        .find(|g| contains_any(text_lower, &g.keywords))
        .map(|g| &g.label)
}

/// Lowercased `"{title} {summary}"`, the haystack every keyword pass runs over.
pub fn haystack(title: &str, summary: &str) -> String {
    format!("{} {}", title, summary).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_have_expected_shape() {
        let lex = Lexicon::builtin();
        assert_eq!(lex.categories.len(), 10);
        assert_eq!(lex.categories[0].category, Category::ArmedConflict);
        assert_eq!(lex.hotspots.len(), 5);
        assert_eq!(lex.hotspots[0].label, "Ukraine-Russia");
        assert_eq!(lex.places[0].name, "Indiana");
        assert!(lex.places.len() > 70);
        // "India" must come after "Indiana" in the ordered table.
        let indiana = lex.places.iter().position(|p| p.name == "Indiana").unwrap();
        let india = lex.places.iter().position(|p| p.name == "India").unwrap();
        assert!(indiana < india);
    }

    #[test]
    fn toml_roundtrip_keeps_order_and_lowercases() {
        let toml_src = r#"
            disambiguation = ["Georgia"]

            [[categories]]
            category = "cyber-warfare"
            keywords = ["Ransomware", ""]

            [severity]
            critical = ["Meltdown"]

            [[hotspots]]
            label = "Caucasus"
            points = 20
            keywords = ["Tbilisi"]

            [[places]]
            name = "Georgia"
            lat = 42.3154
            lng = 43.3569
            country = "GE"
        "#;
        let lex = Lexicon::from_toml_str(toml_src).unwrap();
        assert_eq!(lex.categories[0].keywords, vec!["ransomware".to_string()]);
        assert_eq!(lex.severity.critical, vec!["meltdown".to_string()]);
        assert!(lex.severity.high.is_empty());
        assert_eq!(lex.hotspots[0].keywords, vec!["tbilisi".to_string()]);
        assert_eq!(lex.places[0].display_name(), "Georgia");
    }

    #[test]
    fn rejects_bad_coordinates() {
        let toml_src = r#"
            [[places]]
            name = "Nowhere"
            lat = 123.0
            lng = 0.0
            country = "ZZ"
        "#;
        let err = Lexicon::from_toml_str(toml_src).unwrap_err();
        assert!(format!("{err:#}").contains("Nowhere"));
    }

    #[test]
    fn first_label_takes_first_group() {
        let group = |label: &str, kws: &[&str]| KeywordGroup {
            label: label.to_string(),
            keywords: kws.iter().map(|k| k.to_string()).collect(),
        };
        let groups = vec![group("a", &["x", "y"]), group("b", &["y"])];
        assert_eq!(first_label("zzy", &groups).map(String::as_str), Some("a"));
        assert_eq!(first_label("zzz", &groups), None);
    }

    #[test]
    fn sibling_sections_default_to_builtin() {
        let lex = Lexicon::from_toml_str("disambiguation = []").unwrap();
        assert_eq!(lex.signals, SignalTables::default());
        assert_eq!(lex.military.zones.len(), 22);
        assert!(lex.military.keywords.iter().any(|k| k == "airstrike"));
    }

    #[test]
    fn sibling_sections_are_overridable() {
        let toml_src = r#"
            [signals]
            high_confidence = ["Wire.Test"]
            medium_confidence = []
            academic = []

            [[signals.kinds]]
            label = "strategic"
            keywords = ["Satellite"]

            [[signals.regions]]
            label = "Arctic"
            keywords = ["svalbard"]

            [military]
            keywords = ["Convoy"]
            exclusions = ['(?i)convoy\s+of\s+aid']
            conflict_keywords = []
            zones = []

            [[military.branches]]
            label = "navy"
            keywords = ["fjord"]

            [[military.intensity]]
            label = 0.8
            keywords = ["convoy"]
        "#;
        let lex = Lexicon::from_toml_str(toml_src).unwrap();
        assert_eq!(lex.signals.high_confidence, vec!["wire.test".to_string()]);
        assert_eq!(lex.signals.kinds[0].label, SignalKind::Strategic);
        assert_eq!(lex.signals.kinds[0].keywords, vec!["satellite".to_string()]);
        assert_eq!(lex.military.keywords, vec!["convoy".to_string()]);
        assert_eq!(lex.military.branches[0].label, Branch::Navy);
        assert_eq!(lex.military.intensity[0].label, 0.8);
    }

    #[test]
    fn rejects_zone_with_bad_coordinates() {
        let mut lex = Lexicon::builtin();
        lex.military.zones[0].lat = 95.0;
        let err = lex.sanitize().unwrap_err();
        assert!(format!("{err:#}").contains("ukraine-east"));
    }
}
