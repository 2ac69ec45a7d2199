// src/classify.rs
//! Keyword classification: category, severity and relevance over `"{title} {summary}"`.
//!
//! Matching is plain lowercase substring search, so "war" also hits "warning".
//! Every function is total: empty text falls through to the default branch.

use crate::event::{Category, Classification, Relevance, Severity, GENERAL_TOPIC};
use crate::lexicon::{contains_any, haystack, Lexicon};

/// First category rule with any keyword hit, else `Geopolitical`.
pub fn categorize(lex: &Lexicon, title: &str, summary: &str) -> Category {
    categorize_text(lex, &haystack(title, summary))
}

fn categorize_text(lex: &Lexicon, text: &str) -> Category {
    lex.categories
        .iter()
        .find(|rule| contains_any(text, &rule.keywords))
        .map(|rule| rule.category)
        .unwrap_or(Category::Geopolitical)
}

/// Tiers are checked critical → high → medium; first hit wins, default `Low`.
pub fn estimate_severity(lex: &Lexicon, title: &str, summary: &str) -> Severity {
    severity_text(lex, &haystack(title, summary))
}

fn severity_text(lex: &Lexicon, text: &str) -> Severity {
    let tiers = &lex.severity;
    if contains_any(text, &tiers.critical) {
        Severity::Critical
    } else if contains_any(text, &tiers.high) {
        Severity::High
    } else if contains_any(text, &tiers.medium) {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Additive score: first matching hotspot, then every matching high and medium topic.
/// The topic label is the first group that scored.
pub fn assess_relevance(lex: &Lexicon, title: &str, summary: &str) -> Relevance {
    relevance_text(lex, &haystack(title, summary))
}

fn relevance_text(lex: &Lexicon, text: &str) -> Relevance {
    let mut rel = Relevance::default();

    if let Some(h) = lex.hotspots.iter().find(|g| g.matches(text)) {
        rel.score += h.points;
        rel.topic = h.label.clone();
    }

    for g in lex.high_topics.iter().chain(lex.medium_topics.iter()) {
        if g.matches(text) {
            rel.score += g.points;
            if rel.topic == GENERAL_TOPIC {
                rel.topic = g.label.clone();
            }
        }
    }
    rel
}

/// Strategy seam for classification; the keyword tables are the baseline.
pub trait Classifier: Send + Sync {
    fn classify(&self, title: &str, summary: &str) -> Classification;
}

#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    lexicon: Lexicon,
}

impl KeywordClassifier {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }
}

impl Classifier for KeywordClassifier {
    fn classify(&self, title: &str, summary: &str) -> Classification {
        let text = haystack(title, summary);
        let rel = relevance_text(&self.lexicon, &text);
        Classification {
            category: categorize_text(&self.lexicon, &text),
            severity: severity_text(&self.lexicon, &text),
            relevance_score: rel.score,
            relevance_topic: rel.topic,
        }
    }
}
