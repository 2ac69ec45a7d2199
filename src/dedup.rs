// src/dedup.rs
//! Cross-source duplicate removal. First-seen wins.

use once_cell::sync::OnceCell;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::event::EnrichedEvent;
use crate::ingest::types::RawRecord;

/// Anything with a title and a link can be deduplicated.
pub trait Headline {
    fn headline(&self) -> &str;
    fn link(&self) -> &str;
}

impl Headline for RawRecord {
    fn headline(&self) -> &str {
        &self.title
    }
    fn link(&self) -> &str {
        &self.url
    }
}

impl Headline for EnrichedEvent {
    fn headline(&self) -> &str {
        &self.record.title
    }
    fn link(&self) -> &str {
        &self.record.url
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    /// shorter/longer length ratio when one normalized title contains the other
    pub containment_ratio: f64,
    /// word-set Jaccard (words longer than 2 chars)
    pub jaccard_threshold: f64,
    /// key-phrase intersection relative to the smaller phrase set
    pub key_phrase_overlap: f64,
    /// URLs this short or shorter are not trusted as identity
    pub min_url_len: usize,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            containment_ratio: 0.7,
            jaccard_threshold: 0.6,
            key_phrase_overlap: 0.7,
            min_url_len: 10,
        }
    }
}

impl DedupConfig {
    pub fn sanitized(mut self) -> Self {
        let d = Self::default();
        self.containment_ratio = clamp_ratio(self.containment_ratio, d.containment_ratio);
        self.jaccard_threshold = clamp_ratio(self.jaccard_threshold, d.jaccard_threshold);
        self.key_phrase_overlap = clamp_ratio(self.key_phrase_overlap, d.key_phrase_overlap);
        self
    }
}

fn clamp_ratio(v: f64, fallback: f64) -> f64 {
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        fallback
    }
}

const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "as", "is", "was", "are", "were", "been", "be", "have", "has", "had", "do", "does",
    "did", "will", "would", "could", "should", "may", "might", "must", "shall", "can", "this",
    "that", "these", "those", "it", "its", "they", "them", "their", "we", "our", "you", "your",
    "he", "she", "him", "her", "his", "hers", "what", "which", "who", "when", "where", "why",
    "how", "all", "each", "every", "both", "few", "more", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very", "just", "also",
];

const MAX_KEY_WORDS: usize = 8;
const MIN_KEY_LEN: usize = 10;

fn strip_non_alnum(s: &str) -> String {
    static RE: OnceCell<Regex> = OnceCell::new();
    let re = RE.get_or_init(|| Regex::new(r"[^a-z0-9\s]").unwrap());
    re.replace_all(&s.to_lowercase(), "").to_string()
}

/// Lowercase, drop everything but `[a-z0-9]` and whitespace, collapse whitespace, trim.
pub fn normalize_title(title: &str) -> String {
    strip_non_alnum(title)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Up to 8 non-stopword words longer than 3 chars, sorted and comma-joined.
pub fn key_phrases(title: &str) -> String {
    let mut words: Vec<String> = strip_non_alnum(title)
        .split_whitespace()
        .filter(|w| w.len() > 3 && !STOPWORDS.contains(w))
        .take(MAX_KEY_WORDS)
        .map(str::to_string)
        .collect();
    words.sort();
    words.join(",")
}

fn word_set(norm: &str) -> HashSet<&str> {
    norm.split(' ').filter(|w| w.len() > 2).collect()
}

/// Exact, containment, then word-overlap similarity over normalized titles.
pub fn is_similar_title(a: &str, b: &str, cfg: &DedupConfig) -> bool {
    similar_normalized(&normalize_title(a), &normalize_title(b), cfg)
}

fn similar_normalized(n1: &str, n2: &str, cfg: &DedupConfig) -> bool {
    if n1 == n2 {
        return true;
    }

    if n1.contains(n2) || n2.contains(n1) {
        let (shorter, longer) = if n1.len() < n2.len() { (n1, n2) } else { (n2, n1) };
        return shorter.len() as f64 / longer.len() as f64 >= cfg.containment_ratio;
    }

    let w1 = word_set(n1);
    let w2 = word_set(n2);
    if !w1.is_empty() && !w2.is_empty() {
        let inter = w1.intersection(&w2).count();
        let union = w1.union(&w2).count();
        if inter as f64 / union as f64 >= cfg.jaccard_threshold {
            return true;
        }
    }
    false
}

fn phrases_overlap(a: &str, b: &str, cfg: &DedupConfig) -> bool {
    let p1: HashSet<&str> = a.split(',').collect();
    let p2: HashSet<&str> = b.split(',').collect();
    let inter = p1.intersection(&p2).count();
    inter as f64 >= p1.len().min(p2.len()) as f64 * cfg.key_phrase_overlap
}

struct Seen {
    norm: String,
    phrase: String,
}

/// Incremental first-seen-wins filter.
pub struct Deduplicator<'a> {
    cfg: &'a DedupConfig,
    urls: HashSet<String>,
    seen: Vec<Seen>,
}

impl<'a> Deduplicator<'a> {
    pub fn new(cfg: &'a DedupConfig) -> Self {
        Self {
            cfg,
            urls: HashSet::new(),
            seen: Vec::new(),
        }
    }

    /// Returns true and remembers the item when it is new; false for a duplicate.
    pub fn admit<H: Headline + ?Sized>(&mut self, item: &H) -> bool {
        let url = item.link().trim();
        if url.len() > self.cfg.min_url_len && self.urls.contains(url) {
            return false;
        }

        let norm = normalize_title(item.headline());
        if self
            .seen
            .iter()
            .any(|s| similar_normalized(&norm, &s.norm, self.cfg))
        {
            return false;
        }

        let phrase = key_phrases(item.headline());
        if phrase.len() > MIN_KEY_LEN
            && self
                .seen
                .iter()
                .any(|s| phrases_overlap(&phrase, &s.phrase, self.cfg))
        {
            return false;
        }

        if !url.is_empty() {
            self.urls.insert(url.to_string());
        }
        self.seen.push(Seen { norm, phrase });
        true
    }
}

/// Keeps the first of each duplicate group in input order. Returns (kept, dropped).
pub fn dedup<T: Headline>(items: Vec<T>, cfg: &DedupConfig) -> (Vec<T>, usize) {
    let mut d = Deduplicator::new(cfg);
    let before = items.len();
    let kept: Vec<T> = items.into_iter().filter(|it| d.admit(it)).collect();
    let dropped = before - kept.len();
    (kept, dropped)
}
