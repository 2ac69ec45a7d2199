// src/engine.rs
//! Enrichment engine: classifier + locator compiled from a lexicon, plus the signal
//! and military tables from the same file, and a shared handle that can be swapped
//! at runtime when the lexicon file changes.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::{Duration, SystemTime};
use tracing::{info, warn};

use crate::classify::{Classifier, KeywordClassifier};
use crate::event::{event_id, Classification, EnrichedEvent, Location};
use crate::ingest::types::RawRecord;
use crate::lexicon::{Lexicon, SignalTables};
use crate::locate::{Gazetteer, Locator};
use crate::military::MilitaryRules;

pub const DEFAULT_LEXICON_PATH: &str = "config/lexicon.toml";
pub const ENV_LEXICON_PATH: &str = "EVENTS_LEXICON_PATH";

pub(crate) fn is_dev_env() -> bool {
    if cfg!(debug_assertions) {
        return true;
    }
    matches!(
        std::env::var("SHUTTLE_ENV")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "local" | "development" | "dev"
    )
}

// EVENTS_DEV_LOG=1 AND dev env
pub(crate) fn dev_logging_enabled() -> bool {
    std::env::var("EVENTS_DEV_LOG").ok().as_deref() == Some("1") && is_dev_env()
}

pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

fn dev_log_enrichment(ev: &EnrichedEvent) {
    if !dev_logging_enabled() {
        return;
    }
    // Never log raw text.
    let id = anon_hash(&ev.record.title);
    info!(
        target: "enrich",
        %id,
        category = %ev.category,
        severity = ev.severity.as_str(),
        country = %ev.location.country_code,
        relevance = ev.relevance_score,
        topic = %ev.relevance_topic,
    );
}

pub fn lexicon_path() -> PathBuf {
    std::env::var(ENV_LEXICON_PATH)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_LEXICON_PATH))
}

pub struct EnrichmentEngine {
    classifier: Box<dyn Classifier>,
    locator: Box<dyn Locator>,
    signals: SignalTables,
    military: MilitaryRules,
}

impl EnrichmentEngine {
    /// Custom strategies; the signal and military analyses use the builtin tables.
    pub fn with_strategies(classifier: Box<dyn Classifier>, locator: Box<dyn Locator>) -> Self {
        Self {
            classifier,
            locator,
            signals: SignalTables::default(),
            military: MilitaryRules::builtin().clone(),
        }
    }

    pub fn from_lexicon(lexicon: Lexicon) -> Result<Self> {
        let gazetteer = Gazetteer::from_lexicon(&lexicon)?;
        let military = MilitaryRules::from_lexicon(&lexicon)?;
        let signals = lexicon.signals.clone();
        Ok(Self {
            classifier: Box::new(KeywordClassifier::new(lexicon)),
            locator: Box::new(gazetteer),
            signals,
            military,
        })
    }

    pub fn builtin() -> Result<Self> {
        Self::from_lexicon(Lexicon::builtin())
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Self::from_lexicon(Lexicon::from_toml_str(toml_str)?)
    }

    /// `$EVENTS_LEXICON_PATH` or `config/lexicon.toml`; builtin tables when the file is absent.
    /// A file that exists but does not parse is an error.
    pub fn from_toml() -> Result<Self> {
        Self::from_path(&lexicon_path())
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(target: "enrich", path = %path.display(), "lexicon file absent, using builtin");
            return Self::builtin();
        }
        let lexicon = Lexicon::load_from(path)?;
        Self::from_lexicon(lexicon)
            .with_context(|| format!("compiling lexicon from {}", path.display()))
    }

    pub fn classify(&self, title: &str, summary: &str) -> Classification {
        self.classifier.classify(title, summary)
    }

    pub fn locate(&self, text: &str) -> Location {
        self.locator.locate(text)
    }

    pub fn signal_tables(&self) -> &SignalTables {
        &self.signals
    }

    pub fn military_rules(&self) -> &MilitaryRules {
        &self.military
    }

    /// Location is derived from the title alone.
    pub fn enrich(&self, record: RawRecord) -> EnrichedEvent {
        let c = self.classify(&record.title, &record.summary);
        let location = self.locate(&record.title);
        let ev = EnrichedEvent {
            id: event_id(&record),
            record,
            category: c.category,
            severity: c.severity,
            location,
            relevance_score: c.relevance_score,
            relevance_topic: c.relevance_topic,
        };
        dev_log_enrichment(&ev);
        ev
    }

    pub fn enrich_all(&self, records: Vec<RawRecord>) -> Vec<EnrichedEvent> {
        records.into_iter().map(|r| self.enrich(r)).collect()
    }
}

/// Shared, hot-swappable engine.
#[derive(Clone)]
pub struct EngineHandle {
    inner: Arc<RwLock<EnrichmentEngine>>,
}

impl EngineHandle {
    pub fn new(engine: EnrichmentEngine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    pub fn inner(&self) -> Arc<RwLock<EnrichmentEngine>> {
        self.inner.clone()
    }

    /// Runs `f` against the current engine. A poisoned lock still yields the last engine.
    pub fn with<R>(&self, f: impl FnOnce(&EnrichmentEngine) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        f(&guard)
    }

    pub fn classify(&self, title: &str, summary: &str) -> Classification {
        self.with(|e| e.classify(title, summary))
    }

    pub fn locate(&self, text: &str) -> Location {
        self.with(|e| e.locate(text))
    }

    pub fn enrich_all(&self, records: Vec<RawRecord>) -> Vec<EnrichedEvent> {
        self.with(|e| e.enrich_all(records))
    }

    pub fn replace(&self, engine: EnrichmentEngine) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = engine;
    }
}

fn hot_reload_enabled() -> bool {
    std::env::var("EVENTS_HOT_RELOAD").ok().as_deref() == Some("1") && is_dev_env()
}

/// Polls the lexicon file's mtime every 2s and swaps the engine on change.
/// A file that fails to parse leaves the current engine in place.
pub fn start_hot_reload_thread(handle: EngineHandle, path: PathBuf) {
    if !hot_reload_enabled() {
        return;
    }

    thread::spawn(move || {
        let poll = Duration::from_secs(2);
        let mut last_mtime: Option<SystemTime> = None;

        loop {
            if let Ok(mtime) = fs::metadata(&path).and_then(|m| m.modified()) {
                let changed = match last_mtime {
                    None => false,
                    Some(prev) => mtime > prev,
                };
                last_mtime = Some(mtime);
                if changed {
                    match EnrichmentEngine::from_path(&path) {
                        Ok(engine) => {
                            handle.replace(engine);
                            info!(target: "enrich", path = %path.display(), "lexicon reloaded");
                        }
                        Err(e) => {
                            warn!(target: "enrich", error = ?e, "lexicon reload failed; keeping previous");
                        }
                    }
                }
            }
            thread::sleep(poll);
        }
    });
}
