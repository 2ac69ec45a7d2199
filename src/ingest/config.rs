// src/ingest/config.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const ENV_PATH: &str = "EVENTS_SOURCES_PATH";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Rss,
    Gdelt,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub kind: SourceKind,
    pub url: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Provenance label override (e.g. "GDELT-Emergency", "ReliefWeb").
    #[serde(default)]
    pub system: Option<String>,
}

/// Load source list from an explicit path. Supports TOML or JSON formats.
pub fn load_sources_from(path: &Path) -> Result<Vec<SourceConfig>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading sources from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_sources(&content, ext.as_str())
}

/// Load sources using env var + fallbacks:
/// 1) $EVENTS_SOURCES_PATH
/// 2) config/sources.toml
/// 3) config/sources.json
pub fn load_sources_default() -> Result<Vec<SourceConfig>> {
    if let Ok(p) = std::env::var(ENV_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_sources_from(&pb);
        } else {
            return Err(anyhow!("EVENTS_SOURCES_PATH points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from("config/sources.toml");
    if toml_p.exists() {
        return load_sources_from(&toml_p);
    }
    let json_p = PathBuf::from("config/sources.json");
    if json_p.exists() {
        return load_sources_from(&json_p);
    }
    Ok(Vec::new())
}

#[derive(Deserialize)]
struct SourcesDoc {
    #[serde(default)]
    sources: Vec<SourceConfig>,
}

fn parse_sources(s: &str, hint_ext: &str) -> Result<Vec<SourceConfig>> {
    if hint_ext == "toml" {
        let doc: SourcesDoc = toml::from_str(s).context("parsing sources TOML")?;
        return Ok(clean_list(doc.sources));
    }
    // JSON: bare array or {"sources": [...]}
    if let Ok(v) = serde_json::from_str::<Vec<SourceConfig>>(s) {
        return Ok(clean_list(v));
    }
    if let Ok(doc) = serde_json::from_str::<SourcesDoc>(s) {
        return Ok(clean_list(doc.sources));
    }
    if let Ok(doc) = toml::from_str::<SourcesDoc>(s) {
        return Ok(clean_list(doc.sources));
    }
    Err(anyhow!("unsupported sources format"))
}

/// Trims names/urls, drops entries without both, keeps the first entry per name.
fn clean_list(items: Vec<SourceConfig>) -> Vec<SourceConfig> {
    use std::collections::BTreeSet;
    let mut names = BTreeSet::new();
    let mut out = Vec::with_capacity(items.len());
    for mut it in items {
        it.name = it.name.trim().to_string();
        it.url = it.url.trim().to_string();
        if it.name.is_empty() || it.url.is_empty() {
            continue;
        }
        if it.timeout_secs == Some(0) {
            it.timeout_secs = None;
        }
        if names.insert(it.name.to_ascii_lowercase()) {
            out.push(it);
        }
    }
    out
}
