// src/config/pipeline.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, path::PathBuf};

use crate::dedup::DedupConfig;

pub const ENV_RETENTION_DAYS: &str = "EVENTS_RETENTION_DAYS";
pub const ENV_PAGE_SIZE: &str = "EVENTS_PAGE_SIZE";

const MAX_PAGE_SIZE: usize = 500;

fn default_retention_days() -> u64 {
    14
}
fn default_page_size() -> usize {
    50
}
fn default_branch_timeout_secs() -> u64 {
    15
}

fn default_provenance_priority() -> Vec<String> {
    [
        "GDELT",
        "ACLED",
        "ReliefWeb",
        "GDELT-Emergency",
        "Wikipedia",
        "UN OCHA",
        "RSS",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_blocklist() -> Vec<String> {
    [
        "university",
        "college",
        "academic",
        "research",
        "seduction",
        "dating",
        "romance",
        "relationship advice",
        "horoscope",
        "astrology",
        "lottery",
        "prize winner",
        "clickbait",
        "viral trend",
        "blogspot",
        "wordpress",
        "medium.com",
        "substack.com",
        "tumblr",
        "newsletter",
        "youtube.com",
        "youtu.be",
        "facebook.com",
        "twitter.com",
        "instagram.com",
        "tiktok",
        "reddit",
        "pinterest",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Records older than this are dropped; undated records are kept.
    #[serde(default = "default_retention_days")]
    pub retention_days: u64,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default)]
    pub dedup: DedupConfig,
    /// Source-system labels, most trusted first. Unlisted systems rank last.
    #[serde(default = "default_provenance_priority")]
    pub provenance_priority: Vec<String>,
    /// Lowercase substrings matched against source name and url.
    #[serde(default = "default_blocklist")]
    pub blocklist: Vec<String>,
    #[serde(default = "default_branch_timeout_secs")]
    pub branch_timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            retention_days: default_retention_days(),
            page_size: default_page_size(),
            dedup: DedupConfig::default(),
            provenance_priority: default_provenance_priority(),
            blocklist: default_blocklist(),
            branch_timeout_secs: default_branch_timeout_secs(),
        }
    }
}

impl PipelineConfig {
    /// TOML or JSON by extension.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading pipeline config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let cfg: PipelineConfig = match ext.as_str() {
            "toml" => toml::from_str(&data).context("parsing pipeline TOML")?,
            "json" => serde_json::from_str(&data).context("parsing pipeline JSON")?,
            other => return Err(anyhow!("unsupported pipeline config format: {other:?}")),
        };
        Ok(cfg.sanitized())
    }

    /// `config/pipeline.toml` → `config/pipeline.json` → defaults, then env overrides.
    pub fn load_default() -> Result<Self> {
        let mut cfg = ["config/pipeline.toml", "config/pipeline.json"]
            .iter()
            .map(PathBuf::from)
            .find(|p| p.exists())
            .map(Self::load_from_file)
            .transpose()?
            .unwrap_or_default();
        cfg.apply_env();
        Ok(cfg.sanitized())
    }

    fn apply_env(&mut self) {
        if let Some(d) = parse_env::<u64>(ENV_RETENTION_DAYS) {
            self.retention_days = d;
        }
        if let Some(n) = parse_env::<usize>(ENV_PAGE_SIZE) {
            self.page_size = n;
        }
    }

    pub fn sanitized(mut self) -> Self {
        if self.retention_days == 0 {
            self.retention_days = default_retention_days();
        }
        self.page_size = self.page_size.clamp(1, MAX_PAGE_SIZE);
        if self.branch_timeout_secs == 0 {
            self.branch_timeout_secs = default_branch_timeout_secs();
        }
        self.dedup = self.dedup.sanitized();
        self.blocklist = self
            .blocklist
            .into_iter()
            .map(|b| b.trim().to_lowercase())
            .filter(|b| !b.is_empty())
            .collect();
        self.provenance_priority.retain(|p| !p.trim().is_empty());
        self
    }

    pub fn retention_secs(&self) -> u64 {
        self.retention_days.saturating_mul(86_400)
    }

    /// Copy with a different retention window (the `/events` view uses 7 days).
    pub fn with_retention_days(&self, days: u64) -> Self {
        let mut c = self.clone();
        c.retention_days = days.max(1);
        c
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|s| s.trim().parse::<T>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let c = PipelineConfig::default();
        assert_eq!(c.retention_days, 14);
        assert_eq!(c.page_size, 50);
        assert_eq!(c.provenance_priority[0], "GDELT");
        assert!(c.blocklist.iter().any(|b| b == "youtube.com"));
        assert_eq!(c.retention_secs(), 14 * 86_400);
    }

    #[test]
    fn partial_toml_fills_defaults_and_sanitizes() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("pipeline.toml");
        fs::write(
            &p,
            r#"
page_size = 0
blocklist = [" Spam.Example ", ""]

[dedup]
jaccard_threshold = 0.5
"#,
        )
        .unwrap();
        let c = PipelineConfig::load_from_file(&p).unwrap();
        assert_eq!(c.page_size, 1);
        assert_eq!(c.retention_days, 14);
        assert_eq!(c.blocklist, vec!["spam.example".to_string()]);
        assert_eq!(c.dedup.jaccard_threshold, 0.5);
        assert_eq!(c.dedup.containment_ratio, 0.7);
    }

    #[test]
    fn json_is_accepted_and_unknown_ext_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("pipeline.json");
        fs::write(&p, r#"{"retention_days": 3}"#).unwrap();
        assert_eq!(PipelineConfig::load_from_file(&p).unwrap().retention_days, 3);

        let bad = dir.path().join("pipeline.yaml");
        fs::write(&bad, "retention_days: 3").unwrap();
        assert!(PipelineConfig::load_from_file(&bad).is_err());
    }

    #[serial_test::serial]
    #[test]
    fn env_overrides_apply() {
        let old = env::current_dir().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        env::set_current_dir(tmp.path()).unwrap();

        env::set_var(ENV_PAGE_SIZE, "7");
        env::set_var(ENV_RETENTION_DAYS, "not-a-number");
        let c = PipelineConfig::load_default().unwrap();
        assert_eq!(c.page_size, 7);
        assert_eq!(c.retention_days, 14);
        env::remove_var(ENV_PAGE_SIZE);
        env::remove_var(ENV_RETENTION_DAYS);

        env::set_current_dir(&old).unwrap();
    }
}
