// src/ingest/providers/gdelt.rs
//! GDELT DOC 2.0 `mode=artlist&format=json` adapter.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime};
use metrics::{counter, histogram};
use serde::Deserialize;
use std::time::Duration;

use crate::ingest::normalize_text;
use crate::ingest::types::{RawRecord, SourceProvider, SourceSystem};

pub const DEFAULT_SOURCE_LABEL: &str = "GDELT";

#[derive(Debug, Deserialize)]
struct ArtList {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    domain: Option<String>,
    /// e.g. `20251009T085320Z`
    #[serde(default)]
    seendate: Option<String>,
    /// RFC 3339, present on some mirrors
    #[serde(default)]
    published: Option<String>,
}

pub(crate) fn parse_seendate_to_unix(s: &str) -> u64 {
    NaiveDateTime::parse_from_str(s.trim(), "%Y%m%dT%H%M%SZ")
        .ok()
        .map(|dt| dt.and_utc().timestamp())
        .and_then(|x| u64::try_from(x).ok())
        .unwrap_or(0)
}

fn parse_rfc3339_to_unix(s: &str) -> u64 {
    DateTime::parse_from_rfc3339(s.trim())
        .ok()
        .and_then(|dt| u64::try_from(dt.timestamp()).ok())
        .unwrap_or(0)
}

enum Mode {
    Fixture(String),
    Http { url: String, client: reqwest::Client },
}

pub struct GdeltProvider {
    name: String,
    system: SourceSystem,
    timeout: Option<Duration>,
    mode: Mode,
}

impl GdeltProvider {
    pub fn from_fixture_str(name: &str, json: &str) -> Self {
        Self {
            name: name.to_string(),
            system: SourceSystem::Gdelt,
            timeout: None,
            mode: Mode::Fixture(json.to_string()),
        }
    }

    /// `url` is the full DOC API query, e.g.
    /// `https://api.gdeltproject.org/api/v2/doc/doc?query=...&mode=artlist&format=json`.
    pub fn from_url(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            system: SourceSystem::Gdelt,
            timeout: None,
            mode: Mode::Http {
                url: url.to_string(),
                client: reqwest::Client::new(),
            },
        }
    }

    pub fn with_system(mut self, system: SourceSystem) -> Self {
        self.system = system;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn parse_articles_from_str(&self, s: &str) -> Result<Vec<RawRecord>> {
        let t0 = std::time::Instant::now();
        // GDELT answers an empty result set with an empty body.
        if s.trim().is_empty() {
            return Ok(Vec::new());
        }
        let list: ArtList = serde_json::from_str(s)
            .with_context(|| format!("parsing gdelt artlist for {}", self.name))?;

        let out: Vec<RawRecord> = list
            .articles
            .into_iter()
            .map(|a| {
                let published_at = a
                    .seendate
                    .as_deref()
                    .map(parse_seendate_to_unix)
                    .filter(|ts| *ts > 0)
                    .or_else(|| a.published.as_deref().map(parse_rfc3339_to_unix))
                    .unwrap_or(0);
                let source = a
                    .domain
                    .map(|d| d.trim().to_string())
                    .filter(|d| !d.is_empty())
                    .unwrap_or_else(|| DEFAULT_SOURCE_LABEL.to_string());
                RawRecord {
                    title: normalize_text(a.title.as_deref().unwrap_or_default()),
                    summary: normalize_text(a.summary.as_deref().unwrap_or_default()),
                    source,
                    url: a.url.map(|u| u.trim().to_string()).unwrap_or_default(),
                    published_at,
                    source_system: self.system.clone(),
                }
            })
            .collect();

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("ingest_parse_ms").record(ms);
        counter!("ingest_events_total").increment(out.len() as u64);
        Ok(out)
    }
}

#[async_trait]
impl SourceProvider for GdeltProvider {
    async fn fetch_latest(&self) -> Result<Vec<RawRecord>> {
        match &self.mode {
            Mode::Fixture(s) => self.parse_articles_from_str(s),
            Mode::Http { url, client } => {
                let body = client
                    .get(url.as_str())
                    .send()
                    .await
                    .with_context(|| format!("gdelt http get() {}", url))?
                    .error_for_status()
                    .context("gdelt http status")?
                    .text()
                    .await
                    .context("gdelt http .text()")?;
                self.parse_articles_from_str(&body)
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
