// src/ingest/providers/mod.rs
pub mod gdelt;
pub mod rss;

use std::time::Duration;

use crate::ingest::config::{SourceConfig, SourceKind};
use crate::ingest::types::{SourceProvider, SourceSystem};

pub use gdelt::GdeltProvider;
pub use rss::RssProvider;

/// HTTP-mode provider for one configured source.
pub fn from_config(cfg: &SourceConfig) -> Box<dyn SourceProvider> {
    let system = cfg.system.as_deref().map(SourceSystem::from_label);
    let timeout = cfg.timeout_secs.map(Duration::from_secs);
    match cfg.kind {
        SourceKind::Rss => {
            let mut p = RssProvider::from_url(&cfg.name, &cfg.url);
            if let Some(s) = system {
                p = p.with_system(s);
            }
            if let Some(t) = timeout {
                p = p.with_timeout(t);
            }
            Box::new(p)
        }
        SourceKind::Gdelt => {
            let mut p = GdeltProvider::from_url(&cfg.name, &cfg.url);
            if let Some(s) = system {
                p = p.with_system(s);
            }
            if let Some(t) = timeout {
                p = p.with_timeout(t);
            }
            Box::new(p)
        }
    }
}

pub fn build_all(sources: &[SourceConfig]) -> Vec<Box<dyn SourceProvider>> {
    sources.iter().map(from_config).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_one_provider_per_source() {
        let sources = vec![
            SourceConfig {
                name: "Feed".into(),
                kind: SourceKind::Rss,
                url: "https://feed.test/rss".into(),
                timeout_secs: Some(3),
                system: None,
            },
            SourceConfig {
                name: "Emergency".into(),
                kind: SourceKind::Gdelt,
                url: "https://api.test/doc".into(),
                timeout_secs: None,
                system: Some("GDELT-Emergency".into()),
            },
        ];
        let ps = build_all(&sources);
        assert_eq!(ps.len(), 2);
        assert_eq!(ps[0].name(), "Feed");
        assert_eq!(ps[0].timeout(), Some(Duration::from_secs(3)));
        assert_eq!(ps[1].timeout(), None);
    }
}
