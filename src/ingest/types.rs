// src/ingest/types.rs
use anyhow::Result;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// Upstream system a record was pulled from. Drives provenance priority when ranking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SourceSystem {
    Gdelt,
    GdeltEmergency,
    Acled,
    ReliefWeb,
    Wikipedia,
    UnOcha,
    #[default]
    Rss,
    Other(String),
}

impl SourceSystem {
    pub fn label(&self) -> &str {
        match self {
            SourceSystem::Gdelt => "GDELT",
            SourceSystem::GdeltEmergency => "GDELT-Emergency",
            SourceSystem::Acled => "ACLED",
            SourceSystem::ReliefWeb => "ReliefWeb",
            SourceSystem::Wikipedia => "Wikipedia",
            SourceSystem::UnOcha => "UN OCHA",
            SourceSystem::Rss => "RSS",
            SourceSystem::Other(name) => name.as_str(),
        }
    }

    /// Case-insensitive parse; unknown labels are kept verbatim as `Other`.
    pub fn from_label(s: &str) -> Self {
        let t = s.trim();
        match t.to_ascii_lowercase().as_str() {
            "gdelt" => SourceSystem::Gdelt,
            "gdelt-emergency" => SourceSystem::GdeltEmergency,
            "acled" => SourceSystem::Acled,
            "reliefweb" => SourceSystem::ReliefWeb,
            "wikipedia" => SourceSystem::Wikipedia,
            "un ocha" | "un-ocha" | "ocha" => SourceSystem::UnOcha,
            "rss" => SourceSystem::Rss,
            _ => SourceSystem::Other(t.to_string()),
        }
    }
}

impl fmt::Display for SourceSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for SourceSystem {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for SourceSystem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(SourceSystem::from_label(&s))
    }
}

/// One upstream article/news item, normalized by its adapter.
/// Absent text fields deserialize to empty strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub url: String,
    /// unix seconds; 0 when the upstream gave no usable date
    #[serde(default)]
    pub published_at: u64,
    #[serde(default)]
    pub source_system: SourceSystem,
}

#[async_trait::async_trait]
pub trait SourceProvider: Send + Sync {
    async fn fetch_latest(&self) -> Result<Vec<RawRecord>>;
    fn name(&self) -> &str;
    /// Per-branch deadline; `None` uses the fan-out default.
    fn timeout(&self) -> Option<Duration> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_system_labels_roundtrip_through_serde() {
        let v: Vec<SourceSystem> =
            serde_json::from_str(r#"["GDELT","un ocha","ReliefWeb","Some Feed"]"#).unwrap();
        assert_eq!(
            v,
            vec![
                SourceSystem::Gdelt,
                SourceSystem::UnOcha,
                SourceSystem::ReliefWeb,
                SourceSystem::Other("Some Feed".into()),
            ]
        );
        assert_eq!(serde_json::to_string(&v[1]).unwrap(), r#""UN OCHA""#);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let r: RawRecord = serde_json::from_str(r#"{"url":"https://x.test/a"}"#).unwrap();
        assert_eq!(r.title, "");
        assert_eq!(r.summary, "");
        assert_eq!(r.published_at, 0);
        assert_eq!(r.source_system, SourceSystem::Rss);
    }
}
