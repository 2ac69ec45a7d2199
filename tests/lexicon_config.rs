// tests/lexicon_config.rs
// Lexicon file loading: env path, absent file fallback, validation errors.

use geo_events_analyzer::engine::{EnrichmentEngine, ENV_LEXICON_PATH};
use geo_events_analyzer::event::{Category, Severity};
use geo_events_analyzer::ingest::types::RawRecord;
use geo_events_analyzer::military::{build_activity, Branch};
use geo_events_analyzer::signals::{build_signals, SignalKind};
use std::{env, fs};

const CUSTOM: &str = r#"
disambiguation = ["Springfield"]

[[categories]]
category = "maritime-security"
keywords = ["FERRY"]

[severity]
critical = ["capsized"]
high = ["stranded"]
medium = []

[[hotspots]]
label = "Lakes"
points = 30
keywords = ["lake"]

[[places]]
name = "Springfield"
lat = 39.78
lng = -89.65
country = "US"
place_name = "Springfield, Illinois"

[[places]]
name = "Field"
lat = 10.0
lng = 10.0
country = "ZZ"
"#;

#[serial_test::serial]
#[test]
fn env_path_replaces_builtin_tables() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("lexicon.toml");
    fs::write(&p, CUSTOM).unwrap();
    env::set_var(ENV_LEXICON_PATH, p.display().to_string());

    let eng = EnrichmentEngine::from_toml().expect("custom lexicon loads");
    env::remove_var(ENV_LEXICON_PATH);

    let c = eng.classify("Ferry capsized on the lake", "");
    // keywords are lowercased on load
    assert_eq!(c.category, Category::MaritimeSecurity);
    assert_eq!(c.severity, Severity::Critical);
    assert_eq!(c.relevance_topic, "Lakes");
    assert_eq!(c.relevance_score, 30);

    // builtin words are gone
    assert_eq!(eng.classify("War in the north", "").category, Category::Geopolitical);

    let loc = eng.locate("Flooding in Springfield");
    assert_eq!(loc.place_name, "Springfield, Illinois");
    assert_eq!(eng.locate("Out in the field").place_name, "Field");
}

#[serial_test::serial]
#[test]
fn absent_file_falls_back_to_builtin() {
    let dir = tempfile::tempdir().unwrap();
    env::set_var(
        ENV_LEXICON_PATH,
        dir.path().join("missing.toml").display().to_string(),
    );
    let eng = EnrichmentEngine::from_toml().expect("builtin fallback");
    env::remove_var(ENV_LEXICON_PATH);

    assert_eq!(
        eng.classify("Massacre reported in region", "").severity,
        Severity::Critical
    );
}

#[test]
fn bad_coordinates_are_rejected_with_place_name() {
    let bad = r#"
[[places]]
name = "Atlantis"
lat = 123.0
lng = 0.0
country = "AT"
"#;
    let err = EnrichmentEngine::from_toml_str(bad).err().expect("should fail");
    assert!(format!("{err:#}").contains("Atlantis"));
}

#[test]
fn disambiguation_must_name_a_place() {
    let bad = r#"
disambiguation = ["Nowhere"]

[[places]]
name = "Somewhere"
lat = 1.0
lng = 1.0
country = "SW"
"#;
    assert!(EnrichmentEngine::from_toml_str(bad).is_err());
}

#[test]
fn unknown_category_is_a_parse_error() {
    let bad = r#"
[[categories]]
category = "weather"
keywords = ["rain"]
"#;
    assert!(EnrichmentEngine::from_toml_str(bad).is_err());
}

const SIBLINGS: &str = r#"
[signals]
high_confidence = ["wire.test"]
medium_confidence = []
academic = ["think tank"]

[[signals.kinds]]
label = "economic"
keywords = ["grain"]

[[signals.regions]]
label = "Black Sea"
keywords = ["odesa"]

[military]
keywords = ["grain convoy"]
exclusions = []
conflict_keywords = []
zones = []

[[military.branches]]
label = "navy"
keywords = ["convoy"]

[[military.intensity]]
label = 0.6
keywords = ["convoy"]
"#;

#[test]
fn sibling_tables_load_from_the_lexicon_file() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("lexicon.toml");
    fs::write(&p, SIBLINGS).unwrap();
    let eng = EnrichmentEngine::from_path(&p).expect("lexicon loads");

    let records = vec![
        RawRecord {
            title: "Grain convoy leaves Odesa".into(),
            source: "wire.test".into(),
            url: "https://wire.test/1".into(),
            ..Default::default()
        },
        RawRecord {
            title: "Grain outlook from a think tank".into(),
            source: "blog.test".into(),
            url: "https://blog.test/2".into(),
            ..Default::default()
        },
    ];

    let set = build_signals(records.clone(), eng.signal_tables(), 0);
    assert_eq!(set.signals.len(), 1);
    assert_eq!(set.signals[0].kind, SignalKind::Economic);
    assert_eq!(set.signals[0].region, "Black Sea");
    assert_eq!(set.signals[0].confidence, 0.9);

    // no [[places]] in the file, so every event stays global and yields no zone
    let events = eng.enrich_all(records);
    assert!(eng.military_rules().is_military_event("grain convoy leaves odesa"));
    assert!(build_activity(&events, eng.military_rules(), 0).zones.is_empty());
    assert_eq!(eng.military_rules().categorize_branch("Grain convoy"), Branch::Navy);
    assert_eq!(eng.military_rules().intensity("grain convoy"), 0.6);
}
