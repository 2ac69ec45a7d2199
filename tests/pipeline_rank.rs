// tests/pipeline_rank.rs
// End-to-end enrich_and_rank behaviour on mixed input.

use geo_events_analyzer::config::PipelineConfig;
use geo_events_analyzer::engine::EnrichmentEngine;
use geo_events_analyzer::event::Severity;
use geo_events_analyzer::ingest::types::{RawRecord, SourceSystem};
use geo_events_analyzer::pipeline::{enrich_and_rank, NO_DATA};

const NOW: u64 = 1_760_000_000;

fn rec(title: &str, url: &str, system: SourceSystem) -> RawRecord {
    RawRecord {
        title: title.into(),
        url: url.into(),
        source: "wire.test".into(),
        published_at: NOW - 7_200,
        source_system: system,
        ..Default::default()
    }
}

fn mixed() -> Vec<RawRecord> {
    let mut strike = rec("Airstrike in Gaza", "https://g.test/strike", SourceSystem::Gdelt);
    strike.summary = "civilians killed".into();
    let calm = rec("Farmers harvest early crop", "https://g.test/crop", SourceSystem::Gdelt);
    let massacre = rec(
        "Massacre reported in region",
        "https://acled.test/1",
        SourceSystem::Acled,
    );
    let blog = rec(
        "Genocide warning issued for valley",
        "https://blog.test/valley",
        SourceSystem::Other("Blog".into()),
    );
    let dup = rec("AIRSTRIKE IN GAZA", "https://other.test/copy", SourceSystem::Rss);
    let mut video = rec("Riots erupt in capital", "https://youtube.com/watch?v=1", SourceSystem::Rss);
    video.source = "youtube.com".into();
    let mut stale = rec("Old border dispute flares", "https://g.test/old", SourceSystem::Gdelt);
    stale.published_at = NOW - 30 * 86_400;
    let cyrillic = rec("Взрыв в Москве", "https://ru.test/1", SourceSystem::Gdelt);

    vec![blog, calm, dup.clone(), massacre, video, strike, stale, cyrillic, dup]
}

#[test]
fn provenance_then_score_ordering() {
    let eng = EnrichmentEngine::builtin().unwrap();
    let out = enrich_and_rank(mixed(), &eng, &PipelineConfig::default(), NOW);

    let titles: Vec<&str> = out.events.iter().map(|e| e.title()).collect();
    // the RSS copy of the strike story arrives before the GDELT original and wins dedup
    assert_eq!(
        titles,
        vec![
            "Farmers harvest early crop",
            "Massacre reported in region",
            "AIRSTRIKE IN GAZA",
            "Genocide warning issued for valley",
        ]
    );
    assert_eq!(out.total_count, 4);
    assert_eq!(out.data_source, "GDELT");
    assert_eq!(out.sources_used, vec!["GDELT", "ACLED", "RSS", "Blog"]);
    assert_eq!(out.events[1].severity, Severity::Critical);
}

#[test]
fn output_is_a_subset_of_input() {
    let eng = EnrichmentEngine::builtin().unwrap();
    let input = mixed();
    let out = enrich_and_rank(input.clone(), &eng, &PipelineConfig::default(), NOW);

    assert!(out.events.len() <= input.len());
    for ev in &out.events {
        assert!(
            input.iter().any(|r| r.title == ev.title() && r.url == ev.url()),
            "{} not in input",
            ev.title()
        );
    }
}

#[test]
fn equal_scores_keep_input_order() {
    let eng = EnrichmentEngine::builtin().unwrap();
    let records = vec![
        rec("Museum reopens downtown", "https://t.test/1", SourceSystem::Gdelt),
        rec("Bakery wins baking contest", "https://t.test/2", SourceSystem::Gdelt),
        rec("Farmers harvest early crop", "https://t.test/3", SourceSystem::Gdelt),
    ];
    let out = enrich_and_rank(records, &eng, &PipelineConfig::default(), NOW);
    let urls: Vec<&str> = out.events.iter().map(|e| e.url()).collect();
    assert_eq!(urls, vec!["https://t.test/1", "https://t.test/2", "https://t.test/3"]);
}

#[test]
fn newer_wins_within_equal_score() {
    let eng = EnrichmentEngine::builtin().unwrap();
    let older = rec("Museum reopens downtown", "https://t.test/1", SourceSystem::Gdelt);
    let mut newer = rec("Bakery wins baking contest", "https://t.test/2", SourceSystem::Gdelt);
    newer.published_at = NOW - 60;
    let out = enrich_and_rank(vec![older, newer], &eng, &PipelineConfig::default(), NOW);
    assert_eq!(out.events[0].url(), "https://t.test/2");
}

#[test]
fn empty_input_has_no_data_marker() {
    let eng = EnrichmentEngine::builtin().unwrap();
    let out = enrich_and_rank(Vec::new(), &eng, &PipelineConfig::default(), NOW);
    assert!(out.events.is_empty());
    assert_eq!(out.total_count, 0);
    assert_eq!(out.data_source, NO_DATA);

    let v = serde_json::to_value(&out).unwrap();
    assert_eq!(v["dataSource"], "No Data Available");
    assert_eq!(v["totalCount"], 0);
}

#[test]
fn everything_filtered_is_also_no_data() {
    let eng = EnrichmentEngine::builtin().unwrap();
    let mut stale = rec("Old border dispute flares", "https://g.test/old", SourceSystem::Gdelt);
    stale.published_at = NOW - 60 * 86_400;
    let out = enrich_and_rank(vec![stale], &eng, &PipelineConfig::default(), NOW);
    assert!(out.events.is_empty());
    assert_eq!(out.data_source, NO_DATA);
}

#[test]
fn event_json_is_flat() {
    let eng = EnrichmentEngine::builtin().unwrap();
    let out = enrich_and_rank(
        vec![rec("Talks in Kyiv", "https://t.test/kyiv", SourceSystem::Gdelt)],
        &eng,
        &PipelineConfig::default(),
        NOW,
    );
    let v = serde_json::to_value(&out.events[0]).unwrap();
    assert_eq!(v["title"], "Talks in Kyiv");
    assert_eq!(v["sourceSystem"], "GDELT");
    assert_eq!(v["location"]["countryCode"], "UA");
    assert!(v["id"].as_str().unwrap().starts_with("evt-"));
}

#[test]
fn titles_opening_with_digits_or_quotes_are_dropped() {
    let eng = EnrichmentEngine::builtin().unwrap();
    let input = vec![
        rec("12 killed as Взрыв hits Moscow", "https://ru.test/12", SourceSystem::Gdelt),
        rec("\"Quoted\" headline on Gaza talks", "https://g.test/q", SourceSystem::Gdelt),
        rec("«Frappes» sur Gaza", "https://fr.test/f", SourceSystem::Gdelt),
        rec("Élections en Côte d'Ivoire", "https://fr.test/e", SourceSystem::Gdelt),
    ];
    let out = enrich_and_rank(input, &eng, &PipelineConfig::default(), NOW);

    let titles: Vec<&str> = out.events.iter().map(|e| e.title()).collect();
    assert_eq!(titles, vec!["Élections en Côte d'Ivoire"]);
    assert_eq!(out.total_count, 1);
}
