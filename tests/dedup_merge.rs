// tests/dedup_merge.rs
use geo_events_analyzer::dedup::{dedup, is_similar_title, DedupConfig};
use geo_events_analyzer::ingest::types::RawRecord;

fn rec(title: &str, url: &str) -> RawRecord {
    RawRecord {
        title: title.into(),
        url: url.into(),
        ..Default::default()
    }
}

#[test]
fn case_and_whitespace_variants_collapse_to_first() {
    let cfg = DedupConfig::default();
    let items = vec![
        rec("Ceasefire Agreed In Gaza", "https://a.test/1"),
        rec("  ceasefire   agreed in gaza ", "https://b.test/2"),
        rec("CEASEFIRE AGREED IN GAZA!", "https://c.test/3"),
    ];
    let (kept, dropped) = dedup(items, &cfg);
    assert_eq!(kept.len(), 1);
    assert_eq!(dropped, 2);
    assert_eq!(kept[0].url, "https://a.test/1");
}

#[test]
fn same_url_is_a_duplicate_even_with_new_title() {
    let cfg = DedupConfig::default();
    let items = vec![
        rec("Storm batters coast", "https://wire.test/storm"),
        rec("Parliament passes budget", "https://wire.test/storm"),
    ];
    let (kept, _) = dedup(items, &cfg);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].title, "Storm batters coast");
}

#[test]
fn short_urls_are_not_compared() {
    let cfg = DedupConfig::default();
    let items = vec![
        rec("Storm batters coast", "x.test"),
        rec("Parliament passes budget", "x.test"),
    ];
    assert_eq!(dedup(items, &cfg).0.len(), 2);
}

#[test]
fn containment_threshold() {
    let cfg = DedupConfig::default();
    // 27 / 32 chars
    assert!(is_similar_title(
        "Troops withdraw from border",
        "Troops withdraw from border town",
        &cfg
    ));
    // far below 70 %
    assert!(!is_similar_title(
        "Troops withdraw",
        "Troops withdraw from border town after weeks of talks",
        &cfg
    ));
}

#[test]
fn distinct_stories_survive_in_order() {
    let cfg = DedupConfig::default();
    let items = vec![
        rec("Farmers harvest early crop", ""),
        rec("Museum reopens downtown", ""),
        rec("Bakery wins baking contest", ""),
    ];
    let (kept, dropped) = dedup(items, &cfg);
    assert_eq!(dropped, 0);
    let titles: Vec<&str> = kept.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Farmers harvest early crop",
            "Museum reopens downtown",
            "Bakery wins baking contest"
        ]
    );
}
