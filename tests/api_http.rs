// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.

use serde_json::json;
use serde_json::Value as Json;
use shuttle_axum::axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt as _; // for `oneshot`

use geo_events_analyzer::api::{self, AppState};
use geo_events_analyzer::config::PipelineConfig;
use geo_events_analyzer::engine::{EngineHandle, EnrichmentEngine};
use geo_events_analyzer::ingest::providers::rss::RssProvider;
use geo_events_analyzer::ingest::types::SourceProvider;

const BODY_LIMIT: usize = 1024 * 1024;

fn test_router() -> Router {
    api::create_router(AppState::builtin().expect("builtin state"))
}

async fn post_json(app: Router, uri: &str, payload: Json) -> (StatusCode, Json) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("build request");
    let resp = app.oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    let v = serde_json::from_slice(&bytes).unwrap_or(Json::Null);
    (status, v)
}

fn now_unix() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

#[tokio::test]
async fn health_returns_ok() {
    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let resp = test_router().oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT).await.unwrap();
    assert_eq!(String::from_utf8(bytes.to_vec()).unwrap(), "OK");
}

#[tokio::test]
async fn classify_endpoint() {
    let (status, v) = post_json(
        test_router(),
        "/classify",
        json!({"title": "Airstrike in Gaza", "summary": "civilians killed"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["severity"], "critical");
    assert_eq!(v["relevanceTopic"], "Middle East");
    assert_eq!(v["relevanceScore"], 43);
}

#[tokio::test]
async fn locate_endpoint() {
    let (_, v) = post_json(
        test_router(),
        "/locate",
        json!({"text": "Fighting intensifies in Indiana"}),
    )
    .await;
    assert_eq!(v["countryCode"], "US");
    assert_eq!(v["placeName"], "Indiana, United States");

    let (_, v) = post_json(test_router(), "/locate", json!({})).await;
    assert_eq!(v["placeName"], "Global");
}

#[tokio::test]
async fn enrich_empty_is_no_data() {
    let (status, v) = post_json(test_router(), "/enrich", json!([])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["dataSource"], "No Data Available");
    assert_eq!(v["totalCount"], 0);
    assert!(v["events"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn enrich_dedups_and_ranks() {
    let ts = now_unix() - 600;
    let payload = json!([
        {"title": "Farmers harvest early crop", "url": "https://r.test/1", "publishedAt": ts, "sourceSystem": "RSS"},
        {"title": "Massacre reported in region", "url": "https://g.test/1", "publishedAt": ts, "sourceSystem": "GDELT"},
        {"title": "  massacre reported in REGION ", "url": "https://g.test/2", "publishedAt": ts, "sourceSystem": "GDELT"},
        {"title": "Talks in Kyiv"}
    ]);
    let (_, v) = post_json(test_router(), "/enrich", payload).await;
    let events = v["events"].as_array().unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0]["url"], "https://g.test/1");
    assert_eq!(events[0]["severity"], "critical");
    assert_eq!(v["dataSource"], "GDELT");
    assert_eq!(v["totalCount"], 3);
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let req = Request::builder()
        .method("POST")
        .uri("/enrich")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let resp = test_router().oneshot(req).await.unwrap();
    assert!(resp.status().is_client_error());
}

#[tokio::test]
async fn events_runs_configured_providers() {
    let xml = std::fs::read_to_string("tests/fixtures/rss_world.xml").expect("fixture");
    let providers: Vec<Box<dyn SourceProvider>> =
        vec![Box::new(RssProvider::from_fixture_str("World desk", &xml))];
    let state = AppState::new(
        EngineHandle::new(EnrichmentEngine::builtin().unwrap()),
        PipelineConfig::default(),
        providers,
    );
    let req = Request::builder()
        .uri("/events")
        .body(Body::empty())
        .unwrap();
    let resp = api::create_router(state).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT).await.unwrap();
    let v: Json = serde_json::from_slice(&bytes).unwrap();

    // fixture items are dated 2025-10-09; the undated one always survives the 7-day window
    let titles: Vec<&str> = v["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert!(titles.contains(&"Flooding displaces thousands in Somalia"));
    assert_eq!(v["sourcesUsed"], json!(["RSS"]));
}

#[tokio::test]
async fn events_without_providers_is_no_data() {
    let req = Request::builder()
        .uri("/events")
        .body(Body::empty())
        .unwrap();
    let resp = test_router().oneshot(req).await.unwrap();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT).await.unwrap();
    let v: Json = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(v["dataSource"], "No Data Available");
}

#[tokio::test]
async fn sibling_analyses() {
    let ts = now_unix() - 3_600;
    let records = json!([
        {"title": "Troop buildup near Kyiv", "source": "reuters.com", "url": "https://r.test/a", "publishedAt": ts, "sourceSystem": "GDELT"},
        {"title": "Airstrike hits depot in Gaza", "source": "localpost.test", "url": "https://l.test/b", "publishedAt": ts, "sourceSystem": "GDELT"}
    ]);

    let (status, v) = post_json(test_router(), "/signals", records.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["totalCount"], 2);
    assert_eq!(v["signals"][0]["type"], "military");
    let conf = v["signals"][0]["confidence"].as_f64().unwrap();
    assert!((conf - 0.9).abs() < 1e-6);

    let (_, v) = post_json(test_router(), "/predictions", records.clone()).await;
    let preds = v["predictions"].as_array().unwrap();
    assert_eq!(preds.len(), 5);
    assert_eq!(preds[0]["id"], "pred-me-001");
    assert_eq!(preds[0]["indicator"], "escalating");

    let (_, v) = post_json(test_router(), "/military", records).await;
    let zones = v["zones"].as_array().unwrap();
    assert!(zones.iter().any(|z| z["persistent"] == false));
    assert_eq!(v["totalZones"], zones.len());
}
