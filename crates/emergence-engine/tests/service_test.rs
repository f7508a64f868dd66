//! IntelligenceService: typed requests and the JSON boundary.

mod common;

use std::sync::Arc;

use serde_json::Value;

use emergence_engine::{IntelligenceService, Request, Response};
use emergence_storage::MemoryCheckpointStore;

use common::{bundle, memory_engine};

fn service() -> IntelligenceService {
    IntelligenceService::new(memory_engine(Arc::new(MemoryCheckpointStore::new())))
}

fn call(service: &IntelligenceService, request: Value) -> Value {
    serde_json::from_str(&service.handle_json(&request.to_string())).unwrap()
}

#[test]
fn typed_requests_round_the_pipeline() {
    let service = service();
    for i in 0..3 {
        let response = service
            .handle(Request::Process {
                features: bundle(i),
                item_index: i,
            })
            .unwrap();
        match response {
            Response::Processed(result) => assert_eq!(result.items_processed, i + 1),
            other => panic!("unexpected response: {other:?}"),
        }
    }

    match service.handle(Request::State).unwrap() {
        Response::State(view) => assert_eq!(view.items_processed, 3),
        other => panic!("unexpected response: {other:?}"),
    }

    match service
        .handle(Request::RecentDiscoveries { limit: None })
        .unwrap()
    {
        Response::RecentDiscoveries(entries) => assert_eq!(entries.len(), 3),
        other => panic!("unexpected response: {other:?}"),
    }
}

#[test]
fn json_process_then_state() {
    let service = service();
    let features = serde_json::to_value(bundle(0)).unwrap();

    let processed = call(
        &service,
        serde_json::json!({ "op": "process", "item_index": 0, "features": features }),
    );
    assert_eq!(processed["ok"], true);
    assert_eq!(processed["response"]["kind"], "processed");
    assert_eq!(processed["response"]["data"]["checkpoint_saved"], true);

    let state = call(&service, serde_json::json!({ "op": "state" }));
    assert_eq!(state["response"]["data"]["items_processed"], 1);

    let health = call(&service, serde_json::json!({ "op": "health" }));
    assert_eq!(health["response"]["data"]["status"], "healthy");
}

#[test]
fn json_errors_carry_codes() {
    let service = service();

    let malformed = service.handle_json("{\"op\": \"explode\"}");
    let malformed: Value = serde_json::from_str(&malformed).unwrap();
    assert_eq!(malformed["ok"], false);
    assert_eq!(malformed["error"]["code"], "INVALID_REQUEST");

    let out_of_order = call(
        &service,
        serde_json::json!({ "op": "process", "item_index": 5, "features": {} }),
    );
    assert_eq!(out_of_order["error"]["code"], "OUT_OF_ORDER_ITEM");

    let checkpoint = call(&service, serde_json::json!({ "op": "checkpoint" }));
    assert_eq!(checkpoint["error"]["code"], "NOTHING_TO_CHECKPOINT");
}

#[test]
fn top_patterns_respects_requested_limit() {
    let service = service();
    for i in 0..5 {
        service.process(&bundle(i), i).unwrap();
    }
    let top = call(&service, serde_json::json!({ "op": "top_patterns", "limit": 1 }));
    assert_eq!(top["response"]["data"].as_array().unwrap().len(), 1);
}

#[test]
fn concurrent_readers_see_consistent_views() {
    let service = Arc::new(service());
    for i in 0..4 {
        service.process(&bundle(i), i).unwrap();
    }

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let service = Arc::clone(&service);
            std::thread::spawn(move || {
                let view = service.snapshot().unwrap();
                let evolution = service.pattern_evolution().unwrap();
                (view.items_processed, evolution.timeline.len() as u64)
            })
        })
        .collect();

    for reader in readers {
        let (items, timeline) = reader.join().unwrap();
        assert_eq!(items, timeline);
    }
}

#[test]
fn json_process_keeps_numeric_signals_of_a_mixed_bundle() {
    let clean = service();
    let mixed = service();
    for svc in [&clean, &mixed] {
        let first = serde_json::to_value(bundle(0)).unwrap();
        let response = call(
            svc,
            serde_json::json!({ "op": "process", "item_index": 0, "features": first }),
        );
        assert_eq!(response["ok"], true);
    }

    let clean_features = serde_json::to_value(bundle(1)).unwrap();
    let mut mixed_features = clean_features.clone();
    mixed_features["audio"]["silence_patterns"] = serde_json::json!([
        { "start": 3.2, "duration": 0.4 },
        { "start": 7.9, "duration": 1.1 }
    ]);
    let landmarks: Vec<Value> = (0..468)
        .map(|i| serde_json::json!([i as f64 * 0.01, 0.2, 0.3]))
        .collect();
    mixed_features["facial"]["landmarks"] = Value::Array(landmarks);

    let from_clean = call(
        &clean,
        serde_json::json!({ "op": "process", "item_index": 1, "features": clean_features }),
    );
    let from_mixed = call(
        &mixed,
        serde_json::json!({ "op": "process", "item_index": 1, "features": mixed_features }),
    );
    assert_eq!(from_mixed["ok"], true, "mixed bundle rejected: {from_mixed}");
    assert_eq!(from_mixed["response"]["data"]["items_processed"], 2);

    let clean_discovery = &from_clean["response"]["data"]["discovery"];
    let mixed_discovery = &from_mixed["response"]["data"]["discovery"];
    assert_eq!(mixed_discovery["patterns"], clean_discovery["patterns"]);
    assert_eq!(mixed_discovery["correlations"], clean_discovery["correlations"]);
    assert!(!mixed_discovery["correlations"].as_array().unwrap().is_empty());
}
