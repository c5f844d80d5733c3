//! Integration tests for flow loading from disk.

use std::io::Write;

use trunkline_flow::{load, load_or_default, ActionDescriptor, FlowError};

const SAMPLE_FLOW: &str = r#"{
    "main_menu": {
        "prompt": "Press 1 for sales, 2 for the operator, or 9 to repeat.",
        "options": {
            "1": { "action": "route_to_queue", "target": "sales_queue" },
            "2": { "action": "transfer_to_extension", "target": "1001" },
            "9": { "action": "repeat_menu" }
        },
        "fallback": { "action": "repeat_menu" }
    },
    "hours_router": {
        "type": "time_routing",
        "action": {
            "action": "time_based_routing",
            "business_hours_target": "main_menu",
            "after_hours_target": "closed"
        }
    },
    "closed": {
        "prompt": "We are closed. Goodbye.",
        "fallback": { "action": "exit" }
    }
}"#;

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("should create temp file");
    file.write_all(contents.as_bytes())
        .expect("should write flow document");
    file
}

#[test]
fn loads_a_valid_flow_document() {
    let file = write_temp(SAMPLE_FLOW);
    let flow = load(file.path()).expect("flow should load");
    assert_eq!(flow.len(), 3);

    let menu = flow.get("main_menu").expect("main_menu should exist");
    assert_eq!(
        menu.options.get("1"),
        Some(&ActionDescriptor::RouteToQueue {
            target: "sales_queue".to_string()
        })
    );
}

#[test]
fn missing_file_falls_back_to_default_flow() {
    let flow = load_or_default("/nonexistent/trunkline/flows.json");
    assert!(flow.contains("main_menu"));
    let menu = flow.get("main_menu").expect("default main_menu");
    assert!(menu.options.contains_key("1"));
    assert!(menu.options.contains_key("9"));
}

#[test]
fn invalid_json_falls_back_to_default_flow() {
    let file = write_temp("{ not json");
    let flow = load_or_default(file.path());
    assert!(flow.contains("main_menu"));
    assert_eq!(flow.len(), 1);
}

#[test]
fn dangling_target_fails_strict_load() {
    let doc = r#"{
        "router": {
            "type": "time_routing",
            "action": {
                "action": "time_based_routing",
                "business_hours_target": "nowhere"
            }
        }
    }"#;
    let file = write_temp(doc);
    match load(file.path()) {
        Err(FlowError::DanglingTarget { node, target }) => {
            assert_eq!(node, "router");
            assert_eq!(target, "nowhere");
        }
        other => panic!("expected DanglingTarget, got {other:?}"),
    }
}

#[test]
fn unknown_action_in_document_still_loads() {
    let doc = r#"{
        "main_menu": {
            "prompt": "Press 1.",
            "options": {
                "1": { "action": "quantum_entangle", "target": "elsewhere" }
            }
        }
    }"#;
    let file = write_temp(doc);
    let flow = load(file.path()).expect("unknown option actions degrade at runtime, not load");
    let menu = flow.get("main_menu").expect("main_menu");
    assert_eq!(menu.options.get("1"), Some(&ActionDescriptor::Unrecognized));
}
