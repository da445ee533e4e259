#![cfg(target_arch = "wasm32")]

use serde_json::json;
use wasm_bindgen_test::wasm_bindgen_test;

use metalab_wasm::WasmExplorer;

const DATASET: &str = r#"[
  {"paper_id": 1, "year": 2018, "study_id": 1, "design": "rct", "effect_id": 1, "effect_size": 0.3},
  {"paper_id": 1, "year": 2018, "study_id": 2, "design": "field", "effect_id": 2, "effect_size": 0.1},
  {"paper_id": 2, "year": 2021, "study_id": 1, "design": "rct", "effect_id": 3, "effect_size": 0.5}
]"#;

#[derive(Debug, serde::Deserialize, PartialEq)]
struct CountDto {
    shown: usize,
    total: usize,
}

#[derive(Debug, serde::Deserialize)]
struct CountsDto {
    paper: CountDto,
    study: CountDto,
    effect: CountDto,
}

fn counts(explorer: &WasmExplorer) -> CountsDto {
    serde_wasm_bindgen::from_value(explorer.counts().unwrap()).unwrap()
}

fn rct_filter() -> wasm_bindgen::JsValue {
    serde_wasm_bindgen::to_value(&json!({
        "criteria": [{ "field": "design", "kind": "anyOf", "values": ["rct"] }]
    }))
    .unwrap()
}

#[wasm_bindgen_test]
fn filters_propagate_through_the_bindings() {
    let mut explorer = WasmExplorer::new(DATASET, None).unwrap();
    explorer.apply_filter("study", rct_filter()).unwrap();

    let counts = counts(&explorer);
    assert_eq!(counts.paper, CountDto { shown: 2, total: 2 });
    assert_eq!(counts.study, CountDto { shown: 2, total: 3 });
    assert_eq!(counts.effect, CountDto { shown: 2, total: 3 });

    let studies: Vec<serde_json::Value> =
        serde_wasm_bindgen::from_value(explorer.records("Studies").unwrap()).unwrap();
    assert_eq!(
        studies,
        vec![
            json!({"paper_id": 1, "study_id": 1, "design": "rct"}),
            json!({"paper_id": 2, "study_id": 1, "design": "rct"}),
        ]
    );
}

#[wasm_bindgen_test]
fn locks_and_reset_round_trip() {
    let mut explorer = WasmExplorer::new(DATASET, None).unwrap();
    explorer
        .apply_filter_json(
            "paper",
            r#"{"criteria": [{"field": "year", "kind": "range", "min": 2020, "max": null}]}"#,
        )
        .unwrap();
    assert!(explorer.toggle_lock("paper").unwrap());
    assert!(explorer.is_locked("paper").unwrap());
    assert!(!explorer.applied_filter("paper").unwrap().is_null());

    explorer.reset();
    assert!(!explorer.is_locked("paper").unwrap());
    assert!(explorer.applied_filter("paper").unwrap().is_null());
    assert_eq!(counts(&explorer).effect, CountDto { shown: 3, total: 3 });
}

#[wasm_bindgen_test]
fn invalid_input_surfaces_as_js_errors() {
    let mut explorer = WasmExplorer::new(DATASET, None).unwrap();

    let empty = serde_wasm_bindgen::to_value(&json!({
        "criteria": [{ "field": "design", "kind": "anyOf", "values": [] }]
    }))
    .unwrap();
    let err = explorer.apply_filter("study", empty).unwrap_err();
    assert_eq!(
        err.as_string().as_deref(),
        Some("select at least one value for design")
    );

    assert!(explorer.apply_filter("cohort", rct_filter()).is_err());
    assert!(WasmExplorer::new("{}", None).is_err());
}

#[wasm_bindgen_test]
fn exports_filtered_and_full_csv() {
    let mut explorer = WasmExplorer::new(DATASET, None).unwrap();
    explorer.apply_filter("study", rct_filter()).unwrap();

    assert_eq!(
        explorer.export_csv("paper", false).unwrap(),
        "paper_id,year\n1,2018\n2,2021\n"
    );
    assert_eq!(
        explorer.export_csv("effect", false).unwrap(),
        "paper_id,study_id,effect_id,effect_size\n1,1,1,0.3\n2,1,3,0.5\n"
    );
    assert_eq!(
        explorer.export_csv("study", true).unwrap().lines().count(),
        4
    );
    assert_eq!(WasmExplorer::levels().length(), 6);
}
