#![allow(dead_code)]

use metalab_explorer::{default_schema, Dataset, ExplorerConfig, ExplorerSession, Table};
use std::sync::Arc;

/// Three effects: `(paper 1, study 1)`, `(paper 1, study 2)` and `(paper 2, study 1)`.
pub fn build_scenario_dataset() -> Dataset {
    let mut flat = Table::new("Flat", vec!["paper_id", "study_id", "effect_id"]);
    flat.push_row(vec![1.into(), 1.into(), 1.into()]).unwrap();
    flat.push_row(vec![1.into(), 2.into(), 2.into()]).unwrap();
    flat.push_row(vec![2.into(), 1.into(), 3.into()]).unwrap();
    Dataset::from_flat_table(flat, &default_schema())
}

pub fn scenario_session() -> ExplorerSession {
    ExplorerSession::new(Arc::new(build_scenario_dataset()), ExplorerConfig::default())
}

/// Six effects from three papers, with fields at every level.
pub const EXPLORER_JSON: &str = r#"[
  {"paper_id": 1, "title": "Nudging savings", "year": 2018, "paper_type": "article",
   "study_id": 1, "preregistered": true, "design": "rct",
   "sample_id": "treatment", "n_participants": 120,
   "intervention_id": 1, "intervention_type": "default",
   "outcome_id": 1, "outcome_type": "behavioral",
   "effect_id": 1, "effect_size": 0.3, "standard_error": 0.1},
  {"paper_id": 1, "title": "Nudging savings", "year": 2018, "paper_type": "article",
   "study_id": 1, "preregistered": true, "design": "rct",
   "sample_id": "treatment", "n_participants": 120,
   "intervention_id": 1, "intervention_type": "default",
   "outcome_id": 2, "outcome_type": "self-report",
   "effect_id": 2, "effect_size": 0.1, "standard_error": 0.12},
  {"paper_id": 1, "title": "Nudging savings", "year": 2018, "paper_type": "article",
   "study_id": 2, "preregistered": false, "design": "field",
   "sample_id": "arm A", "n_participants": 40,
   "intervention_id": 1, "intervention_type": "reminder",
   "outcome_id": 1, "outcome_type": "behavioral",
   "effect_id": 1, "effect_size": 0.55, "standard_error": 0.2},
  {"paper_id": 2, "title": "Reminders, revisited", "year": 2021, "paper_type": "preprint",
   "study_id": 1, "preregistered": true, "design": "rct",
   "sample_id": "arm A", "n_participants": 300,
   "intervention_id": 1, "intervention_type": "reminder",
   "outcome_id": 1, "outcome_type": "behavioral",
   "effect_id": 1, "effect_size": 0.05, "standard_error": 0.05},
  {"paper_id": 2, "title": "Reminders, revisited", "year": 2021, "paper_type": "preprint",
   "study_id": 1, "preregistered": true, "design": "rct",
   "sample_id": "arm B", "n_participants": 310,
   "intervention_id": 2, "intervention_type": "default",
   "outcome_id": 1, "outcome_type": "behavioral",
   "effect_id": 2, "effect_size": 0.12, "standard_error": 0.05},
  {"paper_id": 3, "title": "Defaults \"in the wild\"", "year": 2015, "paper_type": "report",
   "study_id": 1, "preregistered": false, "design": "quasi",
   "sample_id": "arm A", "n_participants": 60,
   "intervention_id": 1, "intervention_type": "default",
   "outcome_id": 1, "outcome_type": "self-report",
   "effect_id": 1, "effect_size": -0.02, "standard_error": 0.15}
]"#;

pub fn explorer_session() -> ExplorerSession {
    ExplorerSession::from_json_str(EXPLORER_JSON, ExplorerConfig::default()).unwrap()
}

pub fn explorer_session_with(config: ExplorerConfig) -> ExplorerSession {
    ExplorerSession::from_json_str(EXPLORER_JSON, config).unwrap()
}
