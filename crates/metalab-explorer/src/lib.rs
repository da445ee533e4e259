//! Filter engine for the MetaLab research-data explorer.
//!
//! The dataset is a fixed hierarchy (papers → studies → samples → interventions → outcomes →
//! effects) shipped as one denormalized flat join table. Six level tables are derived from it,
//! users filter any of them, and [`propagate`] keeps all six mutually consistent. Levels can be
//! locked to pin a selection while exploring the others.

#![forbid(unsafe_code)]

mod analysis;
mod config;
mod dataset;
mod dedup;
mod error;
mod export;
mod filter;
mod join;
mod level;
mod propagate;
mod session;
mod table;
mod value;

pub use crate::analysis::{BiasTest, EffectSet, MetaAnalysis, MetaSummary};
pub use crate::config::{CsvExportOptions, ExplorerConfig};
pub use crate::dataset::{Dataset, FLAT_TABLE_NAME};
pub use crate::dedup::{dedup_rows, project_level, IdentityKey};
pub use crate::error::{AnalysisError, DatasetError, ExplorerError, ExplorerResult, FilterError};
pub use crate::export::{export_csv, export_csv_string};
pub use crate::filter::{Criterion, CriterionKind, LevelFilter};
pub use crate::join::FlatJoinTable;
pub use crate::level::{default_schema, Level, LevelMap, LevelSchema, LockSet};
pub use crate::propagate::{constrained_join, propagate, FilteredData};
pub use crate::session::{ExplorerSession, ExportScope, LevelCount};
pub use crate::table::{RecordRef, Table};
pub use crate::value::Value;
