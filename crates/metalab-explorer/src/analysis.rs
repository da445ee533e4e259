//! Boundary to the meta-analysis routine.
//!
//! The explorer does not compute pooled estimates itself; it hands the effects surviving all
//! filters to an implementation of [`MetaAnalysis`] and relays the summary to the UI.
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::table::{RecordRef, Table};

/// The filtered Effects level, as handed to a [`MetaAnalysis`].
#[derive(Clone, Copy, Debug)]
pub struct EffectSet<'a> {
    table: &'a Table,
    rows: &'a [usize],
}

impl<'a> EffectSet<'a> {
    pub fn new(table: &'a Table, rows: &'a [usize]) -> Self {
        Self { table, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = RecordRef<'a>> + 'a {
        self.table.records(self.rows)
    }

    /// The numeric values of `field` for every effect, in order. Fails if the column is missing
    /// or any effect has a non-numeric value.
    pub fn numbers(&self, field: &str) -> Result<Vec<f64>, AnalysisError> {
        let missing = || AnalysisError::MissingField {
            field: field.to_string(),
        };
        let idx = self.table.column_idx(field).ok_or_else(missing)?;
        self.rows
            .iter()
            .map(|&row| self.table.value_by_idx(row, idx).as_f64().ok_or_else(missing))
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaSummary {
    pub estimate: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub pi_lower: Option<f64>,
    pub pi_upper: Option<f64>,
    pub bias: Option<BiasTest>,
}

/// Publication-bias statistics (for example an Egger-style regression test).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiasTest {
    pub name: String,
    pub statistic: f64,
    pub p_value: f64,
}

/// An external pooled-estimate routine.
pub trait MetaAnalysis {
    fn summarize(&self, effects: &EffectSet<'_>) -> Result<MetaSummary, AnalysisError>;
}

impl<F> MetaAnalysis for F
where
    F: Fn(&EffectSet<'_>) -> Result<MetaSummary, AnalysisError>,
{
    fn summarize(&self, effects: &EffectSet<'_>) -> Result<MetaSummary, AnalysisError> {
        self(effects)
    }
}
