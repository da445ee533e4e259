use serde::Serialize;
use std::io::Write;
use std::sync::Arc;

use crate::analysis::{EffectSet, MetaAnalysis, MetaSummary};
use crate::config::ExplorerConfig;
use crate::dataset::Dataset;
use crate::error::{AnalysisError, ExplorerResult};
use crate::export::{export_csv, export_csv_string};
use crate::filter::LevelFilter;
use crate::level::{Level, LevelMap, LockSet};
use crate::propagate::{propagate, FilteredData};
use crate::table::{RecordRef, Table};

/// "N of M shown" for one level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LevelCount {
    pub shown: usize,
    pub total: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportScope {
    Filtered,
    Full,
}

/// One user's exploration state over a shared, read-only [`Dataset`].
///
/// Filtered data is only ever replaced as a whole: a rejected submission leaves the previous
/// state in place.
#[derive(Clone, Debug)]
pub struct ExplorerSession {
    dataset: Arc<Dataset>,
    config: ExplorerConfig,
    filtered: FilteredData,
    locks: LockSet,
    applied: LevelMap<Option<LevelFilter>>,
}

impl ExplorerSession {
    /// The dataset's level schema wins over `config.schema`: the level tables were already
    /// derived with it.
    pub fn new(dataset: Arc<Dataset>, mut config: ExplorerConfig) -> Self {
        if config.schema != *dataset.schema() {
            log::warn!("config schema differs from the dataset's; using the dataset schema");
            config.schema = dataset.schema().clone();
        }
        let filtered = dataset.all_rows();
        Self {
            dataset,
            config,
            filtered,
            locks: LockSet::default(),
            applied: LevelMap::default(),
        }
    }

    /// Loads a flat JSON dataset using the schema from `config`.
    pub fn from_json_str(json: &str, config: ExplorerConfig) -> ExplorerResult<Self> {
        let dataset = Dataset::from_json_str(json, &config.schema)?;
        Ok(Self::new(Arc::new(dataset), config))
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Applies `filter` to `level`'s full table, then propagates across all levels.
    ///
    /// Validation errors are returned before any state changes.
    pub fn apply_filter(&mut self, level: Level, filter: LevelFilter) -> ExplorerResult<()> {
        let rows = filter.apply(self.dataset.level(level))?;
        log::debug!(
            "{level} filter with {} criteria selected {} of {} rows",
            filter.criteria.len(),
            rows.len(),
            self.dataset.level(level).row_count()
        );

        let mut candidate = self.filtered.clone();
        candidate[level] = rows;
        self.filtered = propagate(&self.dataset, &candidate, &self.locks);
        self.applied[level] = (!filter.is_empty()).then_some(filter);
        Ok(())
    }

    /// Re-runs propagation over the current state.
    pub fn propagate(&mut self) {
        self.filtered = propagate(&self.dataset, &self.filtered, &self.locks);
    }

    pub fn set_lock(&mut self, level: Level, locked: bool) {
        if self.locks[level] == locked {
            return;
        }
        log::debug!("{level} {}", if locked { "locked" } else { "unlocked" });
        self.locks[level] = locked;
        self.propagate();
    }

    pub fn toggle_lock(&mut self, level: Level) -> bool {
        let locked = !self.locks[level];
        self.set_lock(level, locked);
        locked
    }

    pub fn is_locked(&self, level: Level) -> bool {
        self.locks[level]
    }

    pub fn locks(&self) -> &LockSet {
        &self.locks
    }

    /// Restores every level to its full table and forgets applied filters. Locks are cleared
    /// too unless the config keeps them across resets.
    pub fn reset(&mut self) {
        self.filtered = self.dataset.all_rows();
        self.applied = LevelMap::default();
        if self.config.reset_clears_locks {
            self.locks = LockSet::default();
        }
        log::debug!(
            "filters reset; locks {}",
            if self.locks.any() { "kept" } else { "clear" }
        );
    }

    /// The criteria last applied to `level`, for re-populating its form. Submitting a filter
    /// with no criteria clears it.
    pub fn applied_filter(&self, level: Level) -> Option<&LevelFilter> {
        self.applied[level].as_ref()
    }

    pub fn filtered_data(&self) -> &FilteredData {
        &self.filtered
    }

    /// Rows of `level`'s full table currently shown.
    pub fn filtered(&self, level: Level) -> &[usize] {
        &self.filtered[level]
    }

    pub fn full(&self, level: Level) -> &Table {
        self.dataset.level(level)
    }

    pub fn records(&self, level: Level) -> Vec<RecordRef<'_>> {
        self.full(level).records(&self.filtered[level]).collect()
    }

    pub fn count(&self, level: Level) -> LevelCount {
        LevelCount {
            shown: self.filtered[level].len(),
            total: self.full(level).row_count(),
        }
    }

    pub fn counts(&self) -> LevelMap<LevelCount> {
        LevelMap::from_fn(|level| self.count(level))
    }

    pub fn effects(&self) -> EffectSet<'_> {
        EffectSet::new(self.full(Level::Effect), &self.filtered[Level::Effect])
    }

    /// Hands the surviving effects to `analysis`.
    pub fn run_analysis(&self, analysis: &dyn MetaAnalysis) -> ExplorerResult<MetaSummary> {
        let effects = self.effects();
        if effects.is_empty() {
            return Err(AnalysisError::NoEffects.into());
        }
        Ok(analysis.summarize(&effects)?)
    }

    fn export_rows(&self, level: Level, scope: ExportScope) -> Vec<usize> {
        match scope {
            ExportScope::Filtered => self.filtered[level].clone(),
            ExportScope::Full => (0..self.full(level).row_count()).collect(),
        }
    }

    pub fn export_level_csv<W: Write>(
        &self,
        level: Level,
        scope: ExportScope,
        writer: W,
    ) -> ExplorerResult<()> {
        let rows = self.export_rows(level, scope);
        export_csv(self.full(level), &rows, writer, &self.config.csv)
    }

    pub fn export_level_csv_string(
        &self,
        level: Level,
        scope: ExportScope,
    ) -> ExplorerResult<String> {
        let rows = self.export_rows(level, scope);
        export_csv_string(self.full(level), &rows, &self.config.csv)
    }
}
