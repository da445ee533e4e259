use std::collections::HashMap;

use crate::dedup::{key_indices, IdentityKey};
use crate::level::{Level, LevelMap, LevelSchema};
use crate::table::Table;

/// The denormalized fact table: one row per effect, carrying every field of every level it
/// descends from.
///
/// On construction each flat row is resolved, per level, to the row of the full level table that
/// holds its identity tuple. Propagation then tests membership by row index instead of rebuilding
/// identity keys on every pass.
#[derive(Clone, Debug)]
pub struct FlatJoinTable {
    table: Table,
    level_rows: LevelMap<Vec<usize>>,
}

impl FlatJoinTable {
    /// Indexes `table` against the full level tables derived from it with `schema`.
    pub(crate) fn index(
        table: Table,
        schema: &LevelMap<LevelSchema>,
        levels: &LevelMap<Table>,
    ) -> Self {
        let level_rows = LevelMap::from_fn(|level| {
            let identity = &schema[level].identity;
            let level_table = &levels[level];

            let level_keys = key_indices(level_table, identity);
            let lookup: HashMap<IdentityKey, usize> = (0..level_table.row_count())
                .map(|row| (IdentityKey::of(level_table, row, &level_keys), row))
                .collect();

            let flat_keys = key_indices(&table, identity);
            (0..table.row_count())
                .map(|row| {
                    let key = IdentityKey::of(&table, row, &flat_keys);
                    let level_row = lookup.get(&key).copied();
                    // Level tables are projections of this table, so the lookup never misses
                    // and the `usize::MAX` sentinel is never stored.
                    debug_assert!(level_row.is_some(), "flat row {row} has no {level} row");
                    level_row.unwrap_or(usize::MAX)
                })
                .collect()
        });

        Self { table, level_rows }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn row_count(&self) -> usize {
        self.table.row_count()
    }

    /// The full-level-table row that flat row `row` belongs to at `level`.
    pub fn level_row(&self, level: Level, row: usize) -> usize {
        self.level_rows[level][row]
    }

    pub(crate) fn level_rows(&self, level: Level) -> &[usize] {
        &self.level_rows[level]
    }
}
