//! Cross-level constraint propagation.
//!
//! After any level's filtered set changes, every level is recomputed against the flat join
//! table so the six sets stay mutually consistent:
//!
//! 1. Each unlocked level contributes an allowed mask over its full table, built from its current
//!    filtered set. A level whose filtered set selects every row of its table contributes no mask.
//! 2. One scan of the flat table keeps the rows whose level row is allowed at every constraining
//!    level (the *constrained join*).
//! 3. Each unlocked level is re-derived as the deduplicated projection of the constrained join,
//!    in order of first appearance. Locked levels are carried over verbatim and neither constrain
//!    nor get re-derived.
//!
//! Intersecting through the flat table rather than level-to-level lookups makes the result
//! independent of which level was edited, and a single pass is enough.
use crate::dataset::Dataset;
use crate::level::{Level, LevelMap, LockSet};

/// Row indices into each level's full table, in display order.
pub type FilteredData = LevelMap<Vec<usize>>;

/// Flat-table rows compatible with every unlocked level's filtered set, in flat-table order.
pub fn constrained_join(dataset: &Dataset, filtered: &FilteredData, locks: &LockSet) -> Vec<usize> {
    let flat = dataset.flat();

    let masks: Vec<(Level, Vec<bool>)> = Level::ALL
        .into_iter()
        .filter_map(|level| {
            if locks[level] {
                log::trace!("{level} is locked; not constraining");
                return None;
            }

            let full_len = dataset.level(level).row_count();
            let mut allowed = vec![false; full_len];
            let mut selected = 0usize;
            for &row in &filtered[level] {
                if let Some(slot) = allowed.get_mut(row) {
                    if !*slot {
                        *slot = true;
                        selected += 1;
                    }
                }
            }

            // Repeated or out-of-range indices never make a selection full.
            if selected == full_len {
                return None;
            }
            Some((level, allowed))
        })
        .collect();

    let columns: Vec<(&[usize], &[bool])> = masks
        .iter()
        .map(|(level, allowed)| (flat.level_rows(*level), allowed.as_slice()))
        .collect();

    (0..flat.row_count())
        .filter(|&row| {
            columns.iter().all(|(level_rows, allowed)| {
                allowed.get(level_rows[row]).copied().unwrap_or(false)
            })
        })
        .collect()
}

/// Recomputes all six filtered sets so they are consistent with each other through the flat
/// join table, honoring `locks`. Total: an empty level is a valid result.
pub fn propagate(dataset: &Dataset, filtered: &FilteredData, locks: &LockSet) -> FilteredData {
    let joined = constrained_join(dataset, filtered, locks);
    let flat = dataset.flat();

    let next = LevelMap::from_fn(|level| {
        if locks[level] {
            return filtered[level].clone();
        }

        let level_rows = flat.level_rows(level);
        let mut seen = vec![false; dataset.level(level).row_count()];
        let mut out = Vec::new();
        for &row in &joined {
            let level_row = level_rows[row];
            if let Some(slot) = seen.get_mut(level_row) {
                if !*slot {
                    *slot = true;
                    out.push(level_row);
                }
            }
        }
        out
    });

    if log::log_enabled!(log::Level::Debug) {
        let shown: Vec<String> = next
            .iter()
            .map(|(level, rows)| {
                let lock = if locks[level] { " (locked)" } else { "" };
                format!("{level}={}{lock}", rows.len())
            })
            .collect();
        log::debug!(
            "propagated: {} of {} flat rows kept; {}",
            joined.len(),
            flat.row_count(),
            shown.join(", ")
        );
    }

    next
}
