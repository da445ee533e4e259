//! Deduplicated projection of records onto an identity tuple.
//!
//! The seen-set is keyed by the typed tuple of identity values rather than a separator-joined
//! string: `("ab", "c")` and `("a", "bc")` can never collide, and `1` never equals `"1"`.
use std::collections::HashSet;

use crate::level::LevelSchema;
use crate::table::Table;
use crate::value::Value;

/// The identity of one row at one level: the values of the level's identity columns, in order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IdentityKey(pub Vec<Value>);

impl IdentityKey {
    pub fn of(table: &Table, row: usize, key_columns: &[Option<usize>]) -> Self {
        IdentityKey(
            key_columns
                .iter()
                .map(|idx| match idx {
                    Some(idx) => table.value_by_idx(row, *idx).clone(),
                    None => Value::Blank,
                })
                .collect(),
        )
    }
}

/// Resolves identity column names against `table`. Columns the table lacks read as blank.
pub fn key_indices(table: &Table, key_columns: &[impl AsRef<str>]) -> Vec<Option<usize>> {
    key_columns
        .iter()
        .map(|c| table.column_idx(c.as_ref()))
        .collect()
}

/// Returns each distinct identity tuple among `rows` exactly once, as the first row carrying it,
/// in order of first appearance.
pub fn dedup_rows(
    table: &Table,
    key_columns: &[impl AsRef<str>],
    rows: impl IntoIterator<Item = usize>,
) -> Vec<usize> {
    let indices = key_indices(table, key_columns);
    let mut seen: HashSet<IdentityKey> = HashSet::new();
    let mut out = Vec::new();
    for row in rows {
        if seen.insert(IdentityKey::of(table, row, &indices)) {
            out.push(row);
        }
    }
    out
}

/// Builds a full level table from the flat join table: one row per distinct identity tuple,
/// first occurrence wins.
pub fn project_level(flat: &Table, name: &str, schema: &LevelSchema) -> Table {
    let first_rows = dedup_rows(flat, &schema.identity, 0..flat.row_count());

    let columns: Vec<&str> = schema
        .columns()
        .into_iter()
        .filter(|column| {
            let keep = flat.has_column(column) || schema.identity.iter().any(|c| c == column);
            if !keep {
                log::warn!("dataset has no column {column}; dropping it from {name}");
            }
            keep
        })
        .collect();

    flat.project(name, &columns, &first_rows)
}
