use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

use crate::error::{ExplorerError, ExplorerResult};
use crate::value::Value;

static BLANK: Value = Value::Blank;

/// An immutable-after-load table of scalar records.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    column_index: HashMap<String, usize>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<impl Into<String>>) -> Self {
        let name = name.into();
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let column_index = columns
            .iter()
            .enumerate()
            .map(|(idx, c)| (c.clone(), idx))
            .collect();

        Self {
            name,
            columns,
            column_index,
            rows: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> ExplorerResult<()> {
        if row.len() != self.columns.len() {
            return Err(ExplorerError::SchemaMismatch {
                table: self.name.clone(),
                expected: self.columns.len(),
                actual: row.len(),
            });
        }

        self.rows.push(row);
        Ok(())
    }

    pub fn column_idx(&self, column: &str) -> Option<usize> {
        self.column_index.get(column).copied()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index.contains_key(column)
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_idx(column)?;
        self.rows.get(row)?.get(idx)
    }

    /// Value at a resolved column index; out-of-range reads are blank.
    pub fn value_by_idx(&self, row: usize, idx: usize) -> &Value {
        self.rows
            .get(row)
            .and_then(|r| r.get(idx))
            .unwrap_or(&BLANK)
    }

    pub fn record(&self, row: usize) -> Option<RecordRef<'_>> {
        (row < self.rows.len()).then_some(RecordRef { table: self, row })
    }

    pub fn records<'a>(&'a self, rows: &'a [usize]) -> impl Iterator<Item = RecordRef<'a>> + 'a {
        rows.iter().filter_map(move |&row| self.record(row))
    }

    /// Copies the given rows, restricted to `columns`, into a new table. Unknown columns read as
    /// blank.
    pub(crate) fn project(&self, name: &str, columns: &[&str], rows: &[usize]) -> Table {
        let indices: Vec<Option<usize>> = columns.iter().map(|c| self.column_idx(c)).collect();
        let mut out = Table::new(name, columns.to_vec());
        out.rows = rows
            .iter()
            .map(|&row| {
                indices
                    .iter()
                    .map(|idx| match idx {
                        Some(idx) => self.value_by_idx(row, *idx).clone(),
                        None => Value::Blank,
                    })
                    .collect()
            })
            .collect();
        out
    }
}

/// A borrowed row of a [`Table`]. Serializes as a field → value map in column order.
#[derive(Clone, Copy, Debug)]
pub struct RecordRef<'a> {
    table: &'a Table,
    row: usize,
}

impl<'a> RecordRef<'a> {
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn get(&self, field: &str) -> Option<&'a Value> {
        self.table.value(self.row, field)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'a str, &'a Value)> + 'a {
        let table = self.table;
        let row = self.row;
        table
            .columns
            .iter()
            .enumerate()
            .map(move |(idx, name)| (name.as_str(), table.value_by_idx(row, idx)))
    }
}

impl PartialEq for RecordRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.fields().eq(other.fields())
    }
}

impl Serialize for RecordRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.table.columns.len()))?;
        for (name, value) in self.fields() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
