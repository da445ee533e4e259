use serde_json::Value as JsonValue;
use std::collections::HashMap;

use crate::dedup::project_level;
use crate::error::{DatasetError, ExplorerResult};
use crate::join::FlatJoinTable;
use crate::level::{Level, LevelMap, LevelSchema};
use crate::table::Table;
use crate::value::Value;

pub const FLAT_TABLE_NAME: &str = "Flat";

/// The static, session-long data: the flat join table and the six full level tables derived
/// from it. Never mutated after load.
#[derive(Clone, Debug)]
pub struct Dataset {
    flat: FlatJoinTable,
    levels: LevelMap<Table>,
    schema: LevelMap<LevelSchema>,
}

impl Dataset {
    pub fn from_flat_table(flat: Table, schema: &LevelMap<LevelSchema>) -> Self {
        for (level, level_schema) in schema.iter() {
            for column in &level_schema.identity {
                if !flat.has_column(column) {
                    log::warn!("dataset has no {column} column; {level} identities treat it as blank");
                }
            }
        }

        let levels = LevelMap::from_fn(|level| {
            project_level(&flat, level.table_name(), &schema[level])
        });
        let flat = FlatJoinTable::index(flat, schema, &levels);

        if log::log_enabled!(log::Level::Debug) {
            let sizes: Vec<String> = Level::ALL
                .iter()
                .map(|level| format!("{}={}", level.table_name(), levels[*level].row_count()))
                .collect();
            log::debug!(
                "loaded dataset: {} flat rows; {}",
                flat.row_count(),
                sizes.join(", ")
            );
        }

        Self {
            flat,
            levels,
            schema: schema.clone(),
        }
    }

    /// Loads a JSON array of flat records, one object per effect. Columns are the union of keys
    /// in order of first appearance; absent keys read as blank.
    pub fn from_json_str(json: &str, schema: &LevelMap<LevelSchema>) -> ExplorerResult<Self> {
        let parsed: Vec<JsonValue> = serde_json::from_str(json)
            .map_err(|err| DatasetError::InvalidJson(err.to_string()))?;

        let mut columns: Vec<String> = Vec::new();
        let mut column_index: HashMap<String, usize> = HashMap::new();
        let mut rows: Vec<Vec<(usize, Value)>> = Vec::with_capacity(parsed.len());

        for (row_idx, row) in parsed.iter().enumerate() {
            let JsonValue::Object(fields) = row else {
                return Err(DatasetError::NotAnObject { row: row_idx }.into());
            };

            let mut cells = Vec::with_capacity(fields.len());
            for (field, raw) in fields {
                let value = Value::from_json(raw).ok_or_else(|| match raw {
                    JsonValue::Number(_) => DatasetError::InexactNumber {
                        row: row_idx,
                        field: field.clone(),
                    },
                    _ => DatasetError::InvalidValue {
                        row: row_idx,
                        field: field.clone(),
                    },
                })?;
                let idx = *column_index.entry(field.clone()).or_insert_with(|| {
                    columns.push(field.clone());
                    columns.len() - 1
                });
                cells.push((idx, value));
            }
            rows.push(cells);
        }

        let width = columns.len();
        let mut flat = Table::new(FLAT_TABLE_NAME, columns);
        for cells in rows {
            let mut row = vec![Value::Blank; width];
            for (idx, value) in cells {
                row[idx] = value;
            }
            flat.push_row(row)?;
        }

        Ok(Self::from_flat_table(flat, schema))
    }

    pub fn flat(&self) -> &FlatJoinTable {
        &self.flat
    }

    pub fn level(&self, level: Level) -> &Table {
        &self.levels[level]
    }

    pub fn schema(&self) -> &LevelMap<LevelSchema> {
        &self.schema
    }

    /// Every row of every full level table, in table order.
    pub fn all_rows(&self) -> LevelMap<Vec<usize>> {
        self.levels.map(|_, table| (0..table.row_count()).collect())
    }
}
