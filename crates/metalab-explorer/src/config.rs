use serde::{Deserialize, Serialize};

use crate::error::{ExplorerError, ExplorerResult};
use crate::level::{default_schema, LevelMap, LevelSchema};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExplorerConfig {
    /// Identity tuple and own fields of each level.
    pub schema: LevelMap<LevelSchema>,
    /// Whether "reset filters" also clears every lock. When `false`, locks survive a reset and
    /// only an explicit unlock clears them.
    pub reset_clears_locks: bool,
    pub csv: CsvExportOptions,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            schema: default_schema(),
            reset_clears_locks: true,
            csv: CsvExportOptions::default(),
        }
    }
}

impl ExplorerConfig {
    pub fn from_json_str(json: &str) -> ExplorerResult<Self> {
        let config: ExplorerConfig =
            serde_json::from_str(json).map_err(|err| ExplorerError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ExplorerResult<()> {
        for (level, schema) in self.schema.iter() {
            if schema.identity.is_empty() {
                return Err(ExplorerError::Config(format!(
                    "{level} has an empty identity tuple"
                )));
            }
        }
        if self.csv.delimiter == b'"' || self.csv.delimiter == b'\n' {
            return Err(ExplorerError::Config(format!(
                "{:?} cannot be used as a csv delimiter",
                self.csv.delimiter as char
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CsvExportOptions {
    pub delimiter: u8,
    pub include_header: bool,
}

impl Default for CsvExportOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            include_header: true,
        }
    }
}
