use metalab_explorer::{
    ExplorerConfig, ExplorerError, ExplorerSession, ExportScope, Level, LevelFilter,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn to_js_error(err: ExplorerError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Records are plain objects keyed by column, not ES `Map`s.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|err| JsValue::from_str(&err.to_string()))
}

fn parse_level(level: &str) -> Result<Level, JsValue> {
    level.parse::<Level>().map_err(to_js_error)
}

#[wasm_bindgen]
pub struct WasmExplorer {
    inner: ExplorerSession,
}

#[wasm_bindgen]
impl WasmExplorer {
    /// `dataset` is the flat join table as a JSON array of row objects. `config` is optional
    /// explorer config JSON; defaults apply when it is omitted.
    #[wasm_bindgen(constructor)]
    pub fn new(dataset: &str, config: Option<String>) -> Result<WasmExplorer, JsValue> {
        let config = match config.as_deref() {
            Some(json) => ExplorerConfig::from_json_str(json).map_err(to_js_error)?,
            None => ExplorerConfig::default(),
        };
        Ok(WasmExplorer {
            inner: ExplorerSession::from_json_str(dataset, config).map_err(to_js_error)?,
        })
    }

    #[wasm_bindgen(js_name = "levels")]
    pub fn levels() -> js_sys::Array {
        Level::ALL
            .iter()
            .map(|level| JsValue::from_str(level.table_name()))
            .collect()
    }

    /// `filter` is `{ criteria: [{ field, kind, ... }] }`.
    #[wasm_bindgen(js_name = "applyFilter")]
    pub fn apply_filter(&mut self, level: &str, filter: JsValue) -> Result<(), JsValue> {
        let level = parse_level(level)?;
        let filter: LevelFilter = serde_wasm_bindgen::from_value(filter)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        self.inner.apply_filter(level, filter).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = "applyFilterJson")]
    pub fn apply_filter_json(&mut self, level: &str, json: &str) -> Result<(), JsValue> {
        let level = parse_level(level)?;
        let filter: LevelFilter =
            serde_json::from_str(json).map_err(|err| JsValue::from_str(&err.to_string()))?;
        self.inner.apply_filter(level, filter).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = "appliedFilter")]
    pub fn applied_filter(&self, level: &str) -> Result<JsValue, JsValue> {
        let level = parse_level(level)?;
        match self.inner.applied_filter(level) {
            Some(filter) => to_js(filter),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = "setLock")]
    pub fn set_lock(&mut self, level: &str, locked: bool) -> Result<(), JsValue> {
        let level = parse_level(level)?;
        self.inner.set_lock(level, locked);
        Ok(())
    }

    /// Returns the new lock state.
    #[wasm_bindgen(js_name = "toggleLock")]
    pub fn toggle_lock(&mut self, level: &str) -> Result<bool, JsValue> {
        let level = parse_level(level)?;
        Ok(self.inner.toggle_lock(level))
    }

    #[wasm_bindgen(js_name = "isLocked")]
    pub fn is_locked(&self, level: &str) -> Result<bool, JsValue> {
        Ok(self.inner.is_locked(parse_level(level)?))
    }

    #[wasm_bindgen(js_name = "reset")]
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    #[wasm_bindgen(js_name = "records")]
    pub fn records(&self, level: &str) -> Result<JsValue, JsValue> {
        let level = parse_level(level)?;
        to_js(&self.inner.records(level))
    }

    /// `{ paper: { shown, total }, study: ..., effect: ... }`
    #[wasm_bindgen(js_name = "counts")]
    pub fn counts(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.counts())
    }

    #[wasm_bindgen(js_name = "exportCsv")]
    pub fn export_csv(&self, level: &str, full: bool) -> Result<String, JsValue> {
        let level = parse_level(level)?;
        let scope = if full {
            ExportScope::Full
        } else {
            ExportScope::Filtered
        };
        self.inner
            .export_level_csv_string(level, scope)
            .map_err(to_js_error)
    }
}
