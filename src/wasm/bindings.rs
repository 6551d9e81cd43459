//! JavaScript bindings for the diff reducer and replicas
//!
//! Strings crossing the boundary are decoded by wasm-bindgen from UTF-16;
//! lone surrogates arrive as U+FFFD. All positions exposed here count
//! Unicode scalar values, not UTF-16 code units.

use crate::diff::{self, TextEdit};
use wasm_bindgen::prelude::*;

#[cfg(feature = "replica")]
use crate::protocol::Side;
#[cfg(feature = "replica")]
use crate::session::ReplicaPair;

/// JavaScript-friendly wrapper for TextEdit
#[wasm_bindgen]
pub struct WasmTextEdit {
    inner: TextEdit,
}

#[wasm_bindgen]
impl WasmTextEdit {
    /// Char offset where the edit starts
    #[wasm_bindgen(getter)]
    pub fn pos(&self) -> usize {
        self.inner.pos
    }

    /// Number of chars deleted at `pos`
    #[wasm_bindgen(getter)]
    pub fn del(&self) -> usize {
        self.inner.del
    }

    /// Text inserted at `pos`
    #[wasm_bindgen(getter)]
    pub fn ins(&self) -> String {
        self.inner.ins.clone()
    }

    #[wasm_bindgen(js_name = isNoop)]
    pub fn is_noop(&self) -> bool {
        self.inner.is_noop()
    }

    /// Apply this edit to `old`
    #[wasm_bindgen(js_name = apply)]
    pub fn apply(&self, old: String) -> Result<String, JsValue> {
        self.inner
            .apply(&old)
            .map_err(|e| JsValue::from_str(&format!("Apply failed: {}", e)))
    }

    /// Export as JSON string (`{"pos":..,"del":..,"ins":..}`)
    #[wasm_bindgen(js_name = toJSON)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.inner)
            .map_err(|e| JsValue::from_str(&format!("JSON serialization failed: {}", e)))
    }
}

/// Compute the edit that turns `old_text` into `new_text`
#[wasm_bindgen(js_name = calcDiff)]
pub fn calc_diff(old_text: String, new_text: String) -> WasmTextEdit {
    WasmTextEdit {
        inner: diff::calc_diff(&old_text, &new_text),
    }
}

/// JavaScript-friendly wrapper for ReplicaPair
/// Only available when the replica feature is enabled
#[cfg(feature = "replica")]
#[wasm_bindgen]
pub struct WasmReplicaPair {
    inner: ReplicaPair,
}

#[cfg(feature = "replica")]
impl Default for WasmReplicaPair {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "replica")]
#[wasm_bindgen]
impl WasmReplicaPair {
    /// Create a new pair with fresh agents
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: ReplicaPair::new(),
        }
    }

    /// Insert text on one side (`"left"` or `"right"`)
    ///
    /// # Returns
    /// JSON string `{left, right}` with both replicas' text
    #[wasm_bindgen(js_name = insert)]
    pub fn insert(
        &mut self,
        side: &str,
        position: usize,
        text: String,
    ) -> Result<String, JsValue> {
        let side = parse_side(side)?;
        let snapshot = self
            .inner
            .insert(side, position, &text)
            .map_err(|e| JsValue::from_str(&format!("Insert failed: {}", e)))?;
        to_json(&snapshot)
    }

    /// Delete `count` chars at `position` on one side
    #[wasm_bindgen(js_name = delete)]
    pub fn delete(
        &mut self,
        side: &str,
        position: usize,
        count: usize,
    ) -> Result<String, JsValue> {
        let side = parse_side(side)?;
        let snapshot = self
            .inner
            .delete(side, position, count)
            .map_err(|e| JsValue::from_str(&format!("Delete failed: {}", e)))?;
        to_json(&snapshot)
    }

    /// Replay an edit from `calcDiff` on one side
    ///
    /// # Example
    /// ```javascript
    /// const pair = new WasmReplicaPair();
    /// pair.applyEdit("left", calcDiff("", "hello"));
    /// // Returns: '{"left":"hello","right":"hello"}'
    /// ```
    #[wasm_bindgen(js_name = applyEdit)]
    pub fn apply_edit(&mut self, side: &str, edit: &WasmTextEdit) -> Result<String, JsValue> {
        let side = parse_side(side)?;
        let snapshot = self
            .inner
            .apply_edit(side, &edit.inner)
            .map_err(|e| JsValue::from_str(&format!("Apply failed: {}", e)))?;
        to_json(&snapshot)
    }

    /// Diff `old_text` against `new_text` and replay the edit on one side
    #[wasm_bindgen(js_name = applyDiff)]
    pub fn apply_diff(
        &mut self,
        side: &str,
        old_text: String,
        new_text: String,
    ) -> Result<String, JsValue> {
        self.apply_edit(side, &calc_diff(old_text, new_text))
    }

    /// Clear both replicas
    #[wasm_bindgen(js_name = reset)]
    pub fn reset(&mut self) -> Result<String, JsValue> {
        let snapshot = self.inner.reset();
        crate::console_log!(
            "replicas reset: {} / {}",
            self.inner.doc(Side::Left).agent(),
            self.inner.doc(Side::Right).agent()
        );
        to_json(&snapshot)
    }

    /// Text of the left replica
    #[wasm_bindgen(getter)]
    pub fn left(&self) -> String {
        self.inner.doc(Side::Left).content()
    }

    /// Text of the right replica
    #[wasm_bindgen(getter)]
    pub fn right(&self) -> String {
        self.inner.doc(Side::Right).content()
    }
}

#[cfg(feature = "replica")]
fn parse_side(side: &str) -> Result<Side, JsValue> {
    match side {
        "left" => Ok(Side::Left),
        "right" => Ok(Side::Right),
        other => Err(JsValue::from_str(&format!("Unknown side: {}", other))),
    }
}

#[cfg(feature = "replica")]
fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization failed: {}", e)))
}
