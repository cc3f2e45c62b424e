//! WASM bindings for Wirelist Core.
//!
//! This module provides JavaScript-friendly bindings so browser-based board
//! viewers can compile a wire list without a server round trip.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmWireList } from 'wirelist_core';
//!
//! await init();
//!
//! const wl = new WasmWireList(text);
//! if (wl.diagnostic_count > 0) {
//!   console.warn(wl.diagnostics());
//! }
//! const board = JSON.parse(wl.graph_json());
//! ```

use wasm_bindgen::prelude::*;

use crate::board::BoardGraph;
use crate::config::CompileOptions;
use crate::netlist;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// A compiled wire list.
#[wasm_bindgen]
pub struct WasmWireList {
    graph: BoardGraph,
    diagnostics: Vec<String>,
}

#[wasm_bindgen]
impl WasmWireList {
    /// Compile wire-list text with the default power nets.
    #[wasm_bindgen(constructor)]
    pub fn new(text: &str) -> WasmWireList {
        Self::with_power_nets(text, Vec::new())
    }

    /// Compile wire-list text, treating `power_nets` as additional rails.
    #[wasm_bindgen]
    pub fn with_power_nets(text: &str, power_nets: Vec<String>) -> WasmWireList {
        let options = power_nets
            .into_iter()
            .fold(CompileOptions::new(), |options, name| options.with_power_net(name));
        let compilation = netlist::compile_with(text, options);
        WasmWireList {
            graph: compilation.graph(),
            diagnostics: compilation
                .diagnostics
                .iter()
                .map(|d| d.to_string())
                .collect(),
        }
    }

    /// The board graph as pretty-printed JSON.
    #[wasm_bindgen]
    pub fn graph_json(&self) -> Result<String, JsValue> {
        self.graph
            .to_json_pretty()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Diagnostic messages, one per entry, in source order.
    #[wasm_bindgen]
    pub fn diagnostics(&self) -> Vec<String> {
        self.diagnostics.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn diagnostic_count(&self) -> usize {
        self.diagnostics.len()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
