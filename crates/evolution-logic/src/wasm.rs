//! WASM bindings for browser front ends

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;

use crate::{run_simulation as run, SimulationConfig, StrategyRegistry};

/// Run a simulation described by a JSON `SimulationConfig`
///
/// Returns the `SimulationOutcome` (history, final snapshot, completion
/// status) as a JS object.
#[wasm_bindgen]
pub fn run_simulation(config_json: &str) -> Result<JsValue, JsError> {
    let config = SimulationConfig::from_json(config_json)
        .map_err(|e| JsError::new(&e.to_string()))?;

    let outcome = run(&config).map_err(|e| JsError::new(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&outcome)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Default configuration as a JSON string, for pre-filling forms
#[wasm_bindgen]
pub fn default_config() -> Result<String, JsError> {
    SimulationConfig::default()
        .to_json()
        .map_err(|e| JsError::new(&e.to_string()))
}

#[derive(serde::Serialize)]
struct StrategyInfo {
    id: String,
    description: String,
}

/// Get all available strategies with their descriptions
#[wasm_bindgen]
pub fn get_strategy_types() -> Result<JsValue, JsError> {
    let types: Vec<StrategyInfo> = StrategyRegistry::with_builtins()
        .iter()
        .map(|s| StrategyInfo {
            id: s.name().to_string(),
            description: s.description().to_string(),
        })
        .collect();

    serde_wasm_bindgen::to_value(&types)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Names of the built-in strategies
#[wasm_bindgen]
pub fn get_strategy_names() -> js_sys::Array {
    StrategyRegistry::with_builtins()
        .names()
        .map(JsValue::from_str)
        .collect()
}
