//! Workflow canvas editor for the ML studio dashboard.
//!
//! Compiles to wasm32 and mounts a node-based editor for composing
//! trigger/agent/tool pipelines: an in-memory graph store as the single
//! source of truth, a registry-driven palette, a canvas projection, a
//! configuration side panel and a deployment snippet exporter.

use wasm_bindgen::prelude::*;

pub mod canvas;
pub mod components;
pub mod constants;
pub mod export;
pub mod graph;
pub mod messages;
pub mod models;
pub mod network;
pub mod reducers;
pub mod registry;
pub mod state;
pub mod toast;
pub mod ui;
pub mod update;
pub mod utils;

// Export convenience macros crate-wide
#[macro_use]
mod macros;

#[cfg(test)]
mod graph_prop_test;

/// Fallback project id when the hosting page does not provide one via
/// `<body data-project-id="…">`.
const DEFAULT_PROJECT_ID: u32 = 1;

// Main entry point for the WASM application
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Initialize better panic messages
    console_error_panic_hook::set_once();

    // Compile-time API base config; the hosting page can still override at
    // runtime via `init_api_config_js` before the first fetch resolves.
    if let Err(e) = network::init_api_config() {
        debug_log!("API config not set at compile time ({})", e);
    }

    let window = web_sys::window().expect("no global `window` exists");
    let document = window.document().expect("should have a document on window");

    ui::build_editor_shell(&document)?;
    components::canvas_editor::setup_canvas(&document)?;

    if let Some(palette) = document.get_element_by_id(constants::ID_NODE_PALETTE) {
        components::node_palette::render_into(&document, &palette)?;
    }
    components::config_panel::refresh(&document)?;

    // One adapter fetch per editor mount; failures degrade to empty lists
    // inside the loader.
    network::project_data::load_project_data(project_id(&document));

    // Signal to automation/tests that the editor finished mounting.
    let key = js_sys::JsString::from("__EDITOR_READY__");
    let _ = js_sys::Reflect::set(&window, &key, &JsValue::from_bool(true));

    Ok(())
}

fn project_id(document: &web_sys::Document) -> u32 {
    document
        .body()
        .and_then(|body| body.dataset().get("projectId"))
        .and_then(|raw| raw.parse::<u32>().ok())
        .unwrap_or(DEFAULT_PROJECT_ID)
}

/// Produce a fresh deployment snippet for the current graph. Exposed to
/// the page shell; each call generates a new opaque agent id.
#[wasm_bindgen]
pub fn export_snippet() -> String {
    state::APP_STATE.with(|state| {
        let mut state = state.borrow_mut();
        let state = &mut *state;
        let artifact = state.exporter.export(&state.graph);
        let snippet = artifact.snippet.clone();
        state.last_export = Some(artifact);
        snippet
    })
}

// Debug helpers for e2e tests — expose graph state info.

#[cfg(debug_assertions)]
#[wasm_bindgen]
pub fn debug_node_count() -> usize {
    state::APP_STATE.with(|state| state.borrow().graph.node_count())
}

#[cfg(debug_assertions)]
#[wasm_bindgen]
pub fn debug_connection_count() -> usize {
    state::APP_STATE.with(|state| state.borrow().graph.connection_count())
}

#[cfg(debug_assertions)]
#[wasm_bindgen]
pub fn debug_graph_snapshot() -> JsValue {
    state::APP_STATE.with(|state| {
        serde_wasm_bindgen::to_value(&state.borrow().graph.snapshot())
            .unwrap_or(JsValue::NULL)
    })
}
