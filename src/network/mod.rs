// Network layer: API route configuration plus the project data adapter.
pub mod config;
pub mod project_data;

use config::ApiConfig;
use lazy_static::lazy_static;
use std::sync::RwLock;
use wasm_bindgen::prelude::*;

lazy_static! {
    static ref API_CONFIG: RwLock<Option<ApiConfig>> = RwLock::new(None);
}

/// Initialize the API configuration from the compile-time `API_BASE_URL`
/// environment variable. Must run before any network operation; missing
/// configuration falls back to same-origin relative paths.
pub fn init_api_config() -> Result<(), &'static str> {
    let config = ApiConfig::new()?;
    *API_CONFIG.write().unwrap() = Some(config);
    Ok(())
}

/// Initialize the API configuration from a JS-provided URL, allowing the
/// hosting page to configure endpoints at runtime.
#[wasm_bindgen]
pub fn init_api_config_js(api_base_url: &str) -> Result<(), JsValue> {
    crate::debug_log!("Initializing API config from JS: {}", api_base_url);
    *API_CONFIG.write().unwrap() = Some(ApiConfig::from_url(api_base_url));
    Ok(())
}

/// Base URL for API calls. Empty string → same-origin relative "/api"
/// paths.
pub(crate) fn get_api_base_url() -> String {
    API_CONFIG
        .read()
        .unwrap()
        .as_ref()
        .map(|cfg| cfg.base_url().to_string())
        .unwrap_or_default()
}
