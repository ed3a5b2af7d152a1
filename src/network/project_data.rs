//! External project data adapter.
//!
//! Supplies the live defaults the editor merges into freshly placed nodes:
//! the project's configured model identifiers and embedding/index
//! identifiers. Fetched once per editor mount; every failure degrades to
//! an empty list so the graph UI never sees an error from here.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use crate::warn_log;

/// A configured model as returned by the project settings backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub id: String,
    pub model: String,
    #[serde(default)]
    pub system_prompt: Option<String>,
}

/// A configured embedding pipeline / knowledge index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    pub id: String,
    pub embedding_model: String,
}

/// REST client for the two project-configuration endpoints this subsystem
/// consumes.
pub struct ProjectDataApi;

impl ProjectDataApi {
    pub async fn list_model_configs(project_id: u32) -> Result<Vec<ModelConfig>, JsValue> {
        let url = format!(
            "{}/api/projects/{}/model-configs",
            super::get_api_base_url(),
            project_id
        );
        let body = Self::fetch_json(&url).await?;
        serde_json::from_str(&body)
            .map_err(|e| JsValue::from_str(&format!("bad model config payload: {}", e)))
    }

    pub async fn list_embedding_configs(project_id: u32) -> Result<Vec<EmbeddingConfig>, JsValue> {
        let url = format!(
            "{}/api/projects/{}/embedding-configs",
            super::get_api_base_url(),
            project_id
        );
        let body = Self::fetch_json(&url).await?;
        serde_json::from_str(&body)
            .map_err(|e| JsValue::from_str(&format!("bad embedding config payload: {}", e)))
    }

    async fn fetch_json(url: &str) -> Result<String, JsValue> {
        let opts = RequestInit::new();
        // `RequestInit` setters mutate internal JS fields via interior
        // mutability, so a `mut` binding is unnecessary.
        opts.set_method("GET");
        opts.set_mode(RequestMode::Cors);

        let headers = Headers::new()?;
        headers.append("Accept", "application/json")?;
        opts.set_headers(&headers);

        let request = Request::new_with_str_and_init(url, &opts)?;
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
        let resp: Response = resp_value.dyn_into()?;

        if !resp.ok() {
            return Err(JsValue::from_str(&format!(
                "request failed: {} {}",
                resp.status(),
                resp.status_text()
            )));
        }

        let text = JsFuture::from(resp.text()?).await?;
        text.as_string()
            .ok_or_else(|| JsValue::from_str("response body was not text"))
    }
}

/// Fetch both lists and dispatch them into the app state. Runs once at
/// editor mount; either request failing yields an empty list for that
/// side.
pub fn load_project_data(project_id: u32) {
    wasm_bindgen_futures::spawn_local(async move {
        let models = match ProjectDataApi::list_model_configs(project_id).await {
            Ok(models) => models,
            Err(e) => {
                warn_log!("model config fetch failed, using empty list: {:?}", e);
                Vec::new()
            }
        };
        let indexes = match ProjectDataApi::list_embedding_configs(project_id).await {
            Ok(indexes) => indexes,
            Err(e) => {
                warn_log!("embedding config fetch failed, using empty list: {:?}", e);
                Vec::new()
            }
        };
        crate::state::dispatch_global_message(crate::messages::Message::ProjectDataLoaded {
            models,
            indexes,
        });
    });
}
