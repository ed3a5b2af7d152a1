//! Configuration panel: a side panel bound to the selected node.
//!
//! One editable widget per config key, in declaration order. Widgets are
//! chosen by field semantics — a `model` key becomes a picklist over the
//! project's configured models, an `index` key a picklist over its
//! embedding pipelines, everything else a plain text input. Every edit
//! commits immediately through `UpdateNodeConfig`; there is no draft
//! state and therefore no cancel.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::constants::ID_CONFIG_PANEL;
use crate::messages::Message;
use crate::models::{ConfigValue, ConnectionId, NodeConfig, NodeId};
use crate::network::project_data::{EmbeddingConfig, ModelConfig};
use crate::state::{dispatch_global_message, APP_STATE};

/// Widget selection outcome for one config key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldWidget {
    ModelPicklist,
    IndexPicklist,
    TextInput,
}

/// Semantic widget rules, applied in priority order.
pub fn widget_for_key(key: &str) -> FieldWidget {
    if key == "model" {
        FieldWidget::ModelPicklist
    } else if key == "index" {
        FieldWidget::IndexPicklist
    } else {
        FieldWidget::TextInput
    }
}

/// Rebuild the panel from the current selection. Called when the
/// selection changes or the project data snapshot arrives — not on every
/// keystroke, so focused inputs survive typing.
pub fn refresh(document: &Document) -> Result<(), JsValue> {
    let Some(container) = document.get_element_by_id(ID_CONFIG_PANEL) else {
        return Ok(());
    };
    container.set_inner_html("");

    // Snapshot everything the DOM build needs inside one narrow borrow;
    // the listeners installed below dispatch messages, which re-borrow.
    let snapshot = APP_STATE.with(|state| {
        let state = state.borrow();
        state.graph.selected_node().map(|node| {
            let title_of = |id: NodeId| {
                state
                    .graph
                    .node(id)
                    .and_then(|n| state.graph.registry().describe(n.kind).ok())
                    .map(|d| d.title.clone())
                    .unwrap_or_else(|| id.to_string())
            };
            let connections = state
                .graph
                .connections_of(node.id)
                .map(|c| {
                    (
                        c.id,
                        format!("{} → {}", title_of(c.source), title_of(c.target)),
                    )
                })
                .collect();
            PanelSnapshot {
                node_id: node.id,
                title: state
                    .graph
                    .registry()
                    .describe(node.kind)
                    .map(|d| format!("{} {}", d.icon, d.title))
                    .unwrap_or_else(|_| node.kind.to_string()),
                kind_label: node.kind.to_string(),
                config: node.config.clone(),
                connections,
                models: state.project_models.clone(),
                indexes: state.project_indexes.clone(),
            }
        })
    });

    let Some(snapshot) = snapshot else {
        let empty = document.create_element("div")?;
        empty.set_class_name("config-empty-state");
        empty.set_text_content(Some("Select a node to configure it."));
        container.append_child(&empty)?;
        return Ok(());
    };

    let header = document.create_element("div")?;
    header.set_class_name("config-header");
    header.set_inner_html(&format!(
        "<h3>{}</h3><span class='config-kind-badge'>{}</span>",
        snapshot.title, snapshot.kind_label
    ));
    container.append_child(&header)?;

    for (key, value) in snapshot.config.iter() {
        let row = build_field_row(document, &snapshot, key, value)?;
        container.append_child(&row)?;
    }

    if !snapshot.connections.is_empty() {
        let heading = document.create_element("h4")?;
        heading.set_class_name("config-section-header");
        heading.set_text_content(Some("Connections"));
        container.append_child(&heading)?;
        for (connection_id, label) in &snapshot.connections {
            let row = build_connection_row(document, *connection_id, label)?;
            container.append_child(&row)?;
        }
    }

    let delete_btn = document.create_element("button")?;
    delete_btn.set_attribute("type", "button")?;
    delete_btn.set_class_name("config-delete-btn");
    delete_btn.set_text_content(Some("Delete node"));
    let node_id = snapshot.node_id;
    let on_delete = Closure::wrap(Box::new(move |_: web_sys::Event| {
        dispatch_global_message(Message::DeleteNode { node_id });
    }) as Box<dyn FnMut(_)>);
    delete_btn.add_event_listener_with_callback("click", on_delete.as_ref().unchecked_ref())?;
    on_delete.forget();
    container.append_child(&delete_btn)?;

    Ok(())
}

struct PanelSnapshot {
    node_id: NodeId,
    title: String,
    kind_label: String,
    config: NodeConfig,
    connections: Vec<(ConnectionId, String)>,
    models: Vec<ModelConfig>,
    indexes: Vec<EmbeddingConfig>,
}

fn build_connection_row(
    document: &Document,
    connection_id: ConnectionId,
    label: &str,
) -> Result<Element, JsValue> {
    let row = document.create_element("div")?;
    row.set_class_name("config-connection-row");

    let text = document.create_element("span")?;
    text.set_text_content(Some(label));
    row.append_child(&text)?;

    let remove = document.create_element("button")?;
    remove.set_attribute("type", "button")?;
    remove.set_class_name("config-connection-remove");
    remove.set_attribute("title", "Remove connection")?;
    remove.set_text_content(Some("✕"));
    let on_remove = Closure::wrap(Box::new(move |_: web_sys::Event| {
        dispatch_global_message(Message::RemoveConnection { connection_id });
    }) as Box<dyn FnMut(_)>);
    remove.add_event_listener_with_callback("click", on_remove.as_ref().unchecked_ref())?;
    on_remove.forget();
    row.append_child(&remove)?;

    Ok(row)
}

fn build_field_row(
    document: &Document,
    snapshot: &PanelSnapshot,
    key: &str,
    value: &ConfigValue,
) -> Result<Element, JsValue> {
    let row = document.create_element("div")?;
    row.set_class_name("config-field");

    let label = document.create_element("label")?;
    label.set_text_content(Some(key));
    row.append_child(&label)?;

    let widget = match widget_for_key(key) {
        FieldWidget::ModelPicklist => {
            let options: Vec<(String, String)> = snapshot
                .models
                .iter()
                .map(|m| (m.model.clone(), m.model.clone()))
                .collect();
            build_picklist(document, snapshot.node_id, key, value, options)?
        }
        FieldWidget::IndexPicklist => {
            let options: Vec<(String, String)> = snapshot
                .indexes
                .iter()
                .map(|e| (e.id.clone(), e.embedding_model.clone()))
                .collect();
            build_picklist(document, snapshot.node_id, key, value, options)?
        }
        FieldWidget::TextInput => build_text_input(document, snapshot.node_id, key, value)?,
    };
    row.append_child(&widget)?;
    Ok(row)
}

fn build_picklist(
    document: &Document,
    node_id: NodeId,
    key: &str,
    value: &ConfigValue,
    options: Vec<(String, String)>,
) -> Result<Element, JsValue> {
    let select = document.create_element("select")?;
    select.set_class_name("config-select");
    let current = value.display();

    if current.is_empty() {
        // Nothing configured yet (adapter list was empty at creation
        // time) — keep an explicit placeholder entry.
        let option = document.create_element("option")?;
        option.set_attribute("value", "")?;
        option.set_attribute("selected", "selected")?;
        option.set_text_content(Some("— not set —"));
        select.append_child(&option)?;
    } else if !options.iter().any(|(v, _)| v == &current) {
        // The stored value is not in the project list (renamed or typed
        // by hand); keep it visible rather than silently rewriting it.
        let option = document.create_element("option")?;
        option.set_attribute("value", &current)?;
        option.set_attribute("selected", "selected")?;
        option.set_text_content(Some(&current));
        select.append_child(&option)?;
    }

    for (option_value, option_label) in &options {
        let option = document.create_element("option")?;
        option.set_attribute("value", option_value)?;
        if option_value == &current {
            option.set_attribute("selected", "selected")?;
        }
        option.set_text_content(Some(option_label));
        select.append_child(&option)?;
    }

    let key = key.to_string();
    let on_change = Closure::wrap(Box::new(move |event: web_sys::Event| {
        let Some(select) = event
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
        else {
            return;
        };
        dispatch_global_message(Message::UpdateNodeConfig {
            node_id,
            key: key.clone(),
            value: ConfigValue::Text(select.value()),
        });
    }) as Box<dyn FnMut(_)>);
    select.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())?;
    on_change.forget();

    Ok(select)
}

fn build_text_input(
    document: &Document,
    node_id: NodeId,
    key: &str,
    value: &ConfigValue,
) -> Result<Element, JsValue> {
    let input = document.create_element("input")?;
    input.set_attribute("type", "text")?;
    input.set_class_name("config-input");
    input.set_attribute("value", &value.display())?;

    // Numeric fields keep their numberness for as long as the text
    // parses; the store itself never validates values.
    let was_number = matches!(value, ConfigValue::Number(_));
    let key = key.to_string();
    let on_input = Closure::wrap(Box::new(move |event: web_sys::Event| {
        let Some(input) = event
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let raw = input.value();
        let value = if was_number {
            raw.parse::<f64>()
                .map(ConfigValue::Number)
                .unwrap_or(ConfigValue::Text(raw))
        } else {
            ConfigValue::Text(raw)
        };
        dispatch_global_message(Message::UpdateNodeConfig {
            node_id,
            key: key.clone(),
            value,
        });
    }) as Box<dyn FnMut(_)>);
    input.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;
    on_input.forget();

    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_rules_apply_in_priority_order() {
        assert_eq!(widget_for_key("model"), FieldWidget::ModelPicklist);
        assert_eq!(widget_for_key("index"), FieldWidget::IndexPicklist);
        assert_eq!(widget_for_key("system_prompt"), FieldWidget::TextInput);
        assert_eq!(widget_for_key("temperature"), FieldWidget::TextInput);
        assert_eq!(widget_for_key("cron"), FieldWidget::TextInput);
    }

    #[test]
    fn near_miss_keys_stay_free_text() {
        // The rules match exact field names, not substrings.
        assert_eq!(widget_for_key("model_name"), FieldWidget::TextInput);
        assert_eq!(widget_for_key("reindex"), FieldWidget::TextInput);
    }
}
