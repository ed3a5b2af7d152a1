//! Node palette: the drag source for placing workflow steps.
//!
//! Entries are derived from the node type registry — the palette never
//! hardcodes kinds — grouped by category in a fixed order. Dragging an
//! entry serializes it into the `DataTransfer`; the canvas drop handler
//! turns the payload into a `DropPaletteNode` message.

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;
use web_sys::{Document, DragEvent, Element};

use crate::constants::{DRAG_MIME_FALLBACK, DRAG_MIME_PALETTE};
use crate::registry::NodeRegistry;
use crate::state::APP_STATE;

/// One draggable palette row. `kind` is the kind identifier string as
/// understood by `NodeKind::parse`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub kind: String,
    pub title: String,
    pub icon: String,
    pub category: String,
}

/// Build the palette rows from a registry, grouped by category in display
/// order (Triggers, Agents, Tools) and keeping catalog order within each
/// group.
pub fn entries_from_registry(registry: &NodeRegistry) -> Vec<PaletteEntry> {
    let mut entries: Vec<(usize, PaletteEntry)> = registry
        .descriptors()
        .map(|descriptor| {
            let category = descriptor.kind.category();
            (
                category.order(),
                PaletteEntry {
                    kind: descriptor.kind.as_str().to_string(),
                    title: descriptor.title.clone(),
                    icon: descriptor.icon.clone(),
                    category: category.label().to_string(),
                },
            )
        })
        .collect();
    entries.sort_by_key(|(order, _)| *order);
    entries.into_iter().map(|(_, entry)| entry).collect()
}

/// Render the palette into its container element.
pub fn render_into(document: &Document, container: &Element) -> Result<(), JsValue> {
    container.set_inner_html("");

    let header = document.create_element("div")?;
    header.set_class_name("palette-header");
    header.set_inner_html("<h3>Nodes</h3>");
    container.append_child(&header)?;

    let entries = APP_STATE.with(|state| entries_from_registry(state.borrow().graph.registry()));

    let mut current_category = String::new();
    for entry in &entries {
        if entry.category != current_category {
            current_category = entry.category.clone();
            let category_header = document.create_element("h4")?;
            category_header.set_class_name("palette-category-header");
            category_header.set_text_content(Some(&entry.category));
            container.append_child(&category_header)?;
        }
        render_entry(document, container, entry)?;
    }

    Ok(())
}

fn render_entry(
    document: &Document,
    container: &Element,
    entry: &PaletteEntry,
) -> Result<(), JsValue> {
    let row = document.create_element("div")?;
    row.set_class_name("palette-node");
    row.set_attribute("draggable", "true")?;
    row.set_attribute("data-node-kind", &entry.kind)?;
    row.set_inner_html(&format!(
        "<span class='palette-node-icon'>{}</span><span class='palette-node-title'>{}</span>",
        entry.icon, entry.title
    ));

    add_drag_listener(&row, entry)?;
    container.append_child(&row)?;
    Ok(())
}

fn add_drag_listener(element: &Element, entry: &PaletteEntry) -> Result<(), JsValue> {
    use wasm_bindgen::JsCast;

    let payload = entry.clone();
    let ondragstart = wasm_bindgen::closure::Closure::wrap(Box::new(move |event: DragEvent| {
        if let Some(data_transfer) = event.data_transfer() {
            let json = serde_json::to_string(&payload).unwrap_or_default();
            let _ = data_transfer.set_data(DRAG_MIME_PALETTE, &json);
            let _ = data_transfer.set_data(DRAG_MIME_FALLBACK, &payload.kind);
            data_transfer.set_effect_allowed("copy");
        }
    }) as Box<dyn FnMut(_)>);

    element.add_event_listener_with_callback("dragstart", ondragstart.as_ref().unchecked_ref())?;
    ondragstart.forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_cover_the_whole_catalog_in_category_order() {
        let entries = entries_from_registry(&NodeRegistry::builtin());
        assert_eq!(entries.len(), 6);

        let categories: Vec<&str> = entries.iter().map(|e| e.category.as_str()).collect();
        assert_eq!(
            categories,
            vec!["Triggers", "Triggers", "Agents", "Agents", "Tools", "Tools"]
        );

        // Kind identifiers round-trip through the parser used on drop.
        for entry in &entries {
            assert!(
                crate::models::NodeKind::parse(&entry.kind).is_some(),
                "unparseable palette kind {}",
                entry.kind
            );
        }
    }

    #[test]
    fn drag_payload_round_trips_as_json() {
        let entries = entries_from_registry(&NodeRegistry::builtin());
        let json = serde_json::to_string(&entries[0]).unwrap();
        let back: PaletteEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind, entries[0].kind);
    }
}
