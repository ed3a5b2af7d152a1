//! Editor shell: builds the static DOM scaffolding (palette, canvas,
//! config panel, toolbar) and wires the toolbar buttons to messages.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::constants::{
    ID_CANVAS_CONTAINER, ID_CLEAR_BUTTON, ID_CONFIG_PANEL, ID_DEPLOY_BUTTON, ID_DEPLOY_OUTPUT,
    ID_EDITOR_ROOT, ID_NODE_PALETTE, ID_WORKFLOW_CANVAS,
};
use crate::messages::Message;
use crate::state::{dispatch_global_message, APP_STATE};

/// Create the editor layout unless the hosting page already provides it,
/// then wire the toolbar.
pub fn build_editor_shell(document: &Document) -> Result<(), JsValue> {
    if document.get_element_by_id(ID_EDITOR_ROOT).is_none() {
        let root = document.create_element("div")?;
        root.set_id(ID_EDITOR_ROOT);
        root.set_inner_html(&format!(
            "<aside id='{palette}'></aside>\
             <div class='editor-main'>\
               <div class='editor-toolbar'>\
                 <button type='button' id='{deploy}'>Deploy</button>\
                 <button type='button' id='{clear}'>Clear</button>\
               </div>\
               <div id='{container}'><canvas id='{canvas}'></canvas></div>\
               <pre id='{output}' class='hidden'></pre>\
             </div>\
             <aside id='{panel}'></aside>",
            palette = ID_NODE_PALETTE,
            deploy = ID_DEPLOY_BUTTON,
            clear = ID_CLEAR_BUTTON,
            container = ID_CANVAS_CONTAINER,
            canvas = ID_WORKFLOW_CANVAS,
            output = ID_DEPLOY_OUTPUT,
            panel = ID_CONFIG_PANEL,
        ));
        document
            .body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&root)?;
        ensure_styles(document)?;
    }

    wire_button(document, ID_DEPLOY_BUTTON, Message::RequestExport)?;
    wire_button(document, ID_CLEAR_BUTTON, Message::ClearCanvas)?;
    Ok(())
}

fn wire_button(document: &Document, id: &str, msg: Message) -> Result<(), JsValue> {
    let Some(button) = document.get_element_by_id(id) else {
        return Ok(());
    };
    let handler = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
        dispatch_global_message(msg.clone());
    }) as Box<dyn FnMut(_)>);
    button.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}

/// Show the most recent export artifact under the toolbar.
pub fn render_deploy_output(document: &Document) -> Result<(), JsValue> {
    let Some(output) = document.get_element_by_id(ID_DEPLOY_OUTPUT) else {
        return Ok(());
    };
    let snippet = APP_STATE.with(|state| {
        state
            .borrow()
            .last_export
            .as_ref()
            .map(|artifact| artifact.snippet.clone())
    });
    if let Some(snippet) = snippet {
        output.set_text_content(Some(&snippet));
        output.set_class_name("");
    }
    Ok(())
}

fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.get_element_by_id("editor-styles").is_some() {
        return Ok(());
    }
    let css = "
#editor-root{display:flex;height:100vh;font-family:system-ui,sans-serif}
#node-palette{width:220px;overflow-y:auto;border-right:1px solid #e5e7eb;padding:8px}
#config-panel{width:280px;overflow-y:auto;border-left:1px solid #e5e7eb;padding:12px}
.editor-main{flex:1;display:flex;flex-direction:column;min-width:0}
.editor-toolbar{padding:8px;display:flex;gap:8px;border-bottom:1px solid #e5e7eb}
#canvas-container{flex:1;min-height:0}
#workflow-canvas{display:block}
#deploy-output{margin:0;padding:8px;background:#f3f4f6;font-size:12px;white-space:pre-wrap;word-break:break-all}
#deploy-output.hidden{display:none}
.palette-node{display:flex;gap:8px;align-items:center;padding:8px;margin:4px 0;border:1px solid #e5e7eb;border-radius:6px;cursor:grab;background:#fff}
.palette-category-header{margin:12px 0 4px;font-size:12px;text-transform:uppercase;color:#6b7280}
.config-field{display:flex;flex-direction:column;gap:4px;margin-bottom:12px}
.config-field label{font-size:12px;color:#374151}
.config-input,.config-select{padding:6px;border:1px solid #d1d5db;border-radius:4px;font-size:13px}
.config-kind-badge{font-size:11px;color:#6b7280}
.config-section-header{margin:12px 0 4px;font-size:12px;text-transform:uppercase;color:#6b7280}
.config-connection-row{display:flex;align-items:center;justify-content:space-between;gap:8px;font-size:12px;padding:4px 0}
.config-connection-remove{border:none;background:none;color:#9ca3af;cursor:pointer}
.config-delete-btn{margin-top:12px;padding:6px 10px;border:1px solid #fca5a5;border-radius:4px;background:#fef2f2;color:#b91c1c;cursor:pointer}
.config-empty-state{color:#6b7280;font-size:13px;padding:16px 4px}
";
    let style = document.create_element("style")?;
    style.set_id("editor-styles");
    style.set_text_content(Some(css));
    if let Ok(Some(head)) = document.query_selector("head") {
        head.append_child(&style)?;
    }
    Ok(())
}
