//! Tiny toast / notification helper.
//!
//! Creates a `#toast-root` container once per page and appends toast divs
//! that auto-dismiss. Used for the lightweight, non-blocking notices the
//! canvas surfaces (e.g. a rejected duplicate connection); nothing here
//! may block or panic the editing session.

#[derive(Debug, Clone, Copy)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

pub fn success(msg: &str) {
    show(msg, ToastKind::Success);
}

pub fn error(msg: &str) {
    show(msg, ToastKind::Error);
}

pub fn info(msg: &str) {
    show(msg, ToastKind::Info);
}

// Outside a wasm runtime (native unit tests) there is no DOM; notices go
// to stderr so reducer paths stay runnable.
#[cfg(not(target_arch = "wasm32"))]
pub fn show(message: &str, kind: ToastKind) {
    eprintln!("[toast:{:?}] {}", kind, message);
}

#[cfg(target_arch = "wasm32")]
pub fn show(message: &str, kind: ToastKind) {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;

    let window = match web_sys::window() {
        Some(w) => w,
        None => return,
    };
    let document = match window.document() {
        Some(d) => d,
        None => return,
    };

    let root = match document.get_element_by_id("toast-root") {
        Some(el) => el,
        None => {
            let root = match document.create_element("div") {
                Ok(el) => el,
                Err(_) => return,
            };
            root.set_id("toast-root");
            if let Some(body) = document.body() {
                let _ = body.append_child(&root);
            }
            ensure_styles(&document);
            root
        }
    };

    let toast = match document.create_element("div") {
        Ok(el) => el,
        Err(_) => return,
    };
    let class = match kind {
        ToastKind::Success => "toast toast-success",
        ToastKind::Error => "toast toast-error",
        ToastKind::Info => "toast toast-info",
    };
    toast.set_class_name(class);
    toast.set_text_content(Some(message));
    let _ = root.prepend_with_node_1(&toast);

    // Auto-remove after 4s.
    let toast_clone: web_sys::HtmlElement = toast.unchecked_into();
    let cb = Closure::once_into_js(move || {
        if let Some(parent) = toast_clone.parent_node() {
            let _ = parent.remove_child(&toast_clone);
        }
    });
    let _ = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), 4000);
}

#[cfg(target_arch = "wasm32")]
fn ensure_styles(document: &web_sys::Document) {
    if document.get_element_by_id("toast-styles").is_some() {
        return;
    }
    let css = "
#toast-root{position:fixed;top:16px;right:16px;display:flex;flex-direction:column;gap:8px;z-index:9999;font-family:system-ui,sans-serif}
.toast{padding:10px 16px;border-radius:6px;color:#fff;box-shadow:0 2px 6px rgba(0,0,0,.15);font-size:13px}
.toast-success{background:#16a34a}
.toast-error{background:#dc2626}
.toast-info{background:#2563eb}
";
    if let Ok(style) = document.create_element("style") {
        style.set_id("toast-styles");
        style.set_text_content(Some(css));
        if let Ok(Some(head)) = document.query_selector("head") {
            let _ = head.append_child(&style);
        }
    }
}
