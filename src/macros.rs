//! Small crate-wide convenience macros.

/// Log a formatted message to the browser console in debug builds.
///
/// On non-wasm targets (native unit tests) the message goes to stderr
/// instead, since the `web_sys::console` imports are only callable from
/// inside a wasm runtime.
#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(all(debug_assertions, target_arch = "wasm32"))]
        web_sys::console::log_1(&format!($($t)*).into());
        #[cfg(all(debug_assertions, not(target_arch = "wasm32")))]
        eprintln!("{}", format!($($t)*));
        #[cfg(not(debug_assertions))]
        let _ = || format!($($t)*);
    }};
}

/// Log a warning. Same target split as [`debug_log!`] but not stripped in
/// release builds — warnings are how swallowed adapter failures stay
/// observable.
#[macro_export]
macro_rules! warn_log {
    ($($t:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::warn_1(&format!($($t)*).into());
        #[cfg(not(target_arch = "wasm32"))]
        eprintln!("warning: {}", format!($($t)*));
    }};
}
