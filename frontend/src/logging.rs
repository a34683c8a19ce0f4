// =========================================================
// Conditional-compilation logging macros
// =========================================================
// Messages carry a bracketed component tag, e.g. `log_info!("[Router] ...")`.

#[cfg(target_arch = "wasm32")]
macro_rules! log_info {
    ($($t:tt)*) => (::web_sys::console::log_1(&::std::format!($($t)*).into()))
}
#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_info {
    ($($t:tt)*) => (println!($($t)*))
}

#[cfg(target_arch = "wasm32")]
macro_rules! log_warn {
    ($($t:tt)*) => (::web_sys::console::warn_1(&::std::format!($($t)*).into()))
}
#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_warn {
    ($($t:tt)*) => (eprintln!($($t)*))
}

#[cfg(target_arch = "wasm32")]
macro_rules! log_error {
    ($($t:tt)*) => (::web_sys::console::error_1(&::std::format!($($t)*).into()))
}
#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_error {
    ($($t:tt)*) => (eprintln!($($t)*))
}

#[cfg(target_arch = "wasm32")]
macro_rules! log_debug {
    ($($t:tt)*) => (::web_sys::console::debug_1(&::std::format!($($t)*).into()))
}
#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_debug {
    ($($t:tt)*) => (println!($($t)*))
}
