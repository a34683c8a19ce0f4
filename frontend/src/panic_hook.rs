use std::panic;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(inline_js = "export function capture_stack() { return new Error().stack; }")]
extern "C" {
    fn capture_stack() -> String;
}

/// Writes the panic and the JS stack at the point of the panic to
/// `console.error`. Native builds print to stderr.
pub fn report(info: &panic::PanicHookInfo) {
    #[cfg(target_arch = "wasm32")]
    {
        let msg = format!("[Panic] {}\n\nStack:\n\n{}\n", info, capture_stack());
        web_sys::console::error_1(&msg.into());
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::io::{self, Write};
        let _ = writeln!(io::stderr(), "[Panic] {}", info);
    }
}

/// Replaces the default hook, which prints nothing useful in a browser tab.
pub fn install() {
    panic::set_hook(Box::new(report));
}
