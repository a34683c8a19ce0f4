//! Thin wrappers over browser APIs: history routing, storage and fetch.

mod http;
pub mod route;
pub mod router;
mod storage;

pub use http::FetchHttpClient;
pub use storage::LocalStorage;

/// Blocking `window.confirm`. Treats a missing window as "cancel".
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}
