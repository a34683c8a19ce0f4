//! Browser `localStorage` behind the session store's `KeyValueStore` seam.

use studyapp_shared::session::KeyValueStore;

/// Stateless handle to `window.localStorage`.
///
/// Every call looks the storage object up again; when it is unavailable
/// (private mode, sandboxed iframe) reads give `None` and writes report
/// failure, which the session store turns into memory-only mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    fn delete(&self, key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}
