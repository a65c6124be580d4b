//! Cross-platform persistent storage.
//!
//! One API over two backends:
//! - Web: `localStorage`
//! - Native: JSON files under the platform config directory
//!   (`~/.config/chatline/` on Linux)

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use serde::{de::DeserializeOwned, Serialize};

/// Save a value to persistent storage.
///
/// Returns `true` if the operation succeeded.
pub fn save<T: Serialize>(key: &str, value: &T) -> bool {
    match serde_json::to_string(value) {
        Ok(json) => save_raw(key, &json),
        Err(_) => false,
    }
}

/// Load a value from persistent storage.
///
/// Returns `None` if the key doesn't exist or deserialization fails.
pub fn load<T: DeserializeOwned>(key: &str) -> Option<T> {
    let json = load_raw(key)?;
    serde_json::from_str(&json).ok()
}

/// Remove a value from persistent storage.
pub fn remove(key: &str) {
    remove_raw(key);
}

/// Check if a key holds any raw value, readable or not.
pub fn exists(key: &str) -> bool {
    load_raw(key).is_some()
}

// =========================================
// Web (WASM) implementation
// =========================================

#[cfg(target_arch = "wasm32")]
fn save_raw(key: &str, value: &str) -> bool {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            return storage.set_item(key, value).is_ok();
        }
    }
    false
}

#[cfg(target_arch = "wasm32")]
fn load_raw(key: &str) -> Option<String> {
    let window = web_sys::window()?;
    let storage = window.local_storage().ok()??;
    storage.get_item(key).ok()?
}

#[cfg(target_arch = "wasm32")]
fn remove_raw(key: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

// =========================================
// Native implementation
// =========================================

#[cfg(not(target_arch = "wasm32"))]
fn app_dir() -> Option<std::path::PathBuf> {
    let dir = dirs::config_dir()?.join("chatline");
    if !dir.exists() {
        std::fs::create_dir_all(&dir).ok()?;
    }
    Some(dir)
}

#[cfg(not(target_arch = "wasm32"))]
fn file_for(key: &str) -> Option<std::path::PathBuf> {
    // Sanitize the key so it is a valid filename
    let safe_key = key.replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|'], "_");
    Some(app_dir()?.join(format!("{safe_key}.json")))
}

#[cfg(not(target_arch = "wasm32"))]
fn save_raw(key: &str, value: &str) -> bool {
    let Some(path) = file_for(key) else {
        return false;
    };
    std::fs::write(path, value).is_ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn load_raw(key: &str) -> Option<String> {
    std::fs::read_to_string(file_for(key)?).ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn remove_raw(key: &str) {
    if let Some(path) = file_for(key) {
        let _ = std::fs::remove_file(path);
    }
}
