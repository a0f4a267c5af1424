//! Localization bindings.
//!
//! The chosen language is kept in `localStorage` under `language`. Reading
//! falls back to the default language when storage is unavailable or holds
//! an unknown tag.

use wasm_bindgen::prelude::*;
use wasmtools_core::i18n::{self, Language};

/// `localStorage` key for the selected language.
pub const STORAGE_KEY: &str = "language";

/// Translate `key` into the language named by `tag`.
#[wasm_bindgen]
pub fn translate(key: &str, tag: &str) -> String {
    i18n::translate(key, Language::from_tag(tag)).to_string()
}

/// Normalize a language tag (`"en-US"` -> `"en"`, unknown -> `"zh-TW"`).
#[wasm_bindgen]
pub fn normalize_language(tag: &str) -> String {
    Language::from_tag(tag).tag().to_string()
}

/// The persisted language tag, or the default.
#[wasm_bindgen]
pub fn get_language() -> String {
    let stored = storage::read(STORAGE_KEY);
    normalize_language(stored.as_deref().unwrap_or_default())
}

/// Persist the language and return the normalized tag that was stored.
#[wasm_bindgen]
pub fn set_language(tag: &str) -> String {
    let lang = Language::from_tag(tag);
    if !storage::write(STORAGE_KEY, lang.tag()) {
        log::warn!("Could not persist language {}", lang.tag());
    }
    lang.tag().to_string()
}

#[cfg(target_arch = "wasm32")]
mod storage {
    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    pub fn read(key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok()?
    }

    pub fn write(key: &str, value: &str) -> bool {
        local_storage().is_some_and(|s| s.set_item(key, value).is_ok())
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod storage {
    pub fn read(_key: &str) -> Option<String> {
        None
    }

    pub fn write(_key: &str, _value: &str) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_by_tag() {
        assert_eq!(translate("tool.invert", "en"), "Invert");
        assert_eq!(translate("tool.invert", "zh-TW"), "反轉色彩");
        assert_eq!(translate("tool.invert", "de"), "反轉色彩");
        assert_eq!(translate("missing", "en"), "missing");
    }

    #[test]
    fn test_normalize_language() {
        assert_eq!(normalize_language("en-GB"), "en");
        assert_eq!(normalize_language("ja"), "zh-TW");
    }

    #[test]
    #[cfg(not(target_arch = "wasm32"))]
    fn test_language_defaults_without_storage() {
        assert_eq!(get_language(), "zh-TW");
        assert_eq!(set_language("en"), "en");
    }
}
