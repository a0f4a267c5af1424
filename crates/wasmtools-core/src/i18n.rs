//! UI string table for Traditional Chinese and English.
//!
//! Lookups fall back to English and then to the key itself, so a missing
//! entry shows up as its key instead of an empty label.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "zh-TW")]
    ZhTw,
    #[serde(rename = "en")]
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::ZhTw, Language::En];

    /// Resolve a language tag. Unknown tags select the default.
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim();
        if tag.eq_ignore_ascii_case("en") || tag.to_ascii_lowercase().starts_with("en-") {
            Language::En
        } else {
            Language::ZhTw
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Language::ZhTw => "zh-TW",
            Language::En => "en",
        }
    }
}

struct Entry {
    key: &'static str,
    en: &'static str,
    zh_tw: Option<&'static str>,
}

const fn entry(key: &'static str, en: &'static str, zh_tw: &'static str) -> Entry {
    Entry {
        key,
        en,
        zh_tw: Some(zh_tw),
    }
}

const fn english_only(key: &'static str, en: &'static str) -> Entry {
    Entry {
        key,
        en,
        zh_tw: None,
    }
}

static TABLE: &[Entry] = &[
    entry("app.title", "Awesome WASM Tools", "超棒的 WASM 工具"),
    entry("common.upload", "Upload image", "上傳圖片"),
    entry("common.drop_hint", "Drop an image here", "將圖片拖放到這裡"),
    entry("common.download", "Download", "下載"),
    entry("common.reset", "Reset", "重設"),
    entry("common.apply", "Apply", "套用"),
    entry("common.intensity", "Intensity", "強度"),
    entry("common.language", "Language", "語言"),
    entry("error.unsupported_type", "Unsupported file type", "不支援的檔案類型"),
    entry("error.invalid_json", "Invalid JSON", "無效的 JSON"),
    entry("error.division_by_zero", "Division by zero", "除以零"),
    entry("tool.rotate", "Rotate", "旋轉"),
    entry("tool.flip", "Flip", "翻轉"),
    entry("tool.contrast", "Contrast", "對比"),
    entry("tool.saturation", "Saturation", "飽和度"),
    entry("tool.exposure", "Exposure", "曝光"),
    entry("tool.vignette", "Vignette", "暈影"),
    entry("tool.temperature", "Temperature", "色溫"),
    entry("tool.tint", "Tint", "色調"),
    entry("tool.pixelate", "Pixelate", "像素化"),
    entry("tool.rounded_corners", "Rounded corners", "圓角"),
    entry("tool.drop_shadow", "Drop shadow", "陰影"),
    entry("tool.grayscale", "Grayscale", "灰階"),
    entry("tool.invert", "Invert", "反轉色彩"),
    entry("tool.posterize", "Posterize", "色調分離"),
    entry("tool.channel_separation", "Channel separation", "色版分離"),
    entry("tool.channel_mixer", "Channel mixer", "色版混合器"),
    entry("tool.color_balance", "Color balance", "色彩平衡"),
    entry("calc.basic", "Calculator", "計算機"),
    entry("calc.programmer", "Programmer calculator", "程式設計師計算機"),
    entry("calc.fraction", "Fraction calculator", "分數計算機"),
    entry("calc.clear", "Clear", "清除"),
    entry("calc.error", "Error", "錯誤"),
    entry("chart.render", "Render chart", "繪製圖表"),
    english_only("chart.placeholder", "Paste chart JSON here"),
];

fn lookup(key: &str) -> Option<&'static Entry> {
    TABLE.iter().find(|e| e.key == key)
}

/// Translate `key`, falling back to English and then to the key.
pub fn translate<'a>(key: &'a str, lang: Language) -> &'a str {
    match lookup(key) {
        Some(entry) => match lang {
            Language::ZhTw => entry.zh_tw.unwrap_or(entry.en),
            Language::En => entry.en,
        },
        None => key,
    }
}

/// Every key in the table.
pub fn keys() -> impl Iterator<Item = &'static str> {
    TABLE.iter().map(|e| e.key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_from_tag() {
        assert_eq!(Language::from_tag("en"), Language::En);
        assert_eq!(Language::from_tag("EN-us"), Language::En);
        assert_eq!(Language::from_tag("zh-TW"), Language::ZhTw);
        assert_eq!(Language::from_tag("fr"), Language::ZhTw);
        assert_eq!(Language::from_tag(""), Language::ZhTw);
    }

    #[test]
    fn test_tag_round_trip() {
        for lang in Language::ALL {
            assert_eq!(Language::from_tag(lang.tag()), lang);
        }
    }

    #[test]
    fn test_translate() {
        assert_eq!(translate("tool.rotate", Language::En), "Rotate");
        assert_eq!(translate("tool.rotate", Language::ZhTw), "旋轉");
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(
            translate("chart.placeholder", Language::ZhTw),
            "Paste chart JSON here"
        );
        assert_eq!(translate("no.such.key", Language::En), "no.such.key");
        assert_eq!(translate("no.such.key", Language::ZhTw), "no.such.key");
    }

    #[test]
    fn test_keys_are_unique() {
        let mut seen = HashSet::new();
        for key in keys() {
            assert!(seen.insert(key), "duplicate key {}", key);
        }
    }

    #[test]
    fn test_serde_uses_tags() {
        assert_eq!(serde_json::to_string(&Language::ZhTw).unwrap(), "\"zh-TW\"");
        let en: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(en, Language::En);
    }
}
