//! Model color palette
//!
//! Deterministic model → color lookup used by every chart and table.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

static STANDARD: Lazy<Palette> = Lazy::new(Palette::standard);

/// CSS hex color
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub model: String,
    pub color: Color,
}

impl PaletteEntry {
    pub fn new(model: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            color: Color::new(color),
        }
    }

    /// Lowercased key with its first hyphen removed, used for fuzzy matches
    fn fuzzy_key(&self) -> String {
        self.model.to_lowercase().replacen('-', "", 1)
    }
}

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("failed to read palette: {0}")]
    Io(String),
    #[error("failed to parse palette: {0}")]
    Parse(String),
    #[error("palette entry {0:?} has an empty match key")]
    EmptyKey(String),
}

/// Ordered model → color table.
///
/// Order matters: fuzzy matching returns the first entry whose key occurs
/// in the model name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub entries: Vec<PaletteEntry>,
    pub default_color: Color,
}

impl Palette {
    /// Colors of the hosted models, followed by the older local models
    pub fn standard() -> Self {
        Self {
            entries: vec![
                PaletteEntry::new("claude-3.5-sonnet", "#f97316"),
                PaletteEntry::new("gpt-4o", "#22c55e"),
                PaletteEntry::new("gemini-2.5-pro", "#3b82f6"),
                PaletteEntry::new("mistral-large", "#a855f7"),
                PaletteEntry::new("codellama", "#ef4444"),
                PaletteEntry::new("deepseek-coder", "#06b6d4"),
                PaletteEntry::new("deepseek", "#06b6d4"),
                PaletteEntry::new("llama3", "#fb923c"),
                PaletteEntry::new("qwen", "#8b5cf6"),
            ],
            default_color: Color::new("#6b7280"),
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, PaletteError> {
        let palette: Self =
            serde_yaml::from_str(yaml).map_err(|e| PaletteError::Parse(e.to_string()))?;
        // An empty fuzzy key is a substring of every name
        if let Some(entry) = palette.entries.iter().find(|e| e.fuzzy_key().is_empty()) {
            return Err(PaletteError::EmptyKey(entry.model.clone()));
        }
        Ok(palette)
    }

    pub fn load(path: &str) -> Result<Self, PaletteError> {
        let content = std::fs::read_to_string(path).map_err(|e| PaletteError::Io(e.to_string()))?;
        Self::from_yaml(&content)
    }

    /// Color for a model name. Never fails.
    ///
    /// 1. exact, case-sensitive match on the entry key
    /// 2. first entry (table order) whose lowercased key, minus its first
    ///    hyphen, is a substring of the lowercased name
    /// 3. the default color
    pub fn color_for(&self, llm_name: &str) -> Color {
        if let Some(entry) = self.entries.iter().find(|e| e.model == llm_name) {
            return entry.color.clone();
        }

        let name = llm_name.to_lowercase();
        self.entries
            .iter()
            .find(|e| name.contains(&e.fuzzy_key()))
            .map(|e| e.color.clone())
            .unwrap_or_else(|| self.default_color.clone())
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}

/// Shared instance of the standard palette
pub fn standard_palette() -> &'static Palette {
    &STANDARD
}

/// Color for a model name using the standard palette
pub fn color_for(llm_name: &str) -> Color {
    STANDARD.color_for(llm_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert_eq!(color_for("claude-3.5-sonnet").as_str(), "#f97316");
        assert_eq!(color_for("gpt-4o").as_str(), "#22c55e");
        assert_eq!(color_for("qwen").as_str(), "#8b5cf6");
    }

    #[test]
    fn test_deterministic() {
        let first = color_for("claude-3.5-sonnet");
        for _ in 0..10 {
            assert_eq!(color_for("claude-3.5-sonnet"), first);
        }
    }

    #[test]
    fn test_unknown_gets_default() {
        assert_eq!(color_for("totally-unknown-model").as_str(), "#6b7280");
        assert_eq!(color_for("").as_str(), "#6b7280");
    }

    #[test]
    fn test_fuzzy_match_is_case_insensitive() {
        assert_eq!(color_for("CodeLlama-13B").as_str(), "#ef4444");
        assert_eq!(color_for("GPT4o-mini").as_str(), "#22c55e");
    }

    #[test]
    fn test_fuzzy_match_follows_declaration_order() {
        // "deepseekcoder" is declared before "deepseek"; both share a color,
        // but a hyphenated name only matches the shorter key.
        assert_eq!(color_for("deepseek-coder:6.7b").as_str(), "#06b6d4");
        // "codellama" precedes "llama3" and wins for names containing both
        assert_eq!(color_for("codellama3-instruct").as_str(), "#ef4444");
        assert_eq!(color_for("llama3.1:8b").as_str(), "#fb923c");
    }

    #[test]
    fn test_only_first_key_hyphen_stripped() {
        // "claude-3.5-sonnet" matches as "claude3.5-sonnet"
        assert_eq!(color_for("openrouter/claude3.5-sonnet-20241022").as_str(), "#f97316");
        assert_eq!(color_for("Gemini2.5-Pro-Exp").as_str(), "#3b82f6");
        assert_eq!(color_for("gemini2.5pro").as_str(), "#6b7280");
        // Names keep their hyphens
        assert_eq!(color_for("Gemini-2.5-Pro-Exp").as_str(), "#6b7280");
    }

    #[test]
    fn test_exact_match_is_case_sensitive() {
        let palette = Palette {
            entries: vec![
                PaletteEntry::new("Mixed", "#000001"),
                PaletteEntry::new("mix", "#000002"),
            ],
            default_color: Color::new("#ffffff"),
        };
        assert_eq!(palette.color_for("Mixed").as_str(), "#000001");
        // Falls through to the fuzzy pass, where "Mixed" is still first
        assert_eq!(palette.color_for("mixed").as_str(), "#000001");
        assert_eq!(palette.color_for("remix").as_str(), "#000002");
    }

    #[test]
    fn test_empty_key_rejected() {
        let yaml = r##"
default_color: "#000000"
entries:
  - { model: "-", color: "#ffffff" }
"##;
        assert!(matches!(Palette::from_yaml(yaml), Err(PaletteError::EmptyKey(_))));
    }
}
