//! Render configuration: element ids and presentation class names.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::error::ConfigError;
use crate::syntax::Visibility;

/// Class names applied to rendered nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassNames {
    /// Markers shown because the cursor is inside them.
    pub revealed: SmolStr,
    /// Markers folded out of view.
    pub hidden: SmolStr,
    /// Invalid markup.
    pub warning: SmolStr,
    /// Body of an emoji span.
    pub emoji_marked: SmolStr,
    /// Info string after a code fence.
    pub language: SmolStr,
    /// Every block element.
    pub paragraph: SmolStr,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            revealed: SmolStr::new_static("ag-gray"),
            hidden: SmolStr::new_static("ag-hide"),
            warning: SmolStr::new_static("ag-warn"),
            emoji_marked: SmolStr::new_static("ag-emoji-marked-text"),
            language: SmolStr::new_static("ag-language"),
            paragraph: SmolStr::new_static("ag-paragraph"),
        }
    }
}

impl ClassNames {
    /// Presentation class for a visibility state.
    pub fn class_for(&self, visibility: Visibility) -> &SmolStr {
        match visibility {
            Visibility::Revealed => &self.revealed,
            Visibility::Hidden => &self.hidden,
            Visibility::Warning => &self.warning,
        }
    }
}

/// Configuration for a render session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Id of the root editor element.
    pub editor_id: SmolStr,
    /// Class on the root editor element.
    pub root_class: SmolStr,
    pub classes: ClassNames,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            editor_id: SmolStr::new_static("ag-editor-id"),
            root_class: SmolStr::new_static("mousetrap"),
            classes: ClassNames::default(),
        }
    }
}

impl RenderConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the configuration to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_for() {
        let classes = ClassNames::default();
        assert_eq!(classes.class_for(Visibility::Revealed), "ag-gray");
        assert_eq!(classes.class_for(Visibility::Hidden), "ag-hide");
        assert_eq!(classes.class_for(Visibility::Warning), "ag-warn");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = RenderConfig::from_json(
            r#"{ "editor_id": "editor", "classes": { "hidden": "folded" } }"#,
        )
        .unwrap();

        assert_eq!(config.editor_id, "editor");
        assert_eq!(config.root_class, "mousetrap");
        assert_eq!(config.classes.hidden, "folded");
        assert_eq!(config.classes.revealed, "ag-gray");
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(RenderConfig::from_json("{}").unwrap(), RenderConfig::default());
    }

    #[test]
    fn test_malformed_json() {
        let err = RenderConfig::from_json("{ editor_id: ").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_to_json_parses_back() {
        let mut config = RenderConfig::default();
        config.classes.warning = "bad".into();
        let json = config.to_json().unwrap();
        assert_eq!(RenderConfig::from_json(&json).unwrap(), config);
    }
}
