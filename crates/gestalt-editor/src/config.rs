//! Editor configuration
//!
//! Loaded from JSON; every field has a default, so an empty object is a
//! complete configuration.

use std::fs;
use std::path::Path;

use gestalt_gesture::GestureConfig;
use serde::{Deserialize, Serialize};

use crate::EditorError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Output profile active at startup
    pub profile: String,
    /// Pointer travel still counted as a click
    pub click_slop: f64,
    pub gestures: GestureConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self { profile: "glsl".to_string(), click_slop: 4.0, gestures: GestureConfig::default() }
    }
}

impl EditorConfig {
    pub fn from_json(text: &str) -> Result<Self, EditorError> {
        let config: EditorConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, EditorError> {
        let text = fs::read_to_string(path)
            .map_err(|source| EditorError::Io { path: path.to_path_buf(), source })?;
        Self::from_json(&text)
    }

    /// Profile names are checked against the catalog when the editor is built
    pub fn validate(&self) -> Result<(), EditorError> {
        if !(self.click_slop >= 0.0 && self.click_slop.is_finite()) {
            return Err(EditorError::ClickSlop(self.click_slop));
        }
        self.gestures.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gestalt_gesture::ConfigError;

    #[test]
    fn test_empty_object_is_the_default() {
        assert_eq!(EditorConfig::from_json("{}").unwrap(), EditorConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = EditorConfig::from_json(
            r#"{ "profile": "javascript", "click_slop": 8, "gestures": { "operator_step": 25 } }"#,
        )
        .unwrap();
        assert_eq!(config.profile, "javascript");
        assert_eq!(config.click_slop, 8.0);
        assert_eq!(config.gestures.operator_step, 25.0);
    }

    #[test]
    fn test_negative_slop_is_rejected() {
        assert!(matches!(EditorConfig::from_json(r#"{ "click_slop": -1 }"#), Err(EditorError::ClickSlop(_))));
    }

    #[test]
    fn test_invalid_gesture_table_is_rejected() {
        let err = EditorConfig::from_json(r#"{ "gestures": { "operator_step": 0 } }"#).unwrap_err();
        assert!(matches!(err, EditorError::Config(ConfigError::NotPositive { field: "operator_step", .. })));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        assert!(matches!(EditorConfig::from_json("{ profile"), Err(EditorError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = EditorConfig::from_path(Path::new("/nonexistent/gestalt.json")).unwrap_err();
        assert!(matches!(err, EditorError::Io { .. }));
    }
}
