//! Widget configuration

use serde::{Deserialize, Serialize};

use crate::kit::components::button::AttributePolicy;
use crate::kit::theme::Theme;

/// Default tag the button is registered under
pub const DEFAULT_TAG_NAME: &str = "custom-button";

/// Default lifetime of a ripple in milliseconds
pub const DEFAULT_RIPPLE_DURATION_MS: u64 = 600;

/// Configuration for the button widget
///
/// Every field is optional in serialized form; missing fields take their
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonConfig {
    /// Custom element name the widget is defined under
    pub tag_name: String,
    /// How long a ripple stays in the tree after activation
    pub ripple_duration_ms: u64,
    /// Treatment of unrecognised `variant` / `size` values
    pub attribute_policy: AttributePolicy,
    /// Colours and shape tokens for the encapsulated stylesheet
    pub theme: Theme,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            tag_name: DEFAULT_TAG_NAME.to_string(),
            ripple_duration_ms: DEFAULT_RIPPLE_DURATION_MS,
            attribute_policy: AttributePolicy::default(),
            theme: Theme::default(),
        }
    }
}

impl ButtonConfig {
    /// Load configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, crate::Error> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(ButtonConfig::from_json("{}").unwrap(), ButtonConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config = ButtonConfig::from_json(
            r##"{
                "ripple_duration_ms": 250,
                "attribute_policy": "fallback",
                "theme": { "danger_color": "#ff0000" }
            }"##,
        )
        .unwrap();
        assert_eq!(config.tag_name, DEFAULT_TAG_NAME);
        assert_eq!(config.ripple_duration_ms, 250);
        assert_eq!(config.attribute_policy, AttributePolicy::Fallback);
        assert_eq!(config.theme.danger_color, "#ff0000");
        assert_eq!(config.theme.primary_color, Theme::default().primary_color);
    }

    #[test]
    fn test_invalid_json_is_a_config_error() {
        assert!(matches!(
            ButtonConfig::from_json("{ \"ripple_duration_ms\": \"soon\" }"),
            Err(crate::Error::Config(_))
        ));
    }
}
