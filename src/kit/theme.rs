// Theme support for OrbitKit widgets

use serde::{Deserialize, Serialize};

use crate::style::CssProperty;

/// Colour scheme and shape tokens exposed to widget stylesheets as CSS custom properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Primary variant background
    pub primary_color: String,
    /// Primary variant background while hovered
    pub primary_hover: String,
    /// Secondary variant background
    pub secondary_color: String,
    /// Secondary variant background while hovered
    pub secondary_hover: String,
    /// Danger variant background
    pub danger_color: String,
    /// Danger variant background while hovered
    pub danger_hover: String,
    /// Background of a non-interactive control
    pub disabled_color: String,
    /// Label colour
    pub text_color: String,
    /// Border radius
    pub border_radius: String,
    /// Transition shorthand applied to the clickable element
    pub transition: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_color: "#2563eb".to_string(),
            primary_hover: "#1d4ed8".to_string(),
            secondary_color: "#6b7280".to_string(),
            secondary_hover: "#4b5563".to_string(),
            danger_color: "#dc2626".to_string(),
            danger_hover: "#b91c1c".to_string(),
            disabled_color: "#d1d5db".to_string(),
            text_color: "white".to_string(),
            border_radius: "0.375rem".to_string(),
            transition: "all 0.2s ease-in-out".to_string(),
        }
    }
}

impl Theme {
    /// Declarations for the `:host` rule of a widget's encapsulated stylesheet
    pub fn host_properties(&self) -> Vec<CssProperty> {
        vec![
            CssProperty::new("display", "inline-block"),
            CssProperty::new("--primary-color", &self.primary_color),
            CssProperty::new("--primary-hover", &self.primary_hover),
            CssProperty::new("--secondary-color", &self.secondary_color),
            CssProperty::new("--secondary-hover", &self.secondary_hover),
            CssProperty::new("--danger-color", &self.danger_color),
            CssProperty::new("--danger-hover", &self.danger_hover),
            CssProperty::new("--disabled-color", &self.disabled_color),
            CssProperty::new("--text-color", &self.text_color),
            CssProperty::new("--border-radius", &self.border_radius),
            CssProperty::new("--transition", &self.transition),
        ]
    }
}
