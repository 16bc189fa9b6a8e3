//! Presentation state and the visual classification derived from it

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::component::Node;

pub const VARIANT_ATTRIBUTE: &str = "variant";
pub const SIZE_ATTRIBUTE: &str = "size";
pub const DISABLED_ATTRIBUTE: &str = "disabled";
pub const LOADING_ATTRIBUTE: &str = "loading";

/// Attributes whose changes re-run the classification
pub const OBSERVED_ATTRIBUTES: &[&str] = &[
    VARIANT_ATTRIBUTE,
    SIZE_ATTRIBUTE,
    DISABLED_ATTRIBUTE,
    LOADING_ATTRIBUTE,
];

pub const BASE_CLASS: &str = "button";
pub const LOADING_CLASS: &str = "button--loading";

/// Error returned when parsing an enumerated attribute value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised {attribute} value '{value}'")]
pub struct ParseTokenError {
    pub attribute: &'static str,
    pub value: String,
}

/// An enumerated attribute with a fixed set of keywords
pub trait AttributeToken: Copy + Default + FromStr<Err = ParseTokenError> + 'static {
    /// Attribute the token is read from
    const ATTRIBUTE: &'static str;

    /// Every keyword, in declaration order
    const ALL: &'static [Self];

    /// Keyword used in markup and class names
    fn as_str(self) -> &'static str;
}

/// Button style variants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Danger,
}

/// Button size variants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl AttributeToken for ButtonVariant {
    const ATTRIBUTE: &'static str = VARIANT_ATTRIBUTE;
    const ALL: &'static [Self] = &[Self::Primary, Self::Secondary, Self::Danger];

    fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Danger => "danger",
        }
    }
}

impl AttributeToken for ButtonSize {
    const ATTRIBUTE: &'static str = SIZE_ATTRIBUTE;
    const ALL: &'static [Self] = &[Self::Small, Self::Medium, Self::Large];

    fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

fn parse_token<T: AttributeToken>(value: &str) -> Result<T, ParseTokenError> {
    T::ALL
        .iter()
        .copied()
        .find(|token| token.as_str() == value)
        .ok_or_else(|| ParseTokenError {
            attribute: T::ATTRIBUTE,
            value: value.to_string(),
        })
}

impl FromStr for ButtonVariant {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_token(s)
    }
}

impl FromStr for ButtonSize {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_token(s)
    }
}

impl fmt::Display for ButtonVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ButtonSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How unrecognised `variant` / `size` values are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributePolicy {
    /// Keep the raw value: getters return it and it becomes a `button--{value}` class
    #[default]
    Permissive,
    /// Treat the value as if the attribute were absent
    Fallback,
}

/// Value of an enumerated attribute as read from the host
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token<T> {
    /// A recognised keyword
    Known(T),
    /// A value outside the keyword set, passed through verbatim
    Unrecognized(String),
}

impl<T: AttributeToken> Token<T> {
    /// Read the token from a raw attribute value
    ///
    /// A missing or empty attribute yields the default keyword. An unrecognised
    /// value is kept or replaced by the default according to `policy`.
    pub fn read(raw: Option<&str>, policy: AttributePolicy) -> Self {
        let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
            return Self::Known(T::default());
        };
        match raw.parse::<T>() {
            Ok(token) => Self::Known(token),
            Err(_) => match policy {
                AttributePolicy::Permissive => Self::Unrecognized(raw.to_string()),
                AttributePolicy::Fallback => Self::Known(T::default()),
            },
        }
    }

    /// Check a raw value without reading it; missing and empty values are valid
    pub fn validate(raw: Option<&str>) -> Result<(), ParseTokenError> {
        match raw.filter(|raw| !raw.is_empty()) {
            Some(raw) => raw.parse::<T>().map(|_| ()),
            None => Ok(()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(token) => token.as_str(),
            Self::Unrecognized(raw) => raw,
        }
    }

    /// The recognised keyword, if any
    pub fn known(&self) -> Option<T> {
        match self {
            Self::Known(token) => Some(*token),
            Self::Unrecognized(_) => None,
        }
    }
}

impl<T: AttributeToken> From<T> for Token<T> {
    fn from(token: T) -> Self {
        Self::Known(token)
    }
}

impl<T: AttributeToken> PartialEq<&str> for Token<T> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl<T: AttributeToken> fmt::Display for Token<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation state of a button, read from its host attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonState {
    pub variant: Token<ButtonVariant>,
    pub size: Token<ButtonSize>,
    pub disabled: bool,
    pub loading: bool,
}

impl Default for ButtonState {
    fn default() -> Self {
        Self::new(ButtonVariant::default(), ButtonSize::default(), false, false)
    }
}

impl ButtonState {
    pub fn new(variant: ButtonVariant, size: ButtonSize, disabled: bool, loading: bool) -> Self {
        Self {
            variant: variant.into(),
            size: size.into(),
            disabled,
            loading,
        }
    }

    /// Read the state from a host node; boolean attributes count by presence
    pub fn from_attributes(host: &Node, policy: AttributePolicy) -> Self {
        Self {
            variant: Token::read(host.attribute(VARIANT_ATTRIBUTE), policy),
            size: Token::read(host.attribute(SIZE_ATTRIBUTE), policy),
            disabled: host.has_attribute(DISABLED_ATTRIBUTE),
            loading: host.has_attribute(LOADING_ATTRIBUTE),
        }
    }

    /// Every combination of recognised variant, size and the two flags
    pub fn all() -> Vec<Self> {
        let mut states = Vec::with_capacity(36);
        for &variant in ButtonVariant::ALL {
            for &size in ButtonSize::ALL {
                for disabled in [false, true] {
                    for loading in [false, true] {
                        states.push(Self::new(variant, size, disabled, loading));
                    }
                }
            }
        }
        states
    }

    /// Whether activation is suppressed
    pub fn is_inert(&self) -> bool {
        self.disabled || self.loading
    }

    /// Derive the visual classification
    pub fn classify(&self) -> Classification {
        let mut classes = vec![
            BASE_CLASS.to_string(),
            format!("{BASE_CLASS}--{}", self.variant),
            format!("{BASE_CLASS}--{}", self.size),
        ];
        if self.loading {
            classes.push(LOADING_CLASS.to_string());
        }

        Classification {
            classes,
            native_disabled: self.is_inert(),
            spinner_visible: self.loading,
        }
    }
}

/// Visual classification of the clickable element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Classes applied to the clickable element, in order
    pub classes: Vec<String>,
    /// Native disabled flag of the clickable element
    pub native_disabled: bool,
    /// Whether the loading spinner is shown
    pub spinner_visible: bool,
}

impl Classification {
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }

    /// Inline `display` value for the spinner
    pub fn spinner_display(&self) -> &'static str {
        if self.spinner_visible {
            "block"
        } else {
            "none"
        }
    }
}
