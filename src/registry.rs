//! Custom element definitions
//!
//! An [`ElementRegistry`] maps tag names to factories. Names follow the
//! custom element naming rules: lowercase, starting with a letter and
//! containing a hyphen.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, OnceLock};

use regex::Regex;

use crate::component::{Context, CustomElement};
use crate::config::ButtonConfig;
use crate::kit::components::button::CustomButton;
use crate::platform::Environment;

/// Builds a fresh element for a definition
pub type ElementFactory = Arc<dyn Fn(Context) -> Box<dyn CustomElement> + Send + Sync>;

/// Names the HTML standard reserves even though they contain a hyphen
const RESERVED_NAMES: &[&str] = &[
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

/// Errors raised by element definitions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("'{0}' is not a valid custom element name")]
    InvalidName(String),

    #[error("'{0}' is already defined")]
    AlreadyDefined(String),

    #[error("'{0}' is not defined")]
    NotDefined(String),
}

fn name_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[a-z][a-z0-9._-]*-[a-z0-9._-]*$").ok())
        .as_ref()
}

/// Whether `name` can be used as a custom element name
pub fn is_valid_name(name: &str) -> bool {
    !RESERVED_NAMES.contains(&name) && name_pattern().is_some_and(|pattern| pattern.is_match(name))
}

/// Registry of custom element definitions
#[derive(Default)]
pub struct ElementRegistry {
    definitions: HashMap<String, ElementFactory>,
}

impl Debug for ElementRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.definitions.keys().collect();
        names.sort();
        f.debug_struct("ElementRegistry")
            .field("definitions", &names)
            .finish()
    }
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define `name`; a name can only be defined once
    pub fn define(&mut self, name: &str, factory: ElementFactory) -> Result<(), RegistryError> {
        if !is_valid_name(name) {
            return Err(RegistryError::InvalidName(name.to_string()));
        }
        if self.definitions.contains_key(name) {
            return Err(RegistryError::AlreadyDefined(name.to_string()));
        }

        self.definitions.insert(name.to_string(), factory);
        log::debug!("defined custom element <{name}>");
        Ok(())
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Create an element from its definition
    pub fn create(&self, name: &str, context: Context) -> Result<Box<dyn CustomElement>, RegistryError> {
        let factory = self
            .definitions
            .get(name)
            .ok_or_else(|| RegistryError::NotDefined(name.to_string()))?;
        Ok(factory(context))
    }

    /// Defined names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.definitions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Define the button under `config.tag_name` when running interactively
///
/// Headless environments skip registration. Failures are logged rather than
/// propagated; the return value tells whether the button is available.
pub fn register_custom_elements(
    registry: &mut ElementRegistry,
    environment: Environment,
    config: &ButtonConfig,
) -> bool {
    if environment == Environment::Headless {
        log::debug!("headless environment, skipping custom element registration");
        return false;
    }

    match registry.define(&config.tag_name, CustomButton::factory(config.clone())) {
        Ok(()) => true,
        Err(RegistryError::AlreadyDefined(name)) => {
            log::debug!("<{name}> was already defined");
            true
        }
        Err(err) => {
            log::error!("failed to register custom elements: {err}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_validation() {
        assert!(is_valid_name("custom-button"));
        assert!(is_valid_name("x-"));
        assert!(is_valid_name("my-app.button_2"));
        assert!(!is_valid_name("button"));
        assert!(!is_valid_name("Custom-Button"));
        assert!(!is_valid_name("-button"));
        assert!(!is_valid_name("1-button"));
        assert!(!is_valid_name("font-face"));
    }

    #[test]
    fn test_define_and_create() {
        let mut registry = ElementRegistry::new();
        let config = ButtonConfig::default();
        registry
            .define(&config.tag_name, CustomButton::factory(config.clone()))
            .unwrap();

        assert!(registry.is_defined("custom-button"));
        let element = registry.create("custom-button", Context::new()).unwrap();
        assert_eq!(element.host().tag(), "custom-button");
        assert!(element.as_any().downcast_ref::<CustomButton>().is_some());
    }

    #[test]
    fn test_define_twice_fails() {
        let mut registry = ElementRegistry::new();
        let config = ButtonConfig::default();
        registry
            .define("custom-button", CustomButton::factory(config.clone()))
            .unwrap();
        assert_eq!(
            registry.define("custom-button", CustomButton::factory(config)),
            Err(RegistryError::AlreadyDefined("custom-button".to_string()))
        );
    }

    #[test]
    fn test_create_undefined() {
        let registry = ElementRegistry::new();
        assert!(matches!(
            registry.create("custom-button", Context::new()),
            Err(RegistryError::NotDefined(_))
        ));
    }

    #[test]
    fn test_factory_uses_configured_tag() {
        let mut registry = ElementRegistry::new();
        let config = ButtonConfig {
            tag_name: "app-button".to_string(),
            ..ButtonConfig::default()
        };
        assert!(register_custom_elements(&mut registry, Environment::Interactive, &config));
        assert_eq!(registry.names(), vec!["app-button"]);

        let element = registry.create("app-button", Context::new()).unwrap();
        assert_eq!(element.host().tag(), "app-button");
    }

    #[test]
    fn test_register_is_guarded() {
        let mut registry = ElementRegistry::new();
        let config = ButtonConfig::default();

        assert!(!register_custom_elements(&mut registry, Environment::Headless, &config));
        assert!(!registry.is_defined("custom-button"));

        assert!(register_custom_elements(&mut registry, Environment::Interactive, &config));
        assert!(register_custom_elements(&mut registry, Environment::Interactive, &config));

        let bad = ButtonConfig {
            tag_name: "button".to_string(),
            ..ButtonConfig::default()
        };
        assert!(!register_custom_elements(&mut registry, Environment::Interactive, &bad));
    }
}
