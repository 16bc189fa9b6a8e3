// Core module of the Orbit button widget
pub mod component;
pub mod config;
pub mod document;
pub mod events;
pub mod layout;
pub mod platform;
pub mod registry;
pub mod scheduler;
pub mod style;

pub mod kit;

use component::NodeId;

/// Version of the Orbit button widget
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-export of common types for convenience
pub mod prelude {
    pub use crate::component::{
        callback, Callback, Component, ComponentError, Context, ContextProvider, CustomElement,
        LifecyclePhase, Node, NodeId,
    };
    pub use crate::config::ButtonConfig;
    pub use crate::document::{Document, EventTarget};
    pub use crate::events::{
        CustomEvent, Event, EventDelegate, EventPropagation, ListenerId, PointerEvent,
    };
    pub use crate::kit::prelude::*;
    pub use crate::layout::{Point, Rect, Size};
    pub use crate::platform::Environment;
    pub use crate::registry::{register_custom_elements, ElementRegistry};
    pub use crate::scheduler::{Clock, ManualClock, SystemClock};
}

/// Register the button widget with `registry` for the detected environment
///
/// Returns whether `<custom-button>` (or the configured tag) is available.
pub fn init(registry: &mut registry::ElementRegistry, config: &config::ButtonConfig) -> bool {
    let environment = platform::Environment::detect();
    log::debug!("orbit-button {VERSION} initializing in {environment:?} mode");
    registry::register_custom_elements(registry, environment, config)
}

/// Errors that can occur in the Orbit button widget
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Registry error: {0}")]
    Registry(#[from] registry::RegistryError),

    #[error("Component error: {0}")]
    Component(#[from] component::ComponentError),

    #[error("Style error: {0}")]
    Style(#[from] style::StyleError),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("Unknown element: {0}")]
    UnknownElement(NodeId),
}
