//! The activation event emitted by the button

use serde::{Deserialize, Serialize};

use crate::events::CustomEvent;

/// Event type emitted once per valid activation
pub const BUTTON_CLICK: &str = "button-click";

/// Payload of a `button-click` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationDetail {
    /// Milliseconds since the Unix epoch at activation
    pub timestamp: u64,
    /// Variant at activation time
    pub variant: String,
    /// Size at activation time
    pub size: String,
}

/// The bubbling custom event carrying an [`ActivationDetail`]
pub type ActivationEvent = CustomEvent<ActivationDetail>;

impl ActivationDetail {
    /// Wrap the detail in a bubbling `button-click` event
    pub fn into_event(self) -> ActivationEvent {
        CustomEvent::new(BUTTON_CLICK, self).bubbling()
    }

    /// Serialize the detail the way it is handed to script listeners
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
