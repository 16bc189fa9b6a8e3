//! Event types

use std::any::Any;
use std::fmt::Debug;

use crate::layout::Point;

/// Event type of a primary pointer activation
pub const CLICK: &str = "click";

/// Generic event trait
pub trait Event: Any + Send + Sync {
    /// Get the event type name listeners subscribe to
    fn event_type(&self) -> &str;

    /// Whether the event continues to ancestors after the target phase
    fn bubbles(&self) -> bool {
        true
    }

    /// Convert to Any for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Clone the event
    fn box_clone(&self) -> Box<dyn Event>;
}

/// A pointer activation in viewport coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    event_type: &'static str,
    /// Pointer position relative to the viewport
    pub client: Point,
}

impl PointerEvent {
    /// Create a click at the given viewport position
    pub fn click(client_x: f32, client_y: f32) -> Self {
        Self {
            event_type: CLICK,
            client: Point::new(client_x, client_y),
        }
    }
}

impl Event for PointerEvent {
    fn event_type(&self) -> &str {
        self.event_type
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn box_clone(&self) -> Box<dyn Event> {
        Box::new(self.clone())
    }
}

/// A named event carrying a typed detail payload
#[derive(Debug, Clone, PartialEq)]
pub struct CustomEvent<D> {
    event_type: String,
    /// Payload delivered to listeners
    pub detail: D,
    bubbles: bool,
}

impl<D> CustomEvent<D> {
    /// Create a non-bubbling custom event
    pub fn new(event_type: impl Into<String>, detail: D) -> Self {
        Self {
            event_type: event_type.into(),
            detail,
            bubbles: false,
        }
    }

    /// Let the event bubble to ancestor delegates
    pub fn bubbling(mut self) -> Self {
        self.bubbles = true;
        self
    }
}

impl<D: Clone + Debug + Send + Sync + 'static> Event for CustomEvent<D> {
    fn event_type(&self) -> &str {
        &self.event_type
    }

    fn bubbles(&self) -> bool {
        self.bubbles
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn box_clone(&self) -> Box<dyn Event> {
        Box::new(self.clone())
    }
}
