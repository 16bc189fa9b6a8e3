//! Event system for the widget
//!
//! The event system provides:
//! - An object-safe [`Event`] trait with downcasting support
//! - Pointer events routed by the host into a widget
//! - Custom events carrying a typed detail payload
//! - Event delegation with capturing, target and bubbling phases

pub mod delegation;
pub mod event;

pub use delegation::*;
pub use event::{CustomEvent, Event, PointerEvent, CLICK};
