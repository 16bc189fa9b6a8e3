//! Event delegation for the widget tree
//!
//! This module provides event handling with:
//! - Event capturing, targeting and bubbling along a chain of delegates
//! - Listener handles so wrappers can unsubscribe what they subscribed
//! - Stop propagation and prevent default functionality

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::events::Event;

/// Type alias for event handler function
type EventHandler = Arc<dyn Fn(&dyn Event, &mut EventPropagation) + Send + Sync>;

/// Type alias for handler storage map, keyed by event type name
type HandlerMap = RwLock<HashMap<String, Vec<(ListenerId, EventHandler)>>>;

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

/// Handle returned when a listener is registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    fn next() -> Self {
        Self(NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Specifies the event propagation phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationPhase {
    /// Event is traveling down from the root to the target
    Capturing,

    /// Event is at the target
    Target,

    /// Event is traveling up from the target to the root
    Bubbling,
}

/// Controls how an event propagates through the delegate chain
#[derive(Debug, Clone)]
pub struct EventPropagation {
    /// Whether the event should continue propagating
    pub stopped: bool,

    /// Whether the default action should be prevented
    pub default_prevented: bool,

    /// The current propagation phase
    pub phase: PropagationPhase,

    /// The node that is the original target of the event
    pub target_id: Option<usize>,

    /// The node that is currently handling the event
    pub current_target_id: Option<usize>,
}

impl EventPropagation {
    /// Create a new event propagation
    pub fn new(phase: PropagationPhase) -> Self {
        Self {
            stopped: false,
            default_prevented: false,
            phase,
            target_id: None,
            current_target_id: None,
        }
    }

    /// Stop event propagation
    pub fn stop_propagation(&mut self) {
        self.stopped = true;
    }

    /// Prevent the default action
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Check if propagation is stopped
    pub fn is_propagation_stopped(&self) -> bool {
        self.stopped
    }

    /// Check if default is prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Event delegate manages capturing, targeting, and bubbling of events
///
/// Delegates form a chain through their parent links: a widget's delegate is
/// parented to its document's delegate while the widget is attached.
pub struct EventDelegate {
    /// Handlers registered for the capturing phase
    capturing_handlers: HandlerMap,

    /// Handlers registered for the target and bubbling phases
    bubbling_handlers: HandlerMap,

    /// Node ID for identification during propagation
    component_id: Option<usize>,

    /// Parent delegate for bubbling events up
    parent: RwLock<Option<Arc<EventDelegate>>>,
}

impl Debug for EventDelegate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDelegate")
            .field("component_id", &self.component_id)
            .field("has_parent", &self.parent().is_some())
            .finish()
    }
}

impl EventDelegate {
    /// Create a new event delegate
    pub fn new(component_id: Option<usize>) -> Self {
        Self {
            capturing_handlers: RwLock::new(HashMap::new()),
            bubbling_handlers: RwLock::new(HashMap::new()),
            component_id,
            parent: RwLock::new(None),
        }
    }

    pub fn component_id(&self) -> Option<usize> {
        self.component_id
    }

    /// Set or clear the parent delegate
    pub fn set_parent(&self, parent: Option<Arc<EventDelegate>>) {
        *self.parent.write().unwrap_or_else(PoisonError::into_inner) = parent;
    }

    pub fn parent(&self) -> Option<Arc<EventDelegate>> {
        self.parent
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Register a handler for the target and bubbling phases
    pub fn on<E: Event>(
        &self,
        event_type: &str,
        handler: impl Fn(&E, &mut EventPropagation) + Send + Sync + 'static,
    ) -> ListenerId {
        Self::register(&self.bubbling_handlers, event_type, handler)
    }

    /// Register a handler for the capturing phase
    pub fn capture<E: Event>(
        &self,
        event_type: &str,
        handler: impl Fn(&E, &mut EventPropagation) + Send + Sync + 'static,
    ) -> ListenerId {
        Self::register(&self.capturing_handlers, event_type, handler)
    }

    /// Remove a previously registered handler
    ///
    /// Returns `false` when the listener is not registered on this delegate.
    pub fn off(&self, listener: ListenerId) -> bool {
        Self::unregister(&self.bubbling_handlers, listener)
            || Self::unregister(&self.capturing_handlers, listener)
    }

    /// Number of handlers registered for an event type, across both phases
    pub fn listener_count(&self, event_type: &str) -> usize {
        let count = |map: &HandlerMap| {
            map.read()
                .unwrap_or_else(PoisonError::into_inner)
                .get(event_type)
                .map_or(0, Vec::len)
        };
        count(&self.bubbling_handlers) + count(&self.capturing_handlers)
    }

    /// Dispatch an event with this delegate as the target
    ///
    /// Runs capturing handlers from the root down, then the target's own
    /// handlers, then bubbling handlers up to the root when the event bubbles.
    pub fn dispatch(self: &Arc<Self>, event: &dyn Event) -> EventPropagation {
        let mut path = vec![Arc::clone(self)];
        let mut next = self.parent();
        while let Some(parent) = next {
            next = parent.parent();
            path.push(parent);
        }

        let mut propagation = EventPropagation::new(PropagationPhase::Capturing);
        propagation.target_id = self.component_id;

        for delegate in path.iter().skip(1).rev() {
            if propagation.is_propagation_stopped() {
                break;
            }
            propagation.current_target_id = delegate.component_id;
            Self::invoke(&delegate.capturing_handlers, event, &mut propagation);
        }

        if !propagation.is_propagation_stopped() {
            propagation.phase = PropagationPhase::Target;
            propagation.current_target_id = self.component_id;
            Self::invoke(&self.capturing_handlers, event, &mut propagation);
            if !propagation.is_propagation_stopped() {
                Self::invoke(&self.bubbling_handlers, event, &mut propagation);
            }
        }

        if event.bubbles() {
            propagation.phase = PropagationPhase::Bubbling;
            for delegate in path.iter().skip(1) {
                if propagation.is_propagation_stopped() {
                    break;
                }
                propagation.current_target_id = delegate.component_id;
                Self::invoke(&delegate.bubbling_handlers, event, &mut propagation);
            }
        }

        propagation
    }

    fn register<E: Event>(
        map: &HandlerMap,
        event_type: &str,
        handler: impl Fn(&E, &mut EventPropagation) + Send + Sync + 'static,
    ) -> ListenerId {
        let id = ListenerId::next();
        let boxed_handler: EventHandler = Arc::new(move |event, propagation| {
            if let Some(event) = event.as_any().downcast_ref::<E>() {
                handler(event, propagation);
            }
        });

        map.write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(event_type.to_string())
            .or_default()
            .push((id, boxed_handler));
        id
    }

    fn unregister(map: &HandlerMap, listener: ListenerId) -> bool {
        let mut handlers = map.write().unwrap_or_else(PoisonError::into_inner);
        for list in handlers.values_mut() {
            if let Some(index) = list.iter().position(|(id, _)| *id == listener) {
                list.remove(index);
                return true;
            }
        }
        false
    }

    // Handlers are cloned out first so they may register or remove listeners.
    fn invoke(map: &HandlerMap, event: &dyn Event, propagation: &mut EventPropagation) {
        let handlers: Vec<EventHandler> = map
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(event.event_type())
            .map(|list| list.iter().map(|(_, handler)| Arc::clone(handler)).collect())
            .unwrap_or_default();

        for handler in handlers {
            handler(event, propagation);
            if propagation.is_propagation_stopped() {
                break;
            }
        }
    }
}
