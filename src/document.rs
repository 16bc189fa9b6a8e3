//! A minimal host document for custom elements
//!
//! The [`Document`] owns element instances created from its registry, tracks
//! which of them are attached, parents their event delegates to its own so
//! bubbling events reach document listeners, and runs the timers elements
//! schedule against its clock.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::component::{Context, ContextProvider, CustomElement, NodeId};
use crate::config::ButtonConfig;
use crate::events::{Event, EventDelegate, EventPropagation, ListenerId, PointerEvent};
use crate::kit::components::button::CustomButton;
use crate::layout::Rect;
use crate::registry::ElementRegistry;
use crate::scheduler::{Clock, SystemClock, TimerQueue};
use crate::Error;

/// Where an event listener is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTarget {
    /// The document itself; receives bubbling events from attached elements
    Document,
    /// A single element
    Element(NodeId),
}

/// Host document driving custom elements
pub struct Document {
    registry: ElementRegistry,
    elements: HashMap<NodeId, Box<dyn CustomElement>>,
    connected: HashSet<NodeId>,
    delegate: Arc<EventDelegate>,
    timers: TimerQueue,
    clock: Arc<dyn Clock>,
    context_provider: ContextProvider,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("registry", &self.registry)
            .field("elements", &self.elements.len())
            .field("connected", &self.connected.len())
            .field("pending_timers", &self.timers.pending())
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document on the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a document whose timers run against `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            registry: ElementRegistry::new(),
            elements: HashMap::new(),
            connected: HashSet::new(),
            delegate: Arc::new(EventDelegate::new(None)),
            timers: TimerQueue::new(),
            clock,
            context_provider: ContextProvider::new(),
        }
    }

    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ElementRegistry {
        &mut self.registry
    }

    /// Values provided here are visible to every element created afterwards
    pub fn context_provider(&self) -> &ContextProvider {
        &self.context_provider
    }

    /// Define the button widget under `config.tag_name`
    pub fn define_custom_button(&mut self, config: ButtonConfig) -> Result<(), Error> {
        let tag_name = config.tag_name.clone();
        self.registry
            .define(&tag_name, CustomButton::factory(config))?;
        Ok(())
    }

    /// Create a detached element from its definition
    pub fn create_element(&mut self, tag: &str) -> Result<NodeId, Error> {
        let context = Context::with_host(
            self.timers.clone(),
            Arc::clone(&self.clock),
            self.context_provider.clone(),
        );
        let element = self.registry.create(tag, context)?;
        let id = element.id();
        self.elements.insert(id, element);
        log::trace!("created <{tag}> as element {id}");
        Ok(id)
    }

    /// Attach an element; attaching an attached element does nothing
    pub fn append_child(&mut self, id: NodeId) -> Result<(), Error> {
        if self.connected.contains(&id) {
            return Ok(());
        }
        let element = self.elements.get_mut(&id).ok_or(Error::UnknownElement(id))?;
        element
            .event_delegate()
            .set_parent(Some(Arc::clone(&self.delegate)));
        element.connected()?;
        self.connected.insert(id);
        Ok(())
    }

    /// Detach an element; it keeps its attributes and can be attached again
    pub fn remove_child(&mut self, id: NodeId) -> Result<(), Error> {
        if !self.connected.contains(&id) {
            return Ok(());
        }
        let element = self.elements.get_mut(&id).ok_or(Error::UnknownElement(id))?;
        element.disconnected()?;
        element.event_delegate().set_parent(None);
        self.connected.remove(&id);
        Ok(())
    }

    pub fn is_connected(&self, id: NodeId) -> bool {
        self.connected.contains(&id)
    }

    /// Drop an element entirely, detaching it first
    pub fn destroy(&mut self, id: NodeId) -> Result<(), Error> {
        self.remove_child(id)?;
        self.elements
            .remove(&id)
            .map(|_| ())
            .ok_or(Error::UnknownElement(id))
    }

    pub fn element(&self, id: NodeId) -> Option<&dyn CustomElement> {
        self.elements.get(&id).map(|element| element.as_ref())
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut (dyn CustomElement + 'static)> {
        self.elements.get_mut(&id).map(|element| element.as_mut())
    }

    /// Borrow an element as its concrete type
    pub fn downcast<T: CustomElement>(&self, id: NodeId) -> Option<&T> {
        self.element(id)?.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: CustomElement>(&mut self, id: NodeId) -> Option<&mut T> {
        self.element_mut(id)?.as_any_mut().downcast_mut::<T>()
    }

    fn require_mut(&mut self, id: NodeId) -> Result<&mut (dyn CustomElement + 'static), Error> {
        self.element_mut(id).ok_or(Error::UnknownElement(id))
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), Error> {
        self.require_mut(id)?.set_attribute(name, value);
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<(), Error> {
        self.require_mut(id)?.remove_attribute(name);
        Ok(())
    }

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.get_attribute(name)
    }

    /// Record layout bounds for an element
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) -> Result<(), Error> {
        self.require_mut(id)?.set_bounds(bounds);
        Ok(())
    }

    /// Activate an element with a primary pointer at viewport position (x, y)
    pub fn click(&mut self, id: NodeId, x: f32, y: f32) -> Result<EventPropagation, Error> {
        let propagation = self.require_mut(id)?.dispatch_pointer(&PointerEvent::click(x, y))?;
        Ok(propagation)
    }

    /// Listen for events of `event_type` carrying payload type `E`
    pub fn add_event_listener<E: Event>(
        &self,
        target: EventTarget,
        event_type: &str,
        handler: impl Fn(&E, &mut EventPropagation) + Send + Sync + 'static,
    ) -> Result<ListenerId, Error> {
        let delegate = self.target_delegate(target)?;
        Ok(delegate.on::<E>(event_type, handler))
    }

    /// Remove a listener; returns `false` if it was not registered on `target`
    pub fn remove_event_listener(&self, target: EventTarget, listener: ListenerId) -> Result<bool, Error> {
        Ok(self.target_delegate(target)?.off(listener))
    }

    fn target_delegate(&self, target: EventTarget) -> Result<&Arc<EventDelegate>, Error> {
        match target {
            EventTarget::Document => Ok(&self.delegate),
            EventTarget::Element(id) => self
                .element(id)
                .map(|element| element.event_delegate())
                .ok_or(Error::UnknownElement(id)),
        }
    }

    /// Current time on the document clock
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Run every timer that is due; returns how many ran
    ///
    /// Timers whose element no longer exists are dropped.
    pub fn run_due_timers(&mut self) -> Result<usize, Error> {
        let due = self.timers.take_due(self.clock.now_ms())?;
        let count = due.len();
        for (timer, task) in due {
            match self.elements.get_mut(&task.widget()) {
                Some(element) => element.run_timer(&task),
                None => log::trace!("dropping timer {timer:?} for missing element {}", task.widget()),
            }
        }
        Ok(count)
    }

    /// Render an element as declarative shadow DOM markup
    pub fn render_html(&self, id: NodeId) -> Result<String, Error> {
        self.element(id)
            .map(|element| element.to_html())
            .ok_or(Error::UnknownElement(id))
    }
}
