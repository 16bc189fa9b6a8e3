//! Type-erased custom elements driven by a host document

use std::any::Any;
use std::sync::Arc;

use crate::component::{ComponentError, Node, NodeId};
use crate::events::{EventDelegate, EventPropagation, PointerEvent, PropagationPhase};
use crate::layout::Rect;
use crate::scheduler::TimerTask;

/// An element whose presentation is driven by string attributes on its host node
///
/// The host document only talks to elements through this trait: it writes
/// attributes, signals attachment, routes pointer activation and hands back
/// timers the element scheduled earlier.
pub trait CustomElement: Send + Sync + Any {
    /// Attributes whose changes trigger [`CustomElement::attribute_changed`]
    fn observed_attributes(&self) -> &'static [&'static str];

    /// The host node carrying the element's attributes
    fn host(&self) -> &Node;

    /// Mutable access to the host node; writes made here are not observed
    fn host_mut(&mut self) -> &mut Node;

    /// The encapsulated render tree, if it has been built
    fn shadow_root(&self) -> Option<&Node>;

    /// Delegate events are dispatched from
    fn event_delegate(&self) -> &Arc<EventDelegate>;

    /// Called synchronously when an observed attribute changes value
    fn attribute_changed(&mut self, name: &str, old_value: Option<&str>, new_value: Option<&str>);

    /// Called when the element is inserted into a document
    fn connected(&mut self) -> Result<(), ComponentError>;

    /// Called when the element is removed from its document
    fn disconnected(&mut self) -> Result<(), ComponentError>;

    /// Pointer activation on the element's clickable surface
    fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        propagation: &mut EventPropagation,
    ) -> Result<(), ComponentError>;

    /// Run a timer this element scheduled; must tolerate stale tasks
    fn run_timer(&mut self, task: &TimerTask);

    /// Record the layout bounds the host computed for this element
    fn set_bounds(&mut self, bounds: Rect) {
        self.host_mut().set_bounds(bounds);
    }

    /// Convert to Any for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Convert to mutable Any for downcasting
    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn id(&self) -> NodeId {
        self.host().id()
    }

    fn get_attribute(&self, name: &str) -> Option<&str> {
        self.host().attribute(name)
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.host().has_attribute(name)
    }

    /// Set an attribute on the host, notifying the element if it is observed
    fn set_attribute(&mut self, name: &str, value: &str) {
        let old_value = self.host_mut().set_attribute(name, value);
        self.notify_attribute(name, old_value.as_deref(), Some(value));
    }

    /// Remove an attribute from the host, notifying the element if it is observed
    fn remove_attribute(&mut self, name: &str) {
        if let Some(old_value) = self.host_mut().remove_attribute(name) {
            self.notify_attribute(name, Some(old_value.as_str()), None);
        }
    }

    /// Forward a change to [`CustomElement::attribute_changed`] when the value differs
    fn notify_attribute(&mut self, name: &str, old_value: Option<&str>, new_value: Option<&str>) {
        let observed = self
            .observed_attributes()
            .iter()
            .any(|attribute| *attribute == name);
        if observed && old_value != new_value {
            self.attribute_changed(name, old_value, new_value);
        }
    }

    /// Deliver a pointer activation, then let the click itself propagate
    ///
    /// The element handles the pointer first; unless it stopped propagation,
    /// the click is dispatched from the element's delegate so host listeners
    /// see it too.
    fn dispatch_pointer(&mut self, event: &PointerEvent) -> Result<EventPropagation, ComponentError> {
        let mut propagation = EventPropagation::new(PropagationPhase::Target);
        propagation.target_id = Some(self.id());
        propagation.current_target_id = Some(self.id());

        self.handle_pointer(event, &mut propagation)?;
        if propagation.is_propagation_stopped() {
            return Ok(propagation);
        }

        let delegated = self.event_delegate().dispatch(event);
        propagation.stopped = delegated.stopped;
        propagation.default_prevented |= delegated.default_prevented;
        propagation.phase = delegated.phase;
        Ok(propagation)
    }

    /// Render the host with its shadow tree as declarative shadow DOM markup
    fn to_html(&self) -> String {
        let host = self.host();
        let mut out = String::new();
        host.write_open_tag(&mut out);
        if let Some(shadow_root) = self.shadow_root() {
            shadow_root.write_html(&mut out);
        }
        for child in host.children() {
            child.write_html(&mut out);
        }
        host.write_close_tag(&mut out);
        out
    }
}
