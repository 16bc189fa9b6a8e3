// Button component for OrbitKit

mod event;
mod state;
mod styles;

#[cfg(test)]
mod tests;

pub use event::{ActivationDetail, ActivationEvent, BUTTON_CLICK};
pub use state::{
    AttributePolicy, AttributeToken, ButtonSize, ButtonState, ButtonVariant, Classification,
    ParseTokenError, Token, BASE_CLASS, DISABLED_ATTRIBUTE, LOADING_ATTRIBUTE, LOADING_CLASS,
    OBSERVED_ATTRIBUTES, SIZE_ATTRIBUTE, VARIANT_ATTRIBUTE,
};
pub use styles::button_stylesheet;

use std::any::Any;
use std::sync::Arc;

use crate::component::{
    Callback, Component, ComponentError, Context, CustomElement, LifecyclePhase, Node, NodeId,
};
use crate::config::ButtonConfig;
use crate::events::{EventDelegate, EventPropagation, ListenerId, PointerEvent};
use crate::layout::Rect;
use crate::registry::ElementFactory;
use crate::scheduler::TimerTask;

pub const SPINNER_CLASS: &str = "spinner";
pub const RIPPLE_CLASS: &str = "ripple";

/// Properties for the Button component
///
/// `None` leaves the corresponding attribute untouched, so a wrapper only
/// forwards what it knows about.
#[derive(Debug, Clone, Default)]
pub struct ButtonProps {
    /// Visual style variant of the button
    pub variant: Option<ButtonVariant>,
    /// Size variant of the button
    pub size: Option<ButtonSize>,
    /// Whether the button is disabled
    pub disabled: Option<bool>,
    /// Whether the button shows its spinner and ignores activation
    pub loading: Option<bool>,
    /// Listener for `button-click`, replacing any listener installed by earlier props
    pub on_click: Option<Callback<ActivationDetail>>,
}

/// Button widget with variants, sizes, a loading state and ripple feedback
///
/// The host node carries the four presentation attributes; the encapsulated
/// tree holds a `<style>`, the clickable `<button>`, its spinner and a slot for
/// the label. Every attribute change re-derives the classes of the clickable
/// element from [`ButtonState::classify`].
///
/// # Examples
///
/// ```
/// use orbit_button::prelude::*;
///
/// let mut button = CustomButton::create(ButtonProps::default(), Context::new());
/// button.set_variant(ButtonVariant::Danger);
/// button.set_loading(true);
///
/// let clickable = button.clickable().unwrap();
/// assert!(clickable.has_class("button--danger"));
/// assert!(clickable.has_attribute("disabled"));
/// ```
#[derive(Debug)]
pub struct CustomButton {
    /// Host element carrying the attributes
    host: Node,
    /// Encapsulated render tree
    shadow_root: Option<Node>,
    /// Clickable element inside the shadow root
    button_id: Option<NodeId>,
    /// Loading spinner inside the clickable element
    spinner_id: Option<NodeId>,
    delegate: Arc<EventDelegate>,
    context: Context,
    config: ButtonConfig,
    /// Listener installed from `ButtonProps::on_click`
    click_listener: Option<ListenerId>,
}

impl CustomButton {
    /// Factory for registering the button under `config.tag_name`
    pub fn factory(config: ButtonConfig) -> ElementFactory {
        Arc::new(move |context: Context| {
            if let Err(err) = context.context_provider().provide(config.clone()) {
                log::error!("failed to provide button config: {err}");
            }
            Box::new(CustomButton::create(ButtonProps::default(), context)) as Box<dyn CustomElement>
        })
    }

    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Current presentation state read from the host attributes
    pub fn state(&self) -> ButtonState {
        ButtonState::from_attributes(&self.host, self.config.attribute_policy)
    }

    pub fn variant(&self) -> Token<ButtonVariant> {
        self.state().variant
    }

    pub fn set_variant(&mut self, variant: ButtonVariant) {
        self.set_attribute(VARIANT_ATTRIBUTE, variant.as_str());
    }

    pub fn size(&self) -> Token<ButtonSize> {
        self.state().size
    }

    pub fn set_size(&mut self, size: ButtonSize) {
        self.set_attribute(SIZE_ATTRIBUTE, size.as_str());
    }

    pub fn disabled(&self) -> bool {
        self.host.has_attribute(DISABLED_ATTRIBUTE)
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.set_flag(DISABLED_ATTRIBUTE, disabled);
    }

    pub fn loading(&self) -> bool {
        self.host.has_attribute(LOADING_ATTRIBUTE)
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.set_flag(LOADING_ATTRIBUTE, loading);
    }

    /// The clickable element inside the shadow root
    pub fn clickable(&self) -> Option<&Node> {
        let root = self.shadow_root.as_ref()?;
        root.find(self.button_id?)
    }

    pub fn spinner(&self) -> Option<&Node> {
        let root = self.shadow_root.as_ref()?;
        root.find(self.spinner_id?)
    }

    /// Whether the spinner is currently displayed
    pub fn spinner_visible(&self) -> bool {
        self.spinner()
            .and_then(|spinner| spinner.style("display"))
            .is_some_and(|display| display != "none")
    }

    /// Number of ripples currently in the tree
    pub fn ripple_count(&self) -> usize {
        self.clickable()
            .map_or(0, |button| button.count_class(RIPPLE_CLASS))
    }

    /// Append light-DOM content (the label projected through the slot)
    pub fn append_content(&mut self, child: Node) -> NodeId {
        self.host.append_child(child)
    }

    fn set_flag(&mut self, name: &str, on: bool) {
        if on {
            self.set_attribute(name, "");
        } else {
            self.remove_attribute(name);
        }
    }

    fn apply_props(&mut self, props: ButtonProps) {
        if let Some(variant) = props.variant {
            self.set_variant(variant);
        }
        if let Some(size) = props.size {
            self.set_size(size);
        }
        if let Some(disabled) = props.disabled {
            self.set_disabled(disabled);
        }
        if let Some(loading) = props.loading {
            self.set_loading(loading);
        }

        if let Some(previous) = self.click_listener.take() {
            self.delegate.off(previous);
        }
        if let Some(on_click) = props.on_click {
            let listener = self
                .delegate
                .on::<ActivationEvent>(BUTTON_CLICK, move |event, _| {
                    on_click.call(event.detail.clone())
                });
            self.click_listener = Some(listener);
        }
    }

    fn build_shadow_root(&mut self) -> Result<(), ComponentError> {
        let stylesheet = button_stylesheet(&self.config.theme)?;

        let spinner = Node::new("span")
            .with_class(SPINNER_CLASS)
            .with_style("display", "none");
        let spinner_id = spinner.id();

        let button = Node::new("button")
            .with_class(ButtonState::default().classify().class_name())
            .with_attribute("type", "button")
            .with_child(spinner)
            .with_child(Node::new("slot"));
        let button_id = button.id();

        let root = Node::new("template")
            .with_attribute("shadowrootmode", "open")
            .with_child(Node::new("style").with_text(stylesheet.to_string()))
            .with_child(button);

        self.shadow_root = Some(root);
        self.button_id = Some(button_id);
        self.spinner_id = Some(spinner_id);
        Ok(())
    }

    /// Re-derive the clickable element's classes, disabled flag and spinner
    fn update_button(&mut self) {
        let classification = self.state().classify();

        let (Some(root), Some(button_id), Some(spinner_id)) =
            (self.shadow_root.as_mut(), self.button_id, self.spinner_id)
        else {
            log::trace!("button {} has no render root; skipping update", self.host.id());
            return;
        };

        if let Some(button) = root.find_mut(button_id) {
            button.set_class_name(classification.class_name());
            if classification.native_disabled {
                button.set_attribute(DISABLED_ATTRIBUTE, "");
            } else {
                button.remove_attribute(DISABLED_ATTRIBUTE);
            }
        }
        if let Some(spinner) = root.find_mut(spinner_id) {
            spinner.set_style("display", classification.spinner_display());
        }

        log::trace!(
            "button {} classified as '{}'",
            self.host.id(),
            classification.class_name()
        );
    }

    fn create_ripple(&mut self, event: &PointerEvent) -> Result<(), ComponentError> {
        let (Some(root), Some(button_id)) = (self.shadow_root.as_mut(), self.button_id) else {
            return Ok(());
        };
        let button = root
            .find_mut(button_id)
            .ok_or(ComponentError::MissingShadowPart("button"))?;

        let bounds = button.bounds();
        let diameter = bounds.size.max_side();
        let local = bounds.to_local(event.client);
        let duration = self.config.ripple_duration_ms;

        let ripple = Node::new("span")
            .with_class(RIPPLE_CLASS)
            .with_style("width", px(diameter))
            .with_style("height", px(diameter))
            .with_style("left", px(local.x - diameter / 2.0))
            .with_style("top", px(local.y - diameter / 2.0))
            .with_style("animation-duration", format!("{duration}ms"));
        let ripple_id = button.append_child(ripple);

        let due_at = self.context.now_ms().saturating_add(duration);
        self.context.timers().schedule(
            due_at,
            TimerTask::RemoveRipple {
                widget: self.host.id(),
                ripple: ripple_id,
            },
        )?;
        Ok(())
    }

    /// Remove one ripple; returns `false` if it is already gone
    fn remove_ripple(&mut self, ripple: NodeId) -> bool {
        let (Some(root), Some(button_id)) = (self.shadow_root.as_mut(), self.button_id) else {
            return false;
        };
        root.find_mut(button_id)
            .and_then(|button| button.remove_child(ripple))
            .is_some()
    }

    fn clear_ripples(&mut self) -> usize {
        let (Some(root), Some(button_id)) = (self.shadow_root.as_mut(), self.button_id) else {
            return 0;
        };
        root.find_mut(button_id)
            .map_or(0, |button| button.remove_children_with_class(RIPPLE_CLASS))
    }
}

fn px(value: f32) -> String {
    format!("{value}px")
}

impl Component for CustomButton {
    type Props = ButtonProps;

    fn create(props: Self::Props, context: Context) -> Self {
        let config = context
            .context_provider()
            .consume::<ButtonConfig>()
            .unwrap_or_default();
        let host = Node::new(config.tag_name.clone());
        let delegate = Arc::new(EventDelegate::new(Some(host.id())));

        let mut button = Self {
            host,
            shadow_root: None,
            button_id: None,
            spinner_id: None,
            delegate,
            context,
            config,
            click_listener: None,
        };

        if let Err(err) = button.build_shadow_root() {
            log::error!("button {} could not build its render root: {err}", button.host.id());
        }
        button.update_button();
        button.apply_props(props);
        button
    }

    fn mount(&mut self) -> Result<(), ComponentError> {
        self.connected()
    }

    fn update(&mut self, props: Self::Props) -> Result<(), ComponentError> {
        self.apply_props(props);
        Ok(())
    }

    fn unmount(&mut self) -> Result<(), ComponentError> {
        self.disconnected()
    }

    fn render(&self) -> Result<Vec<Node>, ComponentError> {
        Ok(self.shadow_root.iter().cloned().collect())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl CustomElement for CustomButton {
    fn observed_attributes(&self) -> &'static [&'static str] {
        OBSERVED_ATTRIBUTES
    }

    fn host(&self) -> &Node {
        &self.host
    }

    fn host_mut(&mut self) -> &mut Node {
        &mut self.host
    }

    fn shadow_root(&self) -> Option<&Node> {
        self.shadow_root.as_ref()
    }

    fn event_delegate(&self) -> &Arc<EventDelegate> {
        &self.delegate
    }

    fn attribute_changed(&mut self, name: &str, old_value: Option<&str>, new_value: Option<&str>) {
        log::debug!(
            "button {} attribute '{name}' changed: {old_value:?} -> {new_value:?}",
            self.host.id()
        );
        let check = match name {
            VARIANT_ATTRIBUTE => Token::<ButtonVariant>::validate(new_value),
            SIZE_ATTRIBUTE => Token::<ButtonSize>::validate(new_value),
            _ => Ok(()),
        };
        if let Err(err) = check {
            log::warn!("{err}; policy {:?}", self.config.attribute_policy);
        }
        self.update_button();
    }

    fn connected(&mut self) -> Result<(), ComponentError> {
        self.context.transition(
            "mount",
            &[
                LifecyclePhase::Created,
                LifecyclePhase::Mounted,
                LifecyclePhase::Unmounted,
            ],
            LifecyclePhase::Mounted,
        )?;
        self.update_button();
        log::debug!("button {} connected", self.host.id());
        Ok(())
    }

    fn disconnected(&mut self) -> Result<(), ComponentError> {
        self.context
            .transition(
                "unmount",
                &[LifecyclePhase::Mounted, LifecyclePhase::Unmounted],
                LifecyclePhase::Unmounted,
            )?;
        let cleared = self.clear_ripples();
        log::debug!(
            "button {} disconnected, dropped {cleared} ripple(s)",
            self.host.id()
        );
        Ok(())
    }

    fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        propagation: &mut EventPropagation,
    ) -> Result<(), ComponentError> {
        let state = self.state();
        if state.is_inert() {
            propagation.prevent_default();
            propagation.stop_propagation();
            log::debug!(
                "button {} ignored activation (disabled: {}, loading: {})",
                self.host.id(),
                state.disabled,
                state.loading
            );
            return Ok(());
        }

        self.create_ripple(event)?;

        let detail = ActivationDetail {
            timestamp: self.context.now_ms(),
            variant: state.variant.to_string(),
            size: state.size.to_string(),
        };
        self.delegate.dispatch(&detail.into_event());
        Ok(())
    }

    fn run_timer(&mut self, task: &TimerTask) {
        match task {
            TimerTask::RemoveRipple { widget, ripple } if *widget == self.host.id() => {
                if !self.remove_ripple(*ripple) {
                    log::trace!("ripple {ripple} already gone");
                }
            }
            TimerTask::RemoveRipple { .. } => {}
        }
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.host.set_bounds(bounds);
        let (Some(root), Some(button_id)) = (self.shadow_root.as_mut(), self.button_id) else {
            return;
        };
        if let Some(button) = root.find_mut(button_id) {
            button.set_bounds(bounds);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
