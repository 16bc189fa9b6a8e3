//! Tests for the button widget

use std::sync::{Arc, Mutex};

use crate::component::{callback, Component, ComponentError, Context, ContextProvider, CustomElement, LifecyclePhase};
use crate::config::ButtonConfig;
use crate::events::PointerEvent;
use crate::kit::components::button::*;
use crate::layout::Rect;
use crate::scheduler::{Clock, ManualClock, TimerQueue};

fn manual_context(clock: &ManualClock) -> Context {
    Context::with_host(TimerQueue::new(), Arc::new(clock.clone()), ContextProvider::new())
}

fn button_with(config: ButtonConfig) -> CustomButton {
    let provider = ContextProvider::new();
    provider.provide(config).unwrap();
    CustomButton::create(
        ButtonProps::default(),
        Context::with_host(TimerQueue::new(), Arc::new(ManualClock::new(0)), provider),
    )
}

fn recorded_clicks(button: &CustomButton) -> Arc<Mutex<Vec<ActivationDetail>>> {
    let clicks = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&clicks);
    button
        .event_delegate()
        .on::<ActivationEvent>(BUTTON_CLICK, move |event, _| {
            sink.lock().unwrap().push(event.detail.clone());
        });
    clicks
}

#[test]
fn test_defaults() {
    let button = CustomButton::create(ButtonProps::default(), Context::new());

    assert_eq!(button.variant(), "primary");
    assert_eq!(button.size(), "medium");
    assert!(!button.disabled());
    assert!(!button.loading());
    assert!(!button.spinner_visible());

    let clickable = button.clickable().unwrap();
    assert_eq!(clickable.class_name(), "button button--primary button--medium");
    assert_eq!(clickable.attribute("type"), Some("button"));
    assert!(!clickable.has_attribute("disabled"));
    assert_eq!(button.host().tag(), "custom-button");
    assert!(button.host().attributes().is_empty());
}

#[test]
fn test_accessor_round_trips() {
    let mut button = CustomButton::create(ButtonProps::default(), Context::new());

    button.set_variant(ButtonVariant::Danger);
    assert_eq!(button.variant(), Token::Known(ButtonVariant::Danger));
    assert_eq!(button.get_attribute("variant"), Some("danger"));

    button.set_size(ButtonSize::Large);
    assert_eq!(button.size(), "large");

    button.set_disabled(true);
    assert!(button.disabled());
    assert_eq!(button.get_attribute("disabled"), Some(""));
    button.set_disabled(false);
    assert!(!button.disabled());
    assert!(!button.has_attribute("disabled"));

    button.set_loading(true);
    assert!(button.loading());
    button.set_loading(false);
    assert!(!button.loading());
}

#[test]
fn test_all_36_configurations() {
    let states = ButtonState::all();
    assert_eq!(states.len(), 36);

    for state in states {
        let mut button = CustomButton::create(ButtonProps::default(), Context::new());
        button.set_variant(state.variant.known().unwrap());
        button.set_size(state.size.known().unwrap());
        button.set_disabled(state.disabled);
        button.set_loading(state.loading);

        let clickable = button.clickable().unwrap();
        assert_eq!(
            clickable.has_attribute("disabled"),
            state.disabled || state.loading,
            "{state:?}"
        );
        assert_eq!(button.spinner_visible(), state.loading, "{state:?}");
        assert_eq!(clickable.has_class(LOADING_CLASS), state.loading, "{state:?}");
        assert!(clickable.has_class(&format!("button--{}", state.variant)));
        assert!(clickable.has_class(&format!("button--{}", state.size)));
        assert_eq!(clickable.class_name(), state.classify().class_name());
    }
}

#[test]
fn test_classification_is_pure() {
    let state = ButtonState::new(ButtonVariant::Secondary, ButtonSize::Small, false, true);
    let classification = state.classify();
    assert_eq!(
        classification.classes,
        vec!["button", "button--secondary", "button--small", "button--loading"]
    );
    assert!(classification.native_disabled);
    assert_eq!(classification.spinner_display(), "block");
    assert_eq!(state.classify(), classification);
}

#[test]
fn test_disable_then_enable_restores_classification() {
    let mut button = CustomButton::create(
        ButtonProps {
            variant: Some(ButtonVariant::Secondary),
            size: Some(ButtonSize::Small),
            ..ButtonProps::default()
        },
        Context::new(),
    );
    let before = button.clickable().unwrap().clone();

    button.set_disabled(true);
    assert!(button.clickable().unwrap().has_attribute("disabled"));
    button.set_disabled(false);

    let after = button.clickable().unwrap();
    assert_eq!(after.class_name(), before.class_name());
    assert!(!after.has_attribute("disabled"));
}

#[test]
fn test_unobserved_attribute_does_not_reclassify() {
    let mut button = CustomButton::create(ButtonProps::default(), Context::new());
    // Bypass notification so the rendered classes go stale on purpose.
    button.host_mut().set_attribute("variant", "danger");
    button.set_attribute("title", "Delete");
    assert!(button.clickable().unwrap().has_class("button--primary"));

    button.set_attribute("variant", "danger");
    // Same value as the host already carries: no change, no update.
    assert!(button.clickable().unwrap().has_class("button--primary"));

    button.set_attribute("size", "small");
    assert!(button.clickable().unwrap().has_class("button--danger"));
}

#[test]
fn test_unrecognised_values_pass_through_by_default() {
    let mut button = CustomButton::create(ButtonProps::default(), Context::new());
    button.set_attribute("variant", "ghost");

    assert_eq!(button.variant(), Token::Unrecognized("ghost".to_string()));
    assert_eq!(button.variant(), "ghost");
    assert!(button.clickable().unwrap().has_class("button--ghost"));
}

#[test]
fn test_fallback_policy_clamps_unrecognised_values() {
    let mut button = button_with(ButtonConfig {
        attribute_policy: AttributePolicy::Fallback,
        ..ButtonConfig::default()
    });
    button.set_attribute("size", "huge");

    assert_eq!(button.size(), Token::Known(ButtonSize::Medium));
    assert!(button.clickable().unwrap().has_class("button--medium"));
    assert_eq!(button.get_attribute("size"), Some("huge"));
}

#[test]
fn test_activation_emits_one_event() {
    let clock = ManualClock::new(1_000);
    let mut button = CustomButton::create(ButtonProps::default(), manual_context(&clock));
    button.set_variant(ButtonVariant::Danger);
    button.set_size(ButtonSize::Small);
    let clicks = recorded_clicks(&button);

    let propagation = button.dispatch_pointer(&PointerEvent::click(5.0, 5.0)).unwrap();

    assert!(!propagation.is_default_prevented());
    let clicks = clicks.lock().unwrap();
    assert_eq!(clicks.len(), 1);
    assert_eq!(clicks[0].variant, "danger");
    assert_eq!(clicks[0].size, "small");
    assert!(clicks[0].timestamp >= 1_000);
}

#[test]
fn test_inert_button_suppresses_activation() {
    for (disabled, loading) in [(true, false), (false, true), (true, true)] {
        let mut button = CustomButton::create(ButtonProps::default(), Context::new());
        button.set_disabled(disabled);
        button.set_loading(loading);
        let clicks = recorded_clicks(&button);

        let propagation = button.dispatch_pointer(&PointerEvent::click(5.0, 5.0)).unwrap();

        assert!(propagation.is_default_prevented());
        assert!(propagation.is_propagation_stopped());
        assert!(clicks.lock().unwrap().is_empty());
        assert_eq!(button.ripple_count(), 0);
    }
}

#[test]
fn test_ripple_geometry() {
    let mut button = CustomButton::create(ButtonProps::default(), Context::new());
    button.set_bounds(Rect::new(100.0, 50.0, 120.0, 40.0));

    button.dispatch_pointer(&PointerEvent::click(130.0, 70.0)).unwrap();

    let clickable = button.clickable().unwrap();
    let ripple = clickable.find_by_class(RIPPLE_CLASS).unwrap();
    assert_eq!(ripple.style("width"), Some("120px"));
    assert_eq!(ripple.style("height"), Some("120px"));
    assert_eq!(ripple.style("left"), Some("-30px"));
    assert_eq!(ripple.style("top"), Some("-40px"));
    assert_eq!(ripple.style("animation-duration"), Some("600ms"));
}

#[test]
fn test_ripple_removed_after_duration() {
    let clock = ManualClock::new(0);
    let mut button = CustomButton::create(ButtonProps::default(), manual_context(&clock));
    button.set_bounds(Rect::new(0.0, 0.0, 80.0, 32.0));

    button.dispatch_pointer(&PointerEvent::click(10.0, 10.0)).unwrap();
    button.dispatch_pointer(&PointerEvent::click(20.0, 10.0)).unwrap();
    assert_eq!(button.ripple_count(), 2);

    clock.advance(599);
    assert!(button.context().timers().take_due(clock.now_ms()).unwrap().is_empty());

    clock.advance(1);
    let due = button.context().timers().take_due(clock.now_ms()).unwrap();
    assert_eq!(due.len(), 2);
    for (_, task) in &due {
        button.run_timer(task);
    }
    assert_eq!(button.ripple_count(), 0);

    // Running the same removal again is harmless.
    for (_, task) in &due {
        button.run_timer(task);
    }
    assert_eq!(button.ripple_count(), 0);
}

#[test]
fn test_disconnect_drops_ripples() {
    let mut button = CustomButton::create(ButtonProps::default(), Context::new());
    button.connected().unwrap();
    button.dispatch_pointer(&PointerEvent::click(0.0, 0.0)).unwrap();
    assert_eq!(button.ripple_count(), 1);

    button.disconnected().unwrap();
    assert_eq!(button.ripple_count(), 0);
    assert_eq!(button.context().lifecycle_phase(), LifecyclePhase::Unmounted);

    button.connected().unwrap();
    assert_eq!(button.ripple_count(), 0);
}

#[test]
fn test_lifecycle_transitions_are_checked() {
    let mut button = CustomButton::create(ButtonProps::default(), Context::new());
    assert!(matches!(
        button.disconnected(),
        Err(ComponentError::InvalidLifecycleTransition(LifecyclePhase::Created, _))
    ));
    button.mount().unwrap();
    button.mount().unwrap();
    assert_eq!(button.context().lifecycle_phase(), LifecyclePhase::Mounted);
    button.unmount().unwrap();
    button.unmount().unwrap();
    assert_eq!(button.context().lifecycle_phase(), LifecyclePhase::Unmounted);
}

#[test]
fn test_repeat_attach_reclassifies() {
    let mut button = CustomButton::create(ButtonProps::default(), Context::new());
    button.mount().unwrap();
    button.host_mut().set_attribute("variant", "danger");

    button.connected().unwrap();
    assert!(button.clickable().unwrap().has_class("button--danger"));
}

#[test]
fn test_empty_attributes_read_as_defaults() {
    for policy in [AttributePolicy::Permissive, AttributePolicy::Fallback] {
        let mut button = button_with(ButtonConfig {
            attribute_policy: policy,
            ..ButtonConfig::default()
        });
        button.set_attribute("variant", "danger");
        button.set_attribute("variant", "");
        button.set_attribute("size", "");
        let clicks = recorded_clicks(&button);

        assert_eq!(button.variant(), Token::Known(ButtonVariant::Primary));
        assert_eq!(button.size(), Token::Known(ButtonSize::Medium));
        assert_eq!(
            button.clickable().unwrap().class_name(),
            "button button--primary button--medium"
        );

        button.dispatch_pointer(&PointerEvent::click(0.0, 0.0)).unwrap();
        let clicks = clicks.lock().unwrap();
        assert_eq!(clicks[0].variant, "primary");
        assert_eq!(clicks[0].size, "medium");
    }
}

#[test]
fn test_token_validation() {
    assert!(Token::<ButtonVariant>::validate(None).is_ok());
    assert!(Token::<ButtonVariant>::validate(Some("")).is_ok());
    assert!(Token::<ButtonVariant>::validate(Some("danger")).is_ok());
    assert_eq!(
        Token::<ButtonSize>::validate(Some("huge")),
        Err(ParseTokenError {
            attribute: "size",
            value: "huge".to_string(),
        })
    );
}

#[test]
fn test_attributes_set_before_attachment_are_applied() {
    let mut button = CustomButton::create(ButtonProps::default(), Context::new());
    button.host_mut().set_attribute("loading", "");
    assert!(!button.spinner_visible());

    button.connected().unwrap();
    assert!(button.spinner_visible());
    assert!(button.clickable().unwrap().has_attribute("disabled"));
}

#[test]
fn test_on_click_prop_is_replaced_on_update() {
    let first = Arc::new(Mutex::new(0));
    let second = Arc::new(Mutex::new(0));

    let counter = Arc::clone(&first);
    let mut button = CustomButton::create(
        ButtonProps {
            on_click: Some(callback(move |_: ActivationDetail| *counter.lock().unwrap() += 1)),
            ..ButtonProps::default()
        },
        Context::new(),
    );
    button.dispatch_pointer(&PointerEvent::click(0.0, 0.0)).unwrap();

    let counter = Arc::clone(&second);
    button
        .update(ButtonProps {
            on_click: Some(callback(move |_: ActivationDetail| *counter.lock().unwrap() += 1)),
            ..ButtonProps::default()
        })
        .unwrap();
    button.dispatch_pointer(&PointerEvent::click(0.0, 0.0)).unwrap();

    button.update(ButtonProps::default()).unwrap();
    button.dispatch_pointer(&PointerEvent::click(0.0, 0.0)).unwrap();

    assert_eq!(*first.lock().unwrap(), 1);
    assert_eq!(*second.lock().unwrap(), 1);
    assert_eq!(button.event_delegate().listener_count(BUTTON_CLICK), 0);
}

#[test]
fn test_stylesheet_covers_every_class() {
    let stylesheet = button_stylesheet(&ButtonConfig::default().theme).unwrap();
    for &variant in ButtonVariant::ALL {
        assert!(stylesheet.has_class_rule(&format!("button--{variant}")));
    }
    for &size in ButtonSize::ALL {
        assert!(stylesheet.has_class_rule(&format!("button--{size}")));
    }
    for class in [BASE_CLASS, LOADING_CLASS, SPINNER_CLASS, RIPPLE_CLASS] {
        assert!(stylesheet.has_class_rule(class), "{class}");
    }
    assert!(stylesheet.keyframes("ripple").is_some());
    assert!(stylesheet.keyframes("spin").is_some());
    assert_eq!(stylesheet.rules[0].selectors[0].selector, ":host");
}

#[test]
fn test_to_html_uses_declarative_shadow_root() {
    let mut button = CustomButton::create(ButtonProps::default(), Context::new());
    button.set_variant(ButtonVariant::Secondary);
    button.append_content(crate::component::Node::new("span").with_text("Save"));

    let html = button.to_html();
    assert!(html.starts_with("<custom-button variant=\"secondary\"><template shadowrootmode=\"open\"><style>"));
    assert!(html.contains(
        "<button class=\"button button--secondary button--medium\" type=\"button\"><span class=\"spinner\" style=\"display: none;\"></span><slot></slot></button>"
    ));
    assert!(html.ends_with("</template><span>Save</span></custom-button>"));
}

#[test]
fn test_activation_detail_json() {
    let detail = ActivationDetail {
        timestamp: 42,
        variant: "primary".to_string(),
        size: "medium".to_string(),
    };
    assert_eq!(
        detail.to_json().unwrap(),
        r#"{"timestamp":42,"variant":"primary","size":"medium"}"#
    );
}

#[test]
fn test_token_parsing() {
    assert_eq!("danger".parse::<ButtonVariant>(), Ok(ButtonVariant::Danger));
    let err = "Danger".parse::<ButtonVariant>().unwrap_err();
    assert_eq!(err.to_string(), "unrecognised variant value 'Danger'");
    assert_eq!(ButtonSize::default(), ButtonSize::Medium);
}
