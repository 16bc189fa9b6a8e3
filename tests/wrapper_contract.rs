// The contract a framework wrapper relies on: forward the four attributes,
// subscribe and unsubscribe through listener handles.

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use orbit_button::kit::components::button::ActivationEvent;
use orbit_button::prelude::*;

// What a wrapper component would hold between renders
struct Wrapper {
    id: NodeId,
    listener: Option<ListenerId>,
}

impl Wrapper {
    fn mount(document: &mut Document) -> Result<Self> {
        let id = document.create_element("custom-button")?;
        document.append_child(id)?;
        Ok(Self { id, listener: None })
    }

    fn render(
        &mut self,
        document: &mut Document,
        variant: &str,
        size: &str,
        disabled: bool,
        loading: bool,
    ) -> Result<()> {
        document.set_attribute(self.id, "variant", variant)?;
        document.set_attribute(self.id, "size", size)?;
        for (name, on) in [("disabled", disabled), ("loading", loading)] {
            if on {
                document.set_attribute(self.id, name, "")?;
            } else {
                document.remove_attribute(self.id, name)?;
            }
        }
        Ok(())
    }

    fn subscribe(
        &mut self,
        document: &Document,
        handler: impl Fn(&ActivationDetail) + Send + Sync + 'static,
    ) -> Result<()> {
        self.unsubscribe(document)?;
        let listener = document.add_event_listener::<ActivationEvent>(
            EventTarget::Element(self.id),
            BUTTON_CLICK,
            move |event, _| handler(&event.detail),
        )?;
        self.listener = Some(listener);
        Ok(())
    }

    fn unsubscribe(&mut self, document: &Document) -> Result<()> {
        if let Some(listener) = self.listener.take() {
            assert!(document.remove_event_listener(EventTarget::Element(self.id), listener)?);
        }
        Ok(())
    }
}

fn document() -> Result<Document> {
    let mut document = Document::with_clock(Arc::new(ManualClock::new(0)));
    document.define_custom_button(ButtonConfig::default())?;
    Ok(document)
}

#[test]
fn test_forwarded_attributes_drive_presentation() -> Result<()> {
    let mut document = document()?;
    let mut wrapper = Wrapper::mount(&mut document)?;
    wrapper.render(&mut document, "danger", "small", false, true)?;

    let button = document
        .downcast::<CustomButton>(wrapper.id)
        .ok_or_else(|| anyhow!("not a button"))?;
    let clickable = button.clickable().ok_or_else(|| anyhow!("no clickable element"))?;
    assert_eq!(
        clickable.class_name(),
        "button button--danger button--small button--loading"
    );
    assert!(clickable.has_attribute("disabled"));
    assert!(button.spinner_visible());
    assert_eq!(document.get_attribute(wrapper.id, "loading"), Some(""));
    Ok(())
}

#[test]
fn test_listener_replacement_and_unsubscribe() -> Result<()> {
    let mut document = document()?;
    let mut wrapper = Wrapper::mount(&mut document)?;
    let log = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&log);
    wrapper.subscribe(&document, move |detail| {
        sink.lock().unwrap().push(format!("first:{}", detail.variant))
    })?;
    document.click(wrapper.id, 1.0, 1.0)?;

    let sink = Arc::clone(&log);
    wrapper.subscribe(&document, move |detail| {
        sink.lock().unwrap().push(format!("second:{}", detail.variant))
    })?;
    wrapper.render(&mut document, "secondary", "medium", false, false)?;
    document.click(wrapper.id, 1.0, 1.0)?;

    wrapper.unsubscribe(&document)?;
    document.click(wrapper.id, 1.0, 1.0)?;

    assert_eq!(
        *log.lock().unwrap(),
        vec!["first:primary".to_string(), "second:secondary".to_string()]
    );
    Ok(())
}

#[test]
fn test_props_interface() -> Result<()> {
    let mut button = CustomButton::create(
        ButtonProps {
            variant: Some(ButtonVariant::Secondary),
            size: Some(ButtonSize::Large),
            disabled: Some(true),
            ..ButtonProps::default()
        },
        Context::new(),
    );
    assert_eq!(button.variant(), "secondary");
    assert_eq!(button.size(), "large");
    assert!(button.disabled());

    button.update(ButtonProps {
        disabled: Some(false),
        ..ButtonProps::default()
    })?;
    assert!(!button.disabled());
    assert_eq!(button.variant(), "secondary");
    Ok(())
}

#[test]
fn test_registration_entry_point() {
    let mut registry = ElementRegistry::new();
    let config = ButtonConfig::default();

    // Native test builds are headless, so module-load registration is skipped.
    assert!(!orbit_button::init(&mut registry, &config));
    assert!(!registry.is_defined("custom-button"));

    assert!(register_custom_elements(&mut registry, Environment::Interactive, &config));
    assert!(registry.is_defined("custom-button"));
}

#[test]
fn test_activation_detail_serialises() -> Result<()> {
    let mut document = document()?;
    let wrapper = Wrapper::mount(&mut document)?;
    let json = Arc::new(Mutex::new(String::new()));
    let sink = Arc::clone(&json);
    document.add_event_listener::<ActivationEvent>(
        EventTarget::Document,
        BUTTON_CLICK,
        move |event, _| {
            if let Ok(serialised) = event.detail.to_json() {
                *sink.lock().unwrap() = serialised;
            }
        },
    )?;

    document.click(wrapper.id, 0.0, 0.0)?;
    let value: serde_json::Value = serde_json::from_str(&json.lock().unwrap())?;
    assert_eq!(value["variant"], "primary");
    assert_eq!(value["size"], "medium");
    assert_eq!(value["timestamp"], 0);
    Ok(())
}
