// Platform detection and adapters for the Orbit button widget

/// Where the widget is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// A document with a live element registry is available
    Interactive,
    /// No interactive document, e.g. server-side rendering or native tests
    Headless,
}

impl Environment {
    /// Detect the current environment
    #[cfg(all(feature = "web", target_arch = "wasm32"))]
    pub fn detect() -> Self {
        match web_sys::window().and_then(|window| window.document()) {
            Some(_) => Self::Interactive,
            None => Self::Headless,
        }
    }

    /// Detect the current environment
    #[cfg(not(all(feature = "web", target_arch = "wasm32")))]
    pub fn detect() -> Self {
        Self::Headless
    }

    pub fn is_interactive(self) -> bool {
        self == Self::Interactive
    }
}

/// Browser adapter
#[cfg(feature = "web")]
pub mod web {
    use wasm_bindgen::JsValue;
    use web_sys::{Document, Element, ShadowRootInit, ShadowRootMode};

    use crate::component::CustomElement;

    fn platform_error(context: &str, err: JsValue) -> crate::Error {
        crate::Error::Platform(format!("{context}: {err:?}"))
    }

    /// Mirror an element into a live DOM under `parent`
    ///
    /// Creates the host with its attributes, attaches an open shadow root
    /// holding the encapsulated tree and renders light content as children.
    ///
    /// The result is a static snapshot (server-render style): no listeners are
    /// installed and later attribute changes on `element` are not synced.
    /// Interactive use goes through [`crate::document::Document`].
    pub fn mirror_into(
        document: &Document,
        parent: &Element,
        element: &dyn CustomElement,
    ) -> Result<Element, crate::Error> {
        let host = element.host();
        let node = document
            .create_element(host.tag())
            .map_err(|e| platform_error("create element", e))?;
        for (name, value) in host.attributes() {
            node.set_attribute(name, value)
                .map_err(|e| platform_error("set attribute", e))?;
        }

        if let Some(shadow) = element.shadow_root() {
            let shadow_root = node
                .attach_shadow(&ShadowRootInit::new(ShadowRootMode::Open))
                .map_err(|e| platform_error("attach shadow", e))?;
            let markup: String = shadow.children().iter().map(|child| child.to_html()).collect();
            shadow_root.set_inner_html(&markup);
        }

        let light: String = host.children().iter().map(|child| child.to_html()).collect();
        node.set_inner_html(&light);

        parent
            .append_child(&node)
            .map_err(|e| platform_error("append child", e))?;
        log::debug!("mirrored <{}> into the document", host.tag());
        Ok(node)
    }

    /// Document of the current window
    pub fn document() -> Result<Document, crate::Error> {
        web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| crate::Error::Platform("no document available".to_string()))
    }
}
