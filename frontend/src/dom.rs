//! `web-sys` implementation of the shared DOM traits.

use docs_nav_shared::{DomDocument, DomElement, NavError, Result};
use wasm_bindgen::{JsCast, JsValue};

/// Describe a rejected JS call the way the console would.
pub(crate) fn js_error(operation: &'static str, value: JsValue) -> NavError {
    let message = value
        .dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"));
    NavError::dom(operation, message)
}

/// A live browser element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebElement(pub web_sys::Element);

impl From<web_sys::Element> for WebElement {
    fn from(element: web_sys::Element) -> Self {
        Self(element)
    }
}

impl DomElement for WebElement {
    fn tag_name(&self) -> String {
        self.0.tag_name()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<()> {
        self.0
            .set_attribute(name, value)
            .map_err(|err| js_error("setAttribute", err))
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn set_class(&self, class: &str, present: bool) -> Result<()> {
        self.0
            .class_list()
            .toggle_with_force(class, present)
            .map(|_| ())
            .map_err(|err| js_error("classList.toggle", err))
    }

    fn text_content(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn set_text_content(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn append_child(&self, child: &Self) -> Result<()> {
        self.0
            .append_child(&child.0)
            .map(|_| ())
            .map_err(|err| js_error("appendChild", err))
    }

    fn parent_element(&self) -> Option<Self> {
        self.0.parent_element().map(Self)
    }
}

/// The page's document.
#[derive(Debug, Clone)]
pub struct WebDocument(pub web_sys::Document);

impl WebDocument {
    /// The document of the global window, if there is one.
    pub fn current() -> Option<Self> {
        web_sys::window().and_then(|win| win.document()).map(Self)
    }
}

impl DomDocument for WebDocument {
    type Element = WebElement;

    fn element_by_id(&self, id: &str) -> Option<WebElement> {
        self.0.get_element_by_id(id).map(WebElement)
    }

    fn create_element(&self, tag: &str) -> Result<WebElement> {
        self.0
            .create_element(tag)
            .map(WebElement)
            .map_err(|err| js_error("createElement", err))
    }

    fn body(&self) -> Option<WebElement> {
        self.0.body().map(|body| WebElement(body.into()))
    }

    fn query_all(&self, selector: &str) -> Result<Vec<WebElement>> {
        let nodes = self
            .0
            .query_selector_all(selector)
            .map_err(|err| js_error("querySelectorAll", err))?;
        Ok((0..nodes.length())
            .filter_map(|idx| nodes.item(idx))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .map(WebElement)
            .collect())
    }
}
