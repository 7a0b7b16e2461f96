//! Selector matching backed by whatever the browser provides.

use docs_nav_shared::{MatchPrimitive, SelectorList, SelectorMatcher, StructuralMatcher};
use wasm_bindgen::{JsCast, JsValue};

use crate::dom::WebElement;

/// Matching strategy picked once at startup.
#[derive(Debug, Clone)]
pub enum WebMatcher {
    /// `Element.prototype.matches`.
    Native,
    /// A vendor-prefixed method from `Element.prototype`.
    Prefixed {
        /// Which method was found.
        primitive: MatchPrimitive,
        /// The method itself, called with the element as `this`.
        function: js_sys::Function,
    },
    /// No native method; walk the tree in Rust.
    Structural,
}

impl WebMatcher {
    /// Probe `Element.prototype` for a matching method.
    pub fn detect() -> Self {
        let Some(prototype) = element_prototype() else {
            return Self::Structural;
        };
        let has = |name: &str| {
            js_sys::Reflect::has(&prototype, &JsValue::from_str(name)).unwrap_or(false)
        };
        match MatchPrimitive::detect(has) {
            Some(MatchPrimitive::Standard) => Self::Native,
            Some(primitive) => {
                let function = js_sys::Reflect::get(&prototype, &JsValue::from_str(primitive.property()))
                    .ok()
                    .and_then(|value| value.dyn_into::<js_sys::Function>().ok());
                match function {
                    Some(function) => Self::Prefixed {
                        primitive,
                        function,
                    },
                    None => Self::Structural,
                }
            },
            None => Self::Structural,
        }
    }
}

fn element_prototype() -> Option<js_sys::Object> {
    let constructor = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("Element")).ok()?;
    js_sys::Reflect::get(&constructor, &JsValue::from_str("prototype"))
        .ok()?
        .dyn_into::<js_sys::Object>()
        .ok()
}

impl SelectorMatcher<WebElement> for WebMatcher {
    fn matches(&self, element: &WebElement, selector: &SelectorList) -> bool {
        match self {
            Self::Native => element.0.matches(selector.as_str()).unwrap_or_else(|err| {
                web_sys::console::error_1(&err);
                false
            }),
            Self::Prefixed {
                function, ..
            } => function
                .call1(element.0.as_ref(), &JsValue::from_str(selector.as_str()))
                .map(|value| value.as_bool().unwrap_or(false))
                .unwrap_or_else(|err| {
                    web_sys::console::error_1(&err);
                    false
                }),
            Self::Structural => StructuralMatcher.matches(element, selector),
        }
    }
}
