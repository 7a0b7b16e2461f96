//! "Does this element match that selector", chosen once per host.
//!
//! Old browsers only expose vendor-prefixed versions of `Element.matches`.
//! Hosts probe once at startup with [`MatchPrimitive::detect`] and keep the
//! result; when nothing is available the Rust [`StructuralMatcher`] is used.

use crate::{dom::DomElement, selector::SelectorList};

/// A native element-matching method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPrimitive {
    /// `Element.prototype.matches`.
    Standard,
    /// `mozMatchesSelector` (Firefox < 34).
    Moz,
    /// `msMatchesSelector` (IE 9-11, legacy Edge).
    Ms,
    /// `webkitMatchesSelector` (Chrome < 34, Safari < 7.1).
    Webkit,
}

impl MatchPrimitive {
    /// Probe order. Among the prefixed methods the last one the legacy shim
    /// assigned wins, so Moz is preferred over Ms over Webkit.
    pub const PROBE_ORDER: [MatchPrimitive; 4] = [Self::Standard, Self::Moz, Self::Ms, Self::Webkit];

    /// Property name on `Element.prototype`.
    pub fn property(self) -> &'static str {
        match self {
            Self::Standard => "matches",
            Self::Moz => "mozMatchesSelector",
            Self::Ms => "msMatchesSelector",
            Self::Webkit => "webkitMatchesSelector",
        }
    }

    /// First primitive for which `has_property` answers true.
    pub fn detect(mut has_property: impl FnMut(&str) -> bool) -> Option<Self> {
        let found = Self::PROBE_ORDER
            .into_iter()
            .find(|primitive| has_property(primitive.property()));
        match found {
            Some(primitive) => {
                tracing::debug!(property = primitive.property(), "selector matching primitive")
            },
            None => tracing::debug!("no native selector matching, using structural matcher"),
        }
        found
    }
}

/// Uniform selector-matching capability.
pub trait SelectorMatcher<E> {
    /// Whether `element` matches `selector`.
    fn matches(&self, element: &E, selector: &SelectorList) -> bool;
}

/// Matches by walking the element tree with the Rust selector engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralMatcher;

impl<E: DomElement> SelectorMatcher<E> for StructuralMatcher {
    fn matches(&self, element: &E, selector: &SelectorList) -> bool {
        selector.matches(element)
    }
}
