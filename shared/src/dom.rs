//! The slice of the DOM that page decoration touches.
//!
//! Hosts implement these traits: the browser binding over `web-sys`, and
//! [`crate::memory`] for headless use.

use crate::error::Result;

/// An element handle. Handles are cheap to clone and refer to the same node.
pub trait DomElement: Clone {
    /// Tag name as the host reports it (browsers upper-case HTML tags).
    fn tag_name(&self) -> String;

    /// Value of an attribute, if present.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Set or replace an attribute.
    fn set_attribute(&self, name: &str, value: &str) -> Result<()>;

    /// Whether the class list contains `class`.
    fn has_class(&self, class: &str) -> bool;

    /// Add `class` when `present`, remove it otherwise.
    fn set_class(&self, class: &str, present: bool) -> Result<()>;

    /// Concatenated text of all descendants.
    fn text_content(&self) -> String;

    /// Replace all children with a single text node.
    fn set_text_content(&self, text: &str);

    /// Append `child` as the last child, moving it if already attached.
    fn append_child(&self, child: &Self) -> Result<()>;

    /// Parent element, `None` at the root or when detached.
    fn parent_element(&self) -> Option<Self>;

    /// The `id` attribute when present and non-empty.
    fn id(&self) -> Option<String> {
        self.attribute("id").filter(|id| !id.is_empty())
    }
}

/// A document handle.
pub trait DomDocument {
    /// Element handle type of this host.
    type Element: DomElement;

    /// First element in document order with the given id.
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Create a detached element.
    fn create_element(&self, tag: &str) -> Result<Self::Element>;

    /// The `<body>` element, if the document has one yet.
    fn body(&self) -> Option<Self::Element>;

    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Result<Vec<Self::Element>>;
}
