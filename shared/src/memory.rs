//! Headless DOM host.
//!
//! A reference-counted element tree implementing [`DomDocument`] and
//! [`DomElement`], plus a resizable [`FixedViewport`]. Decoration runs against
//! it exactly as it does in the browser, and [`MemoryElement::outer_html`]
//! makes the result easy to inspect.

use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

use crate::{
    dom::{DomDocument, DomElement},
    error::{NavError, Result},
    selector::SelectorList,
    viewport::{Breakpoint, Viewport},
};

#[derive(Debug)]
enum Node {
    Element(MemoryElement),
    Text(String),
}

#[derive(Debug)]
struct ElementData {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
    parent: Weak<RefCell<ElementData>>,
}

/// Element handle of the in-memory DOM. Clones share the node.
#[derive(Debug, Clone)]
pub struct MemoryElement(Rc<RefCell<ElementData>>);

impl PartialEq for MemoryElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for MemoryElement {}

impl MemoryElement {
    /// Create a detached element. Tags are stored lower-case.
    pub fn new(tag: &str) -> Self {
        Self(Rc::new(RefCell::new(ElementData {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            children: Vec::new(),
            parent: Weak::new(),
        })))
    }

    /// Builder form of [`DomElement::set_attribute`].
    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.put_attribute(name, value);
        self
    }

    /// Builder that appends a text node.
    pub fn with_text(self, text: &str) -> Self {
        self.append_text(text);
        self
    }

    /// Builder form of [`MemoryElement::append`].
    ///
    /// A child that is an ancestor of `self` is ignored.
    pub fn with_child(self, child: MemoryElement) -> Self {
        if let Err(err) = self.append(&child) {
            tracing::warn!(%err, "ignoring child that would create a cycle");
        }
        self
    }

    /// Append a text node.
    pub fn append_text(&self, text: &str) {
        self.0.borrow_mut().children.push(Node::Text(text.to_string()));
    }

    /// Append `child`, detaching it from its current parent first.
    pub fn append(&self, child: &MemoryElement) -> Result<()> {
        if self == child || child.is_ancestor_of(self) {
            return Err(NavError::dom(
                "appendChild",
                "HierarchyRequestError: the new child is an ancestor of the parent",
            ));
        }
        child.detach();
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        self.0.borrow_mut().children.push(Node::Element(child.clone()));
        Ok(())
    }

    /// Child elements, skipping text nodes.
    pub fn children(&self) -> Vec<MemoryElement> {
        self.0
            .borrow()
            .children
            .iter()
            .filter_map(|node| match node {
                Node::Element(element) => Some(element.clone()),
                Node::Text(_) => None,
            })
            .collect()
    }

    /// Number of child nodes, text nodes included.
    pub fn child_node_count(&self) -> usize {
        self.0.borrow().children.len()
    }

    /// Serialize the element and its subtree.
    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    /// Serialize the subtree without the element itself.
    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        for node in &self.0.borrow().children {
            match node {
                Node::Element(element) => element.write_html(&mut out),
                Node::Text(text) => escape_into(&mut out, text, false),
            }
        }
        out
    }

    fn write_html(&self, out: &mut String) {
        let data = self.0.borrow();
        out.push('<');
        out.push_str(&data.tag);
        for (name, value) in &data.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            escape_into(out, value, true);
            out.push('"');
        }
        out.push('>');
        drop(data);
        out.push_str(&self.inner_html());
        out.push_str("</");
        out.push_str(&self.0.borrow().tag);
        out.push('>');
    }

    fn put_attribute(&self, name: &str, value: &str) {
        let mut data = self.0.borrow_mut();
        match data.attributes.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, slot)) => *slot = value.to_string(),
            None => data.attributes.push((name.to_string(), value.to_string())),
        }
    }

    fn remove_attribute(&self, name: &str) {
        self.0.borrow_mut().attributes.retain(|(existing, _)| existing != name);
    }

    fn class_list(&self) -> Vec<String> {
        self.attribute("class")
            .map(|value| value.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn is_ancestor_of(&self, other: &MemoryElement) -> bool {
        let mut current = other.parent_element();
        while let Some(node) = current {
            if &node == self {
                return true;
            }
            current = node.parent_element();
        }
        false
    }

    fn detach(&self) {
        let Some(parent) = self.parent_element() else {
            return;
        };
        parent.0.borrow_mut().children.retain(|node| match node {
            Node::Element(element) => element != self,
            Node::Text(_) => true,
        });
        self.0.borrow_mut().parent = Weak::new();
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.0.borrow().children {
            match node {
                Node::Element(element) => element.collect_text(out),
                Node::Text(text) => out.push_str(text),
            }
        }
    }

    /// Pre-order walk, which is document order.
    fn walk(&self, visit: &mut dyn FnMut(&MemoryElement) -> bool) -> bool {
        if !visit(self) {
            return false;
        }
        self.children().iter().all(|child| child.walk(visit))
    }
}

impl DomElement for MemoryElement {
    fn tag_name(&self) -> String {
        self.0.borrow().tag.clone()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0
            .borrow()
            .attributes
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.clone())
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<()> {
        if name.is_empty() || name.chars().any(|c| c.is_whitespace() || c == '"' || c == '=') {
            return Err(NavError::dom("setAttribute", format!("InvalidCharacterError: {name:?}")));
        }
        self.put_attribute(name, value);
        Ok(())
    }

    fn has_class(&self, class: &str) -> bool {
        self.class_list().iter().any(|existing| existing == class)
    }

    fn set_class(&self, class: &str, present: bool) -> Result<()> {
        if class.is_empty() || class.chars().any(char::is_whitespace) {
            return Err(NavError::dom("classList.toggle", format!("InvalidCharacterError: {class:?}")));
        }
        let mut classes = self.class_list();
        let has = classes.iter().any(|existing| existing == class);
        match (present, has) {
            (true, false) => classes.push(class.to_string()),
            (false, true) => classes.retain(|existing| existing != class),
            _ => return Ok(()),
        }
        if classes.is_empty() {
            self.remove_attribute("class");
        } else {
            self.put_attribute("class", &classes.join(" "));
        }
        Ok(())
    }

    fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn set_text_content(&self, text: &str) {
        let children: Vec<_> = self.0.borrow_mut().children.drain(..).collect();
        for node in children {
            if let Node::Element(element) = node {
                element.0.borrow_mut().parent = Weak::new();
            }
        }
        if !text.is_empty() {
            self.append_text(text);
        }
    }

    fn append_child(&self, child: &Self) -> Result<()> {
        self.append(child)
    }

    fn parent_element(&self) -> Option<Self> {
        self.0.borrow().parent.upgrade().map(MemoryElement)
    }
}

/// In-memory document: `<html><head></head><body></body></html>`.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    root: MemoryElement,
    body: MemoryElement,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// An empty document.
    pub fn new() -> Self {
        let body = MemoryElement::new("body");
        let root = MemoryElement::new("html")
            .with_child(MemoryElement::new("head"))
            .with_child(body.clone());
        Self {
            root,
            body,
        }
    }

    /// The `<html>` element.
    pub fn root(&self) -> MemoryElement {
        self.root.clone()
    }

    /// The `<body>` element.
    pub fn body(&self) -> MemoryElement {
        self.body.clone()
    }
}

impl DomDocument for MemoryDocument {
    type Element = MemoryElement;

    fn element_by_id(&self, id: &str) -> Option<MemoryElement> {
        let mut found = None;
        self.root.walk(&mut |element: &MemoryElement| {
            if element.attribute("id").as_deref() == Some(id) {
                found = Some(element.clone());
                return false;
            }
            true
        });
        found
    }

    fn create_element(&self, tag: &str) -> Result<MemoryElement> {
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(NavError::dom("createElement", format!("InvalidCharacterError: {tag:?}")));
        }
        Ok(MemoryElement::new(tag))
    }

    fn body(&self) -> Option<MemoryElement> {
        Some(self.body.clone())
    }

    fn query_all(&self, selector: &str) -> Result<Vec<MemoryElement>> {
        let selector = SelectorList::parse(selector).map_err(|source| NavError::Selector {
            selector: selector.to_string(),
            source,
        })?;
        let mut matches = Vec::new();
        self.root.walk(&mut |element: &MemoryElement| {
            if selector.matches(element) {
                matches.push(element.clone());
            }
            true
        });
        Ok(matches)
    }
}

/// A viewport with a settable width.
#[derive(Debug, Default)]
pub struct FixedViewport {
    width: Cell<u32>,
}

impl FixedViewport {
    /// A viewport `width` CSS pixels wide.
    pub fn new(width: u32) -> Self {
        Self {
            width: Cell::new(width),
        }
    }

    /// Change the width, as a window resize would.
    pub fn resize(&self, width: u32) {
        self.width.set(width);
    }

    /// Current width.
    pub fn width(&self) -> u32 {
        self.width.get()
    }
}

impl Viewport for FixedViewport {
    fn matches(&self, breakpoint: &Breakpoint) -> bool {
        breakpoint.contains(self.width.get())
    }
}

fn escape_into(out: &mut String, text: &str, attribute: bool) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_nested_markup_with_escaping() {
        let el = MemoryElement::new("div")
            .with_attribute("title", "say \"hi\"")
            .with_child(MemoryElement::new("a").with_text("Fish & <Chips>"));
        assert_eq!(
            el.outer_html(),
            r#"<div title="say &quot;hi&quot;"><a>Fish &amp; &lt;Chips&gt;</a></div>"#
        );
    }

    #[test]
    fn element_by_id_returns_first_in_document_order() {
        let doc = MemoryDocument::new();
        let first = MemoryElement::new("section").with_attribute("id", "dup");
        let second = MemoryElement::new("p").with_attribute("id", "dup");
        doc.body().append(&first).expect("append first");
        doc.body().append(&second).expect("append second");

        assert_eq!(doc.element_by_id("dup"), Some(first));
        assert_eq!(doc.element_by_id("nope"), None);
    }

    #[test]
    fn append_moves_an_attached_child() {
        let a = MemoryElement::new("div");
        let b = MemoryElement::new("div");
        let child = MemoryElement::new("span");
        a.append(&child).expect("append to a");
        b.append(&child).expect("append to b");

        assert_eq!(a.child_node_count(), 0);
        assert_eq!(b.children(), vec![child.clone()]);
        assert_eq!(child.parent_element(), Some(b));
    }

    #[test]
    fn append_rejects_cycles() {
        let parent = MemoryElement::new("div");
        let child = MemoryElement::new("div");
        parent.append(&child).expect("append");
        assert!(child.append(&parent).is_err());
        assert!(parent.append(&parent).is_err());
    }

    #[test]
    fn set_class_adds_and_removes_tokens() {
        let body = MemoryDocument::new().body();
        body.set_class("hide-toc", true).expect("add");
        body.set_class("hide-toc", true).expect("add again");
        assert_eq!(body.attribute("class").as_deref(), Some("hide-toc"));

        body.set_class("dark", true).expect("add dark");
        body.set_class("hide-toc", false).expect("remove");
        assert_eq!(body.attribute("class").as_deref(), Some("dark"));
        assert!(!body.has_class("hide-toc"));
        assert!(body.set_class("two words", true).is_err());
    }

    #[test]
    fn text_content_concatenates_descendants() {
        let heading = MemoryElement::new("h2")
            .with_text("Install ")
            .with_child(MemoryElement::new("code").with_text("docs-nav"));
        assert_eq!(heading.text_content(), "Install docs-nav");

        heading.set_text_content("Setup");
        assert_eq!(heading.outer_html(), "<h2>Setup</h2>");
    }

    #[test]
    fn query_all_walks_in_document_order() {
        let doc = MemoryDocument::new();
        let h1 = MemoryElement::new("h1");
        let h3 = MemoryElement::new("h3");
        let h2 = MemoryElement::new("h2");
        let section = MemoryElement::new("section").with_child(h3.clone());
        doc.body().append(&h1).expect("append");
        doc.body().append(&section).expect("append");
        doc.body().append(&h2).expect("append");

        let found = doc.query_all("h2, h1, h3").expect("query");
        assert_eq!(found, vec![h1, h3, h2]);
        assert!(doc.query_all("h2 >").is_err());
    }
}
