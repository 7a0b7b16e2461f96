//! Heading permalinks and the generated table of contents.

use crate::{
    config::NavConfig,
    dom::{DomDocument, DomElement},
    error::Result,
};

/// Counts of what [`decorate_headings`] appended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecorationReport {
    /// Headings visited.
    pub headings: usize,
    /// Permalinks appended to headings.
    pub permalinks: usize,
    /// Entries appended to the TOC container.
    pub toc_entries: usize,
}

/// Append `<a class="header-link" href="#id">` to `heading`.
///
/// Headings without a non-empty id are left untouched. Not idempotent: the
/// page calls this once per heading. Returns whether a link was appended.
pub fn set_header_link<D: DomDocument>(
    doc: &D,
    heading: &D::Element,
    config: &NavConfig,
) -> Result<bool> {
    let Some(id) = heading.id() else {
        tracing::debug!(tag = %heading.tag_name(), "heading without id, no permalink");
        return Ok(false);
    };

    let link = doc.create_element("a")?;
    link.set_class(&config.header_link_class, true)?;
    link.set_attribute("href", &format!("#{id}"))?;
    heading.append_child(&link)?;
    Ok(true)
}

/// Append `<div class="h2"><a href="#id">text</a></div>` for `heading` to the
/// TOC container.
///
/// Skipped when the heading carries the exclusion class, has no id, or the
/// page has no TOC container. Returns whether an entry was appended.
pub fn append_toc_entry<D: DomDocument>(
    doc: &D,
    heading: &D::Element,
    config: &NavConfig,
) -> Result<bool> {
    if heading.has_class(&config.exclude_class) {
        return Ok(false);
    }
    let Some(id) = heading.id() else {
        tracing::debug!(tag = %heading.tag_name(), "heading without id, no toc entry");
        return Ok(false);
    };
    let Some(container) = doc.element_by_id(&config.toc_container_id) else {
        return Ok(false);
    };

    let link = doc.create_element("a")?;
    link.set_attribute("href", &format!("#{id}"))?;
    link.set_text_content(&heading.text_content());

    let entry = doc.create_element("div")?;
    entry.set_attribute("class", &heading.tag_name().to_lowercase())?;
    entry.append_child(&link)?;
    container.append_child(&entry)?;
    Ok(true)
}

/// Run both decorators over every heading the configured selector finds, in
/// document order.
pub fn decorate_headings<D: DomDocument>(doc: &D, config: &NavConfig) -> Result<DecorationReport> {
    let headings = doc.query_all(&config.heading_selector)?;
    let mut report = DecorationReport {
        headings: headings.len(),
        ..DecorationReport::default()
    };
    for heading in &headings {
        // Text is read before the permalink lands; the link itself is empty.
        if append_toc_entry(doc, heading, config)? {
            report.toc_entries += 1;
        }
        if set_header_link(doc, heading, config)? {
            report.permalinks += 1;
        }
    }
    tracing::debug!(
        headings = report.headings,
        permalinks = report.permalinks,
        toc_entries = report.toc_entries,
        "decorated headings"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryDocument, MemoryElement};

    fn doc_with_container() -> (MemoryDocument, MemoryElement) {
        let doc = MemoryDocument::new();
        let container = MemoryElement::new("nav").with_attribute("id", "auto-toc");
        doc.body().append(&container).expect("append container");
        (doc, container)
    }

    #[test]
    fn permalink_targets_heading_id() {
        let (doc, _) = doc_with_container();
        let heading = MemoryElement::new("h2").with_attribute("id", "install").with_text("Install");
        doc.body().append(&heading).expect("append heading");

        assert!(set_header_link(&doc, &heading, &NavConfig::default()).expect("decorate"));
        assert_eq!(
            heading.outer_html(),
            r##"<h2 id="install">Install<a class="header-link" href="#install"></a></h2>"##
        );
    }

    #[test]
    fn heading_without_id_keeps_its_children() {
        let (doc, _) = doc_with_container();
        for heading in [
            MemoryElement::new("h3").with_text("Notes"),
            MemoryElement::new("h3").with_attribute("id", "").with_text("Notes"),
        ] {
            let before = heading.outer_html();
            assert!(!set_header_link(&doc, &heading, &NavConfig::default()).expect("decorate"));
            assert_eq!(heading.outer_html(), before);
        }
    }

    #[test]
    fn permalink_is_not_idempotent() {
        let (doc, _) = doc_with_container();
        let heading = MemoryElement::new("h2").with_attribute("id", "a");
        set_header_link(&doc, &heading, &NavConfig::default()).expect("first");
        set_header_link(&doc, &heading, &NavConfig::default()).expect("second");
        assert_eq!(heading.children().len(), 2);
    }

    #[test]
    fn toc_entry_mirrors_heading() {
        let (doc, container) = doc_with_container();
        let heading = MemoryElement::new("H2").with_attribute("id", "install").with_text("Install");

        assert!(append_toc_entry(&doc, &heading, &NavConfig::default()).expect("append"));
        assert_eq!(
            container.inner_html(),
            r##"<div class="h2"><a href="#install">Install</a></div>"##
        );
    }

    #[test]
    fn excluded_heading_gets_no_entry() {
        let (doc, container) = doc_with_container();
        let heading = MemoryElement::new("h2")
            .with_attribute("id", "changelog")
            .with_attribute("class", "wide no-auto-toc")
            .with_text("Changelog");

        assert!(!append_toc_entry(&doc, &heading, &NavConfig::default()).expect("append"));
        assert_eq!(container.child_node_count(), 0);
    }

    #[test]
    fn missing_container_is_a_no_op() {
        let doc = MemoryDocument::new();
        let heading = MemoryElement::new("h2").with_attribute("id", "install").with_text("Install");
        doc.body().append(&heading).expect("append heading");
        let before = doc.root().outer_html();

        assert!(!append_toc_entry(&doc, &heading, &NavConfig::default()).expect("append"));
        assert_eq!(doc.root().outer_html(), before);
    }

    #[test]
    fn custom_container_and_exclusion_class() {
        let doc = MemoryDocument::new();
        let container = MemoryElement::new("ul").with_attribute("id", "contents");
        doc.body().append(&container).expect("append container");
        let config = NavConfig {
            toc_container_id: "contents".to_string(),
            exclude_class: "skip".to_string(),
            ..NavConfig::default()
        };

        let kept = MemoryElement::new("h4").with_attribute("id", "kept").with_text("Kept");
        let skipped = MemoryElement::new("h4")
            .with_attribute("id", "skipped")
            .with_attribute("class", "skip");
        assert!(append_toc_entry(&doc, &kept, &config).expect("append"));
        assert!(!append_toc_entry(&doc, &skipped, &config).expect("append"));
        assert_eq!(container.children().len(), 1);
    }
}
