//! Click handling for the responsive TOC.
//!
//! Hosts subscribe one delegated listener on the document and forward every
//! click target here. Each click is classified once against both rules, so
//! an element matching both still flips the panel a single time.

use crate::{
    config::NavConfig,
    dom::{DomDocument, DomElement},
    error::Result,
    matcher::SelectorMatcher,
    selector::SelectorList,
    viewport::{Breakpoint, Viewport},
    visibility::{TocPanel, TocVisibility},
};

/// What a click amounts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// The toggle button itself was clicked.
    ToggleButton,
    /// A TOC link was clicked on a narrow screen.
    TocLink,
    /// Anything else.
    Ignore,
}

/// Owns the panel state and decides which clicks flip it.
pub struct TocController<E, M, V> {
    panel: TocPanel<E>,
    toggle_selector: SelectorList,
    link_selector: SelectorList,
    breakpoint: Breakpoint,
    matcher: M,
    viewport: V,
}

impl<E, M, V> TocController<E, M, V>
where
    E: DomElement,
    M: SelectorMatcher<E>,
    V: Viewport,
{
    /// Build a controller for `doc`, reading the initial state from its body.
    pub fn new<D>(doc: &D, config: &NavConfig, matcher: M, viewport: V) -> Result<Self>
    where
        D: DomDocument<Element = E>,
    {
        Ok(Self {
            panel: TocPanel::attach(doc, &config.hidden_class),
            toggle_selector: config.toggle_selector()?,
            link_selector: config.toc_link_selector()?,
            breakpoint: config.breakpoint,
            matcher,
            viewport,
        })
    }

    /// Classify a click on `target`.
    ///
    /// The toggle button wins over the link rule. The viewport is consulted
    /// on every call that reaches the link rule.
    pub fn classify(&self, target: &E) -> ClickAction {
        if self.matcher.matches(target, &self.toggle_selector) {
            ClickAction::ToggleButton
        } else if self.matcher.matches(target, &self.link_selector) && self.is_small_screen() {
            ClickAction::TocLink
        } else {
            ClickAction::Ignore
        }
    }

    /// Handle one click. Returns whether the panel was toggled.
    pub fn handle_click(&mut self, target: &E) -> Result<bool> {
        match self.classify(target) {
            ClickAction::Ignore => Ok(false),
            action => {
                tracing::debug!(?action, "toc click");
                self.panel.toggle()?;
                Ok(true)
            },
        }
    }

    /// Flip the panel unconditionally.
    pub fn toggle(&mut self) -> Result<TocVisibility> {
        self.panel.toggle()
    }

    /// The narrow-screen predicate, evaluated now.
    pub fn is_small_screen(&self) -> bool {
        self.viewport.matches(&self.breakpoint)
    }

    /// Current panel state.
    pub fn visibility(&self) -> TocVisibility {
        self.panel.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        matcher::StructuralMatcher,
        memory::{FixedViewport, MemoryDocument, MemoryElement},
    };

    struct Page {
        doc: MemoryDocument,
        button: MemoryElement,
        link: MemoryElement,
        paragraph: MemoryElement,
    }

    fn page() -> Page {
        let doc = MemoryDocument::new();
        let button = MemoryElement::new("button").with_attribute("id", "toc-button");
        let link = MemoryElement::new("a").with_attribute("href", "#install");
        let entry = MemoryElement::new("div")
            .with_attribute("class", "h2")
            .with_child(link.clone());
        let toc = MemoryElement::new("div").with_attribute("id", "toc").with_child(entry);
        let paragraph = MemoryElement::new("p").with_text("body");
        for el in [&button, &toc, &paragraph] {
            doc.body().append(el).expect("append");
        }
        Page {
            doc,
            button,
            link,
            paragraph,
        }
    }

    fn controller<'v>(
        page: &Page,
        viewport: &'v FixedViewport,
    ) -> TocController<MemoryElement, StructuralMatcher, &'v FixedViewport> {
        TocController::new(&page.doc, &NavConfig::default(), StructuralMatcher, viewport)
            .expect("controller")
    }

    #[test]
    fn toggle_button_flips_on_any_width() {
        let page = page();
        for width in [320, 500, 1000, 2560] {
            let viewport = FixedViewport::new(width);
            let mut ctl = controller(&page, &viewport);
            let before = ctl.visibility();
            assert!(ctl.handle_click(&page.button).expect("click"));
            assert_eq!(ctl.visibility(), before.toggled());
        }
    }

    #[test]
    fn toc_link_flips_only_on_narrow_screens() {
        let page = page();
        let viewport = FixedViewport::new(500);
        let mut ctl = controller(&page, &viewport);

        assert!(ctl.handle_click(&page.link).expect("narrow click"));
        assert_eq!(ctl.visibility(), TocVisibility::Hidden);

        viewport.resize(1000);
        assert!(!ctl.handle_click(&page.link).expect("wide click"));
        assert_eq!(ctl.visibility(), TocVisibility::Hidden);
        assert!(page.doc.body().has_class("hide-toc"));
    }

    #[test]
    fn unrelated_clicks_never_toggle() {
        let page = page();
        let viewport = FixedViewport::new(500);
        let mut ctl = controller(&page, &viewport);

        assert!(!ctl.handle_click(&page.paragraph).expect("click"));
        assert!(!ctl.handle_click(&page.doc.body()).expect("click"));
        assert_eq!(ctl.visibility(), TocVisibility::Visible);
    }

    #[test]
    fn toggle_button_inside_the_panel_flips_once_per_click() {
        let doc = MemoryDocument::new();
        let button = MemoryElement::new("a").with_attribute("id", "toc-button");
        let toc = MemoryElement::new("div").with_attribute("id", "toc").with_child(button.clone());
        doc.body().append(&toc).expect("append");

        for width in [500, 1000] {
            let viewport = FixedViewport::new(width);
            let mut ctl =
                TocController::new(&doc, &NavConfig::default(), StructuralMatcher, &viewport)
                    .expect("controller");
            let before = ctl.visibility();

            assert_eq!(ctl.classify(&button), ClickAction::ToggleButton);
            assert!(ctl.handle_click(&button).expect("click"));
            assert_eq!(ctl.visibility(), before.toggled(), "width {width}");
            assert_eq!(doc.body().has_class("hide-toc"), before.toggled().is_hidden());
        }
    }

    #[test]
    fn repeated_clicks_alternate() {
        let page = page();
        let viewport = FixedViewport::new(1200);
        let mut ctl = controller(&page, &viewport);

        let states: Vec<_> = (0..4)
            .map(|_| {
                ctl.handle_click(&page.button).expect("click");
                ctl.visibility()
            })
            .collect();
        assert_eq!(
            states,
            [
                TocVisibility::Hidden,
                TocVisibility::Visible,
                TocVisibility::Hidden,
                TocVisibility::Visible
            ]
        );
    }

    #[test]
    fn classify_reports_which_rule_fired() {
        let page = page();
        let viewport = FixedViewport::new(800);
        let ctl = controller(&page, &viewport);

        assert_eq!(ctl.classify(&page.button), ClickAction::ToggleButton);
        assert_eq!(ctl.classify(&page.link), ClickAction::TocLink);
        assert_eq!(ctl.classify(&page.paragraph), ClickAction::Ignore);

        viewport.resize(801);
        assert_eq!(ctl.classify(&page.link), ClickAction::Ignore);
        assert_eq!(ctl.classify(&page.button), ClickAction::ToggleButton);
    }
}
