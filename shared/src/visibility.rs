//! TOC panel visibility.

use crate::{
    dom::{DomDocument, DomElement},
    error::Result,
};

/// Whether the TOC panel is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TocVisibility {
    /// No hidden class on `<body>`.
    #[default]
    Visible,
    /// The hidden class is set on `<body>`.
    Hidden,
}

impl TocVisibility {
    /// The opposite state.
    pub fn toggled(self) -> Self {
        match self {
            Self::Visible => Self::Hidden,
            Self::Hidden => Self::Visible,
        }
    }

    /// Whether the body should carry the hidden class.
    pub fn is_hidden(self) -> bool {
        self == Self::Hidden
    }
}

/// Owns the visibility state and mirrors it onto the body class.
///
/// The stylesheet may ship pages with the hidden class already applied, so
/// the starting state is read from the body when the panel is attached.
#[derive(Debug, Clone)]
pub struct TocPanel<E> {
    body: Option<E>,
    hidden_class: String,
    state: TocVisibility,
}

impl<E: DomElement> TocPanel<E> {
    /// Attach to `doc`'s body.
    pub fn attach<D>(doc: &D, hidden_class: &str) -> Self
    where
        D: DomDocument<Element = E>,
    {
        let body = doc.body();
        let state = match &body {
            Some(body) if body.has_class(hidden_class) => TocVisibility::Hidden,
            _ => TocVisibility::Visible,
        };
        Self {
            body,
            hidden_class: hidden_class.to_string(),
            state,
        }
    }

    /// Current state, as the body class says it is now.
    pub fn state(&self) -> TocVisibility {
        self.live_state().unwrap_or(self.state)
    }

    fn live_state(&self) -> Option<TocVisibility> {
        let body = self.body.as_ref()?;
        Some(if body.has_class(&self.hidden_class) {
            TocVisibility::Hidden
        } else {
            TocVisibility::Visible
        })
    }

    /// Flip the state and write it to the body.
    ///
    /// Flips whatever the body carries now, so class changes made by other
    /// scripts since the last toggle are respected.
    pub fn toggle(&mut self) -> Result<TocVisibility> {
        let next = self.state().toggled();
        if let Some(body) = &self.body {
            body.set_class(&self.hidden_class, next.is_hidden())?;
        }
        self.state = next;
        tracing::debug!(state = ?next, "toc visibility toggled");
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDocument;

    #[test]
    fn starts_visible_without_class() {
        let doc = MemoryDocument::new();
        let panel = TocPanel::attach(&doc, "hide-toc");
        assert_eq!(panel.state(), TocVisibility::Visible);
    }

    #[test]
    fn starts_hidden_when_page_ships_the_class() {
        let doc = MemoryDocument::new();
        doc.body().set_attribute("class", "hide-toc").expect("set class");
        let panel = TocPanel::attach(&doc, "hide-toc");
        assert_eq!(panel.state(), TocVisibility::Hidden);
    }

    #[test]
    fn toggle_alternates_and_mirrors_body_class() {
        let doc = MemoryDocument::new();
        let mut panel = TocPanel::attach(&doc, "hide-toc");

        assert_eq!(panel.toggle().expect("toggle"), TocVisibility::Hidden);
        assert!(doc.body().has_class("hide-toc"));

        assert_eq!(panel.toggle().expect("toggle"), TocVisibility::Visible);
        assert!(!doc.body().has_class("hide-toc"));
        assert_eq!(doc.body().attribute("class"), None);
    }

    #[test]
    fn toggle_flips_the_live_class_after_outside_changes() {
        let doc = MemoryDocument::new();
        let mut panel = TocPanel::attach(&doc, "hide-toc");
        assert_eq!(panel.state(), TocVisibility::Visible);

        // Another script hides the TOC behind our back.
        doc.body().set_class("hide-toc", true).expect("set class");
        assert_eq!(panel.state(), TocVisibility::Hidden);
        assert_eq!(panel.toggle().expect("toggle"), TocVisibility::Visible);
        assert!(!doc.body().has_class("hide-toc"));

        doc.body().set_class("hide-toc", true).expect("set class");
        assert_eq!(panel.toggle().expect("toggle"), TocVisibility::Visible);
        assert_eq!(panel.toggle().expect("toggle"), TocVisibility::Hidden);
        assert!(doc.body().has_class("hide-toc"));
    }
}
