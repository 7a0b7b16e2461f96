//! Narrow-screen detection.

use serde::{Deserialize, Serialize};

use crate::error::{NavError, Result};

/// Inclusive viewport width range, in CSS pixels, treated as a narrow screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Breakpoint {
    /// Smallest matching width.
    pub min_width: u32,
    /// Largest matching width.
    pub max_width: u32,
}

impl Default for Breakpoint {
    fn default() -> Self {
        Self {
            min_width: 1,
            max_width: 800,
        }
    }
}

impl Breakpoint {
    /// Media query equivalent of this range, for `window.matchMedia`.
    pub fn media_query(&self) -> String {
        format!("(min-width: {}px) and (max-width: {}px)", self.min_width, self.max_width)
    }

    /// Whether `width` falls inside the range.
    pub fn contains(&self, width: u32) -> bool {
        (self.min_width..=self.max_width).contains(&width)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.min_width > self.max_width {
            return Err(NavError::InvalidConfig(format!(
                "breakpoint minWidth {} exceeds maxWidth {}",
                self.min_width, self.max_width
            )));
        }
        Ok(())
    }
}

/// Live view of the viewport.
///
/// Implementations must evaluate on every call: a resize between two clicks
/// has to change the answer without a reload.
pub trait Viewport {
    /// Whether the current viewport width lies in `breakpoint`.
    fn matches(&self, breakpoint: &Breakpoint) -> bool;
}

impl<V: Viewport + ?Sized> Viewport for &V {
    fn matches(&self, breakpoint: &Breakpoint) -> bool {
        (**self).matches(breakpoint)
    }
}

/// The narrow-screen predicate.
pub fn is_small_screen<V: Viewport + ?Sized>(viewport: &V, breakpoint: &Breakpoint) -> bool {
    viewport.matches(breakpoint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::FixedViewport;

    #[test]
    fn default_query_matches_template_stylesheet() {
        assert_eq!(
            Breakpoint::default().media_query(),
            "(min-width: 1px) and (max-width: 800px)"
        );
    }

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let bp = Breakpoint::default();
        assert!(!bp.contains(0));
        assert!(bp.contains(1));
        assert!(bp.contains(500));
        assert!(bp.contains(800));
        assert!(!bp.contains(801));
    }

    #[test]
    fn predicate_follows_resizes() {
        let viewport = FixedViewport::new(500);
        let bp = Breakpoint::default();
        assert!(is_small_screen(&viewport, &bp));
        viewport.resize(1000);
        assert!(!is_small_screen(&viewport, &bp));
    }

    #[test]
    fn inverted_range_is_invalid() {
        let bp = Breakpoint {
            min_width: 900,
            max_width: 800,
        };
        assert!(bp.validate().is_err());
    }
}
