//! Live viewport queries through `window.matchMedia`.

use docs_nav_shared::{Breakpoint, Viewport};

/// The browser window's viewport. Every query goes to `matchMedia` afresh.
#[derive(Debug, Clone)]
pub struct WindowViewport {
    window: web_sys::Window,
}

impl WindowViewport {
    /// Viewport of the global window, if there is one.
    pub fn current() -> Option<Self> {
        web_sys::window().map(|window| Self {
            window,
        })
    }
}

impl Viewport for WindowViewport {
    fn matches(&self, breakpoint: &Breakpoint) -> bool {
        match self.window.match_media(&breakpoint.media_query()) {
            Ok(Some(list)) => list.matches(),
            Ok(None) => false,
            Err(err) => {
                web_sys::console::error_1(&err);
                false
            },
        }
    }
}
