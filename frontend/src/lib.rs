//! Browser binding of docs-nav.
//!
//! Loaded once per rendered docs page. Module start detects how the browser
//! matches selectors and subscribes the TOC toggle; the page's own script
//! then calls [`set_header_link`] and [`append_toc_entry`] for each heading,
//! or [`decorate_headings`] once for all of them.
//!
//! ```javascript
//! import init, { setHeaderLink, appendTocEntry } from './docs_nav_frontend.js';
//!
//! await init();
//! document.querySelectorAll('h1, h2, h3').forEach((heading) => {
//!   appendTocEntry(heading);
//!   setHeaderLink(heading);
//! });
//! ```
//!
//! Decoration never throws: headings without ids, pages without a TOC region
//! and unrelated clicks are ignored, and DOM failures go to the console.

mod config;
mod dom;
mod events;
mod matcher;
mod state;
mod viewport;

pub use config::config_from_js;
use docs_nav_shared::{is_small_screen as narrow, NavError, TocController, TocVisibility};
pub use dom::{WebDocument, WebElement};
pub use matcher::WebMatcher;
pub use state::{current_config, is_subscribed};
pub use viewport::WindowViewport;
use wasm_bindgen::prelude::*;

/// Controller type driving the live page.
pub type WebController = TocController<WebElement, WebMatcher, WindowViewport>;

pub(crate) fn report_error(context: &str, err: &NavError) {
    web_sys::console::error_1(&JsValue::from_str(&format!("docs-nav {context}: {err}")));
}

/// Set up panic reporting and subscribe the TOC toggle.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    state::install_when_ready();
}

/// Append a permalink to `heading` when it has an id.
#[wasm_bindgen(js_name = setHeaderLink)]
pub fn set_header_link(heading: web_sys::Element) {
    let Some(doc) = WebDocument::current() else {
        return;
    };
    let config = current_config();
    if let Err(err) = docs_nav_shared::set_header_link(&doc, &WebElement(heading), &config) {
        report_error("setHeaderLink", &err);
    }
}

/// Append a TOC entry for `heading` to the TOC container, if the page has one.
#[wasm_bindgen(js_name = appendTocEntry)]
pub fn append_toc_entry(heading: web_sys::Element) {
    let Some(doc) = WebDocument::current() else {
        return;
    };
    let config = current_config();
    if let Err(err) = docs_nav_shared::append_toc_entry(&doc, &WebElement(heading), &config) {
        report_error("appendTocEntry", &err);
    }
}

/// Decorate every heading on the page. Returns the number of TOC entries.
#[wasm_bindgen(js_name = decorateHeadings)]
pub fn decorate_headings() -> u32 {
    let Some(doc) = WebDocument::current() else {
        return 0;
    };
    match docs_nav_shared::decorate_headings(&doc, &current_config()) {
        Ok(report) => u32::try_from(report.toc_entries).unwrap_or(u32::MAX),
        Err(err) => {
            report_error("decorateHeadings", &err);
            0
        },
    }
}

/// Show or hide the TOC. Returns `true` when the TOC is now hidden.
#[wasm_bindgen(js_name = toggleToc)]
pub fn toggle_toc() -> bool {
    state::toggle().is_some_and(TocVisibility::is_hidden)
}

/// Whether the viewport currently counts as a narrow screen.
#[wasm_bindgen(js_name = isSmallScreen)]
pub fn is_small_screen() -> bool {
    WindowViewport::current()
        .is_some_and(|viewport| narrow(&viewport, &current_config().breakpoint))
}

/// Replace the configuration and reinstall the toggle.
///
/// Throws when `config` is not a valid configuration object.
#[wasm_bindgen]
pub fn configure(config: JsValue) -> Result<(), JsValue> {
    let config = config_from_js(config)?;
    state::set_config(config);
    Ok(())
}

/// Version of the docs-nav frontend.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
