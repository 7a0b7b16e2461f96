//! Page markup contract: the reserved ids and class names the template emits.

use serde::{Deserialize, Serialize};

use crate::{
    error::{NavError, Result},
    selector::{is_identifier, SelectorList},
    viewport::Breakpoint,
};

/// Container that receives generated TOC entries.
pub const DEFAULT_TOC_CONTAINER_ID: &str = "auto-toc";
/// Panel holding the TOC links.
pub const DEFAULT_TOC_PANEL_ID: &str = "toc";
/// Button that shows and hides the TOC.
pub const DEFAULT_TOGGLE_BUTTON_ID: &str = "toc-button";
/// Body class consumed by the stylesheet to hide the TOC.
pub const DEFAULT_HIDDEN_CLASS: &str = "hide-toc";
/// Heading class meaning "omit from auto TOC".
pub const DEFAULT_EXCLUDE_CLASS: &str = "no-auto-toc";
/// Class of the permalink appended to headings.
pub const DEFAULT_HEADER_LINK_CLASS: &str = "header-link";
/// Headings decorated by bulk decoration.
pub const DEFAULT_HEADING_SELECTOR: &str = "h1, h2, h3, h4, h5, h6";

/// Identifiers shared between the page template and the decorator.
///
/// Every field has a default matching the stock docs template, so an empty
/// JSON object (or no configuration at all) yields a working setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavConfig {
    /// Id of the element that receives generated TOC entries.
    pub toc_container_id: String,
    /// Id of the TOC panel whose links close the panel on narrow screens.
    pub toc_panel_id: String,
    /// Id of the button that shows and hides the TOC.
    pub toggle_button_id: String,
    /// Class set on `<body>` while the TOC is hidden.
    pub hidden_class: String,
    /// Headings carrying this class are left out of the generated TOC.
    pub exclude_class: String,
    /// Class given to the permalink appended to each heading.
    pub header_link_class: String,
    /// Selector used by bulk decoration to find headings.
    pub heading_selector: String,
    /// Viewport range treated as a narrow screen.
    pub breakpoint: Breakpoint,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            toc_container_id: DEFAULT_TOC_CONTAINER_ID.to_string(),
            toc_panel_id: DEFAULT_TOC_PANEL_ID.to_string(),
            toggle_button_id: DEFAULT_TOGGLE_BUTTON_ID.to_string(),
            hidden_class: DEFAULT_HIDDEN_CLASS.to_string(),
            exclude_class: DEFAULT_EXCLUDE_CLASS.to_string(),
            header_link_class: DEFAULT_HEADER_LINK_CLASS.to_string(),
            heading_selector: DEFAULT_HEADING_SELECTOR.to_string(),
            breakpoint: Breakpoint::default(),
        }
    }
}

impl NavConfig {
    /// Parse and validate a JSON configuration. Missing keys keep defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the decorator cannot act on.
    pub fn validate(&self) -> Result<()> {
        let identifiers = [
            ("tocContainerId", &self.toc_container_id),
            ("tocPanelId", &self.toc_panel_id),
            ("toggleButtonId", &self.toggle_button_id),
            ("hiddenClass", &self.hidden_class),
            ("excludeClass", &self.exclude_class),
            ("headerLinkClass", &self.header_link_class),
        ];
        for (key, value) in identifiers {
            if value.trim().is_empty() {
                tracing::warn!(key, "rejecting configuration with blank identifier");
                return Err(NavError::InvalidConfig(format!("`{key}` must not be empty")));
            }
            if value.chars().any(char::is_whitespace) {
                tracing::warn!(key, value = value.as_str(), "rejecting identifier with whitespace");
                return Err(NavError::InvalidConfig(format!(
                    "`{key}` must be a single token, got {value:?}"
                )));
            }
        }
        // These two are spliced into selectors handed to `Element.matches`.
        for (key, value) in [
            ("tocPanelId", &self.toc_panel_id),
            ("toggleButtonId", &self.toggle_button_id),
        ] {
            if !is_identifier(value) {
                tracing::warn!(key, value = value.as_str(), "rejecting id that is not a css identifier");
                return Err(NavError::InvalidConfig(format!(
                    "`{key}` must be a CSS identifier, got {value:?}"
                )));
            }
        }
        self.breakpoint.validate()?;
        self.heading_selector()?;
        self.toggle_selector()?;
        self.toc_link_selector()?;
        Ok(())
    }

    /// Selector matching the toggle button, e.g. `#toc-button`.
    pub fn toggle_selector(&self) -> Result<SelectorList> {
        parse_configured(&format!("#{}", self.toggle_button_id))
    }

    /// Selector matching links inside the TOC panel, e.g. `#toc a`.
    pub fn toc_link_selector(&self) -> Result<SelectorList> {
        parse_configured(&format!("#{} a", self.toc_panel_id))
    }

    /// Parsed form of [`NavConfig::heading_selector`].
    pub fn heading_selector(&self) -> Result<SelectorList> {
        parse_configured(&self.heading_selector)
    }
}

fn parse_configured(selector: &str) -> Result<SelectorList> {
    SelectorList::parse(selector).map_err(|source| NavError::Selector {
        selector: selector.to_string(),
        source,
    })
}
