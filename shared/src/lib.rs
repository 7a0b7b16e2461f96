//! Platform-neutral core of docs-nav.
//!
//! Decorates rendered documentation pages: permalinks on headings, an
//! auto-generated table of contents, and a TOC panel that the reader can hide
//! on narrow screens. Everything here is written against the [`dom`] traits,
//! so the same code drives the browser binding and the headless [`memory`]
//! host used by the tests.

pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod heading;
pub mod matcher;
pub mod memory;
pub mod selector;
pub mod viewport;
pub mod visibility;

pub use config::NavConfig;
pub use controller::{ClickAction, TocController};
pub use dom::{DomDocument, DomElement};
pub use error::{NavError, Result, SelectorError};
pub use heading::{append_toc_entry, decorate_headings, set_header_link, DecorationReport};
pub use matcher::{MatchPrimitive, SelectorMatcher, StructuralMatcher};
pub use selector::SelectorList;
pub use viewport::{is_small_screen, Breakpoint, Viewport};
pub use visibility::{TocPanel, TocVisibility};
