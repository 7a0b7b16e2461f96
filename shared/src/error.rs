//! Error types shared by every docs-nav host.

use thiserror::Error;

/// Convenience alias for results produced by this crate.
pub type Result<T, E = NavError> = std::result::Result<T, E>;

/// A selector string that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// The selector (or one member of a selector list) is blank.
    #[error("empty selector")]
    Empty,
    /// A character the parser does not understand.
    #[error("unexpected character {found:?} at offset {offset}")]
    Unexpected {
        /// The offending character.
        found: char,
        /// Byte offset of the character in the input.
        offset: usize,
    },
    /// A `#` or `.` with no name after it.
    #[error("missing name after {prefix:?} at offset {offset}")]
    MissingName {
        /// Either `#` or `.`.
        prefix: char,
        /// Byte offset of the prefix in the input.
        offset: usize,
    },
    /// A name after `#` or `.` that is not a CSS identifier, e.g. `#2col`.
    #[error("{name:?} at offset {offset} is not a valid identifier")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Byte offset of the `#` or `.` prefix in the input.
        offset: usize,
    },
    /// A combinator with no compound selector on one of its sides.
    #[error("dangling combinator at offset {offset}")]
    DanglingCombinator {
        /// Byte offset of the combinator in the input.
        offset: usize,
    },
}

/// Errors raised while decorating a page.
///
/// Missing ids, missing containers and unrelated clicks are not errors: those
/// paths are silent no-ops. A `NavError` means the host itself rejected an
/// operation or the configuration is unusable.
#[derive(Debug, Error)]
pub enum NavError {
    /// The host DOM refused an operation.
    #[error("dom operation `{operation}` failed: {message}")]
    Dom {
        /// Name of the DOM call, e.g. `createElement`.
        operation: &'static str,
        /// Host-provided description.
        message: String,
    },
    /// A configured selector is invalid.
    #[error("invalid selector `{selector}`: {source}")]
    Selector {
        /// The selector text as configured.
        selector: String,
        /// Parse failure.
        #[source]
        source: SelectorError,
    },
    /// Configuration text is not valid JSON for [`crate::NavConfig`].
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
    /// Configuration parsed but violates a constraint.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl NavError {
    /// Build a [`NavError::Dom`] from any displayable host error.
    pub fn dom(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Dom {
            operation,
            message: message.into(),
        }
    }
}
