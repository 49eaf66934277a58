//! Error types for parsing and layout operations.

use harmonia_dom::NodeId;
use thiserror::Error;

/// A length, shorthand or color string could not be parsed.
///
/// Parse failures are never fatal: setters leave the previous value in place
/// and report the error back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input was empty or only whitespace.
    #[error("empty length string")]
    Empty,
    /// The numeric part of a length was missing or malformed.
    #[error("invalid number in length '{0}'")]
    InvalidNumber(String),
    /// The unit suffix is not one of `px`, `%`, `vw`, `vh`.
    #[error("unknown unit suffix '{suffix}' in '{input}'")]
    UnknownUnit {
        /// The whole input string.
        input: String,
        /// The unrecognized suffix.
        suffix: String,
    },
    /// A padding/margin shorthand had a token count outside `1..=4`.
    #[error("shorthand expects 1 to 4 values, got {0}")]
    ShorthandArity(usize),
    /// A background color string was not a hex or named color.
    #[error("invalid color '{0}'")]
    InvalidColor(String),
}

/// An engine operation failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The node id does not refer to an attached scene node.
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),
    /// The node exists but carries no layout box.
    #[error("node {0} is not a layout box")]
    NotABox(NodeId),
    /// A string property failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Observers kept requesting relayouts past the configured limit.
    #[error("relayout did not settle after {0} passes")]
    RelayoutLimit(usize),
}
