use std::io;

/// Errors surfaced by collection operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A value of the wrong kind was handed to an operation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation exists but is deliberately unsupported.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    /// A tree mutation could not be applied to one of the members.
    #[error("structural error on member {index}: {reason}")]
    Structural { index: usize, reason: String },

    /// Markup did not produce a root element.
    #[error("failed to parse markup: {0}")]
    Parse(String),

    /// Selector text could not be tokenized.
    #[error("malformed selector {selector:?} at column {column}: {reason}")]
    Selector {
        selector: String,
        column: u32,
        reason: String,
    },

    /// `Values::single` was called on a result that does not hold exactly one value.
    #[error("expected exactly one value, found {0}")]
    SizeMismatch(usize),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
