use model::filter::{error::FilterShapeError, operator::Operator};
use thiserror::Error;

/// Errors raised while decoding a serialized filter string.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FilterSyntaxError {
    /// The filter string is malformed or leaves an unexpected result on the stack.
    #[error("{message} (filter string: '{filter}')")]
    Syntax { message: String, filter: String },

    /// The builder refused a well-formed token sequence.
    #[error("{source} (filter string: '{filter}')")]
    Build {
        #[source]
        source: BuildError,
        filter: String,
    },
}

/// Errors raised by a [`FilterBuilder`](crate::builder::FilterBuilder) callback.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum BuildError {
    #[error("Unsupported {kind} operation '{operator}'")]
    UnsupportedOperation {
        operator: Operator,
        kind: &'static str,
    },

    #[error(transparent)]
    Shape(#[from] FilterShapeError),
}
