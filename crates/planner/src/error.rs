use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    /// A traversal was requested with an empty visitor list.
    #[error("You need to provide at least one visitor for this traverser")]
    NoVisitors,
}
