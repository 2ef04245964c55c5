use connectors::error::ConnectorError;
use filter_syntax::error::FilterSyntaxError;
use model::filter::error::FilterShapeError;
use planner::error::PlanError;
use thiserror::Error;

/// Errors raised while compiling a filter string for a connector.
#[derive(Debug, Error)]
pub enum PushdownError {
    #[error("Filter parse error: {0}")]
    Syntax(#[from] FilterSyntaxError),

    #[error("Planning error: {0}")]
    Plan(#[from] PlanError),

    #[error("Malformed filter tree: {0}")]
    Shape(#[from] FilterShapeError),

    #[error("Connector error: {0}")]
    Connector(#[from] ConnectorError),
}
