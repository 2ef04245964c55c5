use model::{core::data_type::DataType, filter::operator::Operator};
use thiserror::Error;

pub type ConnectorResult<T> = Result<T, ConnectorError>;

/// Errors raised while rendering a filter in a connector's native syntax.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConnectorError {
    /// A column reference points past the end of the column list.
    #[error("Column index {index} is out of range for {count} column(s)")]
    ColumnIndexOutOfRange { index: usize, count: usize },

    /// The connector has no literal syntax for this column type.
    #[error("Unsupported column type for filtering: {data_type} (column '{column}')")]
    UnsupportedColumnType { column: String, data_type: DataType },

    /// A comparison that needs a value arrived without one.
    #[error("Operator {0} requires a value operand")]
    MissingValue(Operator),
}
