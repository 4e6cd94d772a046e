//! Hard-failure error types.
//!
//! Unsupported dialect/mode combinations are not errors: generation returns
//! `None` for those. Only genuinely invalid input fails construction.

use thiserror::Error;

/// Errors raised while constructing a statement builder.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatementError {
    /// A DML statement cannot be built without at least one target column.
    #[error("cannot build a DML statement for an empty column list")]
    EmptyColumnList,
}
