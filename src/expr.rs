//! Value-expression synthesis for the VALUES list.
//!
//! The engine does not know how a column's value should be expressed; it
//! asks an [`ExpressionBuilder`]. The default emits a positional bind
//! placeholder for every column, which is what a prepared-statement import
//! pipeline wants. Implementations may instead emit casts, sequence calls
//! or DEFAULT expressions for individual columns.

use crate::model::ColumnSpec;

/// Where the expression will be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionUse {
    /// Bulk-import VALUES list.
    Import,
    /// Any other DML context.
    Dml,
}

/// Produces the value expression for a column.
pub trait ExpressionBuilder: Send + Sync {
    fn expression_for(&self, column: &ColumnSpec, usage: ExpressionUse) -> String;
}

/// Default builder: a positional `?` placeholder for every column.
#[derive(Debug, Clone, Copy, Default)]
pub struct BindPlaceholders;

impl ExpressionBuilder for BindPlaceholders {
    fn expression_for(&self, _column: &ColumnSpec, _usage: ExpressionUse) -> String {
        "?".into()
    }
}
