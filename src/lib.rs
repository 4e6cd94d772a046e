//! # dmlforge
//!
//! Multi-dialect DML statement synthesis for bulk data loading: plain
//! `INSERT`, upsert (insert-or-update) and insert-ignore
//! (insert-or-skip-on-conflict) across fourteen SQL backends.
//!
//! The engine is a pure text generator. It receives a resolved
//! [`DialectContext`], a table name and the ordered target columns, and
//! returns parameterized SQL. It never talks to a database: capability
//! questions are answered from the context alone, and combinations a
//! backend cannot run come back as `None` rather than as SQL that would
//! fail at execution time.
//!
//! ```
//! use dmlforge::{ColumnSpec, Dialect, DialectContext, ServerVersion, StatementBuilder};
//!
//! let ctx = DialectContext::new(Dialect::Postgres, ServerVersion::new(9, 5));
//! let builder = StatementBuilder::new(
//!     ctx,
//!     "person",
//!     vec![ColumnSpec::primary_key("id"), ColumnSpec::new("name")],
//! )?;
//!
//! assert_eq!(
//!     builder.upsert().as_deref(),
//!     Some(
//!         "INSERT INTO person (id, name) VALUES (?, ?) \
//!          ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name"
//!     ),
//! );
//! # Ok::<(), dmlforge::StatementError>(())
//! ```

pub mod builder;
pub mod dialect;
pub mod error;
pub mod expr;
pub mod model;
pub mod quote;
pub mod token;

mod merge;

pub use builder::StatementBuilder;
pub use dialect::{Dialect, DialectContext, ServerVersion};
pub use error::StatementError;
pub use expr::{BindPlaceholders, ExpressionBuilder, ExpressionUse};
pub use model::{
    ColumnSpec, ConstantColumn, ConstantColumnValues, ConstantValue, ImportMode, OverrideIdentity,
};
pub use quote::{DialectQuoting, QuoteHandler};
pub use token::{Token, TokenStream};

/// Common imports for statement generation.
pub mod prelude {
    pub use crate::builder::StatementBuilder;
    pub use crate::dialect::{Dialect, DialectContext, ServerVersion};
    pub use crate::model::{ColumnSpec, ConstantColumnValues, ImportMode, OverrideIdentity};
}
