//! Normalized import model: target columns, constant values, modes.
//!
//! All of this is caller-supplied and already validated; the engine never
//! mutates it and holds no state between calls.

use serde::{Deserialize, Serialize};

/// A target column: display name plus primary-key flag.
///
/// The order of the column slice handed to the builder fixes both the
/// INSERT column order and the bind-parameter order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub primary_key: bool,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primary_key: false,
        }
    }

    pub fn primary_key(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primary_key: true,
        }
    }

    /// Case-insensitive name match; identifiers compare case-insensitively
    /// across the supported backends.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Value for a constant column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstantValue {
    /// Bound like a regular column: renders a placeholder the caller must
    /// bind after the target-column parameters.
    Bound,
    /// Function-call text inlined verbatim, never bound.
    FunctionCall(String),
}

/// One constant column: name plus how its value is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantColumn {
    pub column: String,
    pub value: ConstantValue,
}

/// Ordered constant-column set, appended after the target columns in every
/// column and value list the engine produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantColumnValues {
    columns: Vec<ConstantColumn>,
}

impl ConstantColumnValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a constant column bound through a placeholder.
    pub fn bound(mut self, column: impl Into<String>) -> Self {
        self.columns.push(ConstantColumn {
            column: column.into(),
            value: ConstantValue::Bound,
        });
        self
    }

    /// Add a constant column whose value is a verbatim function call,
    /// e.g. `CURRENT_TIMESTAMP`.
    pub fn function_call(mut self, column: impl Into<String>, text: impl Into<String>) -> Self {
        self.columns.push(ConstantColumn {
            column: column.into(),
            value: ConstantValue::FunctionCall(text.into()),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConstantColumn> {
        self.columns.iter()
    }
}

/// Requested data-loading semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    Insert,
    InsertIgnore,
    Upsert,
}

/// Identity-override clause selection (`OVERRIDING ... VALUE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideIdentity {
    System,
    User,
}

impl OverrideIdentity {
    pub(crate) fn clause(self) -> &'static str {
        match self {
            OverrideIdentity::System => "OVERRIDING SYSTEM VALUE",
            OverrideIdentity::User => "OVERRIDING USER VALUE",
        }
    }
}
