//! Identifier quoting.
//!
//! The engine never decides quote characters inline; every identifier goes
//! through a [`QuoteHandler`]. The default implementation quotes only when
//! the identifier demands it, so plain names stay readable in the generated
//! SQL.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dialect::Dialect;

/// Identifiers matching this need no quoting in any supported backend.
static PLAIN_IDENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_$]*$").expect("valid identifier regex"));

/// Maps raw identifiers to their quoted form for the target dialect.
///
/// Implementations must be deterministic and idempotent:
/// `strip_quotes(quote(x)) == x` for any unquoted `x`.
pub trait QuoteHandler: Send + Sync {
    /// Whether the identifier cannot be used unquoted.
    fn needs_quotes(&self, ident: &str) -> bool;

    /// Wrap the identifier in the dialect's quote characters.
    fn quote(&self, ident: &str) -> String;

    /// Whether the identifier is already wrapped in this dialect's quotes.
    fn is_quoted(&self, ident: &str) -> bool;

    /// Remove the dialect quotes, if present.
    fn strip_quotes(&self, ident: &str) -> String;

    /// Quote only when required; already-quoted input is passed through.
    fn quote_if_needed(&self, ident: &str) -> String {
        if self.is_quoted(ident) || !self.needs_quotes(ident) {
            ident.to_string()
        } else {
            self.quote(ident)
        }
    }
}

/// Default quote handler: the dialect's standard quote characters.
///
/// - double quotes for the ANSI-styled backends
/// - backticks for MySQL and MariaDB
/// - square brackets for SQL Server
#[derive(Debug, Clone, Copy)]
pub struct DialectQuoting {
    dialect: Dialect,
}

impl DialectQuoting {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    fn quote_chars(&self) -> (char, char) {
        match self.dialect {
            Dialect::MySql | Dialect::MariaDb => ('`', '`'),
            Dialect::SqlServer => ('[', ']'),
            Dialect::Postgres
            | Dialect::Oracle
            | Dialect::Sqlite
            | Dialect::Db2Luw
            | Dialect::Db2Zos
            | Dialect::Hsqldb
            | Dialect::H2
            | Dialect::Firebird
            | Dialect::Hana
            | Dialect::Cubrid
            | Dialect::SqlAnywhere => ('"', '"'),
        }
    }
}

impl QuoteHandler for DialectQuoting {
    fn needs_quotes(&self, ident: &str) -> bool {
        !PLAIN_IDENT.is_match(ident)
    }

    fn quote(&self, ident: &str) -> String {
        let (open, close) = self.quote_chars();
        let escaped = ident.replace(close, &format!("{close}{close}"));
        format!("{open}{escaped}{close}")
    }

    fn is_quoted(&self, ident: &str) -> bool {
        let (open, close) = self.quote_chars();
        ident.len() >= 2 && ident.starts_with(open) && ident.ends_with(close)
    }

    fn strip_quotes(&self, ident: &str) -> String {
        if !self.is_quoted(ident) {
            return ident.to_string();
        }
        let (_, close) = self.quote_chars();
        let inner = &ident[1..ident.len() - 1];
        inner.replace(&format!("{close}{close}"), &close.to_string())
    }
}
