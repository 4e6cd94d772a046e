//! Import statement assembly: the plain INSERT plus the per-dialect UPSERT
//! and INSERT-IGNORE renderings.
//!
//! The builder is a pure, synchronous text generator. It never opens a
//! connection or reads a catalog; everything it needs arrives as
//! already-resolved input. Unsupported dialect/mode combinations come back
//! as `None` — the engine never falls back to a different mode and never
//! emits plausible-but-wrong SQL for a backend that cannot run it.

use tracing::debug;

use crate::dialect::{Dialect, DialectContext};
use crate::error::StatementError;
use crate::expr::{BindPlaceholders, ExpressionBuilder, ExpressionUse};
use crate::merge::UsingClause;
use crate::model::{
    ColumnSpec, ConstantColumnValues, ConstantValue, ImportMode, OverrideIdentity,
};
use crate::quote::{DialectQuoting, QuoteHandler};
use crate::token::{Token, TokenStream};

/// How the VALUES clause attaches to the column list. SQL Anywhere folds its
/// conflict handling into this position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValuesClause {
    Standard,
    OnExistingSkip,
    OnExistingUpdate,
}

impl ValuesClause {
    fn keyword(self) -> &'static str {
        match self {
            ValuesClause::Standard => "VALUES",
            ValuesClause::OnExistingSkip => "ON EXISTING SKIP VALUES",
            ValuesClause::OnExistingUpdate => "ON EXISTING UPDATE VALUES",
        }
    }
}

/// Builds INSERT, upsert and insert-ignore statements for one target table.
///
/// Column order in the generated SQL is always the target-column order
/// followed by the constant columns in their declared order; bind
/// placeholders appear in that same order.
pub struct StatementBuilder {
    pub(crate) ctx: DialectContext,
    pub(crate) table: String,
    pub(crate) columns: Vec<ColumnSpec>,
    pub(crate) key_columns: Option<Vec<ColumnSpec>>,
    pub(crate) constants: ConstantColumnValues,
    pub(crate) override_identity: Option<OverrideIdentity>,
    pub(crate) insert_prefix: Option<String>,
    pub(crate) quoter: Box<dyn QuoteHandler>,
    pub(crate) expressions: Box<dyn ExpressionBuilder>,
}

impl std::fmt::Debug for StatementBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatementBuilder")
            .field("ctx", &self.ctx)
            .field("table", &self.table)
            .field("columns", &self.columns)
            .field("key_columns", &self.key_columns)
            .field("constants", &self.constants)
            .field("override_identity", &self.override_identity)
            .field("insert_prefix", &self.insert_prefix)
            .finish_non_exhaustive()
    }
}

impl StatementBuilder {
    /// Hard-fails on an empty column list; every other invalid combination
    /// soft-fails at generation time.
    pub fn new(
        ctx: DialectContext,
        table: impl Into<String>,
        columns: Vec<ColumnSpec>,
    ) -> Result<Self, StatementError> {
        if columns.is_empty() {
            return Err(StatementError::EmptyColumnList);
        }
        Ok(Self {
            ctx,
            table: table.into(),
            columns,
            key_columns: None,
            constants: ConstantColumnValues::new(),
            override_identity: None,
            insert_prefix: None,
            quoter: Box::new(DialectQuoting::new(ctx.dialect)),
            expressions: Box::new(BindPlaceholders),
        })
    }

    /// Key columns used for conflict detection. Without an explicit set,
    /// the PK-flagged target columns are used.
    ///
    /// The columns do not have to match the table's primary key, but some
    /// dialects and modes require a genuine primary key (see
    /// [`Dialect::requires_real_pk_for_upsert`]).
    pub fn key_columns(mut self, keys: Vec<ColumnSpec>) -> Self {
        self.key_columns = Some(keys);
        self
    }

    /// Constant column values appended after the target columns.
    pub fn constants(mut self, constants: ConstantColumnValues) -> Self {
        self.constants = constants;
        self
    }

    /// Request an `OVERRIDING SYSTEM VALUE` / `OVERRIDING USER VALUE`
    /// clause; emitted only when the dialect supports it.
    pub fn override_identity(mut self, mode: OverrideIdentity) -> Self {
        self.override_identity = Some(mode);
        self
    }

    /// Alternate INSERT head used instead of `INSERT INTO`, e.g.
    /// `INSERT /*+ append */ INTO` for Oracle direct-path loads. Ignored by
    /// renderings that must control the head themselves (SQLite, H2, HANA,
    /// Oracle's dup-key hint).
    pub fn insert_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.insert_prefix = Some(prefix.into());
        self
    }

    pub fn quote_handler(mut self, quoter: impl QuoteHandler + 'static) -> Self {
        self.quoter = Box::new(quoter);
        self
    }

    pub fn expression_builder(mut self, expressions: impl ExpressionBuilder + 'static) -> Self {
        self.expressions = Box::new(expressions);
        self
    }

    pub fn context(&self) -> DialectContext {
        self.ctx
    }

    // =========================================================================
    // Key resolution
    // =========================================================================

    /// The key set driving conflict detection: the explicit override when
    /// supplied and non-empty, otherwise the PK-flagged target columns.
    pub(crate) fn resolved_keys(&self) -> Vec<&ColumnSpec> {
        match &self.key_columns {
            Some(keys) if !keys.is_empty() => keys.iter().collect(),
            _ => self.columns.iter().filter(|c| c.primary_key).collect(),
        }
    }

    /// Whether the resolved key set is a genuine primary key: non-empty and
    /// every member carries the PK flag.
    pub(crate) fn has_real_pk(&self) -> bool {
        let keys = self.resolved_keys();
        !keys.is_empty() && keys.iter().all(|c| c.primary_key)
    }

    /// Membership in the resolved key set, by name.
    pub(crate) fn is_key_name(&self, name: &str) -> bool {
        self.resolved_keys().iter().any(|k| k.is_named(name))
    }

    /// Key test for MERGE SET-list exclusion: PK-flagged or a member of the
    /// resolved key set.
    pub(crate) fn is_key_column(&self, column: &ColumnSpec) -> bool {
        column.primary_key || self.is_key_name(&column.name)
    }

    // =========================================================================
    // Capability gate
    // =========================================================================

    /// Whether the requested mode has a legal rendering for this dialect,
    /// version and key shape. Generation returns `Some` iff this is true.
    pub fn is_mode_supported(&self, mode: ImportMode) -> bool {
        match mode {
            ImportMode::Insert => true,
            ImportMode::InsertIgnore => self.ignore_supported(),
            ImportMode::Upsert => self.upsert_supported(),
        }
    }

    fn ignore_supported(&self) -> bool {
        if !self.ctx.supports_insert_ignore() {
            debug!(
                dialect = %self.ctx.dialect,
                version = %self.ctx.version,
                "insert-ignore is not supported"
            );
            return false;
        }
        if self.ctx.dialect.requires_real_pk_for_ignore() && !self.has_real_pk() {
            debug!(
                dialect = %self.ctx.dialect,
                "cannot use insert-ignore without a real primary key"
            );
            return false;
        }
        if self.ignore_needs_key_columns() && self.resolved_keys().is_empty() {
            debug!(
                dialect = %self.ctx.dialect,
                "cannot use insert-ignore without key columns"
            );
            return false;
        }
        true
    }

    /// Oracle's dup-key hint and the MERGE emulations need key columns for
    /// their conflict predicate.
    fn ignore_needs_key_columns(&self) -> bool {
        matches!(
            self.ctx.dialect,
            Dialect::Oracle
                | Dialect::Hsqldb
                | Dialect::Db2Luw
                | Dialect::Db2Zos
                | Dialect::SqlServer
        )
    }

    fn upsert_supported(&self) -> bool {
        if !self.ctx.supports_upsert() {
            debug!(
                dialect = %self.ctx.dialect,
                version = %self.ctx.version,
                "upsert is not supported"
            );
            return false;
        }
        if self.ctx.dialect.requires_real_pk_for_upsert() {
            let ok = self.has_real_pk();
            if !ok {
                debug!(
                    dialect = %self.ctx.dialect,
                    "cannot use upsert without a real primary key"
                );
            }
            return ok;
        }
        if self.resolved_keys().is_empty() {
            debug!(dialect = %self.ctx.dialect, "cannot use upsert without key columns");
            return false;
        }
        true
    }

    // =========================================================================
    // Generation
    // =========================================================================

    /// Generate the statement for the requested mode.
    pub fn statement(&self, mode: ImportMode) -> Option<String> {
        match mode {
            ImportMode::Insert => Some(self.insert(None)),
            ImportMode::InsertIgnore => self.insert_ignore(),
            ImportMode::Upsert => self.upsert(),
        }
    }

    /// Plain INSERT. `prefix` overrides the `INSERT INTO` head for this
    /// call only (the configured [`insert_prefix`] applies otherwise).
    ///
    /// [`insert_prefix`]: StatementBuilder::insert_prefix
    pub fn insert(&self, prefix: Option<&str>) -> String {
        self.insert_tokens(prefix, ValuesClause::Standard)
            .serialize(self.quoter.as_ref())
    }

    /// Insert-or-skip-on-conflict for the target dialect, or `None` when no
    /// legal rendering exists. Never degrades to a different mode.
    pub fn insert_ignore(&self) -> Option<String> {
        if !self.is_mode_supported(ImportMode::InsertIgnore) {
            return None;
        }
        let sql = match self.ctx.dialect {
            Dialect::Postgres => self.postgres_conflict_clause(true),
            Dialect::MySql | Dialect::MariaDb | Dialect::Cubrid => self.duplicate_key_clause(true),
            Dialect::Oracle => self.oracle_ignore_hint(),
            Dialect::Hsqldb | Dialect::Db2Zos => self.standard_merge(true, UsingClause::Values),
            Dialect::Db2Luw => self.standard_merge(true, UsingClause::TableValues),
            Dialect::SqlServer => {
                let mut sql = self.standard_merge(true, UsingClause::Values);
                sql.push(';');
                sql
            }
            Dialect::Sqlite => self.insert(Some("INSERT OR IGNORE INTO")),
            Dialect::SqlAnywhere => self.on_existing(ValuesClause::OnExistingSkip),
            Dialect::H2 | Dialect::Firebird | Dialect::Hana => return None,
        };
        Some(sql)
    }

    /// Insert-or-update for the target dialect, or `None` when no legal
    /// rendering exists.
    pub fn upsert(&self) -> Option<String> {
        if !self.is_mode_supported(ImportMode::Upsert) {
            return None;
        }
        let sql = match self.ctx.dialect {
            Dialect::Postgres => self.postgres_conflict_clause(false),
            Dialect::MySql | Dialect::MariaDb | Dialect::Cubrid => self.duplicate_key_clause(false),
            Dialect::H2 => self.insert(Some("MERGE INTO")),
            Dialect::Hsqldb | Dialect::Db2Zos => self.standard_merge(false, UsingClause::Values),
            Dialect::Db2Luw => self.standard_merge(false, UsingClause::TableValues),
            Dialect::SqlServer => {
                let mut sql = self.standard_merge(false, UsingClause::Values);
                sql.push(';');
                sql
            }
            Dialect::Firebird => self.firebird_upsert(),
            Dialect::Hana => self.hana_upsert(),
            Dialect::Oracle => self.oracle_merge(),
            Dialect::Sqlite => self.insert(Some("INSERT OR REPLACE INTO")),
            Dialect::SqlAnywhere => self.on_existing(ValuesClause::OnExistingUpdate),
        };
        Some(sql)
    }

    // =========================================================================
    // Clause assembly
    // =========================================================================

    fn insert_tokens(&self, prefix: Option<&str>, values: ValuesClause) -> TokenStream {
        let head = prefix
            .or(self.insert_prefix.as_deref())
            .unwrap_or("INSERT INTO");

        let mut ts = TokenStream::new();
        ts.raw(head)
            .space()
            .push(Token::TableName(self.table.clone()))
            .space()
            .lparen();
        self.append_column_list(&mut ts);
        ts.rparen();
        if let Some(mode) = self.override_identity {
            if self.ctx.supports_override_identity() {
                ts.space().raw(mode.clause());
            }
        }
        ts.space().raw(values.keyword()).space().lparen();
        self.append_value_list(&mut ts);
        ts.rparen();
        ts
    }

    /// Target columns followed by constant columns, comma separated.
    pub(crate) fn append_column_list(&self, ts: &mut TokenStream) {
        let mut first = true;
        for col in &self.columns {
            if !first {
                ts.comma().space();
            }
            ts.ident(col.name.clone());
            first = false;
        }
        for constant in self.constants.iter() {
            if !first {
                ts.comma().space();
            }
            ts.ident(constant.column.clone());
            first = false;
        }
    }

    /// Value expressions in column-list order: expression-builder output for
    /// target columns, then placeholders or verbatim function calls for the
    /// constants.
    pub(crate) fn append_value_list(&self, ts: &mut TokenStream) {
        let mut first = true;
        for col in &self.columns {
            if !first {
                ts.comma().space();
            }
            ts.raw(self.expressions.expression_for(col, ExpressionUse::Import));
            first = false;
        }
        for constant in self.constants.iter() {
            if !first {
                ts.comma().space();
            }
            match &constant.value {
                ConstantValue::Bound => {
                    ts.push(Token::Placeholder);
                }
                ConstantValue::FunctionCall(text) => {
                    ts.raw(text.clone());
                }
            }
            first = false;
        }
    }

    // =========================================================================
    // Native conflict clauses
    // =========================================================================

    /// Postgres `ON CONFLICT`: `DO NOTHING` for ignore, otherwise
    /// `(keys) DO UPDATE SET col = EXCLUDED.col` over every non-key column.
    fn postgres_conflict_clause(&self, ignore: bool) -> String {
        let mut ts = self.insert_tokens(None, ValuesClause::Standard);
        ts.space().push(Token::On).space().push(Token::Conflict);
        if ignore {
            ts.space().push(Token::Do).space().push(Token::Nothing);
            return ts.serialize(self.quoter.as_ref());
        }

        ts.space().lparen();
        for (i, key) in self.resolved_keys().iter().enumerate() {
            if i > 0 {
                ts.comma().space();
            }
            ts.ident(key.name.clone());
        }
        ts.rparen()
            .space()
            .push(Token::Do)
            .space()
            .push(Token::Update)
            .space()
            .push(Token::Set)
            .space();

        let mut first = true;
        for col in &self.columns {
            if self.is_key_name(&col.name) {
                continue;
            }
            if !first {
                ts.comma().space();
            }
            ts.ident(col.name.clone())
                .space()
                .push(Token::Eq)
                .space()
                .qualified("EXCLUDED", col.name.clone());
            first = false;
        }
        for constant in self.constants.iter() {
            if self.is_key_name(&constant.column) {
                continue;
            }
            if !first {
                ts.comma().space();
            }
            ts.ident(constant.column.clone())
                .space()
                .push(Token::Eq)
                .space()
                .qualified("EXCLUDED", constant.column.clone());
            first = false;
        }
        ts.serialize(self.quoter.as_ref())
    }

    /// MySQL-family `ON DUPLICATE KEY UPDATE`. Ignore mode emits a no-op
    /// self-assignment on the first column; it only exists to route the
    /// conflict into the skip path.
    fn duplicate_key_clause(&self, ignore: bool) -> String {
        let mut ts = self.insert_tokens(None, ValuesClause::Standard);
        ts.space()
            .push(Token::On)
            .space()
            .push(Token::Duplicate)
            .space()
            .push(Token::Key)
            .space()
            .push(Token::Update)
            .space();
        if ignore {
            let first = &self.columns[0];
            ts.ident(first.name.clone())
                .space()
                .push(Token::Eq)
                .space()
                .ident(first.name.clone());
        } else {
            for (i, col) in self.columns.iter().enumerate() {
                if i > 0 {
                    ts.comma().space();
                }
                ts.ident(col.name.clone())
                    .space()
                    .push(Token::Eq)
                    .space()
                    .push(Token::Values)
                    .lparen()
                    .ident(col.name.clone())
                    .rparen();
            }
        }
        ts.serialize(self.quoter.as_ref())
    }

    /// Oracle's `IGNORE_ROW_ON_DUPKEY_INDEX` hint. Table and key names go
    /// into the hint raw, not quoted.
    fn oracle_ignore_hint(&self) -> String {
        let keys = self
            .resolved_keys()
            .iter()
            .map(|k| k.name.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let prefix = format!(
            "INSERT /*+ IGNORE_ROW_ON_DUPKEY_INDEX ({} ({})) */ INTO",
            self.table, keys
        );
        self.insert(Some(&prefix))
    }

    /// SQL Anywhere: conflict handling lives between the column list and
    /// the VALUES row.
    fn on_existing(&self, clause: ValuesClause) -> String {
        self.insert_tokens(None, clause)
            .serialize(self.quoter.as_ref())
    }

    /// Firebird `UPDATE OR INSERT ... MATCHING (keys)`.
    fn firebird_upsert(&self) -> String {
        let mut ts = self.insert_tokens(Some("UPDATE OR INSERT INTO"), ValuesClause::Standard);
        ts.space().push(Token::Matching).space().lparen();
        for (i, key) in self.resolved_keys().iter().enumerate() {
            if i > 0 {
                ts.comma().space();
            }
            ts.ident(key.name.clone());
        }
        ts.rparen();
        ts.serialize(self.quoter.as_ref())
    }

    /// HANA `UPSERT <table> ... WITH PRIMARY KEY` (no `INTO`).
    fn hana_upsert(&self) -> String {
        let mut ts = self.insert_tokens(Some("UPSERT"), ValuesClause::Standard);
        ts.space().raw("WITH PRIMARY KEY");
        ts.serialize(self.quoter.as_ref())
    }
}
