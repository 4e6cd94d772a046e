//! MERGE renderings for the backends without a native upsert clause.
//!
//! Two shapes exist. The ANSI shape (`USING (VALUES ...) AS vals (...)`)
//! covers SQL Server, DB2 and HSQLDB; DB2 LUW additionally spells the
//! source as `USING TABLE (VALUES ...)`. Oracle instead selects the source
//! row `FROM DUAL` and parenthesizes the ON predicate.
//!
//! Insert-ignore reuses the same statements without the `WHEN MATCHED`
//! branch, so a duplicate row is silently left alone.

use crate::token::{Token, TokenStream};
use crate::StatementBuilder;

/// How the MERGE source rows are introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UsingClause {
    /// `USING (VALUES ...)`
    Values,
    /// `USING TABLE (VALUES ...)` (DB2 LUW)
    TableValues,
}

impl StatementBuilder {
    /// ANSI-style MERGE. `insert_only` drops the `WHEN MATCHED` branch and
    /// turns the statement into an insert-ignore.
    pub(crate) fn standard_merge(&self, insert_only: bool, using: UsingClause) -> String {
        let mut ts = TokenStream::new();
        ts.push(Token::Merge)
            .space()
            .push(Token::Into)
            .space()
            .push(Token::TableName(self.table.clone()))
            .space()
            .push(Token::As)
            .space()
            .raw("tg")
            .space()
            .push(Token::Using)
            .space();
        if using == UsingClause::TableValues {
            ts.push(Token::Table).space();
        }
        ts.lparen().push(Token::Values).space().lparen();
        self.append_value_list(&mut ts);
        ts.rparen()
            .rparen()
            .space()
            .push(Token::As)
            .space()
            .raw("vals")
            .space()
            .lparen();
        self.append_column_list(&mut ts);
        ts.rparen().space().push(Token::On).space();
        self.append_merge_on_predicate(&mut ts);
        self.append_merge_match_sections(&mut ts, insert_only);
        ts.serialize(self.quoter.as_ref())
    }

    /// Oracle MERGE: the source row is a `SELECT ... FROM DUAL` and the ON
    /// predicate is parenthesized.
    pub(crate) fn oracle_merge(&self) -> String {
        let mut ts = TokenStream::new();
        ts.push(Token::Merge)
            .space()
            .push(Token::Into)
            .space()
            .push(Token::TableName(self.table.clone()))
            .space()
            .raw("tg")
            .space()
            .push(Token::Using)
            .space()
            .lparen()
            .push(Token::Select)
            .space();
        let mut first = true;
        for col in &self.columns {
            if !first {
                ts.comma().space();
            }
            ts.push(Token::Placeholder)
                .space()
                .push(Token::As)
                .space()
                .ident(col.name.clone());
            first = false;
        }
        for constant in self.constants.iter() {
            if !first {
                ts.comma().space();
            }
            match &constant.value {
                crate::model::ConstantValue::Bound => {
                    ts.push(Token::Placeholder);
                }
                crate::model::ConstantValue::FunctionCall(text) => {
                    ts.raw(text.clone());
                }
            }
            ts.space().push(Token::As).space().ident(constant.column.clone());
            first = false;
        }
        ts.space()
            .push(Token::From)
            .space()
            .raw("DUAL")
            .rparen()
            .space()
            .raw("vals")
            .space()
            .push(Token::On)
            .space()
            .lparen();
        self.append_merge_on_predicate(&mut ts);
        ts.rparen();
        self.append_merge_match_sections(&mut ts, false);
        ts.serialize(self.quoter.as_ref())
    }

    /// `tg.key = vals.key` for every key column, AND-joined.
    fn append_merge_on_predicate(&self, ts: &mut TokenStream) {
        for (i, key) in self.resolved_keys().iter().enumerate() {
            if i > 0 {
                ts.space().push(Token::And).space();
            }
            ts.qualified("tg", key.name.clone())
                .space()
                .push(Token::Eq)
                .space()
                .qualified("vals", key.name.clone());
        }
    }

    /// The `WHEN MATCHED` update (unless `insert_only`) and the
    /// `WHEN NOT MATCHED` insert over the full column list.
    fn append_merge_match_sections(&self, ts: &mut TokenStream, insert_only: bool) {
        if !insert_only {
            ts.space()
                .push(Token::When)
                .space()
                .push(Token::Matched)
                .space()
                .push(Token::Then)
                .space()
                .push(Token::Update)
                .space()
                .push(Token::Set)
                .space();
            let mut first = true;
            for col in &self.columns {
                if self.is_key_column(col) {
                    continue;
                }
                if !first {
                    ts.comma().space();
                }
                ts.qualified("tg", col.name.clone())
                    .space()
                    .push(Token::Eq)
                    .space()
                    .qualified("vals", col.name.clone());
                first = false;
            }
            for constant in self.constants.iter() {
                if self.is_key_name(&constant.column) {
                    continue;
                }
                if !first {
                    ts.comma().space();
                }
                ts.qualified("tg", constant.column.clone())
                    .space()
                    .push(Token::Eq)
                    .space()
                    .qualified("vals", constant.column.clone());
                first = false;
            }
        }

        ts.space()
            .push(Token::When)
            .space()
            .push(Token::Not)
            .space()
            .push(Token::Matched)
            .space()
            .push(Token::Then)
            .space()
            .push(Token::Insert)
            .space()
            .lparen();
        self.append_column_list(ts);
        ts.rparen().space().push(Token::Values).space().lparen();
        let mut first = true;
        for col in &self.columns {
            if !first {
                ts.comma().space();
            }
            ts.qualified("vals", col.name.clone());
            first = false;
        }
        for constant in self.constants.iter() {
            if !first {
                ts.comma().space();
            }
            ts.qualified("vals", constant.column.clone());
            first = false;
        }
        ts.rparen();
    }
}
