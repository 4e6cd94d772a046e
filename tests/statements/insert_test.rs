//! Plain INSERT generation.

use dmlforge::{
    ColumnSpec, ConstantColumnValues, Dialect, DialectContext, ImportMode, OverrideIdentity,
    ServerVersion, StatementBuilder, StatementError,
};

fn ctx(dialect: Dialect, major: u32, minor: u32) -> DialectContext {
    DialectContext::new(dialect, ServerVersion::new(major, minor))
}

fn builder(dialect: Dialect) -> StatementBuilder {
    StatementBuilder::new(
        ctx(dialect, 99, 0),
        "person",
        vec![
            ColumnSpec::primary_key("id"),
            ColumnSpec::new("name"),
            ColumnSpec::new("email"),
        ],
    )
    .unwrap()
}

#[test]
fn test_basic_insert() {
    let sql = builder(Dialect::Postgres).insert(None);
    insta::assert_snapshot!(sql, @"INSERT INTO person (id, name, email) VALUES (?, ?, ?)");
}

#[test]
fn test_insert_is_identical_across_dialects() {
    let expected = "INSERT INTO person (id, name, email) VALUES (?, ?, ?)";
    for dialect in [
        Dialect::Postgres,
        Dialect::MySql,
        Dialect::Oracle,
        Dialect::SqlServer,
        Dialect::Sqlite,
        Dialect::Hana,
    ] {
        assert_eq!(builder(dialect).insert(None), expected, "{dialect}");
    }
}

#[test]
fn test_insert_always_supported() {
    for dialect in [Dialect::Postgres, Dialect::Firebird, Dialect::Db2Zos] {
        let b = StatementBuilder::new(ctx(dialect, 1, 0), "t", vec![ColumnSpec::new("c")]).unwrap();
        assert!(b.is_mode_supported(ImportMode::Insert));
        assert!(b.statement(ImportMode::Insert).is_some());
    }
}

#[test]
fn test_empty_column_list_fails() {
    let err = StatementBuilder::new(ctx(Dialect::Postgres, 9, 5), "person", vec![]).unwrap_err();
    assert_eq!(err, StatementError::EmptyColumnList);
    assert_eq!(
        err.to_string(),
        "cannot build a DML statement for an empty column list"
    );
}

#[test]
fn test_constant_columns_follow_target_columns() {
    let b = StatementBuilder::new(
        ctx(Dialect::Postgres, 9, 5),
        "person",
        vec![ColumnSpec::primary_key("id"), ColumnSpec::new("name")],
    )
    .unwrap()
    .constants(
        ConstantColumnValues::new()
            .function_call("modified_at", "CURRENT_TIMESTAMP")
            .bound("source"),
    );

    let sql = b.insert(None);
    insta::assert_snapshot!(
        sql,
        @"INSERT INTO person (id, name, modified_at, source) VALUES (?, ?, CURRENT_TIMESTAMP, ?)"
    );
    // function-call constants are inlined, never bound
    assert_eq!(sql.matches('?').count(), 3);
}

#[test]
fn test_insert_prefix() {
    let b = builder(Dialect::Oracle).insert_prefix("INSERT /*+ append */ INTO");
    assert_eq!(
        b.insert(None),
        "INSERT /*+ append */ INTO person (id, name, email) VALUES (?, ?, ?)"
    );
}

#[test]
fn test_override_identity_postgres() {
    let b = StatementBuilder::new(
        ctx(Dialect::Postgres, 9, 5),
        "person",
        vec![ColumnSpec::primary_key("id"), ColumnSpec::new("name")],
    )
    .unwrap()
    .override_identity(OverrideIdentity::System);
    insta::assert_snapshot!(
        b.insert(None),
        @"INSERT INTO person (id, name) OVERRIDING SYSTEM VALUE VALUES (?, ?)"
    );

    let user = StatementBuilder::new(
        ctx(Dialect::Postgres, 9, 5),
        "person",
        vec![ColumnSpec::primary_key("id"), ColumnSpec::new("name")],
    )
    .unwrap()
    .override_identity(OverrideIdentity::User);
    assert!(user.insert(None).contains("OVERRIDING USER VALUE"));
}

#[test]
fn test_override_identity_skipped_where_unsupported() {
    let b = StatementBuilder::new(
        ctx(Dialect::Oracle, 12, 1),
        "person",
        vec![ColumnSpec::primary_key("id"), ColumnSpec::new("name")],
    )
    .unwrap()
    .override_identity(OverrideIdentity::System);
    assert_eq!(b.insert(None), "INSERT INTO person (id, name) VALUES (?, ?)");
}

#[test]
fn test_identifiers_quoted_only_when_needed() {
    let b = StatementBuilder::new(
        ctx(Dialect::Postgres, 9, 5),
        "person",
        vec![ColumnSpec::primary_key("id"), ColumnSpec::new("order date")],
    )
    .unwrap();
    assert_eq!(
        b.insert(None),
        "INSERT INTO person (id, \"order date\") VALUES (?, ?)"
    );

    let mysql = StatementBuilder::new(
        ctx(Dialect::MySql, 8, 0),
        "person",
        vec![ColumnSpec::primary_key("id"), ColumnSpec::new("order date")],
    )
    .unwrap();
    assert_eq!(
        mysql.insert(None),
        "INSERT INTO person (id, `order date`) VALUES (?, ?)"
    );
}

#[test]
fn test_qualified_table_name_verbatim() {
    let b = StatementBuilder::new(
        ctx(Dialect::Postgres, 9, 5),
        "public.person",
        vec![ColumnSpec::new("id")],
    )
    .unwrap();
    assert_eq!(b.insert(None), "INSERT INTO public.person (id) VALUES (?)");
}
