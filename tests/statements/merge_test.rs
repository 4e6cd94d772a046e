//! MERGE renderings: SQL Server, DB2 LUW and z/OS, HSQLDB, Oracle.

use dmlforge::{
    ColumnSpec, ConstantColumnValues, Dialect, DialectContext, ServerVersion, StatementBuilder,
};

fn ctx(dialect: Dialect, major: u32, minor: u32) -> DialectContext {
    DialectContext::new(dialect, ServerVersion::new(major, minor))
}

fn id_val(dialect: Dialect, major: u32, minor: u32) -> StatementBuilder {
    StatementBuilder::new(
        ctx(dialect, major, minor),
        "person",
        vec![ColumnSpec::primary_key("id"), ColumnSpec::new("val")],
    )
    .unwrap()
}

#[test]
fn test_hsqldb_standard_merge() {
    let sql = id_val(Dialect::Hsqldb, 2, 5).upsert().unwrap();
    insta::assert_snapshot!(
        sql,
        @"MERGE INTO person AS tg USING (VALUES (?, ?)) AS vals (id, val) ON tg.id = vals.id WHEN MATCHED THEN UPDATE SET tg.val = vals.val WHEN NOT MATCHED THEN INSERT (id, val) VALUES (vals.id, vals.val)"
    );
}

#[test]
fn test_db2_zos_uses_standard_merge() {
    let sql = id_val(Dialect::Db2Zos, 10, 0).upsert().unwrap();
    assert!(sql.starts_with("MERGE INTO person AS tg USING (VALUES"));
}

#[test]
fn test_db2_luw_uses_table_values() {
    let sql = id_val(Dialect::Db2Luw, 11, 5).upsert().unwrap();
    insta::assert_snapshot!(
        sql,
        @"MERGE INTO person AS tg USING TABLE (VALUES (?, ?)) AS vals (id, val) ON tg.id = vals.id WHEN MATCHED THEN UPDATE SET tg.val = vals.val WHEN NOT MATCHED THEN INSERT (id, val) VALUES (vals.id, vals.val)"
    );
}

#[test]
fn test_sql_server_merge_is_terminated() {
    let sql = id_val(Dialect::SqlServer, 10, 0).upsert().unwrap();
    assert!(sql.starts_with("MERGE INTO person AS tg USING (VALUES (?, ?))"));
    assert!(sql.ends_with("WHEN NOT MATCHED THEN INSERT (id, val) VALUES (vals.id, vals.val);"));
}

#[test]
fn test_sql_server_gated_at_2008() {
    assert_eq!(id_val(Dialect::SqlServer, 9, 0).upsert(), None);
    assert_eq!(id_val(Dialect::SqlServer, 9, 0).insert_ignore(), None);
}

#[test]
fn test_insert_only_merge_skips_matched_branch() {
    let sql = id_val(Dialect::Hsqldb, 2, 5).insert_ignore().unwrap();
    insta::assert_snapshot!(
        sql,
        @"MERGE INTO person AS tg USING (VALUES (?, ?)) AS vals (id, val) ON tg.id = vals.id WHEN NOT MATCHED THEN INSERT (id, val) VALUES (vals.id, vals.val)"
    );
    assert!(!sql.contains("WHEN MATCHED"));
}

#[test]
fn test_oracle_merge_from_dual() {
    let sql = id_val(Dialect::Oracle, 11, 0).upsert().unwrap();
    insta::assert_snapshot!(
        sql,
        @"MERGE INTO person tg USING (SELECT ? AS id, ? AS val FROM DUAL) vals ON (tg.id = vals.id) WHEN MATCHED THEN UPDATE SET tg.val = vals.val WHEN NOT MATCHED THEN INSERT (id, val) VALUES (vals.id, vals.val)"
    );
}

#[test]
fn test_multi_column_key_predicate() {
    let b = StatementBuilder::new(
        ctx(Dialect::Db2Luw, 11, 5),
        "orders",
        vec![
            ColumnSpec::primary_key("order_id"),
            ColumnSpec::primary_key("line_no"),
            ColumnSpec::new("qty"),
        ],
    )
    .unwrap();
    let sql = b.upsert().unwrap();
    assert!(sql.contains("ON tg.order_id = vals.order_id AND tg.line_no = vals.line_no"));
    assert!(sql.contains("UPDATE SET tg.qty = vals.qty"));
}

#[test]
fn test_constants_flow_through_every_merge_section() {
    let b = id_val(Dialect::Hsqldb, 2, 5).constants(
        ConstantColumnValues::new()
            .function_call("modified_at", "CURRENT_TIMESTAMP")
            .bound("source"),
    );
    let sql = b.upsert().unwrap();
    // source row carries the constant values
    assert!(sql.contains("USING (VALUES (?, ?, CURRENT_TIMESTAMP, ?))"));
    // alias column list carries the constant names
    assert!(sql.contains("AS vals (id, val, modified_at, source)"));
    // update and insert branches reference them through the alias
    assert!(sql.contains("tg.modified_at = vals.modified_at"));
    assert!(sql.contains("INSERT (id, val, modified_at, source)"));
    assert!(sql.ends_with("VALUES (vals.id, vals.val, vals.modified_at, vals.source)"));
}

#[test]
fn test_oracle_merge_inlines_function_constants() {
    let b = id_val(Dialect::Oracle, 11, 0).constants(
        ConstantColumnValues::new().function_call("modified_at", "CURRENT_TIMESTAMP"),
    );
    let sql = b.upsert().unwrap();
    assert!(sql.contains("SELECT ? AS id, ? AS val, CURRENT_TIMESTAMP AS modified_at FROM DUAL"));
}

#[test]
fn test_explicit_keys_drive_the_predicate_and_set_list() {
    let b = StatementBuilder::new(
        ctx(Dialect::SqlServer, 11, 0),
        "person",
        vec![ColumnSpec::new("email"), ColumnSpec::new("name")],
    )
    .unwrap()
    .key_columns(vec![ColumnSpec::new("email")]);
    let sql = b.upsert().unwrap();
    assert!(sql.contains("ON tg.email = vals.email"));
    assert!(sql.contains("UPDATE SET tg.name = vals.name"));
    assert!(!sql.contains("tg.email = vals.email,"));
}

#[test]
fn test_quoted_identifiers_in_merge() {
    let b = StatementBuilder::new(
        ctx(Dialect::Hsqldb, 2, 5),
        "person",
        vec![ColumnSpec::primary_key("id"), ColumnSpec::new("order date")],
    )
    .unwrap();
    let sql = b.upsert().unwrap();
    assert!(sql.contains("AS vals (id, \"order date\")"));
    assert!(sql.contains("UPDATE SET tg.\"order date\" = vals.\"order date\""));
}
