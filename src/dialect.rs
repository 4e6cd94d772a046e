//! SQL dialect identifiers and capability resolution.
//!
//! Every capability question is answered from an immutable
//! [`DialectContext`] (dialect + server version) instead of a live
//! connection. The capability matches are exhaustive on purpose: adding a
//! `Dialect` variant forces an explicit decision for every import mode.
//!
//! # Minimum Version Requirements
//!
//! | Capability | Postgres | Oracle | SQL Server | DB2 z/OS | HSQLDB | Firebird | SQL Anywhere |
//! |------------|----------|--------|------------|----------|--------|----------|--------------|
//! | native insert-ignore | 9.5+ | 11.2+ | ❌ | ❌ | ❌ | ❌ | 10.0+ |
//! | insert-ignore (any form) | 9.5+ | 11.2+ | 10.0+ (2008) | 10.0+ | 2.0+ | ❌ | 10.0+ |
//! | upsert | 9.5+ | ✓ | 10.0+ (2008) | 10.0+ | 2.0+ | 2.1+ | 10.0+ |
//!
//! MySQL, MariaDB, Cubrid, SQLite, DB2 LUW, HANA and H2 carry no version
//! gate for the modes they support.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Supported SQL backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    Postgres,
    MySql,
    MariaDb,
    Oracle,
    SqlServer,
    Sqlite,
    Db2Luw,
    Db2Zos,
    Hsqldb,
    H2,
    Firebird,
    Hana,
    Cubrid,
    SqlAnywhere,
}

impl Dialect {
    /// Dialect name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Postgres => "postgres",
            Dialect::MySql => "mysql",
            Dialect::MariaDb => "mariadb",
            Dialect::Oracle => "oracle",
            Dialect::SqlServer => "sqlserver",
            Dialect::Sqlite => "sqlite",
            Dialect::Db2Luw => "db2",
            Dialect::Db2Zos => "db2zos",
            Dialect::Hsqldb => "hsqldb",
            Dialect::H2 => "h2",
            Dialect::Firebird => "firebird",
            Dialect::Hana => "hana",
            Dialect::Cubrid => "cubrid",
            Dialect::SqlAnywhere => "sqlanywhere",
        }
    }

    /// Whether upsert is only legal against a genuine primary key
    /// constraint; a caller-declared unique key is not enough.
    pub fn requires_real_pk_for_upsert(&self) -> bool {
        matches!(
            self,
            Dialect::Cubrid
                | Dialect::MySql
                | Dialect::Hana
                | Dialect::H2
                | Dialect::SqlAnywhere
                | Dialect::Sqlite
        )
    }

    /// Whether insert-ignore is only legal against a genuine primary key
    /// constraint.
    pub fn requires_real_pk_for_ignore(&self) -> bool {
        matches!(
            self,
            Dialect::Cubrid | Dialect::MySql | Dialect::SqlAnywhere | Dialect::Sqlite
        )
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Server version as reported by the backend, compared as (major, minor).
///
/// SQL Server 2008 reports server version 10.0.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ServerVersion {
    pub major: u32,
    pub minor: u32,
}

impl ServerVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// A dialect plus the version it is running at.
///
/// This is the complete input to capability resolution; nothing global or
/// connection-derived is consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialectContext {
    pub dialect: Dialect,
    pub version: ServerVersion,
}

impl DialectContext {
    pub const fn new(dialect: Dialect, version: ServerVersion) -> Self {
        Self { dialect, version }
    }

    fn at_least(&self, major: u32, minor: u32) -> bool {
        self.version >= ServerVersion::new(major, minor)
    }

    /// True when the backend has a dedicated ignore-on-conflict clause.
    ///
    /// This is stricter than [`supports_insert_ignore`]: backends that only
    /// reach ignore semantics through a MERGE without a `WHEN MATCHED`
    /// branch (SQL Server, DB2, HSQLDB) or a duplicate-key no-op update
    /// (MySQL family) are excluded here.
    ///
    /// [`supports_insert_ignore`]: DialectContext::supports_insert_ignore
    pub fn has_native_insert_ignore(&self) -> bool {
        match self.dialect {
            Dialect::Oracle => self.at_least(11, 2),
            Dialect::Postgres => self.at_least(9, 5),
            Dialect::Sqlite => true,
            Dialect::SqlAnywhere => self.at_least(10, 0),
            Dialect::MySql
            | Dialect::MariaDb
            | Dialect::SqlServer
            | Dialect::Db2Luw
            | Dialect::Db2Zos
            | Dialect::Hsqldb
            | Dialect::H2
            | Dialect::Firebird
            | Dialect::Hana
            | Dialect::Cubrid => false,
        }
    }

    /// True when some "insert but skip unique-key violations" statement can
    /// be rendered, including MERGE emulation and duplicate-key no-op
    /// updates.
    pub fn supports_insert_ignore(&self) -> bool {
        match self.dialect {
            Dialect::Postgres => self.at_least(9, 5),
            Dialect::Oracle => self.at_least(11, 2),
            Dialect::SqlServer => self.at_least(10, 0),
            Dialect::Db2Luw
            | Dialect::Cubrid
            | Dialect::MySql
            | Dialect::MariaDb
            | Dialect::Sqlite => true,
            Dialect::Hsqldb => self.at_least(2, 0),
            Dialect::Db2Zos => self.at_least(10, 0),
            Dialect::SqlAnywhere => self.at_least(10, 0),
            Dialect::H2 | Dialect::Firebird | Dialect::Hana => false,
        }
    }

    /// True when an upsert (insert-or-update) statement can be rendered,
    /// natively or through MERGE.
    pub fn supports_upsert(&self) -> bool {
        match self.dialect {
            Dialect::Oracle
            | Dialect::Db2Luw
            | Dialect::Cubrid
            | Dialect::Hana
            | Dialect::Sqlite
            | Dialect::H2
            | Dialect::MySql
            | Dialect::MariaDb => true,
            Dialect::Postgres => self.at_least(9, 5),
            Dialect::Firebird => self.at_least(2, 1),
            Dialect::Db2Zos => self.at_least(10, 0),
            Dialect::SqlServer => self.at_least(10, 0),
            Dialect::Hsqldb => self.at_least(2, 0),
            Dialect::SqlAnywhere => self.at_least(10, 0),
        }
    }

    /// `OVERRIDING SYSTEM VALUE` / `OVERRIDING USER VALUE` support.
    pub fn supports_override_identity(&self) -> bool {
        matches!(self.dialect, Dialect::Postgres) && self.at_least(9, 5)
    }
}
