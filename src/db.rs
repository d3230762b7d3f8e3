//! Database pool construction and schema bootstrap.
//!
//! The pool is built once at startup and handed to the router as an explicit
//! `Extension`; handlers never reach for a global connection.

use anyhow::{Context, Result};
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};
use std::{str::FromStr, time::Duration};
use tracing::{Instrument, debug, info_span};

pub const SCHEMA_SQL: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/sql/schema.sql"));

/// DSN of a private in-memory database, used by tests and throwaway runs.
pub const MEMORY_DSN: &str = "sqlite::memory:";

const MAX_FILE_CONNECTIONS: u32 = 5;

/// Returns `true` when the DSN points at an in-memory database.
fn is_memory_dsn(dsn: &str) -> bool {
    dsn.contains(":memory:") || dsn.contains("mode=memory")
}

/// Open a pool for the given SQLite DSN.
///
/// File databases are created if missing and use WAL journaling. An in-memory
/// database lives only as long as its connection, so it gets exactly one
/// connection that is never reaped.
///
/// # Errors
/// Returns an error if the DSN is invalid or the database cannot be opened.
pub async fn connect(dsn: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(dsn)
        .with_context(|| format!("Invalid database DSN: {dsn}"))?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = if is_memory_dsn(dsn) {
        SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await
    } else {
        SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(MAX_FILE_CONNECTIONS)
            .max_lifetime(Duration::from_secs(60 * 30))
            .test_before_acquire(true)
            .connect_with(options.journal_mode(SqliteJournalMode::Wal))
            .await
    };

    pool.context("Failed to connect to database")
}

/// Apply the embedded schema. Every statement is idempotent, so this runs on
/// each startup.
///
/// # Errors
/// Returns an error naming the first statement that failed.
pub async fn apply_schema(pool: &SqlitePool) -> Result<()> {
    for (index, statement) in split_sql_statements(SCHEMA_SQL).iter().enumerate() {
        let span = info_span!("db.query", db.system = "sqlite", db.operation = "DDL");
        sqlx::query(statement)
            .execute(pool)
            .instrument(span)
            .await
            .with_context(|| format!("failed to execute schema statement {}", index + 1))?;
    }

    debug!("database schema applied");

    Ok(())
}

/// Connect and apply the schema in one step.
///
/// # Errors
/// Returns an error if either [`connect`] or [`apply_schema`] fails.
pub async fn init(dsn: &str) -> Result<SqlitePool> {
    let pool = connect(dsn).await?;
    apply_schema(&pool).await?;
    Ok(pool)
}

/// Splits a schema file into individual statements. Assumes each statement
/// ends with `;` at the end of a line and that no literal contains one.
fn split_sql_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();

    for line in sql.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("--") {
            continue;
        }
        current.push_str(line);
        current.push('\n');

        if trimmed.ends_with(';') {
            let statement = current.trim();
            if !statement.is_empty() {
                statements.push(statement.to_string());
            }
            current.clear();
        }
    }

    let leftover = current.trim();
    if !leftover.is_empty() {
        statements.push(leftover.to_string());
    }

    statements
}
