//! SQL helpers for the `accounts` table.

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};
use tracing::{Instrument, info_span};
use uuid::Uuid;

use super::types::AccountResponse;

/// Credentials needed to check a login attempt.
#[derive(Debug)]
pub(super) struct LoginRecord {
    pub(super) id: Uuid,
    pub(super) password_hash: String,
}

fn account_from_row(row: &SqliteRow) -> Result<AccountResponse, sqlx::Error> {
    Ok(AccountResponse {
        id: row.try_get::<Uuid, _>("id")?.to_string(),
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Returns which identifier is already registered, checking `username` first.
pub(super) async fn taken_field(
    pool: &SqlitePool,
    username: &str,
    email: &str,
) -> Result<Option<&'static str>, sqlx::Error> {
    let query = "SELECT username, email FROM accounts WHERE username = ?1 OR email = ?2";
    let span = info_span!(
        "db.query",
        db.system = "sqlite",
        db.operation = "SELECT",
        db.statement = query
    );
    let rows = sqlx::query(query)
        .bind(username)
        .bind(email)
        .fetch_all(pool)
        .instrument(span)
        .await?;

    let mut taken = None;
    for row in &rows {
        let existing: String = row.try_get("username")?;
        if existing == username {
            return Ok(Some("username"));
        }
        taken = Some("email");
    }
    Ok(taken)
}

pub(super) async fn insert_account(
    pool: &SqlitePool,
    id: Uuid,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<AccountResponse, sqlx::Error> {
    let query = r"
        INSERT INTO accounts (id, username, email, password_hash)
        VALUES (?1, ?2, ?3, ?4)
        RETURNING id, username, email, created_at
    ";
    let span = info_span!("db.query", db.system = "sqlite", db.operation = "INSERT");
    let row = sqlx::query(query)
        .bind(id)
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(pool)
        .instrument(span)
        .await?;
    account_from_row(&row)
}

/// Look up an account by username, or by email when the identifier matches
/// the normalized email.
pub(super) async fn find_login(
    pool: &SqlitePool,
    username: &str,
    email: &str,
) -> Result<Option<LoginRecord>, sqlx::Error> {
    let query = r"
        SELECT id, password_hash
        FROM accounts
        WHERE username = ?1 OR email = ?2
        ORDER BY username = ?1 DESC
        LIMIT 1
    ";
    let span = info_span!("db.query", db.system = "sqlite", db.operation = "SELECT");
    let row = sqlx::query(query)
        .bind(username)
        .bind(email)
        .fetch_optional(pool)
        .instrument(span)
        .await?;

    row.map(|row| {
        Ok(LoginRecord {
            id: row.try_get("id")?,
            password_hash: row.try_get("password_hash")?,
        })
    })
    .transpose()
}

pub(super) async fn find_account(
    pool: &SqlitePool,
    id: Uuid,
) -> Result<Option<AccountResponse>, sqlx::Error> {
    let query = "SELECT id, username, email, created_at FROM accounts WHERE id = ?1";
    let span = info_span!("db.query", db.system = "sqlite", db.operation = "SELECT");
    let row = sqlx::query(query)
        .bind(id)
        .fetch_optional(pool)
        .instrument(span)
        .await?;
    row.as_ref().map(account_from_row).transpose()
}

/// Tell which unique column a constraint violation hit, if it was one.
pub(super) fn unique_violation_field(err: &sqlx::Error) -> Option<&'static str> {
    let db_err = err.as_database_error()?;
    if !db_err.is_unique_violation() {
        return None;
    }
    if db_err.message().contains("accounts.email") {
        Some("email")
    } else {
        Some("username")
    }
}
