//! SQL helpers for the `calculations` table.
//!
//! Every statement filters on both `id` and `owner_id`, so a record owned by
//! another account is indistinguishable from a missing one. Mutations are
//! single statements; a concurrent delete makes a later update or delete
//! affect zero rows instead of racing a separate existence check.

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};
use tracing::{Instrument, info_span};
use uuid::Uuid;

use super::{operation::Operation, types::CalculationResponse};

const RECORD_COLUMNS: &str = "id, operand_a, operand_b, operation, result, created_at, updated_at";

/// Operands, operation and the result computed from them.
#[derive(Debug, Clone, Copy)]
pub(super) struct Computed {
    pub(super) a: f64,
    pub(super) b: f64,
    pub(super) operation: Operation,
    pub(super) result: f64,
}

fn record_from_row(row: &SqliteRow) -> Result<CalculationResponse, sqlx::Error> {
    Ok(CalculationResponse {
        id: row.try_get::<Uuid, _>("id")?.to_string(),
        a: row.try_get("operand_a")?,
        b: row.try_get("operand_b")?,
        operation: row.try_get("operation")?,
        result: row.try_get("result")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub(super) async fn insert_calculation(
    pool: &SqlitePool,
    owner_id: Uuid,
    computed: Computed,
) -> Result<CalculationResponse, sqlx::Error> {
    let query = format!(
        r"
        INSERT INTO calculations (id, owner_id, operand_a, operand_b, operation, result)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        RETURNING {RECORD_COLUMNS}
        "
    );
    let span = info_span!("db.query", db.system = "sqlite", db.operation = "INSERT");
    let row = sqlx::query(&query)
        .bind(Uuid::now_v7())
        .bind(owner_id)
        .bind(computed.a)
        .bind(computed.b)
        .bind(computed.operation.as_str())
        .bind(computed.result)
        .fetch_one(pool)
        .instrument(span)
        .await?;
    record_from_row(&row)
}

pub(super) async fn fetch_calculations(
    pool: &SqlitePool,
    owner_id: Uuid,
) -> Result<Vec<CalculationResponse>, sqlx::Error> {
    let query = format!(
        r"
        SELECT {RECORD_COLUMNS}
        FROM calculations
        WHERE owner_id = ?1
        ORDER BY created_at, id
        "
    );
    let span = info_span!("db.query", db.system = "sqlite", db.operation = "SELECT");
    let rows = sqlx::query(&query)
        .bind(owner_id)
        .fetch_all(pool)
        .instrument(span)
        .await?;
    rows.iter().map(record_from_row).collect()
}

pub(super) async fn fetch_calculation(
    pool: &SqlitePool,
    owner_id: Uuid,
    id: Uuid,
) -> Result<Option<CalculationResponse>, sqlx::Error> {
    let query = format!(
        r"
        SELECT {RECORD_COLUMNS}
        FROM calculations
        WHERE id = ?1 AND owner_id = ?2
        "
    );
    let span = info_span!("db.query", db.system = "sqlite", db.operation = "SELECT");
    let row = sqlx::query(&query)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .instrument(span)
        .await?;
    row.as_ref().map(record_from_row).transpose()
}

pub(super) async fn replace_calculation(
    pool: &SqlitePool,
    owner_id: Uuid,
    id: Uuid,
    computed: Computed,
) -> Result<Option<CalculationResponse>, sqlx::Error> {
    let query = format!(
        r"
        UPDATE calculations
        SET
            operand_a = ?1,
            operand_b = ?2,
            operation = ?3,
            result = ?4,
            updated_at = strftime('%Y-%m-%dT%H:%M:%SZ', 'now')
        WHERE id = ?5 AND owner_id = ?6
        RETURNING {RECORD_COLUMNS}
        "
    );
    let span = info_span!("db.query", db.system = "sqlite", db.operation = "UPDATE");
    let row = sqlx::query(&query)
        .bind(computed.a)
        .bind(computed.b)
        .bind(computed.operation.as_str())
        .bind(computed.result)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .instrument(span)
        .await?;
    row.as_ref().map(record_from_row).transpose()
}

/// Returns `true` when a record was removed.
pub(super) async fn remove_calculation(
    pool: &SqlitePool,
    owner_id: Uuid,
    id: Uuid,
) -> Result<bool, sqlx::Error> {
    let query = "DELETE FROM calculations WHERE id = ?1 AND owner_id = ?2";
    let span = info_span!(
        "db.query",
        db.system = "sqlite",
        db.operation = "DELETE",
        db.statement = query
    );
    let result = sqlx::query(query)
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .instrument(span)
        .await?;
    Ok(result.rows_affected() > 0)
}
