use chrono::NaiveDateTime;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::cases::fields::{CaseField, FieldValue};
use crate::cases::sort::{SortColumn, SortOrder};
use crate::errors::AppError;
use crate::models::case::CaseRecord;

// `front` is NULL while unset so several drafts can coexist under its UNIQUE constraint.
const COLUMNS: &str =
    "id, COALESCE(front, '') AS front, back, tags, keywords, next_review, modified";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditOutcome {
    pub id: i64,
    pub created: bool,
}

/// Returns every record in the requested order.
pub async fn fetch_all(pool: &SqlitePool, order: SortOrder) -> Result<Vec<CaseRecord>, AppError> {
    let sql = format!("SELECT {COLUMNS} FROM cases ORDER BY {}", order.order_by());
    Ok(sqlx::query_as::<_, CaseRecord>(&sql).fetch_all(pool).await?)
}

/// Most recently modified first.
pub async fn fetch_recent_first(pool: &SqlitePool) -> Result<Vec<CaseRecord>, AppError> {
    fetch_all(
        pool,
        SortOrder {
            column: SortColumn::Modified,
            desc: true,
        },
    )
    .await
}

pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<CaseRecord>, AppError> {
    let sql = format!("SELECT {COLUMNS} FROM cases WHERE id = ?");
    Ok(sqlx::query_as::<_, CaseRecord>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?)
}

/// Applies a single-field edit. An unknown (or absent) id creates a new
/// record holding only that field; the new id is returned.
pub async fn edit(
    pool: &SqlitePool,
    id: Option<i64>,
    field: CaseField,
    value: FieldValue,
    now: NaiveDateTime,
) -> Result<EditOutcome, AppError> {
    let existing = match id {
        Some(id) => find(pool, id).await?,
        None => None,
    };

    match existing {
        Some(record) => {
            update_field(pool, record.id, field, value, now).await?;
            Ok(EditOutcome {
                id: record.id,
                created: false,
            })
        }
        None => {
            let id = insert_with_field(pool, field, value, now).await?;
            Ok(EditOutcome { id, created: true })
        }
    }
}

async fn insert_with_field(
    pool: &SqlitePool,
    field: CaseField,
    value: FieldValue,
    now: NaiveDateTime,
) -> Result<i64, AppError> {
    let sql = format!(
        "INSERT INTO cases ({}, modified) VALUES (?, ?)",
        field.column()
    );
    let result = bind_field(sqlx::query(&sql), field, value)
        .bind(now)
        .execute(pool)
        .await?;

    let id = result.last_insert_rowid();
    info!("Created case {id} from field '{}'", field.column());
    Ok(id)
}

async fn update_field(
    pool: &SqlitePool,
    id: i64,
    field: CaseField,
    value: FieldValue,
    now: NaiveDateTime,
) -> Result<(), AppError> {
    let sql = format!(
        "UPDATE cases SET {} = ?, modified = ? WHERE id = ?",
        field.column()
    );
    bind_field(sqlx::query(&sql), field, value)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;

    debug!("Updated case {id} field '{}'", field.column());
    Ok(())
}

fn bind_field<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    field: CaseField,
    value: FieldValue,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        FieldValue::Text(text) if field == CaseField::Front && text.is_empty() => {
            query.bind(None::<String>)
        }
        FieldValue::Text(text) => query.bind(text),
        FieldValue::Timestamp(ts) => query.bind(ts),
    }
}

/// Deletes a record and returns its former `front`.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<String, AppError> {
    let record = find(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Case {id} not found")))?;

    sqlx::query("DELETE FROM cases WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    info!("Deleted case {id}");
    Ok(record.front)
}
