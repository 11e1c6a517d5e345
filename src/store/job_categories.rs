use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use crate::error::AppResult;
use crate::models::JobCategory;

fn from_row(row: &SqliteRow) -> AppResult<JobCategory> {
    Ok(JobCategory {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Insert-or-fetch on the unique `name` column. Concurrent callers with the
/// same name converge on one row instead of racing.
pub async fn upsert_by_name(conn: &mut SqliteConnection, name: &str) -> AppResult<JobCategory> {
    sqlx::query("INSERT INTO job_categories (name, created_at) VALUES (?, ?) ON CONFLICT(name) DO NOTHING")
        .bind(name)
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?;

    let row = sqlx::query("SELECT id, name, created_at FROM job_categories WHERE name = ?")
        .bind(name)
        .fetch_one(&mut *conn)
        .await?;
    from_row(&row)
}

/// Plain insert; a duplicate name surfaces as a conflict.
pub async fn insert(conn: &mut SqliteConnection, name: &str) -> AppResult<JobCategory> {
    let row = sqlx::query(
        "INSERT INTO job_categories (name, created_at) VALUES (?, ?) RETURNING id, name, created_at",
    )
    .bind(name)
    .bind(Utc::now())
    .fetch_one(&mut *conn)
    .await?;
    from_row(&row)
}

pub async fn rename(conn: &mut SqliteConnection, id: i64, name: &str) -> AppResult<Option<JobCategory>> {
    let row = sqlx::query("UPDATE job_categories SET name = ? WHERE id = ? RETURNING id, name, created_at")
        .bind(name)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    row.as_ref().map(from_row).transpose()
}

pub async fn get(conn: &mut SqliteConnection, id: i64) -> AppResult<Option<JobCategory>> {
    let row = sqlx::query("SELECT id, name, created_at FROM job_categories WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    row.as_ref().map(from_row).transpose()
}

pub async fn list(conn: &mut SqliteConnection) -> AppResult<Vec<JobCategory>> {
    let rows = sqlx::query("SELECT id, name, created_at FROM job_categories ORDER BY id")
        .fetch_all(&mut *conn)
        .await?;
    rows.iter().map(from_row).collect()
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM job_categories WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected() > 0)
}
