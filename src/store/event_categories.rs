use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use super::{contains_pattern, enum_column, fold_case};
use crate::core::UserId;
use crate::error::AppResult;
use crate::forms::EventCategoryData;
use crate::models::EventCategory;

const COLUMNS: &str =
    "id, name, code, image, priority, status, created_user, updated_user, created_at, updated_at";

fn from_row(row: &SqliteRow) -> AppResult<EventCategory> {
    Ok(EventCategory {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        code: row.try_get("code")?,
        image: row.try_get("image")?,
        priority: row.try_get("priority")?,
        status: enum_column(row, "status")?,
        created_user: UserId::new(row.try_get("created_user")?),
        updated_user: UserId::new(row.try_get("updated_user")?),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub async fn insert(
    conn: &mut SqliteConnection,
    data: &EventCategoryData,
    acting_user: UserId,
) -> AppResult<EventCategory> {
    let now = Utc::now();
    let row = sqlx::query(&format!(
        "INSERT INTO event_categories (name, name_folded, code, image, priority, status, created_user, updated_user, \
         created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING {}",
        COLUMNS
    ))
    .bind(&data.name)
    .bind(fold_case(&data.name))
    .bind(&data.code)
    .bind(&data.image)
    .bind(data.priority)
    .bind(data.status.as_str())
    .bind(acting_user.value())
    .bind(acting_user.value())
    .bind(now)
    .bind(now)
    .fetch_one(&mut *conn)
    .await?;
    from_row(&row)
}

pub async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    data: &EventCategoryData,
    acting_user: UserId,
) -> AppResult<Option<EventCategory>> {
    let row = sqlx::query(&format!(
        "UPDATE event_categories SET name = ?, name_folded = ?, code = ?, image = ?, priority = ?, status = ?, \
         updated_user = ?, updated_at = ? \
         WHERE id = ? RETURNING {}",
        COLUMNS
    ))
    .bind(&data.name)
    .bind(fold_case(&data.name))
    .bind(&data.code)
    .bind(&data.image)
    .bind(data.priority)
    .bind(data.status.as_str())
    .bind(acting_user.value())
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;
    row.as_ref().map(from_row).transpose()
}

pub async fn get(conn: &mut SqliteConnection, id: i64) -> AppResult<Option<EventCategory>> {
    let row = sqlx::query(&format!("SELECT {} FROM event_categories WHERE id = ?", COLUMNS))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    row.as_ref().map(from_row).transpose()
}

pub async fn list(conn: &mut SqliteConnection) -> AppResult<Vec<EventCategory>> {
    let rows = sqlx::query(&format!("SELECT {} FROM event_categories ORDER BY id", COLUMNS))
        .fetch_all(&mut *conn)
        .await?;
    rows.iter().map(from_row).collect()
}

/// Case-insensitive substring match on name
pub async fn search(conn: &mut SqliteConnection, needle: &str) -> AppResult<Vec<EventCategory>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM event_categories WHERE name_folded LIKE ? ESCAPE '\\' ORDER BY id",
        COLUMNS
    ))
    .bind(contains_pattern(&fold_case(needle)))
    .fetch_all(&mut *conn)
    .await?;
    rows.iter().map(from_row).collect()
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM event_categories WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected() > 0)
}
