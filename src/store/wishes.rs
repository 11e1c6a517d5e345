use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use super::enum_column;
use crate::core::UserId;
use crate::error::AppResult;
use crate::forms::WishData;
use crate::models::EventUserWish;

const COLUMNS: &str =
    "id, event_id, user_id, status, created_user, updated_user, created_at, updated_at";

fn from_row(row: &SqliteRow) -> AppResult<EventUserWish> {
    Ok(EventUserWish {
        id: row.try_get("id")?,
        event_id: row.try_get("event_id")?,
        user: UserId::new(row.try_get("user_id")?),
        status: enum_column(row, "status")?,
        created_user: UserId::new(row.try_get("created_user")?),
        updated_user: UserId::new(row.try_get("updated_user")?),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub async fn insert(
    conn: &mut SqliteConnection,
    data: &WishData,
    acting_user: UserId,
) -> AppResult<EventUserWish> {
    let now = Utc::now();
    let row = sqlx::query(&format!(
        "INSERT INTO event_user_wishlists (event_id, user_id, status, created_user, updated_user, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {}",
        COLUMNS
    ))
    .bind(data.event_id)
    .bind(data.user.value())
    .bind(data.status.as_str())
    .bind(acting_user.value())
    .bind(acting_user.value())
    .bind(now)
    .bind(now)
    .fetch_one(&mut *conn)
    .await?;
    from_row(&row)
}

pub async fn list(conn: &mut SqliteConnection) -> AppResult<Vec<EventUserWish>> {
    let rows = sqlx::query(&format!("SELECT {} FROM event_user_wishlists ORDER BY id", COLUMNS))
        .fetch_all(&mut *conn)
        .await?;
    rows.iter().map(from_row).collect()
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM event_user_wishlists WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected() > 0)
}
