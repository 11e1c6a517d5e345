use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use super::enum_column;
use crate::core::UserId;
use crate::error::AppResult;
use crate::forms::MemberData;
use crate::models::{AttendStatus, EventMember};

const COLUMNS: &str =
    "id, event_id, user_id, attend_status, status, created_user, updated_user, created_at, updated_at";

fn from_row(row: &SqliteRow) -> AppResult<EventMember> {
    Ok(EventMember {
        id: row.try_get("id")?,
        event_id: row.try_get("event_id")?,
        user: UserId::new(row.try_get("user_id")?),
        attend_status: enum_column(row, "attend_status")?,
        status: enum_column(row, "status")?,
        created_user: UserId::new(row.try_get("created_user")?),
        updated_user: UserId::new(row.try_get("updated_user")?),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub async fn insert(
    conn: &mut SqliteConnection,
    data: &MemberData,
    acting_user: UserId,
) -> AppResult<EventMember> {
    let now = Utc::now();
    let row = sqlx::query(&format!(
        "INSERT INTO event_members (event_id, user_id, attend_status, status, created_user, updated_user, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING {}",
        COLUMNS
    ))
    .bind(data.event_id)
    .bind(data.user.value())
    .bind(data.attend_status.as_str())
    .bind(data.status.as_str())
    .bind(acting_user.value())
    .bind(acting_user.value())
    .bind(now)
    .bind(now)
    .fetch_one(&mut *conn)
    .await?;
    from_row(&row)
}

/// Members in insertion order; `attend_status` is an exact match
pub async fn list(
    conn: &mut SqliteConnection,
    attend_status: Option<AttendStatus>,
) -> AppResult<Vec<EventMember>> {
    let rows = match attend_status {
        Some(attend_status) => {
            sqlx::query(&format!(
                "SELECT {} FROM event_members WHERE attend_status = ? ORDER BY id",
                COLUMNS
            ))
            .bind(attend_status.as_str())
            .fetch_all(&mut *conn)
            .await?
        }
        None => {
            sqlx::query(&format!("SELECT {} FROM event_members ORDER BY id", COLUMNS))
                .fetch_all(&mut *conn)
                .await?
        }
    };
    rows.iter().map(from_row).collect()
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM event_members WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected() > 0)
}
