use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use super::enum_column;
use crate::core::UserId;
use crate::error::AppResult;
use crate::forms::CoinData;
use crate::models::UserCoin;

const COLUMNS: &str =
    "id, user_id, gain_type, gain_coin, status, created_user, updated_user, created_at, updated_at";

fn from_row(row: &SqliteRow) -> AppResult<UserCoin> {
    Ok(UserCoin {
        id: row.try_get("id")?,
        user: UserId::new(row.try_get("user_id")?),
        gain_type: enum_column(row, "gain_type")?,
        gain_coin: row.try_get("gain_coin")?,
        status: enum_column(row, "status")?,
        created_user: UserId::new(row.try_get("created_user")?),
        updated_user: UserId::new(row.try_get("updated_user")?),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub async fn insert(
    conn: &mut SqliteConnection,
    data: &CoinData,
    acting_user: UserId,
) -> AppResult<UserCoin> {
    let now = Utc::now();
    let row = sqlx::query(&format!(
        "INSERT INTO user_coins (user_id, gain_type, gain_coin, status, created_user, updated_user, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING {}",
        COLUMNS
    ))
    .bind(data.user.value())
    .bind(data.gain_type.as_str())
    .bind(data.gain_coin)
    .bind(data.status.as_str())
    .bind(acting_user.value())
    .bind(acting_user.value())
    .bind(now)
    .bind(now)
    .fetch_one(&mut *conn)
    .await?;
    from_row(&row)
}

pub async fn list(conn: &mut SqliteConnection, user: Option<UserId>) -> AppResult<Vec<UserCoin>> {
    let rows = match user {
        Some(user) => {
            sqlx::query(&format!("SELECT {} FROM user_coins WHERE user_id = ? ORDER BY id", COLUMNS))
                .bind(user.value())
                .fetch_all(&mut *conn)
                .await?
        }
        None => {
            sqlx::query(&format!("SELECT {} FROM user_coins ORDER BY id", COLUMNS))
                .fetch_all(&mut *conn)
                .await?
        }
    };
    rows.iter().map(from_row).collect()
}
