use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use super::{contains_pattern, enum_column, fold_case};
use crate::core::UserId;
use crate::error::AppResult;
use crate::forms::{EventData, NewAgenda, NewImage};
use crate::models::{Event, EventAgenda, EventImage, EventStatus};

const COLUMNS: &str = "id, name, description, scheduled_status, venue, start_date, end_date, location, \
     points, maximum_attendee, status, job_category_id, category_id, created_user, updated_user, \
     created_at, updated_at";

fn from_row(row: &SqliteRow) -> AppResult<Event> {
    Ok(Event {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        scheduled_status: row.try_get("scheduled_status")?,
        venue: row.try_get("venue")?,
        start_date: row.try_get("start_date")?,
        end_date: row.try_get("end_date")?,
        location: row.try_get("location")?,
        points: row.try_get("points")?,
        maximum_attendee: row.try_get("maximum_attendee")?,
        status: enum_column(row, "status")?,
        job_category_id: row.try_get("job_category_id")?,
        category_id: row.try_get("category_id")?,
        created_user: UserId::new(row.try_get("created_user")?),
        updated_user: UserId::new(row.try_get("updated_user")?),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Insert an event. `category_id` is always written as NULL.
pub async fn insert(
    conn: &mut SqliteConnection,
    data: &EventData,
    job_category_id: Option<i64>,
    acting_user: UserId,
) -> AppResult<Event> {
    let now = Utc::now();
    let row = sqlx::query(&format!(
        "INSERT INTO events (name, name_folded, description, scheduled_status, venue, start_date, end_date, \
         location, points, maximum_attendee, status, job_category_id, category_id, created_user, \
         updated_user, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, NULL, ?, ?, ?, ?) RETURNING {}",
        COLUMNS
    ))
    .bind(&data.name)
    .bind(fold_case(&data.name))
    .bind(&data.description)
    .bind(&data.scheduled_status)
    .bind(&data.venue)
    .bind(data.start_date)
    .bind(data.end_date)
    .bind(&data.location)
    .bind(data.points)
    .bind(data.maximum_attendee)
    .bind(data.status.as_str())
    .bind(job_category_id)
    .bind(acting_user.value())
    .bind(acting_user.value())
    .bind(now)
    .bind(now)
    .fetch_one(&mut *conn)
    .await?;
    from_row(&row)
}

/// Overwrite the editable fields of an event and clear its category.
pub async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    data: &EventData,
    job_category_id: Option<i64>,
    acting_user: UserId,
) -> AppResult<Option<Event>> {
    let row = sqlx::query(&format!(
        "UPDATE events SET name = ?, name_folded = ?, description = ?, scheduled_status = ?, venue = ?, start_date = ?, \
         end_date = ?, location = ?, points = ?, maximum_attendee = ?, status = ?, job_category_id = ?, \
         category_id = NULL, updated_user = ?, updated_at = ? \
         WHERE id = ? RETURNING {}",
        COLUMNS
    ))
    .bind(&data.name)
    .bind(fold_case(&data.name))
    .bind(&data.description)
    .bind(&data.scheduled_status)
    .bind(&data.venue)
    .bind(data.start_date)
    .bind(data.end_date)
    .bind(&data.location)
    .bind(data.points)
    .bind(data.maximum_attendee)
    .bind(data.status.as_str())
    .bind(job_category_id)
    .bind(acting_user.value())
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;
    row.as_ref().map(from_row).transpose()
}

pub async fn update_status(
    conn: &mut SqliteConnection,
    id: i64,
    status: EventStatus,
    acting_user: UserId,
) -> AppResult<Option<Event>> {
    let row = sqlx::query(&format!(
        "UPDATE events SET status = ?, updated_user = ?, updated_at = ? WHERE id = ? RETURNING {}",
        COLUMNS
    ))
    .bind(status.as_str())
    .bind(acting_user.value())
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;
    row.as_ref().map(from_row).transpose()
}

pub async fn get(conn: &mut SqliteConnection, id: i64) -> AppResult<Option<Event>> {
    let row = sqlx::query(&format!("SELECT {} FROM events WHERE id = ?", COLUMNS))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    row.as_ref().map(from_row).transpose()
}

pub async fn exists(conn: &mut SqliteConnection, id: i64) -> AppResult<bool> {
    let row = sqlx::query("SELECT 1 FROM events WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row.is_some())
}

/// All events in insertion order, optionally restricted to one status
pub async fn list(conn: &mut SqliteConnection, status: Option<EventStatus>) -> AppResult<Vec<Event>> {
    let rows = match status {
        Some(status) => {
            sqlx::query(&format!("SELECT {} FROM events WHERE status = ? ORDER BY id", COLUMNS))
                .bind(status.as_str())
                .fetch_all(&mut *conn)
                .await?
        }
        None => {
            sqlx::query(&format!("SELECT {} FROM events ORDER BY id", COLUMNS))
                .fetch_all(&mut *conn)
                .await?
        }
    };
    rows.iter().map(from_row).collect()
}

/// Case-insensitive substring match on name, folded in Rust so accented
/// letters match too
pub async fn search(conn: &mut SqliteConnection, needle: &str) -> AppResult<Vec<Event>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM events WHERE name_folded LIKE ? ESCAPE '\\' ORDER BY id",
        COLUMNS
    ))
    .bind(contains_pattern(&fold_case(needle)))
    .fetch_all(&mut *conn)
    .await?;
    rows.iter().map(from_row).collect()
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM events WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Memberships and wishlist entries that still point at an event
pub async fn count_references(conn: &mut SqliteConnection, id: i64) -> AppResult<(i64, i64)> {
    let members: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM event_members WHERE event_id = ?")
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;
    let wishes: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM event_user_wishlists WHERE event_id = ?")
            .bind(id)
            .fetch_one(&mut *conn)
            .await?;
    Ok((members, wishes))
}

pub async fn insert_image(
    conn: &mut SqliteConnection,
    event_id: i64,
    image: &NewImage,
) -> AppResult<EventImage> {
    let row = sqlx::query(
        "INSERT INTO event_images (event_id, image) VALUES (?, ?) RETURNING id, event_id, image",
    )
    .bind(event_id)
    .bind(&image.image)
    .fetch_one(&mut *conn)
    .await?;
    Ok(EventImage {
        id: row.try_get("id")?,
        event_id: row.try_get("event_id")?,
        image: row.try_get("image")?,
    })
}

fn agenda_from_row(row: &SqliteRow) -> AppResult<EventAgenda> {
    Ok(EventAgenda {
        id: row.try_get("id")?,
        event_id: row.try_get("event_id")?,
        session_name: row.try_get("session_name")?,
        speaker_name: row.try_get("speaker_name")?,
        start_time: row.try_get("start_time")?,
        end_time: row.try_get("end_time")?,
        venue_name: row.try_get("venue_name")?,
    })
}

pub async fn insert_agenda(
    conn: &mut SqliteConnection,
    event_id: i64,
    agenda: &NewAgenda,
) -> AppResult<EventAgenda> {
    let row = sqlx::query(
        "INSERT INTO event_agendas (event_id, session_name, speaker_name, start_time, end_time, venue_name) \
         VALUES (?, ?, ?, ?, ?, ?) \
         RETURNING id, event_id, session_name, speaker_name, start_time, end_time, venue_name",
    )
    .bind(event_id)
    .bind(&agenda.session_name)
    .bind(&agenda.speaker_name)
    .bind(agenda.start_time)
    .bind(agenda.end_time)
    .bind(&agenda.venue_name)
    .fetch_one(&mut *conn)
    .await?;
    agenda_from_row(&row)
}

pub async fn image_for(conn: &mut SqliteConnection, event_id: i64) -> AppResult<Option<EventImage>> {
    let row = sqlx::query("SELECT id, event_id, image FROM event_images WHERE event_id = ? ORDER BY id LIMIT 1")
        .bind(event_id)
        .fetch_optional(&mut *conn)
        .await?;
    match row {
        Some(row) => Ok(Some(EventImage {
            id: row.try_get("id")?,
            event_id: row.try_get("event_id")?,
            image: row.try_get("image")?,
        })),
        None => Ok(None),
    }
}

pub async fn agenda_for(conn: &mut SqliteConnection, event_id: i64) -> AppResult<Option<EventAgenda>> {
    let row = sqlx::query(
        "SELECT id, event_id, session_name, speaker_name, start_time, end_time, venue_name \
         FROM event_agendas WHERE event_id = ? ORDER BY id LIMIT 1",
    )
    .bind(event_id)
    .fetch_optional(&mut *conn)
    .await?;
    row.as_ref().map(agenda_from_row).transpose()
}

/// Row counts of (events, images, agendas)
pub async fn counts(conn: &mut SqliteConnection) -> AppResult<(i64, i64, i64)> {
    let events: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events")
        .fetch_one(&mut *conn)
        .await?;
    let images: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM event_images")
        .fetch_one(&mut *conn)
        .await?;
    let agendas: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM event_agendas")
        .fetch_one(&mut *conn)
        .await?;
    Ok((events, images, agendas))
}
