// Membership and wishlist ledger

use std::sync::Arc;
use tracing::info;

use crate::core::UserId;
use crate::error::{AppError, AppResult, FieldErrors};
use crate::forms::{MemberForm, WishForm};
use crate::infrastructure::database::Database;
use crate::models::{AttendStatus, EventMember, EventUserWish};
use crate::store::{events, members, wishes};

#[derive(Clone)]
pub struct MembershipLedger {
    db: Arc<Database>,
}

impl MembershipLedger {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn add_member(&self, form: &MemberForm, acting_user: UserId) -> AppResult<EventMember> {
        let data = form.clean().map_err(AppError::Validation)?;
        let mut conn = self.db.acquire().await?;
        ensure_event(&mut conn, data.event_id).await?;

        let member = members::insert(&mut conn, &data, acting_user).await?;
        info!(
            member_id = member.id,
            event_id = member.event_id,
            member_user = %member.user,
            attend_status = %member.attend_status,
            user = %acting_user,
            "Added event member"
        );
        Ok(member)
    }

    pub async fn remove_member(&self, id: i64, acting_user: UserId) -> AppResult<()> {
        let mut conn = self.db.acquire().await?;
        if !members::delete(&mut conn, id).await? {
            return Err(AppError::NotFound(format!("Event member with id {} not found", id)));
        }
        info!(member_id = id, user = %acting_user, "Removed event member");
        Ok(())
    }

    /// All members, or only those whose attend status is exactly `attend_status`.
    pub async fn list_members(&self, attend_status: Option<AttendStatus>) -> AppResult<Vec<EventMember>> {
        let mut conn = self.db.acquire().await?;
        members::list(&mut conn, attend_status).await
    }

    pub async fn list_absent(&self) -> AppResult<Vec<EventMember>> {
        self.list_members(Some(AttendStatus::Absent)).await
    }

    pub async fn list_completed(&self) -> AppResult<Vec<EventMember>> {
        self.list_members(Some(AttendStatus::Completed)).await
    }

    pub async fn add_wish(&self, form: &WishForm, acting_user: UserId) -> AppResult<EventUserWish> {
        let data = form.clean().map_err(AppError::Validation)?;
        let mut conn = self.db.acquire().await?;
        ensure_event(&mut conn, data.event_id).await?;

        let wish = wishes::insert(&mut conn, &data, acting_user).await?;
        info!(
            wish_id = wish.id,
            event_id = wish.event_id,
            wish_user = %wish.user,
            user = %acting_user,
            "Added wishlist entry"
        );
        Ok(wish)
    }

    pub async fn remove_wish(&self, id: i64, acting_user: UserId) -> AppResult<()> {
        let mut conn = self.db.acquire().await?;
        if !wishes::delete(&mut conn, id).await? {
            return Err(AppError::NotFound(format!("Wishlist entry with id {} not found", id)));
        }
        info!(wish_id = id, user = %acting_user, "Removed wishlist entry");
        Ok(())
    }

    pub async fn list_wishes(&self) -> AppResult<Vec<EventUserWish>> {
        let mut conn = self.db.acquire().await?;
        wishes::list(&mut conn).await
    }
}

// An unknown event is a field error on the form, not a missing resource.
async fn ensure_event(conn: &mut sqlx::SqliteConnection, event_id: i64) -> AppResult<()> {
    if events::exists(conn, event_id).await? {
        Ok(())
    } else {
        Err(AppError::Validation(FieldErrors::single(
            "event",
            "Select a valid choice. That choice is not one of the available choices.",
        )))
    }
}
