// Event Catalog - event records with their image, agenda and job category
//
// Creation writes the event and both sub-records in one unit of work, and
// every write path clears the event category.

use std::sync::Arc;
use tracing::{info, warn};

use crate::config::EventDeletePolicy;
use crate::core::UserId;
use crate::error::{AppError, AppResult};
use crate::forms::{EventCreateForm, EventData, EventStatusForm, EventUpdateForm, NewAgenda};
use crate::infrastructure::database::{commit, Database};
use crate::models::{Event, EventDetail, EventStatus};
use crate::services::job_category_registry::resolve_in;
use crate::store::{events, job_categories};

#[derive(Clone)]
pub struct EventCatalog {
    db: Arc<Database>,
    delete_policy: EventDeletePolicy,
}

impl EventCatalog {
    pub fn new(db: Arc<Database>, delete_policy: EventDeletePolicy) -> Self {
        Self { db, delete_policy }
    }

    /// Validate the event, image and agenda forms together and persist all
    /// three atomically. Nothing is written unless every form is valid.
    pub async fn create_event(
        &self,
        form: &EventCreateForm,
        acting_user: UserId,
    ) -> AppResult<EventDetail> {
        let cleaned = form.clean().map_err(AppError::Validation)?;
        warn_on_inverted_ranges(&cleaned.event, Some(&cleaned.agenda));

        let mut tx = self.db.begin().await?;
        let job_category = resolve_in(&mut tx, cleaned.job_category_name.as_deref()).await?;
        let event = events::insert(
            &mut tx,
            &cleaned.event,
            job_category.as_ref().map(|c| c.id),
            acting_user,
        )
        .await?;
        let image = events::insert_image(&mut tx, event.id, &cleaned.image).await?;
        let agenda = events::insert_agenda(&mut tx, event.id, &cleaned.agenda).await?;
        commit(tx).await?;

        info!(
            event_id = event.id,
            name = %event.name,
            job_category_id = ?event.job_category_id,
            user = %acting_user,
            "Created event"
        );

        Ok(EventDetail {
            event,
            job_category,
            image: Some(image),
            agenda: Some(agenda),
        })
    }

    /// Rewrite an event's fields. A blank job category name keeps the
    /// current one; image and agenda are left untouched.
    pub async fn update_event(
        &self,
        id: i64,
        form: &EventUpdateForm,
        acting_user: UserId,
    ) -> AppResult<Event> {
        let data = form.event.clean().map_err(AppError::Validation)?;
        warn_on_inverted_ranges(&data, None);

        let mut tx = self.db.begin().await?;
        let current = events::get(&mut tx, id).await?.ok_or_else(|| not_found(id))?;
        let job_category_id = match resolve_in(&mut tx, form.job_category_name.as_deref()).await? {
            Some(category) => Some(category.id),
            None => current.job_category_id,
        };
        let event = events::update(&mut tx, id, &data, job_category_id, acting_user)
            .await?
            .ok_or_else(|| not_found(id))?;
        commit(tx).await?;

        info!(event_id = id, user = %acting_user, "Updated event");
        Ok(event)
    }

    pub async fn update_status(
        &self,
        id: i64,
        form: &EventStatusForm,
        acting_user: UserId,
    ) -> AppResult<Event> {
        let status = form.clean().map_err(AppError::Validation)?;
        let mut conn = self.db.acquire().await?;
        let event = events::update_status(&mut conn, id, status, acting_user)
            .await?
            .ok_or_else(|| not_found(id))?;
        info!(event_id = id, status = %status, user = %acting_user, "Updated event status");
        Ok(event)
    }

    /// Hard delete. Image and agenda always go with the event; members and
    /// wishlist entries follow the configured policy.
    pub async fn delete_event(&self, id: i64, acting_user: UserId) -> AppResult<()> {
        let mut tx = self.db.begin().await?;
        if !events::exists(&mut tx, id).await? {
            return Err(not_found(id));
        }

        let (members, wishes) = events::count_references(&mut tx, id).await?;
        if self.delete_policy == EventDeletePolicy::Reject && (members > 0 || wishes > 0) {
            warn!(event_id = id, members, wishes, "Refusing to delete referenced event");
            return Err(AppError::Conflict(format!(
                "Event {} still has {} member(s) and {} wishlist entr{}",
                id,
                members,
                wishes,
                if wishes == 1 { "y" } else { "ies" }
            )));
        }

        events::delete(&mut tx, id).await?;
        commit(tx).await?;

        info!(
            event_id = id,
            cascaded_members = members,
            cascaded_wishes = wishes,
            user = %acting_user,
            "Deleted event"
        );
        Ok(())
    }

    pub async fn get(&self, id: i64) -> AppResult<Event> {
        let mut conn = self.db.acquire().await?;
        events::get(&mut conn, id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn get_detail(&self, id: i64) -> AppResult<EventDetail> {
        let mut conn = self.db.acquire().await?;
        let event = events::get(&mut conn, id).await?.ok_or_else(|| not_found(id))?;
        let job_category = match event.job_category_id {
            Some(job_category_id) => job_categories::get(&mut conn, job_category_id).await?,
            None => None,
        };
        let image = events::image_for(&mut conn, id).await?;
        let agenda = events::agenda_for(&mut conn, id).await?;
        Ok(EventDetail {
            event,
            job_category,
            image,
            agenda,
        })
    }

    pub async fn list(&self, status: Option<EventStatus>) -> AppResult<Vec<Event>> {
        let mut conn = self.db.acquire().await?;
        events::list(&mut conn, status).await
    }

    pub async fn list_completed(&self) -> AppResult<Vec<Event>> {
        self.list(Some(EventStatus::Completed)).await
    }

    /// Row counts of (events, images, agendas)
    pub async fn record_counts(&self) -> AppResult<(i64, i64, i64)> {
        let mut conn = self.db.acquire().await?;
        events::counts(&mut conn).await
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Event with id {} not found", id))
}

// Inverted ranges are accepted as submitted; they are only logged.
fn warn_on_inverted_ranges(event: &EventData, agenda: Option<&NewAgenda>) {
    if event.end_date < event.start_date {
        warn!(
            name = %event.name,
            start_date = %event.start_date,
            end_date = %event.end_date,
            "Event ends before it starts"
        );
    }
    if let Some(agenda) = agenda {
        if agenda.end_time < agenda.start_time {
            warn!(
                session = %agenda.session_name,
                start_time = %agenda.start_time,
                end_time = %agenda.end_time,
                "Agenda session ends before it starts"
            );
        }
    }
}
