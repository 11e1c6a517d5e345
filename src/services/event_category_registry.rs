// EventCategory Registry - CRUD over event categories

use std::sync::Arc;
use tracing::info;

use crate::core::UserId;
use crate::error::{AppError, AppResult};
use crate::forms::EventCategoryForm;
use crate::infrastructure::database::Database;
use crate::models::EventCategory;
use crate::store::event_categories;

#[derive(Clone)]
pub struct EventCategoryRegistry {
    db: Arc<Database>,
}

impl EventCategoryRegistry {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn create(&self, form: &EventCategoryForm, acting_user: UserId) -> AppResult<EventCategory> {
        let data = form.clean().map_err(AppError::Validation)?;
        let mut conn = self.db.acquire().await?;
        let category = event_categories::insert(&mut conn, &data, acting_user).await?;
        info!(event_category_id = category.id, code = %category.code, user = %acting_user, "Created event category");
        Ok(category)
    }

    pub async fn update(
        &self,
        id: i64,
        form: &EventCategoryForm,
        acting_user: UserId,
    ) -> AppResult<EventCategory> {
        let data = form.clean().map_err(AppError::Validation)?;
        let mut conn = self.db.acquire().await?;
        let category = event_categories::update(&mut conn, id, &data, acting_user)
            .await?
            .ok_or_else(|| not_found(id))?;
        info!(event_category_id = id, user = %acting_user, "Updated event category");
        Ok(category)
    }

    pub async fn delete(&self, id: i64, acting_user: UserId) -> AppResult<()> {
        let mut conn = self.db.acquire().await?;
        if !event_categories::delete(&mut conn, id).await? {
            return Err(not_found(id));
        }
        info!(event_category_id = id, user = %acting_user, "Deleted event category");
        Ok(())
    }

    pub async fn get(&self, id: i64) -> AppResult<EventCategory> {
        let mut conn = self.db.acquire().await?;
        event_categories::get(&mut conn, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn list(&self) -> AppResult<Vec<EventCategory>> {
        let mut conn = self.db.acquire().await?;
        event_categories::list(&mut conn).await
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Event category with id {} not found", id))
}
